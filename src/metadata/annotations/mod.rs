//! Annotation parameters and their values.
//!
//! This module models the `element_value_pairs` of JVM annotations (JVMS §4.7.16) after
//! they have been read from a class file.
//!
//! # Key Types
//!
//! - [`ParameterValueList`] - Ordered list of parameters with lookup by name, including the
//!   shared immutable [`ParameterValueList::empty_list`]
//! - [`AnnotationParameter`] - One name/value pair
//! - [`ParameterValue`] - The value model: strings, boxed primitives, arrays, enum constants,
//!   class references and nested annotations
//! - [`AnnotationInfo`] - An annotation instance, usable as a nested value
//!
//! # Processing Steps
//!
//! After a class file parser has produced a list, two passes operate on it:
//!
//! - **Array normalization** - [`ParameterValueList::convert_wrapper_arrays_to_primitive_arrays`]
//!   rewrites arrays of boxed primitives into primitive arrays, once the annotation class
//!   tells which parameters are declared as e.g. `int[]`. This happens before the list is
//!   handed to any other reader.
//! - **Reference discovery** - [`ParameterValueList::find_referenced_class_names`] collects
//!   every class named by the values, through arrays and nested annotations, for building a
//!   class dependency graph.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashSet;
//! use classmeta::metadata::annotations::{
//!     AnnotationClassRef, AnnotationParameter, ParameterValue, ParameterValueList,
//! };
//!
//! let list = ParameterValueList::from(vec![AnnotationParameter::new(
//!     "handler",
//!     ParameterValue::ClassRef(AnnotationClassRef::new("com.example.Handler")),
//! )]);
//!
//! let mut referenced = HashSet::new();
//! list.find_referenced_class_names(&mut referenced);
//! assert!(referenced.contains("com.example.Handler"));
//! ```

mod info;
mod list;
mod parameter;
mod value;

pub use info::AnnotationInfo;
pub use list::ParameterValueList;
pub use parameter::AnnotationParameter;
pub use value::*;
