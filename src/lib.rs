// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # classmeta
//!
//! A typed model of JVM annotation metadata as found in compiled class files.
//!
//! Annotation parameters are read from a class file as ordered name/value pairs. `classmeta`
//! stores them in a [`metadata::annotations::ParameterValueList`], provides lookup by name,
//! discovers every class the values refer to (through arrays and nested annotations), and
//! rewrites arrays of boxed primitives into primitive arrays once the declaring annotation class
//! is known.
//!
//! ## Features
//!
//! - **Ordered, name-keyed parameter lists** - declaration order is preserved, lookup returns
//!   the first parameter with a given name
//! - **Shared immutable empty list** - a single process-wide instance for "no parameters", safe
//!   to iterate from any number of threads
//! - **Reference discovery** - transitive collection of referenced class names
//! - **Array normalization** - boxed `Object[]` arrays become `int[]`, `long[]`, ... according
//!   to the annotation method's declared return type
//! - **Descriptor parsing** - JVM field and method descriptors
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashSet;
//! use classmeta::prelude::*;
//!
//! let class = ClassDescriptor::new("com.example.Route", ClassModifiers::ANNOTATION)
//!     .with_method("path", "()Ljava/lang/String;")
//!     .with_method("ports", "()[I")
//!     .with_method("handler", "()Ljava/lang/Class;");
//!
//! let mut params = ParameterValueList::with_capacity(3);
//! params.push(AnnotationParameter::new("path", ParameterValue::from("/users")))?;
//! params.push(AnnotationParameter::new(
//!     "ports",
//!     ParameterValue::ObjectArray(vec![PrimitiveValue::Int(80).into(), PrimitiveValue::Int(443).into()]),
//! ))?;
//! params.push(AnnotationParameter::new(
//!     "handler",
//!     ParameterValue::ClassRef(AnnotationClassRef::from_descriptor("Lcom/example/UserHandler;")?),
//! ))?;
//!
//! params.convert_wrapper_arrays_to_primitive_arrays(&class)?;
//! assert_eq!(
//!     params.get_value("ports"),
//!     Some(&ParameterValue::PrimitiveArray(PrimitiveArray::Int(vec![80, 443])))
//! );
//!
//! let mut referenced = HashSet::new();
//! params.find_referenced_class_names(&mut referenced);
//! assert!(referenced.contains("com.example.UserHandler"));
//! # Ok::<(), classmeta::Error>(())
//! ```
//!
//! ## Logging
//!
//! `classmeta` emits [`tracing`] events (array conversions at `debug`, registry decisions at
//! `trace`). No subscriber is installed by the library.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use classmeta::{Error, metadata::typesig::parse_type_descriptor};
//!
//! match parse_type_descriptor("Ljava/lang/String") {
//!     Ok(desc) => println!("parsed {}", desc),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use classmeta::prelude::*;
///
/// let empty = ParameterValueList::empty_list();
/// assert!(empty.is_empty());
/// ```
pub mod prelude;

/// Class, annotation and descriptor metadata
///
/// # Key Components
///
/// - [`metadata::annotations`] - Parameter lists and values
/// - [`metadata::classinfo`] - Annotation class descriptors
/// - [`metadata::typesig`] - JVM descriptors
/// - [`metadata::registry`] - Concurrent class lookup and nested normalization
/// - [`metadata::config`] - Normalization options
pub mod metadata;

/// `classmeta` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `classmeta` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;
