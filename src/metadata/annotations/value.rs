//! Annotation parameter value types.
//!
//! These types represent the value half of an annotation `element_value_pair`
//! (JVMS §4.7.16.1). Arrays are first read as [`ParameterValue::ObjectArray`] holding boxed
//! elements, because the `element_value` encoding does not say whether an `int[]` or an
//! `Integer[]`-like object array was declared. Once the annotation class is known, arrays
//! declared with a primitive element type are rewritten into [`PrimitiveArray`].

use std::collections::HashSet;

use crate::{
    metadata::{
        annotations::AnnotationInfo,
        typesig::{parse_type_descriptor, PrimitiveKind, TypeDescriptor},
    },
    Error, Result,
};

/// A single boxed primitive constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue {
    /// `boolean`
    Boolean(bool),
    /// `byte`
    Byte(i8),
    /// `char`, a UTF-16 code unit; lone surrogates are valid
    Char(u16),
    /// `short`
    Short(i16),
    /// `int`
    Int(i32),
    /// `long`
    Long(i64),
    /// `float`
    Float(f32),
    /// `double`
    Double(f64),
}

impl PrimitiveValue {
    /// The primitive type of this value
    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveValue::Boolean(_) => PrimitiveKind::Boolean,
            PrimitiveValue::Byte(_) => PrimitiveKind::Byte,
            PrimitiveValue::Char(_) => PrimitiveKind::Char,
            PrimitiveValue::Short(_) => PrimitiveKind::Short,
            PrimitiveValue::Int(_) => PrimitiveKind::Int,
            PrimitiveValue::Long(_) => PrimitiveKind::Long,
            PrimitiveValue::Float(_) => PrimitiveKind::Float,
            PrimitiveValue::Double(_) => PrimitiveKind::Double,
        }
    }
}

/// A 1-dimensional array of a primitive type
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveArray {
    /// `boolean[]`
    Boolean(Vec<bool>),
    /// `byte[]`
    Byte(Vec<i8>),
    /// `char[]`, UTF-16 code units
    Char(Vec<u16>),
    /// `short[]`
    Short(Vec<i16>),
    /// `int[]`
    Int(Vec<i32>),
    /// `long[]`
    Long(Vec<i64>),
    /// `float[]`
    Float(Vec<f32>),
    /// `double[]`
    Double(Vec<f64>),
}

macro_rules! unbox_elements {
    ($items:expr, $parameter:expr, $kind:expr, $variant:ident) => {
        PrimitiveArray::$variant(
            $items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    ParameterValue::Primitive(PrimitiveValue::$variant(value)) => Ok(*value),
                    _ => Err(Error::ArrayElementMismatch {
                        parameter: $parameter.to_string(),
                        index,
                        expected: $kind,
                    }),
                })
                .collect::<Result<Vec<_>>>()?,
        )
    };
}

impl PrimitiveArray {
    /// Unbox `items` into a primitive array of `kind`, keeping length and order
    ///
    /// `parameter` is only used to name the offending parameter in errors.
    ///
    /// # Errors
    /// Returns [`Error::ArrayElementMismatch`] if any element is not a boxed `kind`.
    pub fn from_boxed(kind: PrimitiveKind, items: &[ParameterValue], parameter: &str) -> Result<Self> {
        Ok(match kind {
            PrimitiveKind::Boolean => unbox_elements!(items, parameter, kind, Boolean),
            PrimitiveKind::Byte => unbox_elements!(items, parameter, kind, Byte),
            PrimitiveKind::Char => unbox_elements!(items, parameter, kind, Char),
            PrimitiveKind::Short => unbox_elements!(items, parameter, kind, Short),
            PrimitiveKind::Int => unbox_elements!(items, parameter, kind, Int),
            PrimitiveKind::Long => unbox_elements!(items, parameter, kind, Long),
            PrimitiveKind::Float => unbox_elements!(items, parameter, kind, Float),
            PrimitiveKind::Double => unbox_elements!(items, parameter, kind, Double),
        })
    }

    /// The element type
    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveArray::Boolean(_) => PrimitiveKind::Boolean,
            PrimitiveArray::Byte(_) => PrimitiveKind::Byte,
            PrimitiveArray::Char(_) => PrimitiveKind::Char,
            PrimitiveArray::Short(_) => PrimitiveKind::Short,
            PrimitiveArray::Int(_) => PrimitiveKind::Int,
            PrimitiveArray::Long(_) => PrimitiveKind::Long,
            PrimitiveArray::Float(_) => PrimitiveKind::Float,
            PrimitiveArray::Double(_) => PrimitiveKind::Double,
        }
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            PrimitiveArray::Boolean(v) => v.len(),
            PrimitiveArray::Byte(v) => v.len(),
            PrimitiveArray::Char(v) => v.len(),
            PrimitiveArray::Short(v) => v.len(),
            PrimitiveArray::Int(v) => v.len(),
            PrimitiveArray::Long(v) => v.len(),
            PrimitiveArray::Float(v) => v.len(),
            PrimitiveArray::Double(v) => v.len(),
        }
    }

    /// Returns true if the array has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A reference to an enum constant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationEnumValue {
    class_name: String,
    const_name: String,
}

impl AnnotationEnumValue {
    /// Create a new enum constant reference
    pub fn new(class_name: impl Into<String>, const_name: impl Into<String>) -> Self {
        AnnotationEnumValue {
            class_name: class_name.into(),
            const_name: const_name.into(),
        }
    }

    /// The enum class name
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The constant name
    #[must_use]
    pub fn const_name(&self) -> &str {
        &self.const_name
    }

    /// The fully qualified constant name, `class_name.const_name`
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}.{}", self.class_name, self.const_name)
    }
}

/// A class literal, e.g. `String.class` or `int[].class`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationClassRef {
    type_descriptor: TypeDescriptor,
}

impl AnnotationClassRef {
    /// Reference a class by its `.` separated name
    pub fn new(class_name: impl Into<String>) -> Self {
        AnnotationClassRef {
            type_descriptor: TypeDescriptor::Class(class_name.into()),
        }
    }

    /// Build a reference from the raw `class_info_index` descriptor, e.g. `Lcom/example/Foo;`
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the descriptor cannot be parsed.
    pub fn from_descriptor(descriptor: &str) -> Result<Self> {
        Ok(AnnotationClassRef {
            type_descriptor: parse_type_descriptor(descriptor)?,
        })
    }

    /// The referenced type
    #[must_use]
    pub fn type_descriptor(&self) -> &TypeDescriptor {
        &self.type_descriptor
    }

    /// The name of the referenced type, as it would be written in source
    #[must_use]
    pub fn name(&self) -> String {
        self.type_descriptor.to_string()
    }
}

/// The value of one annotation parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// String constant
    String(String),
    /// Boxed primitive constant
    Primitive(PrimitiveValue),
    /// 1-dimensional primitive array, after normalization
    PrimitiveArray(PrimitiveArray),
    /// Array of values as read from the class file
    ObjectArray(Vec<ParameterValue>),
    /// Enum constant
    Enum(AnnotationEnumValue),
    /// Class literal
    ClassRef(AnnotationClassRef),
    /// Nested annotation
    Annotation(Box<AnnotationInfo>),
}

impl ParameterValue {
    /// Add the names of all classes this value refers to, directly or through nesting
    pub fn find_referenced_class_names(&self, referenced_class_names: &mut HashSet<String>) {
        match self {
            ParameterValue::Enum(enum_value) => {
                referenced_class_names.insert(enum_value.class_name().to_string());
            }
            ParameterValue::ClassRef(class_ref) => {
                class_ref
                    .type_descriptor()
                    .find_referenced_class_names(referenced_class_names);
            }
            ParameterValue::Annotation(annotation) => {
                annotation.find_referenced_class_names(referenced_class_names);
            }
            ParameterValue::ObjectArray(items) => {
                for item in items {
                    item.find_referenced_class_names(referenced_class_names);
                }
            }
            ParameterValue::String(_)
            | ParameterValue::Primitive(_)
            | ParameterValue::PrimitiveArray(_) => {}
        }
    }
}

impl From<PrimitiveValue> for ParameterValue {
    fn from(value: PrimitiveValue) -> Self {
        ParameterValue::Primitive(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<AnnotationInfo> for ParameterValue {
    fn from(value: AnnotationInfo) -> Self {
        ParameterValue::Annotation(Box::new(value))
    }
}
