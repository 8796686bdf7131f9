//! Class metadata consulted during annotation processing.
//!
//! A [`ClassDescriptor`] carries the subset of a class file that annotation handling needs:
//! the class name, its access flags, the declared methods (for an annotation type, one per
//! parameter) and the `AnnotationDefault` values of those methods.
//!
//! # Examples
//!
//! ```rust
//! use classmeta::metadata::classinfo::{ClassDescriptor, ClassModifiers};
//!
//! let retention = ClassDescriptor::new("com.example.Retry", ClassModifiers::ANNOTATION)
//!     .with_method("attempts", "()I")
//!     .with_method("codes", "()[I");
//!
//! assert!(retention.is_annotation());
//! assert_eq!(retention.methods_named("codes").count(), 1);
//! ```

use std::sync::Arc;

use bitflags::bitflags;

use crate::{
    metadata::{
        annotations::{AnnotationParameter, ParameterValueList},
        typesig::{parse_method_descriptor, TypeDescriptor},
    },
    Result,
};

/// A reference-counted pointer to a `ClassDescriptor`
pub type ClassDescriptorRc = Arc<ClassDescriptor>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Class access and property flags (JVMS §4.1, `access_flags`)
    pub struct ClassModifiers: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared final
        const FINAL = 0x0010;
        /// Treat superclass methods specially on invokespecial
        const SUPER = 0x0020;
        /// Is an interface
        const INTERFACE = 0x0200;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// Not present in source code
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface
        const ANNOTATION = 0x2000;
        /// Declared as an enum class
        const ENUM = 0x4000;
    }
}

/// A method declared by a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Simple method name
    pub name: String,
    /// JVM method descriptor, e.g. `()[I`
    pub descriptor: String,
}

impl MethodDescriptor {
    /// Create a new method entry
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        MethodDescriptor {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Parse and return the declared return type
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the descriptor cannot be parsed.
    pub fn return_type(&self) -> Result<TypeDescriptor> {
        let (_, return_type) = parse_method_descriptor(&self.descriptor)?;
        Ok(return_type)
    }
}

/// Class metadata used to interpret annotation parameters
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    /// Fully qualified class name, `.` separated
    pub name: String,
    /// Access flags
    pub modifiers: ClassModifiers,
    /// Declared methods, in declaration order
    pub methods: Vec<MethodDescriptor>,
    /// `AnnotationDefault` values of the annotation methods
    pub annotation_defaults: ParameterValueList,
}

impl ClassDescriptor {
    /// Create a descriptor with no methods
    pub fn new(name: impl Into<String>, modifiers: ClassModifiers) -> Self {
        ClassDescriptor {
            name: name.into(),
            modifiers,
            methods: Vec::new(),
            annotation_defaults: ParameterValueList::new(),
        }
    }

    /// Add a declared method
    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        self.methods.push(MethodDescriptor::new(name, descriptor));
        self
    }

    /// Add a default value for one of the annotation methods
    ///
    /// An immutable `annotation_defaults` (the shared empty list) is replaced by a new
    /// mutable list holding `default`.
    #[must_use]
    pub fn with_default(mut self, default: AnnotationParameter) -> Self {
        self.annotation_defaults = self
            .annotation_defaults
            .into_iter()
            .chain(std::iter::once(default))
            .collect();
        self
    }

    /// Returns true if this class is an annotation interface
    #[must_use]
    pub fn is_annotation(&self) -> bool {
        self.modifiers.contains(ClassModifiers::ANNOTATION)
    }

    /// Iterate over the declared methods with the given name
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDescriptor> + 'a {
        self.methods.iter().filter(move |method| method.name == name)
    }
}
