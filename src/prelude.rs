//! # classmeta Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! classmeta library. Import this module to get quick access to the essential types for
//! working with annotation parameters.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all classmeta operations
pub use crate::Error;

/// The result type used throughout classmeta
pub use crate::Result;

/// Configuration for array normalization
pub use crate::metadata::config::NormalizationConfig;

// ================================================================================================
// Annotation Parameters
// ================================================================================================

/// Parameter lists, entries and values
pub use crate::metadata::annotations::{
    AnnotationClassRef, AnnotationEnumValue, AnnotationInfo, AnnotationParameter, ParameterValue,
    ParameterValueList, PrimitiveArray, PrimitiveValue,
};

// ================================================================================================
// Class Metadata
// ================================================================================================

/// Annotation class descriptors
pub use crate::metadata::classinfo::{
    ClassDescriptor, ClassDescriptorRc, ClassModifiers, MethodDescriptor,
};

/// Class registry
pub use crate::metadata::registry::ClassRegistry;

/// JVM descriptors
pub use crate::metadata::typesig::{
    parse_method_descriptor, parse_type_descriptor, PrimitiveKind, TypeDescriptor,
};
