use thiserror::Error;

use crate::metadata::typesig::PrimitiveKind;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every error is raised synchronously by the call that detected it, before any state change
/// was made. None of them are transient: retrying the same call with the same input fails the
/// same way.
///
/// # Error Categories
///
/// ## List Errors
/// - [`Error::InvalidOperation`] - Mutation attempted on the immutable empty list
/// - [`Error::IndexOutOfBounds`] - Positional access outside the list
///
/// ## Descriptor Errors
/// - [`Error::Malformed`] - Unparsable type or method descriptor
///
/// ## Normalization Errors
/// - [`Error::UnexpectedMethodCount`] - Parameter maps to several annotation methods
/// - [`Error::ArrayTypeMismatch`] - Array value for a method that does not return an array
/// - [`Error::MultiDimensionalArray`] - Declared parameter type has more than one dimension
/// - [`Error::ArrayElementMismatch`] - Boxed element does not match the declared primitive
/// - [`Error::ClassNotFound`] - Annotation class missing from the registry
/// - [`Error::RecursionLimit`] - Nested annotations exceeded the configured depth
///
/// # Examples
///
/// ```rust
/// use classmeta::{Error, metadata::annotations::ParameterValueList};
///
/// let mut list = ParameterValueList::empty_list().clone();
/// match list.clear() {
///     Err(Error::InvalidOperation(message)) => println!("rejected: {}", message),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A mutating operation was invoked on an immutable list.
    ///
    /// Only the shared empty list is immutable. The call performs no state change.
    #[error("Invalid operation - {0}")]
    InvalidOperation(&'static str),

    /// A positional operation referenced an index outside the list.
    #[error("Index {index} is out of bounds for list of length {len}")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The length of the list at the time of the call
        len: usize,
    },

    /// The input is damaged and could not be parsed.
    ///
    /// Raised for type and method descriptors that do not follow the JVM descriptor
    /// grammar. The error includes the source location where the malformation was detected
    /// for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An array-valued parameter resolved to more than one method on the annotation class.
    #[error("Annotation class {class} has {count} methods named {method}, expected exactly one")]
    UnexpectedMethodCount {
        /// Name of the annotation class
        class: String,
        /// Name of the parameter / method
        method: String,
        /// Number of methods found with that name
        count: usize,
    },

    /// A parameter holds an array, but its method declares a non-array return type.
    #[error("Annotation class {class} declares {method} as {declared}, but the value is an array")]
    ArrayTypeMismatch {
        /// Name of the annotation class
        class: String,
        /// Name of the parameter / method
        method: String,
        /// The declared return type
        declared: String,
    },

    /// Annotation parameters only support 1-dimensional arrays.
    #[error("Annotation class {class} declares {method} with {dimensions} array dimensions, only 1 is supported")]
    MultiDimensionalArray {
        /// Name of the annotation class
        class: String,
        /// Name of the parameter / method
        method: String,
        /// Number of declared array dimensions
        dimensions: usize,
    },

    /// A boxed array element does not match the declared primitive element type.
    #[error("Element {index} of parameter {parameter} is not a boxed {expected}")]
    ArrayElementMismatch {
        /// Name of the parameter holding the array
        parameter: String,
        /// Position of the offending element
        index: usize,
        /// The declared element type
        expected: PrimitiveKind,
    },

    /// The requested class is not known to the registry.
    #[error("Failed to find class in registry - {0}")]
    ClassNotFound(String),

    /// Recursion limit reached.
    ///
    /// Registry-driven normalization descends into nested annotation values; the depth of
    /// that descent is bounded by the configuration. The associated value shows the limit.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
