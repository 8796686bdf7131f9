//! JVM field and method descriptors.
//!
//! Annotation parameters are declared as methods on the annotation class; the return type
//! of that method, encoded as a JVM descriptor (JVMS §4.3), decides how a parameter value
//! is represented. This module parses those descriptors into [`TypeDescriptor`] values.
//!
//! # Grammar
//!
//! ```text
//! FieldType      := BaseType | 'L' ClassName ';' | '[' FieldType
//! BaseType       := 'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z'
//! MethodDesc     := '(' FieldType* ')' ( FieldType | 'V' )
//! ```
//!
//! # Examples
//!
//! ```rust
//! use classmeta::metadata::typesig::{parse_type_descriptor, PrimitiveKind, TypeDescriptor};
//!
//! let desc = parse_type_descriptor("[I")?;
//! assert_eq!(desc.primitive_array_element(), Some(PrimitiveKind::Int));
//! # Ok::<(), classmeta::Error>(())
//! ```

use std::{collections::HashSet, fmt};

use strum::{EnumIter, IntoEnumIterator};

use crate::Result;

/// The eight JVM primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum PrimitiveKind {
    /// `boolean` (`Z`)
    #[strum(serialize = "boolean")]
    Boolean,
    /// `byte` (`B`)
    #[strum(serialize = "byte")]
    Byte,
    /// `char` (`C`)
    #[strum(serialize = "char")]
    Char,
    /// `short` (`S`)
    #[strum(serialize = "short")]
    Short,
    /// `int` (`I`)
    #[strum(serialize = "int")]
    Int,
    /// `long` (`J`)
    #[strum(serialize = "long")]
    Long,
    /// `float` (`F`)
    #[strum(serialize = "float")]
    Float,
    /// `double` (`D`)
    #[strum(serialize = "double")]
    Double,
}

impl PrimitiveKind {
    /// The single-character descriptor of this primitive
    #[must_use]
    pub fn descriptor_char(self) -> char {
        match self {
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
        }
    }

    /// Resolve a descriptor character, `None` if it does not name a primitive
    #[must_use]
    pub fn from_descriptor_char(c: char) -> Option<Self> {
        PrimitiveKind::iter().find(|kind| kind.descriptor_char() == c)
    }
}

/// A parsed JVM type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// `V`, only valid as a method return type
    Void,
    /// One of the eight primitive types
    Primitive(PrimitiveKind),
    /// A class or interface, stored with `.` separators
    Class(String),
    /// An array; `element` is never itself an array
    Array {
        /// Number of `[` prefixes
        dimensions: usize,
        /// The innermost element type
        element: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Returns the element kind if this is a 1-dimensional primitive array
    #[must_use]
    pub fn primitive_array_element(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDescriptor::Array {
                dimensions: 1,
                element,
            } => match **element {
                TypeDescriptor::Primitive(kind) => Some(kind),
                _ => None,
            },
            _ => None,
        }
    }

    /// Add the names of all classes this descriptor refers to
    pub fn find_referenced_class_names(&self, referenced_class_names: &mut HashSet<String>) {
        match self {
            TypeDescriptor::Class(name) => {
                referenced_class_names.insert(name.clone());
            }
            TypeDescriptor::Array { element, .. } => {
                element.find_referenced_class_names(referenced_class_names);
            }
            TypeDescriptor::Void | TypeDescriptor::Primitive(_) => {}
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Void => write!(f, "void"),
            TypeDescriptor::Primitive(kind) => write!(f, "{}", kind),
            TypeDescriptor::Class(name) => write!(f, "{}", name),
            TypeDescriptor::Array {
                dimensions,
                element,
            } => {
                write!(f, "{}", element)?;
                for _ in 0..*dimensions {
                    write!(f, "[]")?;
                }
                Ok(())
            }
        }
    }
}

/// Cursor over descriptor text
struct DescriptorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> DescriptorParser<'a> {
    fn new(input: &'a str) -> Self {
        DescriptorParser { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(malformed_error!(
                "Expected '{}' at offset {} of '{}', found '{}'",
                expected,
                self.pos - c.len_utf8(),
                self.input,
                c
            )),
            None => Err(malformed_error!(
                "Expected '{}' but '{}' ended",
                expected,
                self.input
            )),
        }
    }

    fn parse_field_type(&mut self) -> Result<TypeDescriptor> {
        let mut dimensions = 0;
        while self.peek() == Some('[') {
            self.pos += 1;
            dimensions += 1;
        }

        let element = match self.advance() {
            Some('L') => {
                let rest = &self.input[self.pos..];
                let Some(end) = rest.find(';') else {
                    return Err(malformed_error!(
                        "Unterminated class name in '{}'",
                        self.input
                    ));
                };
                if end == 0 {
                    return Err(malformed_error!("Empty class name in '{}'", self.input));
                }
                let name = rest[..end].replace('/', ".");
                self.pos += end + 1;
                TypeDescriptor::Class(name)
            }
            Some(c) => match PrimitiveKind::from_descriptor_char(c) {
                Some(kind) => TypeDescriptor::Primitive(kind),
                None => {
                    return Err(malformed_error!(
                        "Invalid type character '{}' in '{}'",
                        c,
                        self.input
                    ))
                }
            },
            None => {
                return Err(malformed_error!(
                    "Unexpected end of descriptor '{}'",
                    self.input
                ))
            }
        };

        if dimensions == 0 {
            Ok(element)
        } else {
            Ok(TypeDescriptor::Array {
                dimensions,
                element: Box::new(element),
            })
        }
    }

    fn finish(&self) -> Result<()> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(malformed_error!(
                "Trailing characters at offset {} of '{}'",
                self.pos,
                self.input
            ))
        }
    }
}

/// Parse a field descriptor such as `I`, `[J` or `Ljava/lang/String;`
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the text is not exactly one field descriptor.
pub fn parse_type_descriptor(descriptor: &str) -> Result<TypeDescriptor> {
    let mut parser = DescriptorParser::new(descriptor);
    let parsed = parser.parse_field_type()?;
    parser.finish()?;
    Ok(parsed)
}

/// Parse a method descriptor such as `()[I` into its parameter and return types
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the text is not a well-formed method descriptor.
pub fn parse_method_descriptor(descriptor: &str) -> Result<(Vec<TypeDescriptor>, TypeDescriptor)> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.expect('(')?;

    let mut params = Vec::new();
    loop {
        match parser.peek() {
            Some(')') => {
                parser.pos += 1;
                break;
            }
            Some(_) => params.push(parser.parse_field_type()?),
            None => {
                return Err(malformed_error!(
                    "Missing ')' in method descriptor '{}'",
                    descriptor
                ))
            }
        }
    }

    let return_type = if parser.peek() == Some('V') {
        parser.pos += 1;
        TypeDescriptor::Void
    } else {
        parser.parse_field_type()?
    };
    parser.finish()?;

    Ok((params, return_type))
}
