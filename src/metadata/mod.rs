//! JVM class metadata relevant to annotations.
//!
//! - [`annotations`] - Parameter lists, values and annotation instances
//! - [`classinfo`] - Class and method descriptors of annotation classes
//! - [`typesig`] - JVM field and method descriptor parsing
//! - [`registry`] - Concurrent lookup of class descriptors by name
//! - [`config`] - Normalization options

pub mod annotations;
pub mod classinfo;
pub mod config;
pub mod registry;
pub mod typesig;
