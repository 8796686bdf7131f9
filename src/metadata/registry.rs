//! Registry of class descriptors.
//!
//! The [`ClassRegistry`] maps class names to [`ClassDescriptor`]s for every class seen during a
//! scan. Annotation values only name their annotation class, so normalizing nested annotations
//! requires a lookup from name to descriptor; the registry provides that lookup and drives the
//! recursive normalization.
//!
//! # Thread Safety
//!
//! The registry is [`Send`] and [`Sync`]. Classes may be registered from several threads while
//! others look them up.
//!
//! # Examples
//!
//! ```rust
//! use classmeta::metadata::{
//!     annotations::{AnnotationInfo, AnnotationParameter, ParameterValue, ParameterValueList, PrimitiveValue},
//!     classinfo::{ClassDescriptor, ClassModifiers},
//!     registry::ClassRegistry,
//! };
//!
//! let registry = ClassRegistry::new();
//! registry.register(
//!     ClassDescriptor::new("com.example.Ports", ClassModifiers::ANNOTATION).with_method("value", "()[I"),
//! );
//!
//! let mut annotation = AnnotationInfo::new(
//!     "com.example.Ports",
//!     ParameterValueList::from(vec![AnnotationParameter::new(
//!         "value",
//!         ParameterValue::ObjectArray(vec![ParameterValue::Primitive(PrimitiveValue::Int(80))]),
//!     )]),
//! );
//! registry.normalize_annotation(&mut annotation)?;
//! # Ok::<(), classmeta::Error>(())
//! ```

use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use crate::{
    metadata::{
        annotations::{AnnotationInfo, ParameterValue},
        classinfo::{ClassDescriptor, ClassDescriptorRc},
        config::NormalizationConfig,
    },
    Error, Result,
};

/// Concurrent map from class name to [`ClassDescriptor`]
pub struct ClassRegistry {
    classes: DashMap<String, ClassDescriptorRc>,
    /// Class names in registration order, first registration only
    order: boxcar::Vec<String>,
    config: NormalizationConfig,
}

impl ClassRegistry {
    /// Create an empty registry with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NormalizationConfig::default())
    }

    /// Create an empty registry with the given normalization configuration
    #[must_use]
    pub fn with_config(config: NormalizationConfig) -> Self {
        ClassRegistry {
            classes: DashMap::new(),
            order: boxcar::Vec::new(),
            config,
        }
    }

    /// The normalization configuration
    #[must_use]
    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Register a class, replacing any previous descriptor with the same name
    pub fn register(&self, class: ClassDescriptor) -> ClassDescriptorRc {
        let name = class.name.clone();
        let class = Arc::new(class);
        if self.classes.insert(name.clone(), class.clone()).is_none() {
            trace!(class = %name, "registered class");
            self.order.push(name);
        }
        class
    }

    /// Look up a class by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ClassDescriptorRc> {
        self.classes.get(name).map(|entry| entry.value().clone())
    }

    /// Returns true if a class with this name is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered class names, in order of first registration
    #[must_use]
    pub fn class_names(&self) -> Vec<String> {
        self.order.iter().map(|(_, name)| name.clone()).collect()
    }

    /// Normalize the wrapper arrays of `annotation` and of every annotation nested in it
    ///
    /// Each annotation is converted against its own registered class.
    ///
    /// # Errors
    /// - [`Error::ClassNotFound`] for an unregistered annotation class under
    ///   `strict_class_lookup`
    /// - [`Error::RecursionLimit`] if nesting exceeds `max_nesting_depth`
    /// - any error of [`crate::metadata::annotations::AnnotationParameter::convert_wrapper_arrays_with`]
    pub fn normalize_annotation(&self, annotation: &mut AnnotationInfo) -> Result<()> {
        self.normalize_at_depth(annotation, 0)
    }

    fn normalize_at_depth(&self, annotation: &mut AnnotationInfo, depth: usize) -> Result<()> {
        if depth > self.config.max_nesting_depth {
            return Err(Error::RecursionLimit(self.config.max_nesting_depth));
        }

        match self.get(annotation.name()) {
            Some(class) => annotation
                .parameter_values_mut()
                .convert_wrapper_arrays_with(&class, &self.config)?,
            None if self.config.strict_class_lookup => {
                return Err(Error::ClassNotFound(annotation.name().to_string()))
            }
            None => trace!(annotation = %annotation.name(), "skipping unregistered annotation class"),
        }

        for entry in annotation.parameter_values_mut().iter_mut() {
            match entry.value_mut() {
                ParameterValue::Annotation(nested) => self.normalize_at_depth(nested, depth + 1)?,
                ParameterValue::ObjectArray(items) => {
                    for item in items {
                        if let ParameterValue::Annotation(nested) = item {
                            self.normalize_at_depth(nested, depth + 1)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
