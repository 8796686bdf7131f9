use std::collections::HashSet;

use crate::metadata::{annotations::ParameterValueList, classinfo::ClassDescriptor};

/// An annotation instance: the annotation class name plus the explicitly given parameters
///
/// Appears both as a top-level annotation on a class, method or field, and nested as the
/// value of another annotation's parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationInfo {
    name: String,
    parameters: ParameterValueList,
}

impl AnnotationInfo {
    /// Create an annotation with the given explicit parameters
    pub fn new(name: impl Into<String>, parameters: ParameterValueList) -> Self {
        AnnotationInfo {
            name: name.into(),
            parameters,
        }
    }

    /// Create an annotation without explicit parameters
    pub fn marker(name: impl Into<String>) -> Self {
        Self::new(name, ParameterValueList::empty_list().clone())
    }

    /// The annotation class name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicitly given parameters, in class file order
    #[must_use]
    pub fn parameter_values(&self) -> &ParameterValueList {
        &self.parameters
    }

    pub(crate) fn parameter_values_mut(&mut self) -> &mut ParameterValueList {
        &mut self.parameters
    }

    /// Merge the explicit parameters with the defaults declared by `annotation_class`
    ///
    /// Explicit values override defaults. Parameters are ordered by the declaration order
    /// of the annotation methods, followed by any explicit parameters that have no declaring
    /// method. If neither side has parameters, the shared empty list is returned.
    #[must_use]
    pub fn parameter_values_with_defaults(
        &self,
        annotation_class: &ClassDescriptor,
    ) -> ParameterValueList {
        let defaults = &annotation_class.annotation_defaults;
        if defaults.is_empty() && self.parameters.is_empty() {
            return ParameterValueList::empty_list().clone();
        }
        if defaults.is_empty() {
            return self.parameters.clone();
        }

        let mut merged = Vec::with_capacity(defaults.len() + self.parameters.len());
        let mut seen = HashSet::new();
        for method in &annotation_class.methods {
            if !seen.insert(method.name.as_str()) {
                continue;
            }
            let entry = self
                .parameters
                .get(&method.name)
                .or_else(|| defaults.get(&method.name));
            if let Some(entry) = entry {
                merged.push(entry.clone());
            }
        }
        for entry in &self.parameters {
            if seen.insert(entry.name()) {
                merged.push(entry.clone());
            }
        }
        // Defaults for methods missing from the descriptor
        for entry in defaults {
            if seen.insert(entry.name()) {
                merged.push(entry.clone());
            }
        }

        ParameterValueList::from(merged)
    }

    /// Add the annotation class name and every class referenced by its parameters
    pub fn find_referenced_class_names(&self, referenced_class_names: &mut HashSet<String>) {
        referenced_class_names.insert(self.name.clone());
        self.parameters
            .find_referenced_class_names(referenced_class_names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        annotations::{AnnotationEnumValue, AnnotationParameter, ParameterValue, PrimitiveValue},
        classinfo::ClassModifiers,
    };

    fn retry_class() -> ClassDescriptor {
        ClassDescriptor::new("com.example.Retry", ClassModifiers::ANNOTATION)
            .with_method("attempts", "()I")
            .with_method("backoff", "()Lcom/example/Backoff;")
            .with_method("reason", "()Ljava/lang/String;")
            .with_default(AnnotationParameter::new(
                "attempts",
                ParameterValue::Primitive(PrimitiveValue::Int(3)),
            ))
            .with_default(AnnotationParameter::new(
                "backoff",
                ParameterValue::Enum(AnnotationEnumValue::new("com.example.Backoff", "LINEAR")),
            ))
    }

    #[test]
    fn test_marker_is_empty_singleton() {
        let marker = AnnotationInfo::marker("com.example.Marker");
        assert!(marker.parameter_values().is_empty());
        assert!(marker.parameter_values().is_immutable());
    }

    #[test]
    fn test_defaults_merged_in_declaration_order() {
        let annotation = AnnotationInfo::new(
            "com.example.Retry",
            ParameterValueList::from(vec![
                AnnotationParameter::new("reason", ParameterValue::from("flaky")),
                AnnotationParameter::new(
                    "attempts",
                    ParameterValue::Primitive(PrimitiveValue::Int(5)),
                ),
            ]),
        );

        let merged = annotation.parameter_values_with_defaults(&retry_class());
        assert_eq!(merged.names(), vec!["attempts", "backoff", "reason"]);
        assert_eq!(
            merged.get_value("attempts"),
            Some(&ParameterValue::Primitive(PrimitiveValue::Int(5)))
        );
        assert!(!merged.is_immutable());
    }

    #[test]
    fn test_defaults_without_any_values() {
        let class = ClassDescriptor::new("com.example.Marker", ClassModifiers::ANNOTATION);
        let merged = AnnotationInfo::marker("com.example.Marker").parameter_values_with_defaults(&class);
        assert!(merged.is_empty());
        assert!(merged.is_immutable());
    }

    #[test]
    fn test_referenced_class_names_include_annotation() {
        let annotation = AnnotationInfo::new(
            "com.example.Retry",
            ParameterValueList::from(vec![AnnotationParameter::new(
                "backoff",
                ParameterValue::Enum(AnnotationEnumValue::new("com.example.Backoff", "NONE")),
            )]),
        );

        let mut names = HashSet::new();
        annotation.find_referenced_class_names(&mut names);
        assert_eq!(names.len(), 2);
        assert!(names.contains("com.example.Retry"));
        assert!(names.contains("com.example.Backoff"));
    }
}
