use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    metadata::{
        annotations::{ParameterValue, PrimitiveArray},
        classinfo::ClassDescriptor,
        config::NormalizationConfig,
        typesig::TypeDescriptor,
    },
    Error, Result,
};

/// A single annotation parameter: the name of an annotation method and the value bound to it
///
/// The name is fixed at construction. The value only changes shape during array normalization,
/// which rewrites an [`ParameterValue::ObjectArray`] of boxed primitives into the matching
/// [`ParameterValue::PrimitiveArray`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationParameter {
    name: String,
    value: ParameterValue,
}

impl AnnotationParameter {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, value: ParameterValue) -> Self {
        AnnotationParameter {
            name: name.into(),
            value,
        }
    }

    /// The parameter name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter value
    #[must_use]
    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut ParameterValue {
        &mut self.value
    }

    /// Add the names of all classes referenced by the value
    pub fn find_referenced_class_names(&self, referenced_class_names: &mut HashSet<String>) {
        self.value.find_referenced_class_names(referenced_class_names);
    }

    /// Replace a boxed object array with a primitive array, if `annotation_class` declares this
    /// parameter as a 1-dimensional primitive array
    ///
    /// # Errors
    /// See [`AnnotationParameter::convert_wrapper_arrays_with`].
    pub fn convert_wrapper_arrays_to_primitive_arrays(
        &mut self,
        annotation_class: &ClassDescriptor,
    ) -> Result<()> {
        self.convert_wrapper_arrays_with(annotation_class, &NormalizationConfig::default())
    }

    /// Array normalization with explicit configuration
    ///
    /// Only [`ParameterValue::ObjectArray`] values are examined. The declared type is the
    /// return type of the single method of `annotation_class` named like this parameter.
    /// A parameter with no method of that name is left unchanged in every configuration.
    ///
    /// # Errors
    /// - [`Error::UnexpectedMethodCount`] if the method is overloaded and
    ///   `config.strict_method_lookup` is set
    /// - [`Error::ArrayTypeMismatch`] if the method does not return an array and
    ///   `config.strict_method_lookup` is set
    /// - [`Error::Malformed`] if the method descriptor cannot be parsed
    /// - [`Error::MultiDimensionalArray`] if the declared type has more than one dimension
    /// - [`Error::ArrayElementMismatch`] if an element is not a boxed value of the declared type
    pub fn convert_wrapper_arrays_with(
        &mut self,
        annotation_class: &ClassDescriptor,
        config: &NormalizationConfig,
    ) -> Result<()> {
        let ParameterValue::ObjectArray(items) = &self.value else {
            return Ok(());
        };

        let mut methods = annotation_class.methods_named(&self.name);
        let method = match (methods.next(), methods.next()) {
            (Some(method), None) => method,
            // No declaring method, e.g. a value left over from an older class version
            (None, _) => {
                trace!(parameter = %self.name, class = %annotation_class.name, "no declaring method");
                return Ok(());
            }
            _ if !config.strict_method_lookup => return Ok(()),
            _ => {
                return Err(Error::UnexpectedMethodCount {
                    class: annotation_class.name.clone(),
                    method: self.name.clone(),
                    count: annotation_class.methods_named(&self.name).count(),
                })
            }
        };

        let return_type = method.return_type()?;
        let TypeDescriptor::Array {
            dimensions,
            element,
        } = &return_type
        else {
            if config.strict_method_lookup {
                return Err(Error::ArrayTypeMismatch {
                    class: annotation_class.name.clone(),
                    method: self.name.clone(),
                    declared: return_type.to_string(),
                });
            }
            debug!(
                parameter = %self.name,
                class = %annotation_class.name,
                declared = %return_type,
                "array value for a non-array method, left unchanged"
            );
            return Ok(());
        };
        if *dimensions != 1 {
            return Err(Error::MultiDimensionalArray {
                class: annotation_class.name.clone(),
                method: self.name.clone(),
                dimensions: *dimensions,
            });
        }
        let TypeDescriptor::Primitive(kind) = **element else {
            return Ok(());
        };

        let converted = PrimitiveArray::from_boxed(kind, items, &self.name)?;
        debug!(
            parameter = %self.name,
            class = %annotation_class.name,
            element = %kind,
            len = converted.len(),
            "converted wrapper array to primitive array"
        );
        self.value = ParameterValue::PrimitiveArray(converted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        annotations::{AnnotationClassRef, PrimitiveValue},
        classinfo::ClassModifiers,
        typesig::PrimitiveKind,
    };

    fn annotation_class() -> ClassDescriptor {
        ClassDescriptor::new("com.example.Config", ClassModifiers::ANNOTATION)
            .with_method("ports", "()[I")
            .with_method("names", "()[Ljava/lang/String;")
            .with_method("grid", "()[[I")
            .with_method("port", "()I")
            .with_method("dup", "()[I")
            .with_method("dup", "()[J")
    }

    fn boxed(values: &[i32]) -> ParameterValue {
        ParameterValue::ObjectArray(
            values
                .iter()
                .map(|v| ParameterValue::Primitive(PrimitiveValue::Int(*v)))
                .collect(),
        )
    }

    #[test]
    fn test_convert_int_array() {
        let mut param = AnnotationParameter::new("ports", boxed(&[80, 443, 8080]));
        param
            .convert_wrapper_arrays_to_primitive_arrays(&annotation_class())
            .unwrap();
        assert_eq!(
            param.value(),
            &ParameterValue::PrimitiveArray(PrimitiveArray::Int(vec![80, 443, 8080]))
        );
    }

    #[test]
    fn test_string_array_untouched() {
        let value = ParameterValue::ObjectArray(vec![
            ParameterValue::from("a"),
            ParameterValue::from("b"),
        ]);
        let mut param = AnnotationParameter::new("names", value.clone());
        param
            .convert_wrapper_arrays_to_primitive_arrays(&annotation_class())
            .unwrap();
        assert_eq!(param.value(), &value);
    }

    #[test]
    fn test_non_array_value_untouched() {
        let value = ParameterValue::Primitive(PrimitiveValue::Int(80));
        let mut param = AnnotationParameter::new("port", value.clone());
        param
            .convert_wrapper_arrays_to_primitive_arrays(&annotation_class())
            .unwrap();
        assert_eq!(param.value(), &value);

        // Non-array values never consult the class, even when the method is unknown
        let class_ref = ParameterValue::ClassRef(AnnotationClassRef::new("com.example.X"));
        let mut param = AnnotationParameter::new("unknown", class_ref.clone());
        param
            .convert_wrapper_arrays_to_primitive_arrays(&annotation_class())
            .unwrap();
        assert_eq!(param.value(), &class_ref);
    }

    #[test]
    fn test_multi_dimensional_rejected() {
        let mut param = AnnotationParameter::new("grid", boxed(&[1]));
        let result = param.convert_wrapper_arrays_to_primitive_arrays(&annotation_class());
        assert!(matches!(
            result,
            Err(Error::MultiDimensionalArray { dimensions: 2, .. })
        ));
        assert_eq!(param.value(), &boxed(&[1]));
    }

    #[test]
    fn test_missing_method() {
        let mut param = AnnotationParameter::new("missing", boxed(&[1]));
        param
            .convert_wrapper_arrays_to_primitive_arrays(&annotation_class())
            .unwrap();
        assert_eq!(param.value(), &boxed(&[1]));

        param
            .convert_wrapper_arrays_with(&annotation_class(), &NormalizationConfig::strict())
            .unwrap();
        assert_eq!(param.value(), &boxed(&[1]));
    }

    #[test]
    fn test_array_for_scalar_method() {
        let mut param = AnnotationParameter::new("port", boxed(&[80]));
        let result = param.convert_wrapper_arrays_to_primitive_arrays(&annotation_class());
        assert!(matches!(
            result,
            Err(Error::ArrayTypeMismatch { ref method, ref declared, .. })
                if method == "port" && declared == "int"
        ));
        assert_eq!(param.value(), &boxed(&[80]));

        param
            .convert_wrapper_arrays_with(&annotation_class(), &NormalizationConfig::lenient())
            .unwrap();
        assert_eq!(param.value(), &boxed(&[80]));
    }

    #[test]
    fn test_overloaded_method() {
        let mut param = AnnotationParameter::new("dup", boxed(&[1]));
        let result = param.convert_wrapper_arrays_to_primitive_arrays(&annotation_class());
        assert!(matches!(
            result,
            Err(Error::UnexpectedMethodCount { count: 2, .. })
        ));
    }

    #[test]
    fn test_element_mismatch_leaves_value() {
        let value = ParameterValue::ObjectArray(vec![
            ParameterValue::Primitive(PrimitiveValue::Int(1)),
            ParameterValue::from("2"),
        ]);
        let mut param = AnnotationParameter::new("ports", value.clone());
        let result = param.convert_wrapper_arrays_to_primitive_arrays(&annotation_class());
        assert!(matches!(
            result,
            Err(Error::ArrayElementMismatch {
                index: 1,
                expected: PrimitiveKind::Int,
                ..
            })
        ));
        assert_eq!(param.value(), &value);
    }
}
