//! Normalization configuration
//!
//! Controls how strictly array normalization treats annotation classes that do not
//! match the values recorded for them, and how deep registry-driven normalization
//! may descend into nested annotations.

/// Configuration for wrapper-array normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationConfig {
    /// Fail when an array-valued parameter maps to several methods of the annotation class,
    /// or to a method that does not return an array. When disabled, such parameters are left
    /// unchanged. Parameters without any declaring method are always left unchanged.
    pub strict_method_lookup: bool,

    /// Fail when the registry has no class for an annotation being normalized.
    /// When disabled, unknown annotations are skipped.
    pub strict_class_lookup: bool,

    /// Maximum nesting depth for annotation values inside annotation values (default: 64)
    pub max_nesting_depth: usize,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            strict_method_lookup: true,
            strict_class_lookup: false,
            max_nesting_depth: 64,
        }
    }
}

impl NormalizationConfig {
    /// Creates a configuration that never fails on missing class or method metadata
    ///
    /// Useful for partial scans, where annotation classes from libraries outside the scan
    /// are not available.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            strict_method_lookup: false,
            strict_class_lookup: false,
            max_nesting_depth: 64,
        }
    }

    /// Creates a configuration that requires complete class metadata
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_method_lookup: true,
            strict_class_lookup: true,
            max_nesting_depth: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default = NormalizationConfig::default();
        assert!(default.strict_method_lookup);
        assert!(!default.strict_class_lookup);
        assert_eq!(default.max_nesting_depth, 64);

        let lenient = NormalizationConfig::lenient();
        assert!(!lenient.strict_method_lookup);
        assert!(!lenient.strict_class_lookup);

        let strict = NormalizationConfig::strict();
        assert!(strict.strict_method_lookup && strict.strict_class_lookup);
    }
}
