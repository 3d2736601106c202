// Export records extracted from parsed Python modules
//
// These types are the fixed-shape result of export extraction: what a
// module makes visible, ready for namespace aggregation and rendering.

use serde::{Deserialize, Serialize};

/// The declarations visible from one module
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportSet {
    /// Module-level constant names, in source order
    pub constants: Vec<String>,
    /// Top-level functions, in source order
    pub functions: Vec<FunctionExport>,
    /// Top-level classes, in source order
    pub classes: Vec<ClassExport>,
}

impl ExportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the module exposes anything
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty() && self.functions.is_empty() && self.classes.is_empty()
    }
}

/// An exported function or method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionExport {
    /// Name plus parameter list as source-like text, e.g. `run(self, count=1)`
    pub signature: String,
    /// Leading docstring, if present
    pub docstring: Option<String>,
}

impl FunctionExport {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            docstring: None,
        }
    }

    pub fn with_docstring(signature: impl Into<String>, docstring: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            docstring: Some(docstring.into()),
        }
    }

    /// First line of the docstring, trimmed
    pub fn summary(&self) -> Option<&str> {
        doc_summary(self.docstring.as_deref())
    }
}

/// An exported class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassExport {
    /// Class name
    pub name: String,
    /// Base-class expressions as written, empty if unrenderable
    pub bases: Vec<String>,
    /// Non-underscore methods, in declaration order
    pub methods: Vec<FunctionExport>,
    /// Leading docstring, if present
    pub docstring: Option<String>,
}

impl ClassExport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            methods: Vec::new(),
            docstring: None,
        }
    }

    /// Class name with its base list, e.g. `Dog(Animal)`; bare name if no bases
    pub fn signature(&self) -> String {
        if self.bases.is_empty() {
            self.name.clone()
        } else {
            format!("{}({})", self.name, self.bases.join(", "))
        }
    }

    /// First line of the docstring, trimmed
    pub fn summary(&self) -> Option<&str> {
        doc_summary(self.docstring.as_deref())
    }
}

/// Decide whether a top-level name is visible from its module.
///
/// A non-empty explicit export list is authoritative: only listed names
/// are visible, underscore-prefixed or not. Without one, the private-name
/// convention applies.
pub fn is_visible(name: &str, export_list: &[String]) -> bool {
    if export_list.is_empty() {
        !name.starts_with('_')
    } else {
        export_list.iter().any(|n| n == name)
    }
}

/// First line of a docstring, trimmed; None when absent or blank
pub fn doc_summary(docstring: Option<&str>) -> Option<&str> {
    let first = docstring?.lines().next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_set_empty() {
        let exports = ExportSet::new();
        assert!(exports.is_empty());
    }

    #[test]
    fn test_export_set_with_constant() {
        let mut exports = ExportSet::new();
        exports.constants.push("VERSION".to_string());
        assert!(!exports.is_empty());
    }

    #[test]
    fn test_function_export_summary() {
        let func = FunctionExport::with_docstring("run()", "Run the pipeline.\n\nDetails.");
        assert_eq!(func.summary(), Some("Run the pipeline."));

        let bare = FunctionExport::new("run()");
        assert_eq!(bare.summary(), None);
    }

    #[test]
    fn test_class_signature_with_bases() {
        let mut class = ClassExport::new("Dog");
        assert_eq!(class.signature(), "Dog");

        class.bases.push("Animal".to_string());
        class.bases.push("Loud".to_string());
        assert_eq!(class.signature(), "Dog(Animal, Loud)");
    }

    #[test]
    fn test_visibility_without_export_list() {
        assert!(is_visible("foo", &[]));
        assert!(!is_visible("_bar", &[]));
        assert!(!is_visible("__all__", &[]));
    }

    #[test]
    fn test_visibility_with_export_list() {
        let list = vec!["_bar".to_string()];
        assert!(is_visible("_bar", &list));
        assert!(!is_visible("foo", &list));
    }

    #[test]
    fn test_doc_summary_trims() {
        assert_eq!(doc_summary(Some("  Woof  \nmore")), Some("Woof"));
        assert_eq!(doc_summary(Some("")), None);
        assert_eq!(doc_summary(None), None);
    }

    #[test]
    fn test_serialization() {
        let mut exports = ExportSet::new();
        exports.functions.push(FunctionExport::new("run()"));
        let json = serde_json::to_string(&exports).expect("serialize");
        let parsed: ExportSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, exports);
    }
}
