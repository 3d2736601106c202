// Namespace tree keyed by dotted module path segments

use crate::parser::{ExportSet, ParsedModule};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node in the module tree.
///
/// The root node represents the repository itself; every other node is
/// one module or package reachable by a unique dotted path from the
/// root. Nodes are created on demand while inserting module paths, and
/// the whole tree is discarded after rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamespaceNode {
    /// Child nodes by path segment
    pub children: HashMap<String, NamespaceNode>,
    /// Declarations visible from the module at this path
    pub exports: ExportSet,
    /// Module docstring, if present
    pub docstring: Option<String>,
}

impl NamespaceNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parsed module at the given path segments.
    ///
    /// Missing intermediate nodes are created empty. The terminal node's
    /// exports and docstring are overwritten, not merged; when two files
    /// resolve to the same path the last write wins. An empty path
    /// writes into this node itself (a repository-root package
    /// initializer).
    pub fn insert(&mut self, path: &[String], module: ParsedModule) {
        match path.split_first() {
            None => {
                self.exports = module.exports;
                self.docstring = module.docstring;
            }
            Some((segment, rest)) => {
                self.children
                    .entry(segment.clone())
                    .or_default()
                    .insert(rest, module);
            }
        }
    }

    /// Look up a descendant by path segments
    pub fn get(&self, path: &[&str]) -> Option<&NamespaceNode> {
        match path.split_first() {
            None => Some(self),
            Some((segment, rest)) => self.children.get(*segment)?.get(rest),
        }
    }
}
