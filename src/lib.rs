//! Treeline - Flatten repos and generate symbol trees for LLM contexts
//!
//! Two operations over a repository: flattening its text files into a
//! single delimited document, and parsing its Python modules into a
//! deterministically ordered symbol outline.

pub mod cli;
pub mod config;
pub mod error;
pub mod flatten;
pub mod parser;
pub mod tree;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use flatten::{flatten_repo, FlattenReport};
pub use parser::{ClassExport, ExportSet, FunctionExport, PythonParser};
pub use tree::{render, repo_tree, NamespaceNode, TreeBuilder};
