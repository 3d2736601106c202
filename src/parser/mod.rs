// Parser module for extracting exports from source files

pub mod exports;
mod python;

pub use exports::{doc_summary, is_visible, ClassExport, ExportSet, FunctionExport};
pub use python::{FileOutcome, ParsedModule, PythonParser};
