// Python export extraction using tree-sitter

use crate::error::{Error, Result};
use crate::parser::exports::{is_visible, ClassExport, ExportSet, FunctionExport};
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Reserved name of the explicit export list
const EXPORT_LIST_NAME: &str = "__all__";

/// A successfully parsed module: its docstring and visible declarations
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedModule {
    pub docstring: Option<String>,
    pub exports: ExportSet,
}

/// Per-file parse outcome.
///
/// A file that cannot be parsed is skipped, not an error; the walk that
/// feeds the parser decides nothing beyond dropping it. Only I/O
/// problems surface as `Err` from [`PythonParser::parse_file`].
#[derive(Debug)]
pub enum FileOutcome {
    Parsed(ParsedModule),
    Skipped,
}

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse a Python file from disk.
    ///
    /// Files that are not valid UTF-8 are skipped like unparseable ones;
    /// any other read failure propagates.
    pub fn parse_file(&mut self, path: &Path) -> Result<FileOutcome> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                return Ok(FileOutcome::Skipped)
            }
            Err(e) => return Err(e.into()),
        };
        Ok(self.parse_source(&source))
    }

    /// Parse Python source text into its export summary
    pub fn parse_source(&mut self, source: &str) -> FileOutcome {
        let tree = match self.parser.parse(source, None) {
            Some(tree) => tree,
            None => return FileOutcome::Skipped,
        };

        let root = tree.root_node();
        if root.has_error() {
            return FileOutcome::Skipped;
        }

        FileOutcome::Parsed(ParsedModule {
            docstring: leading_docstring(&root, source.as_bytes()),
            exports: extract_exports(&root, source.as_bytes()),
        })
    }
}

/// Extract the visible declarations from a module-level body
fn extract_exports(root: &Node, source: &[u8]) -> ExportSet {
    let export_names = export_list(root, source);
    let mut exports = ExportSet::new();

    let mut cursor = root.walk();
    for stmt in root.named_children(&mut cursor) {
        if let Some(assign) = as_assignment(&stmt) {
            if let Some(name) = assignment_target(&assign, source) {
                if name != EXPORT_LIST_NAME && is_visible(&name, &export_names) {
                    exports.constants.push(name);
                }
            }
            continue;
        }

        let def = unwrap_decorated(&stmt);
        match def.kind() {
            "function_definition" => {
                if let Some(name) = node_name(&def, source) {
                    if is_visible(&name, &export_names) {
                        exports.functions.push(function_export(&def, name, source));
                    }
                }
            }
            "class_definition" => {
                if let Some(name) = node_name(&def, source) {
                    if is_visible(&name, &export_names) {
                        exports.classes.push(class_export(&def, name, source));
                    }
                }
            }
            _ => {}
        }
    }

    exports
}

/// Collect the explicit export names from the first `__all__` assignment.
///
/// Only the first assignment to `__all__` is honored; scanning stops
/// there. Anything other than a list or tuple literal on the right-hand
/// side contributes no names, and non-string elements are ignored.
fn export_list(root: &Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();

    let mut cursor = root.walk();
    for stmt in root.named_children(&mut cursor) {
        let assign = match as_assignment(&stmt) {
            Some(assign) => assign,
            None => continue,
        };
        if assignment_target(&assign, source).as_deref() != Some(EXPORT_LIST_NAME) {
            continue;
        }

        if let Some(value) = assign.child_by_field_name("right") {
            if value.kind() == "list" || value.kind() == "tuple" {
                let mut elements = value.walk();
                for elt in value.named_children(&mut elements) {
                    if elt.kind() == "string" {
                        if let Some(name) = string_content(&elt, source) {
                            names.push(name);
                        }
                    }
                }
            }
        }
        break;
    }

    names
}

/// The `assignment` node inside an expression statement, if that is what
/// the statement is
fn as_assignment<'a>(stmt: &Node<'a>) -> Option<Node<'a>> {
    if stmt.kind() != "expression_statement" {
        return None;
    }
    let expr = stmt.named_child(0)?;
    if expr.kind() == "assignment" {
        Some(expr)
    } else {
        None
    }
}

/// Target name of a plain single-name assignment.
///
/// Annotated assignments, tuple targets, and attribute or subscript
/// targets all yield None, matching the declarations the extractor
/// treats as constants.
fn assignment_target(assign: &Node, source: &[u8]) -> Option<String> {
    if assign.child_by_field_name("type").is_some() {
        return None;
    }
    let left = assign.child_by_field_name("left")?;
    if left.kind() != "identifier" {
        return None;
    }
    left.utf8_text(source).ok().map(|s| s.to_string())
}

/// Peel a decorated definition down to the definition it wraps
fn unwrap_decorated<'a>(stmt: &Node<'a>) -> Node<'a> {
    if stmt.kind() == "decorated_definition" {
        if let Some(def) = stmt.child_by_field_name("definition") {
            return def;
        }
    }
    *stmt
}

/// Name of a function or class definition
fn node_name(def: &Node, source: &[u8]) -> Option<String> {
    let name = def.child_by_field_name("name")?;
    name.utf8_text(source).ok().map(|s| s.to_string())
}

/// Build a function export: signature plus leading docstring
fn function_export(def: &Node, name: String, source: &[u8]) -> FunctionExport {
    let signature = match rendered_parameters(def, source) {
        Some(params) => format!("{}{}", name, params),
        None => format!("{}()", name),
    };
    FunctionExport {
        signature,
        docstring: body_docstring(def, source),
    }
}

/// Build a class export: bases, non-underscore methods, docstring.
///
/// Methods keep declaration order and are not filtered by the module's
/// export list; only the private-name convention applies to them.
fn class_export(def: &Node, name: String, source: &[u8]) -> ClassExport {
    let mut class = ClassExport::new(name);
    class.bases = class_bases(def, source);
    class.docstring = body_docstring(def, source);

    if let Some(body) = def.child_by_field_name("body") {
        let mut cursor = body.walk();
        for stmt in body.named_children(&mut cursor) {
            let member = unwrap_decorated(&stmt);
            if member.kind() != "function_definition" {
                continue;
            }
            if let Some(method_name) = node_name(&member, source) {
                if !method_name.starts_with('_') {
                    class.methods.push(function_export(&member, method_name, source));
                }
            }
        }
    }

    class
}

/// Parameter list of a definition as source-like text, parentheses
/// included. Whitespace runs collapse so multi-line lists render on one
/// line. None when the text cannot be reproduced.
fn rendered_parameters(def: &Node, source: &[u8]) -> Option<String> {
    let params = def.child_by_field_name("parameters")?;
    let text = params.utf8_text(source).ok()?;
    Some(collapse_whitespace(text))
}

/// Base-class expressions from the superclass argument list, as text.
/// Keyword arguments (metaclass=...) are not bases. Unrenderable
/// expressions drop out rather than aborting the class.
fn class_bases(def: &Node, source: &[u8]) -> Vec<String> {
    let mut bases = Vec::new();

    if let Some(args) = def.child_by_field_name("superclasses") {
        let mut cursor = args.walk();
        for arg in args.named_children(&mut cursor) {
            if arg.kind() == "keyword_argument" || arg.kind() == "comment" {
                continue;
            }
            if let Ok(text) = arg.utf8_text(source) {
                bases.push(collapse_whitespace(text));
            }
        }
    }

    bases
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Docstring of a definition's body block
fn body_docstring(def: &Node, source: &[u8]) -> Option<String> {
    let body = def.child_by_field_name("body")?;
    leading_docstring(&body, source)
}

/// Locate the leading docstring of a module, class, or function body.
///
/// Returns the first statement's content, trimmed, iff that statement is
/// solely a string-literal expression; None otherwise. Comments before
/// the first statement do not count as statements.
fn leading_docstring(body: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;

    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" && expr.kind() != "concatenated_string" {
        return None;
    }

    string_content(&expr, source).map(|s| s.trim().to_string())
}

/// Content of a string literal node, without the quotes.
///
/// Grammars differ in how they expose literals: newer ones carry the
/// text between the quotes as `string_content` children, older ones only
/// the raw quoted token. Both shapes are treated as the same concept,
/// and adjacent-literal concatenation joins its pieces.
fn string_content(node: &Node, source: &[u8]) -> Option<String> {
    if node.kind() == "concatenated_string" {
        let mut joined = String::new();
        let mut cursor = node.walk();
        for piece in node.named_children(&mut cursor) {
            if piece.kind() == "string" {
                joined.push_str(&string_content(&piece, source)?);
            }
        }
        return Some(joined);
    }

    let mut content = String::new();
    let mut found = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "string_content" {
            content.push_str(child.utf8_text(source).ok()?);
            found = true;
        }
    }
    if found {
        return Some(content);
    }

    let text = node.utf8_text(source).ok()?;
    let inner = if text.starts_with("\"\"\"") || text.starts_with("'''") {
        &text[3..text.len().saturating_sub(3)]
    } else if text.starts_with('"') || text.starts_with('\'') {
        &text[1..text.len().saturating_sub(1)]
    } else {
        text
    };
    Some(inner.to_string())
}
