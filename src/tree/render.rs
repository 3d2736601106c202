// Outline rendering with box-drawing connectors

use crate::parser::{doc_summary, ClassExport, FunctionExport};
use crate::tree::namespace::NamespaceNode;

const TEE: &str = "├── ";
const CORNER: &str = "└── ";
// Connectors sit 8 columns per depth: the 4-column continuation under
// the parent entry plus 4 spaces of indentation.
const BAR_EXTENSION: &str = "│       ";
const BLANK_EXTENSION: &str = "        ";

/// One renderable entry at a node, in category order
enum Entry<'a> {
    Constant(&'a str),
    Function(&'a FunctionExport),
    Class(&'a ClassExport),
    Module(&'a str, &'a NamespaceNode),
}

/// Render the namespace tree as outline lines.
///
/// The first line is the repository name; everything beneath renders
/// depth-first. At every node the categories order constants, functions,
/// classes, child modules; within a category, entries sort
/// case-insensitively by display name. Exactly one entry per scope
/// carries the corner connector.
pub fn render(repo_name: &str, root: &NamespaceNode, docs: bool) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(annotate(
        repo_name.to_string(),
        root.docstring.as_deref(),
        docs,
    ));
    render_node(root, "", docs, &mut lines);
    lines
}

fn render_node(node: &NamespaceNode, prefix: &str, docs: bool, lines: &mut Vec<String>) {
    let entries = ordered_entries(node);
    let count = entries.len();

    for (i, entry) in entries.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { CORNER } else { TEE };
        let extension = if is_last { BLANK_EXTENSION } else { BAR_EXTENSION };

        match entry {
            Entry::Constant(name) => {
                lines.push(format!("{}{}const {}", prefix, connector, name));
            }
            Entry::Function(func) => {
                let line = format!("{}{}method {}", prefix, connector, func.signature);
                lines.push(annotate(line, func.docstring.as_deref(), docs));
            }
            Entry::Class(class) => {
                let line = format!("{}{}class {}", prefix, connector, class.signature());
                lines.push(annotate(line, class.docstring.as_deref(), docs));
                render_methods(class, &format!("{}{}", prefix, extension), docs, lines);
            }
            Entry::Module(name, child) => {
                let line = format!("{}{}{}", prefix, connector, name);
                lines.push(annotate(line, child.docstring.as_deref(), docs));
                render_node(child, &format!("{}{}", prefix, extension), docs, lines);
            }
        }
    }
}

fn render_methods(class: &ClassExport, prefix: &str, docs: bool, lines: &mut Vec<String>) {
    let count = class.methods.len();
    for (i, method) in class.methods.iter().enumerate() {
        let connector = if i + 1 == count { CORNER } else { TEE };
        let line = format!("{}{}method {}", prefix, connector, method.signature);
        lines.push(annotate(line, method.docstring.as_deref(), docs));
    }
}

/// Collect a node's entries in deterministic order: category order is
/// fixed, names sort case-insensitively within each category.
fn ordered_entries(node: &NamespaceNode) -> Vec<Entry<'_>> {
    let mut constants: Vec<&str> = node.exports.constants.iter().map(|c| c.as_str()).collect();
    constants.sort_by_key(|c| c.to_lowercase());

    let mut functions: Vec<&FunctionExport> = node.exports.functions.iter().collect();
    functions.sort_by_key(|f| f.signature.to_lowercase());

    let mut classes: Vec<&ClassExport> = node.exports.classes.iter().collect();
    classes.sort_by_key(|c| c.name.to_lowercase());

    let mut modules: Vec<(&str, &NamespaceNode)> = node
        .children
        .iter()
        .map(|(name, child)| (name.as_str(), child))
        .collect();
    modules.sort_by_key(|(name, _)| name.to_lowercase());

    let mut entries = Vec::new();
    entries.extend(constants.into_iter().map(Entry::Constant));
    entries.extend(functions.into_iter().map(Entry::Function));
    entries.extend(classes.into_iter().map(Entry::Class));
    entries.extend(modules.into_iter().map(|(name, child)| Entry::Module(name, child)));
    entries
}

fn annotate(line: String, docstring: Option<&str>, docs: bool) -> String {
    if !docs {
        return line;
    }
    match doc_summary(docstring) {
        Some(summary) => format!("{}  # {}", line, summary),
        None => line,
    }
}
