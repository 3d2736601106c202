// Symbol tree construction: walk the repository, parse each module,
// aggregate exports into a namespace tree.

pub mod namespace;
pub mod render;

pub use namespace::NamespaceNode;
pub use render::render;

use crate::error::Result;
use crate::parser::{FileOutcome, PythonParser};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into during the walk
pub const EXCLUDED_DIRS: &[&str] = &["__pycache__", "build", "dist", "venv", ".git", ".github"];

/// Builds the namespace tree for a repository
pub struct TreeBuilder {
    parser: PythonParser,
    verbose: bool,
}

impl TreeBuilder {
    /// Create a new tree builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: PythonParser::new()?,
            verbose: false,
        })
    }

    /// Show a progress bar over the parse loop
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build the repository name and its populated namespace tree.
    ///
    /// Files that fail to parse are dropped silently and the walk
    /// continues; I/O errors abort the run.
    pub fn build(&mut self, repo_path: &Path) -> Result<(String, NamespaceNode)> {
        let repo_path = repo_path.canonicalize()?;
        let repo_name = repo_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "repo".to_string());

        let files = discover_files(&repo_path)?;
        let mut root = NamespaceNode::new();

        let progress = if self.verbose {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for path in &files {
            if let Some(ref pb) = progress {
                let msg = path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                pb.set_message(msg);
                pb.inc(1);
            }

            match self.parser.parse_file(path)? {
                FileOutcome::Parsed(module) => {
                    let segments = module_path_segments(&repo_path, path);
                    root.insert(&segments, module);
                }
                FileOutcome::Skipped => {}
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Parsing complete");
        }

        Ok((repo_name, root))
    }
}

/// Build and render a repository outline in one pass
pub fn repo_tree(repo_path: &Path, docs: bool, verbose: bool) -> Result<Vec<String>> {
    let mut builder = TreeBuilder::new()?.with_verbose(verbose);
    let (repo_name, root) = builder.build(repo_path)?;
    Ok(render(&repo_name, &root, docs))
}

/// Discover Python files beneath the root, pruning excluded directories
/// structurally: children of an excluded directory are never visited.
/// Sorted so that module-path collisions resolve the same way on every
/// run.
fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "py") {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn is_excluded_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map_or(false, |name| EXCLUDED_DIRS.contains(&name))
}

/// Path segments for a source file relative to the repository root.
///
/// A package initializer maps to its directory's path (the repository
/// root initializer maps to the root itself, an empty path); any other
/// file appends its stem.
fn module_path_segments(root: &Path, file: &Path) -> Vec<String> {
    let relative = file.strip_prefix(root).unwrap_or(file);

    let mut segments: Vec<String> = relative
        .parent()
        .map(|p| {
            p.components()
                .filter_map(|c| c.as_os_str().to_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();

    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    if stem != "__init__" {
        segments.push(stem.to_string());
    }

    segments
}
