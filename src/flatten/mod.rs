// Repository flattening: concatenate text files into a single document
// with file-path headers.

use crate::config::FlattenConfig;
use crate::error::{Error, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use walkdir::WalkDir;

/// Summary of one flatten run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlattenReport {
    pub files_written: usize,
    pub files_skipped: usize,
}

impl FlattenReport {
    pub fn summary(&self) -> String {
        format!(
            "{} files written, {} skipped",
            self.files_written, self.files_skipped
        )
    }
}

/// Flatten a repository into a single document.
///
/// Each kept file is copied verbatim between BEGIN/END header lines
/// carrying its repository-relative path. Binary (non-UTF-8) files are
/// skipped silently; unreadable files are reported to stderr and
/// skipped. With `use_gitignore`, the repository's `.gitignore` must
/// exist and its matches are excluded.
pub fn flatten_repo(
    repo_path: &Path,
    output: &Path,
    config: &FlattenConfig,
) -> Result<FlattenReport> {
    let repo_path = repo_path.canonicalize()?;

    let matcher = if config.use_gitignore {
        Some(load_gitignore(&repo_path)?)
    } else {
        None
    };

    let mut out = BufWriter::new(File::create(output)?);
    let mut report = FlattenReport::default();

    let walker = WalkDir::new(&repo_path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !is_excluded_dir(e.path(), e.file_type().is_dir(), &repo_path, config, matcher.as_ref())
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(&repo_path).unwrap_or(path);

        if is_excluded_file(path, config) {
            report.files_skipped += 1;
            continue;
        }

        if let Some(matcher) = &matcher {
            if matcher.matched(relative, false).is_ignore() {
                report.files_skipped += 1;
                continue;
            }
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                // Binary file
                report.files_skipped += 1;
                continue;
            }
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                report.files_skipped += 1;
                continue;
            }
        };

        writeln!(out, "===== BEGIN FILE: {} =====", relative.display())?;
        out.write_all(contents.as_bytes())?;
        writeln!(out, "\n===== END FILE: {} =====", relative.display())?;
        writeln!(out)?;
        report.files_written += 1;
    }

    out.flush()?;
    Ok(report)
}

/// Load the repository's .gitignore into a matcher. A missing file is an
/// error when gitignore filtering was requested.
fn load_gitignore(root: &Path) -> Result<Gitignore> {
    let path = root.join(".gitignore");
    if !path.exists() {
        return Err(Error::PathNotFound(path));
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(e) = builder.add(&path) {
        return Err(e.into());
    }
    Ok(builder.build()?)
}

fn is_excluded_dir(
    path: &Path,
    is_dir: bool,
    root: &Path,
    config: &FlattenConfig,
    matcher: Option<&Gitignore>,
) -> bool {
    if !is_dir {
        return false;
    }

    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    if config.exclude_dirs.iter().any(|d| d == name) {
        return true;
    }

    if let Some(matcher) = matcher {
        let relative = path.strip_prefix(root).unwrap_or(path);
        if matcher.matched(relative, true).is_ignore() {
            return true;
        }
    }

    false
}

/// A file is excluded when its dotted extension or its exact file name
/// appears in the configured extension excludes
fn is_excluded_file(path: &Path, config: &FlattenConfig) -> bool {
    let suffix = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()));
    let name = path.file_name().map(|n| n.to_string_lossy().to_string());

    config.exclude_exts.iter().any(|pattern| {
        suffix.as_deref() == Some(pattern.as_str()) || name.as_deref() == Some(pattern.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn flatten(root: &Path, config: &FlattenConfig) -> (FlattenReport, String) {
        let out = root.join("out").join("flattened.txt");
        fs::create_dir_all(out.parent().unwrap()).unwrap();
        let report = flatten_repo(root, &out, config).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        (report, text)
    }

    fn config_excluding_output() -> FlattenConfig {
        let mut config = FlattenConfig::default();
        config.exclude_dirs.push("out".to_string());
        config
    }

    #[test]
    fn test_flatten_writes_delimited_blocks() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "hello.txt", b"hello world\n");

        let (report, text) = flatten(dir.path(), &config_excluding_output());

        assert_eq!(report.files_written, 1);
        assert!(text.contains("===== BEGIN FILE: hello.txt ====="));
        assert!(text.contains("hello world"));
        assert!(text.contains("===== END FILE: hello.txt ====="));
    }

    #[test]
    fn test_excluded_extension_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "logo.png", b"not really an image");
        write(dir.path(), "readme.md", b"docs");

        let (report, text) = flatten(dir.path(), &config_excluding_output());

        assert_eq!(report.files_written, 1);
        assert!(!text.contains("logo.png"));
        assert!(text.contains("readme.md"));
    }

    #[test]
    fn test_exact_file_name_excluded() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "package-lock.json", b"{}");

        let mut config = config_excluding_output();
        config.exclude_exts.push("package-lock.json".to_string());
        let (report, text) = flatten(dir.path(), &config);

        assert_eq!(report.files_written, 0);
        assert!(!text.contains("package-lock.json"));
    }

    #[test]
    fn test_excluded_dir_pruned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "node_modules/dep/index.js", b"module.exports = 1;");
        write(dir.path(), "src/main.js", b"console.log(1);");

        let (_, text) = flatten(dir.path(), &config_excluding_output());

        assert!(!text.contains("node_modules"));
        assert!(text.contains("src/main.js"));
    }

    #[test]
    fn test_binary_file_skipped_silently() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blob.bin", &[0xff, 0xfe, 0x00, 0x01]);
        write(dir.path(), "text.txt", b"fine");

        let (report, text) = flatten(dir.path(), &config_excluding_output());

        assert_eq!(report.files_written, 1);
        assert_eq!(report.files_skipped, 1);
        assert!(!text.contains("blob.bin"));
    }

    #[test]
    fn test_gitignore_filtering() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".gitignore", b"*.secret\nlogs/\n");
        write(dir.path(), "token.secret", b"password");
        write(dir.path(), "logs/app.log", b"log line");
        write(dir.path(), "kept.txt", b"kept");

        let mut config = config_excluding_output();
        config.use_gitignore = true;
        let (_, text) = flatten(dir.path(), &config);

        assert!(!text.contains("token.secret"));
        assert!(!text.contains("password"));
        assert!(!text.contains("app.log"));
        assert!(text.contains("kept.txt"));
    }

    #[test]
    fn test_gitignore_missing_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.txt", b"a");

        let mut config = FlattenConfig::default();
        config.use_gitignore = true;
        let result = flatten_repo(dir.path(), &dir.path().join("out.txt"), &config);

        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }

    #[test]
    fn test_report_summary() {
        let report = FlattenReport {
            files_written: 3,
            files_skipped: 2,
        };
        assert_eq!(report.summary(), "3 files written, 2 skipped");
    }
}
