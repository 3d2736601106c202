//! CLI module for Treeline

mod args;

pub use args::{Args, Command};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::flatten::flatten_repo;
use crate::tree::repo_tree;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Flatten {
            repo_path,
            output,
            exclude_dirs,
            exclude_exts,
            use_gitignore,
            config,
        } => {
            let mut cfg = load_config(config.as_deref());
            cfg.merge_flatten_cli(output, exclude_dirs, exclude_exts, use_gitignore);

            let repo_path = validated_repo(repo_path)?;
            let output = cfg.flatten.output.clone();
            prepare_output(&output)?;

            let report = flatten_repo(&repo_path, &output, &cfg.flatten)?;

            println!("{}", report.summary());
            println!("Repository flattened to {}", output.display());
            Ok(())
        }

        Command::Tree {
            repo_path,
            output,
            docs,
            config,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref());
            cfg.merge_tree_cli(output, docs);

            let repo_path = validated_repo(repo_path)?;
            let output = cfg.tree.output.clone();
            prepare_output(&output)?;

            let lines = repo_tree(&repo_path, cfg.tree.docs, verbose)?;
            std::fs::write(&output, lines.join("\n"))?;

            println!("Symbol tree generated to {}", output.display());
            Ok(())
        }

        Command::Version => {
            println!("treeline {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::load_or_default(path),
        None => Config::load_or_default(Path::new("treeline.toml")),
    }
}

/// Validate that the repository path exists and is a directory
fn validated_repo(path: PathBuf) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::PathNotFound(path));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path));
    }
    Ok(path)
}

/// Create the output file's parent directories if needed
fn prepare_output(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validated_repo_missing() {
        let result = validated_repo(PathBuf::from("/nonexistent/repo"));
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }

    #[test]
    fn test_validated_repo_file_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "text").unwrap();

        let result = validated_repo(file);
        assert!(matches!(result, Err(Error::NotADirectory(_))));
    }

    #[test]
    fn test_validated_repo_accepts_directory() {
        let dir = TempDir::new().unwrap();
        assert!(validated_repo(dir.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_prepare_output_creates_parents() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("deep/nested/out.txt");

        prepare_output(&output).unwrap();
        assert!(output.parent().unwrap().is_dir());
    }

    #[test]
    fn test_prepare_output_bare_file_name() {
        assert!(prepare_output(Path::new("out.txt")).is_ok());
    }
}
