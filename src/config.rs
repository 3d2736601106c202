use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub flatten: FlattenConfig,
    pub tree: TreeConfig,
}

/// Settings for the flatten command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Directory names pruned during the walk
    pub exclude_dirs: Vec<String>,
    /// File extensions (or exact file names) skipped
    pub exclude_exts: Vec<String>,
    /// Respect the repository's .gitignore
    pub use_gitignore: bool,
    /// Output file path
    pub output: PathBuf,
}

/// Settings for the tree command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Annotate outline entries with first-line docstrings
    pub docs: bool,
    /// Output file path
    pub output: PathBuf,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: vec![
                ".git".to_string(),
                "__pycache__".to_string(),
                "node_modules".to_string(),
                "venv".to_string(),
            ],
            exclude_exts: vec![
                ".png".to_string(),
                ".jpg".to_string(),
                ".jpeg".to_string(),
                ".gif".to_string(),
                ".zip".to_string(),
                ".pdf".to_string(),
            ],
            use_gitignore: false,
            output: PathBuf::from("flattened_repo.txt"),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            docs: false,
            output: PathBuf::from("repo_tree.txt"),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge flatten CLI arguments into config (CLI takes precedence)
    pub fn merge_flatten_cli(
        &mut self,
        output: Option<PathBuf>,
        exclude_dirs: Vec<String>,
        exclude_exts: Vec<String>,
        use_gitignore: bool,
    ) {
        if let Some(out) = output {
            self.flatten.output = out;
        }

        for dir in exclude_dirs {
            if !self.flatten.exclude_dirs.contains(&dir) {
                self.flatten.exclude_dirs.push(dir);
            }
        }

        for ext in exclude_exts {
            if !self.flatten.exclude_exts.contains(&ext) {
                self.flatten.exclude_exts.push(ext);
            }
        }

        if use_gitignore {
            self.flatten.use_gitignore = true;
        }
    }

    /// Merge tree CLI arguments into config (CLI takes precedence)
    pub fn merge_tree_cli(&mut self, output: Option<PathBuf>, docs: bool) {
        if let Some(out) = output {
            self.tree.output = out;
        }

        if docs {
            self.tree.docs = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.flatten.exclude_dirs.iter().any(|d| d.is_empty()) {
            return Err(Error::config_validation(
                "flatten exclude_dirs entries must not be empty",
            ));
        }

        if self.flatten.exclude_exts.iter().any(|e| e.is_empty()) {
            return Err(Error::config_validation(
                "flatten exclude_exts entries must not be empty",
            ));
        }

        if self.flatten.output.as_os_str().is_empty() {
            return Err(Error::config_validation("flatten output must not be empty"));
        }

        if self.tree.output.as_os_str().is_empty() {
            return Err(Error::config_validation("tree output must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.flatten.exclude_dirs.contains(&".git".to_string()));
        assert!(config.flatten.exclude_exts.contains(&".png".to_string()));
        assert!(!config.flatten.use_gitignore);
        assert_eq!(config.flatten.output, PathBuf::from("flattened_repo.txt"));
        assert!(!config.tree.docs);
        assert_eq!(config.tree.output, PathBuf::from("repo_tree.txt"));
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[flatten]
exclude_dirs = ["target"]
use_gitignore = true

[tree]
docs = true
output = "outline.txt"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.flatten.exclude_dirs, vec!["target".to_string()]);
        assert!(config.flatten.use_gitignore);
        assert!(config.tree.docs);
        assert_eq!(config.tree.output, PathBuf::from("outline.txt"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/treeline.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = Config::load_or_default(Path::new("/nonexistent/treeline.toml"));
        assert_eq!(config.flatten.output, PathBuf::from("flattened_repo.txt"));
    }

    #[test]
    fn test_validation_empty_exclude_dir() {
        let mut config = Config::default();
        config.flatten.exclude_dirs.push(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_output() {
        let mut config = Config::default();
        config.tree.output = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_flatten_cli_output() {
        let mut config = Config::default();
        config.merge_flatten_cli(Some(PathBuf::from("/custom/out.txt")), vec![], vec![], false);
        assert_eq!(config.flatten.output, PathBuf::from("/custom/out.txt"));
    }

    #[test]
    fn test_merge_flatten_cli_excludes_deduplicated() {
        let mut config = Config::default();
        let initial = config.flatten.exclude_dirs.len();
        config.merge_flatten_cli(
            None,
            vec!["dist".to_string(), ".git".to_string()],
            vec![".svg".to_string()],
            false,
        );
        // .git is already a default, only dist is new
        assert_eq!(config.flatten.exclude_dirs.len(), initial + 1);
        assert!(config.flatten.exclude_exts.contains(&".svg".to_string()));
    }

    #[test]
    fn test_merge_flatten_cli_gitignore_sticky() {
        let mut config = Config::default();
        config.flatten.use_gitignore = true;
        // CLI not passing the flag must not reset the configured value
        config.merge_flatten_cli(None, vec![], vec![], false);
        assert!(config.flatten.use_gitignore);
    }

    #[test]
    fn test_merge_tree_cli() {
        let mut config = Config::default();
        config.merge_tree_cli(Some(PathBuf::from("tree.txt")), true);
        assert_eq!(config.tree.output, PathBuf::from("tree.txt"));
        assert!(config.tree.docs);
    }
}
