use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for rendering package documentation. Every key is optional in
/// the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spaces per indentation level in rendered declarations.
    pub tab_width: usize,
    /// Import paths whose members are never linked.
    pub interop_namespaces: Vec<String>,
    /// Attach function source text to the documentation.
    pub include_source: bool,
    /// Collect examples from `_test.go` files.
    pub include_examples: bool,
    /// Directory that relative file patterns on the command line are
    /// resolved against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            interop_namespaces: vec!["C".to_string()],
            include_source: true,
            include_examples: true,
            source_root: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if let Some(root) = config.source_root.take() {
            config.source_root = Some(Self::expand_path(&root).unwrap_or(root));
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The configuration file if there is one, otherwise the defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/codemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// `pattern` joined onto `source_root` when it is relative.
    pub fn resolve_pattern(&self, pattern: &str) -> String {
        match &self.source_root {
            Some(root) if Path::new(pattern).is_relative() => {
                root.join(pattern).to_string_lossy().into_owned()
            }
            _ => pattern.to_string(),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/codemark/config.toml"));
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: Config = toml::from_str("tab_width = 8\n").unwrap();
        assert_eq!(
            config,
            Config {
                tab_width: 8,
                ..Config::default()
            }
        );

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn test_interop_namespaces_from_toml() {
        let config: Config = toml::from_str(
            r#"
interop_namespaces = ["C", "unsafe"]
include_source = false
"#,
        )
        .unwrap();
        assert_eq!(config.interop_namespaces, vec!["C", "unsafe"]);
        assert!(!config.include_source);
        assert!(config.include_examples);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        assert_eq!(Config::expand_path(&path).unwrap(), path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "tab_width = \"wide\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            tab_width: 2,
            interop_namespaces: Vec::new(),
            include_source: false,
            include_examples: true,
            source_root: Some(PathBuf::from("/src/project")),
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_source_root_env_var_is_expanded() {
        unsafe {
            env::set_var("CODEMARK_TEST_ROOT", "/custom/go");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "source_root = \"$CODEMARK_TEST_ROOT/pkg\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.source_root, Some(PathBuf::from("/custom/go/pkg")));
        unsafe {
            env::remove_var("CODEMARK_TEST_ROOT");
        }
    }

    #[test]
    fn test_resolve_pattern() {
        let config = Config {
            source_root: Some(PathBuf::from("/src")),
            ..Config::default()
        };
        assert_eq!(config.resolve_pattern("pkg/*.go"), "/src/pkg/*.go");
        assert_eq!(config.resolve_pattern("/abs/a.go"), "/abs/a.go");
        assert_eq!(Config::default().resolve_pattern("a.go"), "a.go");
    }
}
