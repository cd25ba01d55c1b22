//! Configuration file support for phpaccess
//!
//! Loads `.phpaccess.toml` from current directory or parent directories.

use anyhow::{Context, Result};
use phpaccess_gen::{resolve_tab_size, Visibility};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".phpaccess.toml";

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generate: GenerateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Property visibility to generate accessors for ("private" or "public")
    pub visibility: Option<Visibility>,
    /// Indentation width; an integer or a numeric string, anything else means 4
    pub tab_size: Option<toml::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text", "json" or "diff"
    pub format: Option<String>,
}

impl Config {
    /// Load config from `.phpaccess.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::load_path(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Visibility filter, CLI value first
    pub fn effective_visibility(&self, cli: Option<Visibility>) -> Visibility {
        cli.or(self.generate.visibility).unwrap_or_default()
    }

    /// Indentation width, CLI value first
    pub fn effective_tab_size(&self, cli: Option<&str>) -> usize {
        if cli.is_some() {
            return resolve_tab_size(cli);
        }

        let raw = match &self.generate.tab_size {
            Some(toml::Value::Integer(width)) => Some(width.to_string()),
            Some(toml::Value::String(width)) => Some(width.clone()),
            _ => None,
        };
        resolve_tab_size(raw.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(dir: &Path, content: &str) {
        fs::write(dir.join(CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_load_basic_config() {
        let temp = TempDir::new().unwrap();
        create_config(
            temp.path(),
            r#"
[generate]
visibility = "public"
tab_size = 2

[output]
format = "json"
"#,
        );

        let (config, path) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert_eq!(path, temp.path().join(CONFIG_FILE_NAME));
        assert_eq!(config.generate.visibility, Some(Visibility::Public));
        assert_eq!(config.effective_tab_size(None), 2);
        assert_eq!(config.output.format, Some("json".to_string()));
    }

    #[test]
    fn test_load_from_parent_directory() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[generate]\ntab_size = 8\n");
        let nested = temp.path().join("src").join("Models");
        fs::create_dir_all(&nested).unwrap();

        let (config, path) = Config::load_from(nested).unwrap().unwrap();

        assert_eq!(path, temp.path().join(CONFIG_FILE_NAME));
        assert_eq!(config.effective_tab_size(None), 8);
    }

    #[test]
    fn test_load_empty_config() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "");

        let (config, _) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert!(config.generate.visibility.is_none());
        assert!(config.generate.tab_size.is_none());
        assert!(config.output.format.is_none());
        assert_eq!(config.effective_visibility(None), Visibility::Private);
        assert_eq!(config.effective_tab_size(None), 4);
    }

    #[test]
    fn test_invalid_visibility_is_an_error() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[generate]\nvisibility = \"protected\"\n");

        assert!(Config::load_from(temp.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_no_config_found() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(temp.path().to_path_buf()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_tab_size_fallbacks() {
        let numeric_string: Config = toml::from_str("[generate]\ntab_size = \"3\"\n").unwrap();
        assert_eq!(numeric_string.effective_tab_size(None), 3);

        let non_numeric: Config = toml::from_str("[generate]\ntab_size = \"tabs\"\n").unwrap();
        assert_eq!(non_numeric.effective_tab_size(None), 4);

        let boolean: Config = toml::from_str("[generate]\ntab_size = true\n").unwrap();
        assert_eq!(boolean.effective_tab_size(None), 4);

        let zero: Config = toml::from_str("[generate]\ntab_size = 0\n").unwrap();
        assert_eq!(zero.effective_tab_size(None), 4);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config: Config =
            toml::from_str("[generate]\nvisibility = \"public\"\ntab_size = 8\n").unwrap();

        assert_eq!(
            config.effective_visibility(Some(Visibility::Private)),
            Visibility::Private
        );
        assert_eq!(config.effective_tab_size(Some("2")), 2);
        assert_eq!(config.effective_tab_size(Some("x")), 4);
    }
}
