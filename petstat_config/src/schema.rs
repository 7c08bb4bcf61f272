use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use petstat_extract::ExtractionConfig;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Extension that replaces the input's when `--out` is not given.
    #[serde(default = "OutputConfig::default_suffix")]
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: Self::default_suffix(),
        }
    }
}

impl OutputConfig {
    fn default_suffix() -> String {
        "pets.json".to_string()
    }

    /// `CHAT_250926.TXT` becomes `CHAT_250926.pets.json`.
    #[must_use]
    pub fn output_path(&self, input: &Path) -> PathBuf {
        input.with_extension(&self.suffix)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// File-name glob for chat logs in the working directory, matched
    /// case-insensitively.
    #[serde(default = "InputConfig::default_candidate_glob")]
    pub candidate_glob: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            candidate_glob: Self::default_candidate_glob(),
        }
    }
}

impl InputConfig {
    fn default_candidate_glob() -> String {
        "CHAT_*.TXT".to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("petstat"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/petstat/config.json`, falling back to defaults when it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::default_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load an explicitly named config file. The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Cannot read config file {}: {e}", path.display())
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::create_config_at(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - extraction.patterns: header/initial/growth regexes for other client locales");
        println!("   - output.suffix: extension used for the default output path");
        println!("   - input.candidate_glob: chat log file names looked for when no input is given");
        println!();
        Ok(config_path)
    }

    /// Write the default configuration as a template. Refuses to overwrite.
    pub fn create_config_at(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(config_path, template)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("petstat_{tag}_{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn output_path_replaces_extension() {
        let output = OutputConfig::default();
        assert_eq!(
            output.output_path(Path::new("logs/CHAT_250926.TXT")),
            PathBuf::from("logs/CHAT_250926.pets.json")
        );
        assert_eq!(
            output.output_path(Path::new("chat")),
            PathBuf::from("chat.pets.json")
        );
    }

    #[test]
    fn empty_object_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input.candidate_glob, "CHAT_*.TXT");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"output": {"suffix": "stats.json"}, "extraction": {}}"#)
                .unwrap();
        assert_eq!(config.output.suffix, "stats.json");
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn template_round_trips_and_is_not_overwritten() {
        let dir = temp_dir("config_template");
        let path = dir.join("config.json");

        Config::create_config_at(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
        assert!(Config::create_config_at(&path).is_err());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = temp_dir("config_missing");
        let err = Config::load_from(&dir.join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read config file"));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
