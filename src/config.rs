use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use vqa_core::select::SelectionPolicy;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub best_answer: BestAnswerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatasetConfig {
    /// Annotation file. May be left unset and supplied with `--annotations`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BestAnswerConfig {
    #[serde(default)]
    pub policy: SelectionPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

impl OutputConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Config {
    /// Defaults used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// The dataset path, or an error telling the user how to provide one.
    pub fn dataset_path(&self) -> Result<&Path> {
        self.dataset.path.as_deref().with_context(|| {
            "No annotation file configured. Pass --annotations <path> or set [dataset].path"
        })
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    match config.output.format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Unknown output format: '{}'. Must be text or json.", other),
    }

    if let Some(ref dataset) = config.dataset.path {
        if dataset.as_os_str().is_empty() {
            anyhow::bail!("dataset.path must not be empty");
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(content: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vqa.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_full_config() {
        let (_tmp, path) = write(
            r#"
[dataset]
path = "./data/val.json"

[best_answer]
policy = "majority"

[output]
format = "json"
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.dataset.path, Some(PathBuf::from("./data/val.json")));
        assert_eq!(cfg.best_answer.policy, SelectionPolicy::Majority);
        assert!(cfg.output.is_json());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let (_tmp, path) = write("");
        let cfg = load_config(&path).unwrap();
        assert!(cfg.dataset.path.is_none());
        assert_eq!(cfg.best_answer.policy, SelectionPolicy::LexicalMax);
        assert!(!cfg.output.is_json());
        assert!(cfg.dataset_path().is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let (_tmp, path) = write("[output]\nformat = \"yaml\"\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let (_tmp, path) = write("[best_answer]\npolicy = \"most_confident\"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
