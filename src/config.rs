//! Project configuration for crudgen
//!
//! A `crudgen.toml` next to the API document (or passed with `--config`)
//! holds the defaults of a project so repeated runs need fewer flags:
//!
//! ```toml
//! target = "quasar"
//! output = "frontend/src"
//! entrypoint = "https://api.example.com"
//! resources = ["books", "reviews"]
//! force = false
//! ```
//!
//! A relative `output` is resolved against the directory holding the file.
//! Command-line flags win over the file, the file wins over built-in
//! defaults.

use crate::generator::{Entrypoint, GenerateOptions, Target};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the API document
pub const CONFIG_FILE_NAME: &str = "crudgen.toml";

/// Settings from `crudgen.toml` or the command line. Unset fields fall
/// through to the next layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CrudgenConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Overrides the document's `servers[0].url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    /// Resource names or titles to generate; empty means all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl CrudgenConfig {
    /// Layer `self` over `base`: every field set here wins.
    pub fn merged_over(self, base: CrudgenConfig) -> CrudgenConfig {
        CrudgenConfig {
            target: self.target.or(base.target),
            output: self.output.or(base.output),
            entrypoint: self.entrypoint.or(base.entrypoint),
            resources: if self.resources.is_empty() {
                base.resources
            } else {
                self.resources
            },
            force: self.force.or(base.force),
        }
    }

    /// Fill the remaining gaps with defaults and build generator options.
    pub fn into_options(self) -> anyhow::Result<GenerateOptions> {
        let entrypoint = self
            .entrypoint
            .as_deref()
            .map(Entrypoint::resolve)
            .transpose()
            .context("Invalid entrypoint URL")?;
        Ok(GenerateOptions {
            output: self.output.unwrap_or_else(|| PathBuf::from(".")),
            target: self.target.unwrap_or_default(),
            resources: self.resources,
            entrypoint,
            force: self.force.unwrap_or(false),
        })
    }
}

/// Load a configuration file.
///
/// Returns `Ok(None)` when the file does not exist and an error when it
/// exists but cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<CrudgenConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: CrudgenConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    if let (Some(output), Some(dir)) = (config.output.as_ref(), config_path.parent()) {
        if output.is_relative() {
            config.output = Some(dir.join(output));
        }
    }
    tracing::debug!(path = %config_path.display(), ?config, "loaded config");
    Ok(Some(config))
}

/// `crudgen.toml` in the same directory as the API document, if present.
pub fn auto_detect_config_path(api_path: &Path) -> Option<PathBuf> {
    let config_path = api_path.parent()?.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Configuration for a run.
///
/// An explicit path must exist. Without one the file next to the API
/// document is used when present; otherwise the configuration is empty.
pub fn resolve_config(explicit: Option<&Path>, api_path: &Path) -> anyhow::Result<CrudgenConfig> {
    if let Some(path) = explicit {
        return match load_config(path)? {
            Some(config) => Ok(config),
            None => bail!("Config file not found: {}", path.display()),
        };
    }
    match auto_detect_config_path(api_path) {
        Some(path) => Ok(load_config(&path)?.unwrap_or_default()),
        None => Ok(CrudgenConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_full() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
target = "next"
output = "web"
entrypoint = "https://api.example.com"
resources = ["books"]
force = true
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.target, Some(Target::Next));
        assert_eq!(config.output, Some(dir.path().join("web")));
        assert_eq!(config.entrypoint.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.resources, vec!["books".to_string()]);
        assert_eq!(config.force, Some(true));
    }

    #[test]
    fn test_load_config_missing_and_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(load_config(&path).unwrap().is_none());

        fs::write(&path, "colour = \"blue\"\n").unwrap();
        assert!(load_config(&path).is_err());

        fs::write(&path, "target = \"angular\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_absolute_output_is_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let absolute = dir.path().join("elsewhere");
        fs::write(&path, format!("output = {:?}\n", absolute.display().to_string())).unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.output, Some(absolute));
    }

    #[test]
    fn test_resolve_config() {
        let dir = tempdir().unwrap();
        let api = dir.path().join("openapi.yaml");
        assert_eq!(resolve_config(None, &api).unwrap(), CrudgenConfig::default());

        fs::write(dir.path().join(CONFIG_FILE_NAME), "target = \"nextjs\"\n").unwrap();
        assert_eq!(auto_detect_config_path(&api), Some(dir.path().join(CONFIG_FILE_NAME)));
        assert_eq!(resolve_config(None, &api).unwrap().target, Some(Target::Next));

        let missing = dir.path().join("other.toml");
        assert!(resolve_config(Some(&missing), &api).is_err());
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = CrudgenConfig {
            target: Some(Target::Next),
            output: Some(PathBuf::from("web")),
            entrypoint: Some("https://file.example.com".to_string()),
            resources: vec!["books".to_string()],
            force: Some(true),
        };
        let cli = CrudgenConfig {
            output: Some(PathBuf::from("cli-out")),
            resources: vec!["authors".to_string()],
            ..Default::default()
        };

        let options = cli.merged_over(file).into_options().unwrap();
        assert_eq!(options.target, Target::Next);
        assert_eq!(options.output, PathBuf::from("cli-out"));
        assert_eq!(options.resources, vec!["authors".to_string()]);
        assert!(options.force);
        assert_eq!(
            options.entrypoint.map(|e| e.url),
            Some("https://file.example.com".to_string())
        );
    }

    #[test]
    fn test_defaults() {
        let options = CrudgenConfig::default().into_options().unwrap();
        assert_eq!(options.target, Target::Quasar);
        assert_eq!(options.output, PathBuf::from("."));
        assert!(options.entrypoint.is_none());
        assert!(!options.force);
    }
}
