//! Generator configuration.
//!
//! Resolution order (lowest to highest priority):
//! 1. built-in defaults
//! 2. the YAML config file (`bundlegen.yaml` unless told otherwise)
//! 3. `.env` in the working directory (never overwrites set variables)
//! 4. `BUNDLEGEN_*` environment variables (`BUNDLEGEN_ROUTING_FILE` overrides `routing_file`)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::RoutingFormat;

pub const DEFAULT_CONFIG_FILE: &str = "bundlegen.yaml";
const ENV_PREFIX: &str = "BUNDLEGEN_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Application routing file receiving imports.
    pub routing_file: PathBuf,
    /// Kernel source file holding `registerBundles()`.
    pub kernel_file: PathBuf,
    /// Directory containing bundle sources.
    pub bundles_dir: PathBuf,
    pub route_format: RoutingFormat,
    pub template_format: String,
    pub prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            routing_file: PathBuf::from("app/config/routing.yml"),
            kernel_file: PathBuf::from("app/AppKernel.php"),
            bundles_dir: PathBuf::from("src"),
            route_format: RoutingFormat::Annotation,
            template_format: "twig".to_string(),
            prefix: "/".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load from `path` (a missing file means defaults), `.env`, and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
            Self::from_yaml_str(&content)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        let _ = dotenvy::dotenv();
        config.apply_env(std::env::vars())?;
        Ok(config)
    }

    /// Parse a YAML document on top of the defaults. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Overlay `BUNDLEGEN_*` variables. Unrelated variables are ignored.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(field) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match field.to_ascii_lowercase().as_str() {
                "routing_file" => self.routing_file = PathBuf::from(value),
                "kernel_file" => self.kernel_file = PathBuf::from(value),
                "bundles_dir" => self.bundles_dir = PathBuf::from(value),
                "route_format" => {
                    self.route_format = value.parse().map_err(|e: Error| Error::Config(e.to_string()))?
                }
                "template_format" => self.template_format = value,
                "prefix" => self.prefix = value,
                other => tracing::warn!(variable = %key, field = other, "unknown bundlegen variable ignored"),
            }
        }
        Ok(())
    }

    /// Default location of a bundle's sources: `<bundles_dir>/<namespace as path>`.
    pub fn bundle_path(&self, namespace: &str) -> PathBuf {
        namespace
            .split(['\\', '/'])
            .filter(|part| !part.is_empty())
            .fold(self.bundles_dir.clone(), |path, part| path.join(part))
    }
}
