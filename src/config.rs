//! Project manifest (embkit.yaml) parsing.
//!
//! The manifest holds per-format decoding options and the default output
//! directory for conversions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EmbError, Result};
use crate::registry::{FormatRegistry, RegistryBuilder};
use crate::svg::{SvgFormat, SvgOptions};

/// File name looked up in the working directory.
pub const MANIFEST_FILE: &str = "embkit.yaml";

/// Project manifest loaded from embkit.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// SVG decoding options.
    pub svg: SvgOptions,

    /// Directory that relative output paths are placed in.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            svg: SvgOptions::default(),
            output: default_output(),
        }
    }
}

impl Manifest {
    /// Load manifest from an embkit.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EmbError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| EmbError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check embkit.yaml syntax".to_string()),
        })
    }

    /// Load `embkit.yaml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        if path.is_file() {
            log::debug!("using manifest {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Format registry configured with this manifest's options.
    pub fn registry(&self) -> FormatRegistry {
        let mut builder = RegistryBuilder::new();
        builder.register(SvgFormat::new(self.svg.clone()));
        builder.build()
    }

    /// Resolve an output path against the output directory.
    pub fn output_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output.join(path)
        }
    }
}
