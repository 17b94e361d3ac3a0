//! # Settings
//!
//! Calculator settings, layered in priority order:
//!
//! 1. Built-in defaults
//! 2. A JSON settings file, when one is given
//! 3. Environment variables (`SNAPFIT_REFERENCE_DIR`, `SNAPFIT_PRECISION`,
//!    `SNAPFIT_SHAPE`)
//!
//! Command-line flags are applied on top by the front end.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "reference_dir": "/srv/snapfit/reference",
//!   "precision": 2,
//!   "default_shape": "cantilever",
//!   "force_unit": "N"
//! }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::SnapShape;
use crate::errors::{CalcError, CalcResult};
use crate::reference::ParameterSource;
use crate::units::ForceUnit;

/// Environment variable overriding the reference directory
pub const ENV_REFERENCE_DIR: &str = "SNAPFIT_REFERENCE_DIR";

/// Environment variable overriding the display precision
pub const ENV_PRECISION: &str = "SNAPFIT_PRECISION";

/// Environment variable overriding the default shape
pub const ENV_SHAPE: &str = "SNAPFIT_SHAPE";

/// Calculator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of CSV sheet exports; `None` uses the bundled sheets
    pub reference_dir: Option<PathBuf>,

    /// Decimal places shown in output tables
    pub precision: usize,

    /// Shape used when none is given
    pub default_shape: SnapShape,

    /// Unit for displayed forces
    pub force_unit: ForceUnit,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            reference_dir: None,
            precision: 3,
            default_shape: SnapShape::Cantilever,
            force_unit: ForceUnit::Newtons,
        }
    }
}

impl Settings {
    /// Load settings: defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> CalcResult<Self> {
        let mut settings = match path {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Read a JSON settings file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let mut file = File::open(path).map_err(|e| {
            CalcError::file_error("open", path.display().to_string(), e.to_string())
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;

        let settings: Settings =
            serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), e),
            })?;

        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> CalcResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_REFERENCE_DIR) {
            self.reference_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(ENV_PRECISION) {
            self.precision = raw.trim().parse().map_err(|_| {
                CalcError::invalid_input(ENV_PRECISION, raw.trim(), "Expected a whole number of decimal places")
            })?;
        }
        if let Some(raw) = lookup(ENV_SHAPE) {
            self.default_shape = raw.parse()?;
        }
        Ok(())
    }

    /// Parameter source for these settings
    pub fn parameter_source(&self) -> ParameterSource {
        match &self.reference_dir {
            Some(dir) => ParameterSource::from_dir(dir),
            None => ParameterSource::bundled(),
        }
    }
}
