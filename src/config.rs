//! Runtime settings
//!
//! Settings are read from the TOML file named by `QUEST_CONFIG_PATH`. Every
//! key is optional; without a file the built-in catalog is used with
//! lenient answer parsing.
//!
//! ```toml
//! catalog = "catalog.toml"
//! answer_parsing = "strict"
//! verify_arithmetic = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{answer::AnswerParsing, catalog::Catalog};

/// Environment variable holding the settings file path
pub const CONFIG_PATH_ENV: &str = "QUEST_CONFIG_PATH";

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum Error {
    /// The settings file could not be read
    #[error("failed to read settings file {}", path.display())]
    Io {
        /// Path of the settings file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid
    #[error("failed to parse settings")]
    Parse(#[from] toml::de::Error),
    /// The configured catalog could not be loaded or verified
    #[error(transparent)]
    Catalog(#[from] crate::catalog::Error),
}

/// Settings for running the quest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// TOML catalog to use instead of the built-in one
    pub catalog: Option<PathBuf>,
    /// How answers are read on submission
    pub answer_parsing: AnswerParsing,
    /// Whether every answer is checked against its label when loading
    pub verify_arithmetic: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            answer_parsing: AnswerParsing::default(),
            verify_arithmetic: true,
        }
    }
}

impl Settings {
    /// Parses settings written in TOML
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed text or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Reads settings from a TOML file
    ///
    /// A relative `catalog` path is taken relative to the settings file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&text)?;
        if let (Some(catalog), Some(dir)) = (&settings.catalog, path.parent()) {
            settings.catalog = Some(dir.join(catalog));
        }
        info!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    /// Reads settings from the file named by [`CONFIG_PATH_ENV`], or uses
    /// the defaults when the variable is unset
    ///
    /// # Errors
    ///
    /// Same as [`Settings::load`].
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(path),
            None => {
                info!("{CONFIG_PATH_ENV} not set; using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Loads the configured catalog, verifying its arithmetic if enabled
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if the catalog cannot be loaded or one of
    /// its answers disagrees with its label.
    pub fn catalog(&self) -> Result<Catalog, Error> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        if self.verify_arithmetic {
            catalog.verify_arithmetic()?;
        }
        Ok(catalog)
    }
}
