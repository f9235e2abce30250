//! Settings for control-flow rendering.
//!
//! Settings are read from TOML. Every table and field is optional:
//!
//! ```toml
//! [keys]
//! warn_on_duplicates = true
//!
//! [render]
//! key_markers = false
//! ```

use reinhardt_flow_types::RenderOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading [`FlowSettings`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("failed to read settings file `{}`: {source}", path.display())]
	Io {
		/// Path of the settings file.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},
	/// The settings could not be parsed.
	#[error("invalid settings: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Control-flow settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowSettings {
	/// List key handling.
	pub keys: KeySettings,
	/// Server-side rendering.
	pub render: RenderSettings,
}

/// The `[keys]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeySettings {
	/// Log a warning when a list renders duplicate sibling keys.
	pub warn_on_duplicates: bool,
}

impl Default for KeySettings {
	fn default() -> Self {
		Self {
			warn_on_duplicates: true,
		}
	}
}

/// The `[render]` table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
	/// Emit key marker comments around keyed fragments.
	pub key_markers: bool,
}

impl FlowSettings {
	/// Parses settings from a TOML string.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Loads settings from a TOML file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), ?settings, "loaded flow settings");
		Ok(settings)
	}

	/// Returns the render options these settings describe.
	pub fn render_options(&self) -> RenderOptions {
		RenderOptions::new().key_markers(self.render.key_markers)
	}
}
