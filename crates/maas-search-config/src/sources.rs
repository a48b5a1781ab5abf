// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use maas_search_core::resources::ResourceKind;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::SearchConfigLayer;
use crate::sections::{LoggingConfigLayer, ResourceConfigLayer, ResourcesConfigLayer};

/// Default system-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/maas-search/search.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<SearchConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<SearchConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(SearchConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<SearchConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(SearchConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: SearchConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `MAAS_SEARCH_LOG_LEVEL` and `MAAS_SEARCH_<RESOURCE>_FIELDS`
/// (comma separated).
pub struct EnvSource;

impl EnvSource {
	fn load_with(&self, lookup: impl Fn(&str) -> Option<String>) -> SearchConfigLayer {
		let env_var = |name: &str| lookup(name).filter(|s| !s.is_empty());

		let logging = env_var("MAAS_SEARCH_LOG_LEVEL").map(|level| LoggingConfigLayer { level: Some(level) });

		let mut resources = ResourcesConfigLayer::default();
		let mut any_resource = false;
		for kind in ResourceKind::ALL {
			let key = fields_env_key(kind);
			if let Some(fields) = env_var(&key) {
				trace!(key = %key, "resource fields set from environment");
				*resources.get_mut(kind) = Some(ResourceConfigLayer {
					searchable_fields: Some(split_list(&fields)),
				});
				any_resource = true;
			}
		}

		SearchConfigLayer {
			logging,
			resources: any_resource.then_some(resources),
			prefixes: None,
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<SearchConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(self.load_with(|name| std::env::var(name).ok()))
	}
}

/// `MAAS_SEARCH_MACHINE_FIELDS` and friends.
pub fn fields_env_key(kind: ResourceKind) -> String {
	format!("MAAS_SEARCH_{}_FIELDS", kind.as_str().to_ascii_uppercase())
}

fn split_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}
