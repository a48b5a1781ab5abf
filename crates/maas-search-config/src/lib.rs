// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for MAAS search filtering.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Validation of free-text field overrides and annotation prefixes
//! - Consistent environment variable naming (`MAAS_SEARCH_*`)
//!
//! # Usage
//!
//! ```no_run
//! use maas_search_config::load_config;
//! use maas_search_core::resources::ResourceKind;
//!
//! let config = load_config()?;
//! let items = config.filter_items(ResourceKind::Machine);
//! println!("searching {:?}", items.searchable_fields());
//! # Ok::<(), maas_search_config::ConfigError>(())
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::SearchConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use maas_search_core::resources::{NodeAuxData, ResourceKind};
use maas_search_core::FilterItems;
use tracing::{debug, info};

/// Fully resolved search configuration.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
	pub logging: LoggingConfig,
	pub resources: ResourcesConfig,
	pub prefixes: PrefixesConfig,
}

impl SearchConfig {
	/// Filter engine for `kind` with the configured overrides applied.
	///
	/// Configured prefixes replace the annotation families of resources
	/// that carry annotations (machines and controllers).
	pub fn filter_items(&self, kind: ResourceKind) -> FilterItems<NodeAuxData> {
		let mut items = kind.filter_items();
		if let Some(fields) = &self.resources.get(kind).searchable_fields {
			items = items.with_searchable_fields(fields.iter().cloned());
		}
		if !items.handlers().prefixed_filters().is_empty() {
			items = items.with_prefixed_filters(self.prefixes.filters.clone());
		}
		items
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`MAAS_SEARCH_*`)
/// 2. Config file (`/etc/maas-search/search.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<SearchConfig, ConfigError> {
	load_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<SearchConfig, ConfigError> {
	load_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<SearchConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = SearchConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: SearchConfigLayer) -> Result<SearchConfig, ConfigError> {
	let logging = layer.logging.unwrap_or_default().finalize();
	let resources = layer.resources.unwrap_or_default().finalize();
	let prefixes = layer.prefixes.unwrap_or_default().finalize();

	validate_config(&resources, &prefixes)?;

	info!(
		log_level = %logging.level,
		prefixes = prefixes.filters.len(),
		machine_fields_overridden = resources.machine.searchable_fields.is_some(),
		device_fields_overridden = resources.device.searchable_fields.is_some(),
		controller_fields_overridden = resources.controller.searchable_fields.is_some(),
		"Search configuration loaded"
	);

	Ok(SearchConfig {
		logging,
		resources,
		prefixes,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(resources: &ResourcesConfig, prefixes: &PrefixesConfig) -> Result<(), ConfigError> {
	for kind in ResourceKind::ALL {
		let Some(fields) = &resources.get(kind).searchable_fields else {
			continue;
		};
		if fields.is_empty() {
			return Err(ConfigError::invalid_value(
				format!("resources.{kind}.searchable_fields"),
				"must name at least one field",
			));
		}
		if let Some(field) = fields.iter().find(|f| f.trim().is_empty()) {
			return Err(ConfigError::invalid_value(
				format!("resources.{kind}.searchable_fields"),
				format!("blank field name {field:?}"),
			));
		}
	}

	for prefixed in &prefixes.filters {
		let valid = !prefixed.prefix.is_empty()
			&& prefixed
				.prefix
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '_');
		if !valid {
			return Err(ConfigError::invalid_value(
				"prefixes.extra.prefix",
				format!("{:?} must be non-empty and use only letters, digits and '_'", prefixed.prefix),
			));
		}
		if prefixed.source.is_empty() || prefixed.filter.is_empty() {
			return Err(ConfigError::validation(format!(
				"prefix {:?} needs both a filter name and a source property",
				prefixed.prefix
			)));
		}
	}

	Ok(())
}
