// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-resource search settings.

use maas_search_core::resources::ResourceKind;
use serde::Deserialize;

/// Settings for one resource (runtime, fully resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceConfig {
	/// Fields searched by free text. `None` keeps the built-in defaults.
	pub searchable_fields: Option<Vec<String>>,
}

/// Settings for one resource (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceConfigLayer {
	#[serde(default)]
	pub searchable_fields: Option<Vec<String>>,
}

impl ResourceConfigLayer {
	pub fn merge(&mut self, other: ResourceConfigLayer) {
		if other.searchable_fields.is_some() {
			self.searchable_fields = other.searchable_fields;
		}
	}

	pub fn finalize(self) -> ResourceConfig {
		ResourceConfig {
			searchable_fields: self.searchable_fields,
		}
	}
}

/// Settings for every resource (runtime, fully resolved).
#[derive(Debug, Clone, Default)]
pub struct ResourcesConfig {
	pub machine: ResourceConfig,
	pub device: ResourceConfig,
	pub controller: ResourceConfig,
}

impl ResourcesConfig {
	pub fn get(&self, kind: ResourceKind) -> &ResourceConfig {
		match kind {
			ResourceKind::Machine => &self.machine,
			ResourceKind::Device => &self.device,
			ResourceKind::Controller => &self.controller,
		}
	}
}

/// Settings for every resource (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourcesConfigLayer {
	#[serde(default)]
	pub machine: Option<ResourceConfigLayer>,
	#[serde(default)]
	pub device: Option<ResourceConfigLayer>,
	#[serde(default)]
	pub controller: Option<ResourceConfigLayer>,
}

impl ResourcesConfigLayer {
	pub fn merge(&mut self, other: ResourcesConfigLayer) {
		merge_resource(&mut self.machine, other.machine);
		merge_resource(&mut self.device, other.device);
		merge_resource(&mut self.controller, other.controller);
	}

	pub fn finalize(self) -> ResourcesConfig {
		ResourcesConfig {
			machine: self.machine.unwrap_or_default().finalize(),
			device: self.device.unwrap_or_default().finalize(),
			controller: self.controller.unwrap_or_default().finalize(),
		}
	}

	pub fn get_mut(&mut self, kind: ResourceKind) -> &mut Option<ResourceConfigLayer> {
		match kind {
			ResourceKind::Machine => &mut self.machine,
			ResourceKind::Device => &mut self.device,
			ResourceKind::Controller => &mut self.controller,
		}
	}
}

fn merge_resource(target: &mut Option<ResourceConfigLayer>, other: Option<ResourceConfigLayer>) {
	if let Some(other) = other {
		target.get_or_insert_with(Default::default).merge(other);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_keep_builtin_fields() {
		let config = ResourcesConfigLayer::default().finalize();
		for kind in ResourceKind::ALL {
			assert!(config.get(kind).searchable_fields.is_none());
		}
	}

	#[test]
	fn test_layer_merge() {
		let mut base = ResourcesConfigLayer {
			machine: Some(ResourceConfigLayer {
				searchable_fields: Some(vec!["hostname".to_string()]),
			}),
			device: None,
			controller: None,
		};
		base.merge(ResourcesConfigLayer {
			machine: Some(ResourceConfigLayer::default()),
			device: Some(ResourceConfigLayer {
				searchable_fields: Some(vec!["mac".to_string()]),
			}),
			controller: None,
		});
		let config = base.finalize();
		assert_eq!(config.machine.searchable_fields, Some(vec!["hostname".to_string()]));
		assert_eq!(config.device.searchable_fields, Some(vec!["mac".to_string()]));
		assert_eq!(config.controller, ResourceConfig::default());
	}

	#[test]
	fn test_deserialize() {
		let layer: ResourcesConfigLayer = toml::from_str(
			r#"
[machine]
searchable_fields = ["hostname", "fqdn"]
"#,
		)
		.unwrap();
		let config = layer.finalize();
		assert_eq!(
			config.machine.searchable_fields,
			Some(vec!["hostname".to_string(), "fqdn".to_string()])
		);
	}
}
