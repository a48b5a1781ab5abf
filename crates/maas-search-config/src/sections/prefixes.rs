// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Prefixed (annotation) filter families.

use maas_search_core::PrefixedFilter;
use serde::Deserialize;

/// Annotation filter families (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixesConfig {
	pub filters: Vec<PrefixedFilter>,
}

impl Default for PrefixesConfig {
	fn default() -> Self {
		Self {
			filters: vec![PrefixedFilter::workload()],
		}
	}
}

/// Annotation filter families (partial, for merging).
///
/// `extra` entries are appended to the families already configured, so a
/// config file can add prefixes without restating `workload`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefixesConfigLayer {
	#[serde(default)]
	pub include_workload: Option<bool>,
	#[serde(default)]
	pub extra: Vec<PrefixedFilter>,
}

impl PrefixesConfigLayer {
	pub fn merge(&mut self, other: PrefixesConfigLayer) {
		if other.include_workload.is_some() {
			self.include_workload = other.include_workload;
		}
		for prefixed in other.extra {
			if !self.extra.iter().any(|p| p.prefix == prefixed.prefix) {
				self.extra.push(prefixed);
			}
		}
	}

	pub fn finalize(self) -> PrefixesConfig {
		let mut filters = Vec::new();
		if self.include_workload.unwrap_or(true) {
			filters.push(PrefixedFilter::workload());
		}
		for prefixed in self.extra {
			if !filters.iter().any(|p| p.prefix == prefixed.prefix) {
				filters.push(prefixed);
			}
		}
		PrefixesConfig { filters }
	}
}
