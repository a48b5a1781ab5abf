// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer merged across sources.

use serde::Deserialize;

use crate::sections::{LoggingConfigLayer, PrefixesConfigLayer, ResourcesConfigLayer};

/// One source's view of the configuration. Unset sections are `None` and
/// leave lower-precedence values untouched when merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfigLayer {
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub resources: Option<ResourcesConfigLayer>,
	#[serde(default)]
	pub prefixes: Option<PrefixesConfigLayer>,
}

impl SearchConfigLayer {
	/// Merge `other` on top of `self`; set values in `other` win.
	pub fn merge(&mut self, other: SearchConfigLayer) {
		if let Some(logging) = other.logging {
			self.logging.get_or_insert_with(Default::default).merge(logging);
		}
		if let Some(resources) = other.resources {
			self.resources.get_or_insert_with(Default::default).merge(resources);
		}
		if let Some(prefixes) = other.prefixes {
			self.prefixes.get_or_insert_with(Default::default).merge(prefixes);
		}
	}
}
