// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Controller pseudo-fields.

use serde_json::Value;

use super::{domain_name, tag_names, NodeAuxData, NODE_PRIMARY_KEY};
use crate::extract::{direct_value, pointer_value, MappingTable};
use crate::handlers::PrefixedFilter;
use crate::items::FilterItems;
use crate::value::Resolved;

pub const SEARCHABLE_FIELDS: &[&str] = &["hostname", "fqdn", "type"];

pub fn mapping_table() -> MappingTable<NodeAuxData> {
	MappingTable::new()
		.with("domain", domain_name)
		.with("tags", tag_names)
		.with("type", node_type)
		.with("version", version)
}

pub fn filter_items() -> FilterItems<NodeAuxData> {
	FilterItems::new(mapping_table(), SEARCHABLE_FIELDS.iter().copied())
		.with_primary_key(NODE_PRIMARY_KEY)
		.with_prefixed_filters(vec![PrefixedFilter::workload()])
}

fn node_type(controller: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	direct_value(controller, "node_type_display")
}

/// Installed version, falling back to the flat `version` field older
/// regions report.
fn version(controller: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	pointer_value(controller, "/versions/current/version").or_else(|| direct_value(controller, "version"))
}
