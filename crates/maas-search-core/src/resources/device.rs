// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Device pseudo-fields.

use serde_json::Value;

use super::{domain_name, mac_addresses, tag_names, zone_name, NodeAuxData, NODE_PRIMARY_KEY};
use crate::extract::{direct_value, MappingTable};
use crate::items::FilterItems;
use crate::value::Resolved;

pub const SEARCHABLE_FIELDS: &[&str] = &["hostname", "fqdn", "owner", "mac", "ip"];

pub fn mapping_table() -> MappingTable<NodeAuxData> {
	MappingTable::new()
		.with("domain", domain_name)
		.with("ip", ip_address)
		.with("mac", macs)
		.with("tags", tag_names)
		.with("zone", zone_name)
}

pub fn filter_items() -> FilterItems<NodeAuxData> {
	FilterItems::new(mapping_table(), SEARCHABLE_FIELDS.iter().copied())
		.with_primary_key(NODE_PRIMARY_KEY)
}

fn ip_address(device: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	direct_value(device, "ip_address")
}

fn macs(device: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	mac_addresses(device, "primary_mac", "extra_macs")
}
