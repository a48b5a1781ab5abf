// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mapping tables for the node list views.

pub mod controller;
pub mod device;
pub mod machine;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SearchError, SearchResult};
use crate::extract::pointer_value;
use crate::items::FilterItems;
use crate::value::{FilterValue, Resolved};

/// Primary key of every node record.
pub const NODE_PRIMARY_KEY: &str = "system_id";

/// A tag from the tag catalog. Nodes refer to tags by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	pub id: u64,
	pub name: String,
	#[serde(default)]
	pub definition: String,
	#[serde(default)]
	pub comment: String,
}

/// Lookup tables supplied alongside node records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAuxData {
	#[serde(default)]
	pub tags: Vec<Tag>,
}

impl NodeAuxData {
	pub fn with_tags(tags: Vec<Tag>) -> Self {
		Self { tags }
	}

	pub fn tag_name(&self, id: u64) -> Option<&str> {
		self.tags
			.iter()
			.find(|tag| tag.id == id)
			.map(|tag| tag.name.as_str())
	}
}

/// The node kinds that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
	Machine,
	Device,
	Controller,
}

impl ResourceKind {
	pub const ALL: [ResourceKind; 3] = [Self::Machine, Self::Device, Self::Controller];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Machine => "machine",
			Self::Device => "device",
			Self::Controller => "controller",
		}
	}

	/// Filter engine with this resource's mapping table and default
	/// free-text fields.
	pub fn filter_items(&self) -> FilterItems<NodeAuxData> {
		match self {
			Self::Machine => machine::filter_items(),
			Self::Device => device::filter_items(),
			Self::Controller => controller::filter_items(),
		}
	}

	pub fn default_searchable_fields(&self) -> &'static [&'static str] {
		match self {
			Self::Machine => machine::SEARCHABLE_FIELDS,
			Self::Device => device::SEARCHABLE_FIELDS,
			Self::Controller => controller::SEARCHABLE_FIELDS,
		}
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ResourceKind {
	type Err = SearchError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"machine" | "machines" => Ok(Self::Machine),
			"device" | "devices" => Ok(Self::Device),
			"controller" | "controllers" => Ok(Self::Controller),
			other => Err(SearchError::UnknownResource(other.to_string())),
		}
	}
}

/// Decode a JSON array of node records.
pub fn load_records(json: &str) -> SearchResult<Vec<Value>> {
	match serde_json::from_str::<Value>(json)? {
		Value::Array(records) => Ok(records),
		other => Err(SearchError::InvalidRecords(format!(
			"expected an array of records, got {}",
			json_kind(&other)
		))),
	}
}

/// Decode the tag catalog.
pub fn load_tags(json: &str) -> SearchResult<Vec<Tag>> {
	Ok(serde_json::from_str(json)?)
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

pub(crate) fn domain_name(node: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	pointer_value(node, "/domain/name")
}

pub(crate) fn zone_name(node: &Value, _: Option<&NodeAuxData>) -> Option<Resolved> {
	pointer_value(node, "/zone/name")
}

/// Tag names for a node. Ids are looked up in the catalog and unknown ids
/// are skipped; names already present on the record are kept as is. An
/// untagged node resolves to an empty list so negated tag filters still
/// apply to it.
pub(crate) fn tag_names(node: &Value, aux: Option<&NodeAuxData>) -> Option<Resolved> {
	let tags = node.get("tags")?.as_array()?;
	let names = tags
		.iter()
		.filter_map(|tag| match tag {
			Value::Number(id) => {
				let name = aux?.tag_name(id.as_u64()?)?;
				Some(FilterValue::from(name))
			}
			Value::String(name) => Some(FilterValue::from(name.as_str())),
			_ => None,
		})
		.collect();
	Some(Resolved::Many(names))
}

/// Collect MAC addresses from a primary field and a list of extras.
pub(crate) fn mac_addresses(node: &Value, primary: &str, extra: &str) -> Option<Resolved> {
	let mut macs = Vec::new();
	if let Some(mac) = node.get(primary).and_then(Value::as_str) {
		macs.push(FilterValue::from(mac));
	}
	if let Some(extras) = node.get(extra).and_then(Value::as_array) {
		macs.extend(extras.iter().filter_map(Value::as_str).map(FilterValue::from));
	}
	if macs.is_empty() {
		None
	} else {
		Some(Resolved::Many(macs))
	}
}
