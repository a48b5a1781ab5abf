// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolving the comparable value of a field on a domain object.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::value::Resolved;

/// Derives a pseudo-field from an object and optional auxiliary data.
///
/// Mappers must not panic on unexpected shapes; anything missing resolves
/// to `None`.
pub type Mapper<A> = fn(&Value, Option<&A>) -> Option<Resolved>;

/// Per-resource registry of pseudo-field mappers.
pub struct MappingTable<A> {
	entries: HashMap<&'static str, Mapper<A>>,
}

impl<A> MappingTable<A> {
	pub fn new() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}

	#[must_use]
	pub fn with(mut self, field: &'static str, mapper: Mapper<A>) -> Self {
		self.entries.insert(field, mapper);
		self
	}

	pub fn insert(&mut self, field: &'static str, mapper: Mapper<A>) {
		self.entries.insert(field, mapper);
	}

	pub fn get(&self, field: &str) -> Option<Mapper<A>> {
		self.entries.get(field).copied()
	}

	pub fn contains(&self, field: &str) -> bool {
		self.entries.contains_key(field)
	}

	/// Registered field names, sorted.
	pub fn fields(&self) -> Vec<&'static str> {
		let mut fields: Vec<_> = self.entries.keys().copied().collect();
		fields.sort_unstable();
		fields
	}
}

impl<A> Default for MappingTable<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A> Clone for MappingTable<A> {
	fn clone(&self) -> Self {
		Self {
			entries: self.entries.clone(),
		}
	}
}

impl<A> fmt::Debug for MappingTable<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MappingTable")
			.field("fields", &self.fields())
			.finish()
	}
}

/// Read a property stored directly on the object.
pub fn direct_value(object: &Value, field: &str) -> Option<Resolved> {
	object.as_object()?.get(field).and_then(Resolved::from_json)
}

/// Read a key of a nested annotations map, e.g. `workload_annotations`.
pub fn annotation_value(object: &Value, source: &str, name: &str) -> Option<Resolved> {
	object
		.as_object()?
		.get(source)?
		.as_object()?
		.get(name)
		.and_then(Resolved::from_json)
}

/// Read a nested value by JSON pointer, e.g. `/zone/name`.
pub fn pointer_value(object: &Value, pointer: &str) -> Option<Resolved> {
	object.pointer(pointer).and_then(Resolved::from_json)
}
