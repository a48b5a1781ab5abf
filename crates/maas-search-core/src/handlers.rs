// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Query parsing and filter editing aware of prefixed filter families.

use serde::{Deserialize, Serialize};

use crate::filters::Filters;
use crate::parser::{parse_query_with, to_query_string};

/// Marker written in front of a term that must match exactly.
pub const EXACT_MARKER: char = '=';

/// A family of filters whose keys share a prefix and read a nested
/// annotations map, e.g. `workload-owner:(alice)` reads
/// `workload_annotations.owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixedFilter {
	/// Name used to toggle the family as a whole.
	pub filter: String,
	/// Key prefix, without the trailing `-`.
	pub prefix: String,
	/// Object property holding the annotations map.
	pub source: String,
}

impl PrefixedFilter {
	pub fn new(
		filter: impl Into<String>,
		prefix: impl Into<String>,
		source: impl Into<String>,
	) -> Self {
		Self {
			filter: filter.into(),
			prefix: prefix.into(),
			source: source.into(),
		}
	}

	/// Workload annotations attached to machines and controllers.
	pub fn workload() -> Self {
		Self::new("workload_annotations", "workload", "workload_annotations")
	}

	/// Build the filter key for a value, adding the prefix if it is missing.
	pub fn key_for(&self, value: &str) -> String {
		if self.strip(value).is_some() {
			value.to_string()
		} else {
			format!("{}-{}", self.prefix, value)
		}
	}

	/// The annotation name carried by a prefixed key.
	pub fn strip<'k>(&self, key: &'k str) -> Option<&'k str> {
		key.strip_prefix(self.prefix.as_str())
			.and_then(|rest| rest.strip_prefix('-'))
			.filter(|name| !name.is_empty())
	}
}

/// Parses, renders and edits [`Filters`] for one list view.
#[derive(Debug, Clone, Default)]
pub struct FilterHandlers {
	prefixed: Vec<PrefixedFilter>,
}

impl FilterHandlers {
	pub fn new(prefixed: Vec<PrefixedFilter>) -> Self {
		Self { prefixed }
	}

	pub fn prefixed_filters(&self) -> &[PrefixedFilter] {
		&self.prefixed
	}

	/// Find the prefixed family a key belongs to and the annotation name.
	pub fn split_prefixed_key<'k>(&self, key: &'k str) -> Option<(&PrefixedFilter, &'k str)> {
		self.prefixed
			.iter()
			.find_map(|prefixed| prefixed.strip(key).map(|name| (prefixed, name)))
	}

	pub fn is_prefixed_key(&self, key: &str) -> bool {
		self.split_prefixed_key(key).is_some()
	}

	pub fn empty_filter(&self) -> Filters {
		Filters::new()
	}

	pub fn get_current_filters(&self, query: &str) -> Filters {
		parse_query_with(query, |key| self.is_prefixed_key(key))
	}

	pub fn filters_to_string(&self, filters: &Filters) -> String {
		to_query_string(filters)
	}

	pub fn query_string_to_filters(&self, query: &str) -> Filters {
		Filters::from_url_query(query)
	}

	pub fn filters_to_query_string(&self, filters: &Filters) -> String {
		filters.to_url_query()
	}

	/// Whether `value` is one of the terms of `field`. Comparison ignores
	/// case. A prefixed family is active when its key is present at all.
	pub fn is_filter_active(&self, filters: &Filters, field: &str, value: &str, exact: bool) -> bool {
		if let Some(prefixed) = self.family(field) {
			return filters.contains_key(&prefixed.key_for(value));
		}
		let term = marked(value, exact);
		filters
			.get(field)
			.is_some_and(|values| term_position(values, &term).is_some())
	}

	/// Add or remove a term.
	///
	/// With `should_exist` unset the term is flipped. Otherwise the term ends
	/// up present or absent as requested. Fields left without terms are
	/// removed. For a prefixed family the whole prefixed key is toggled.
	pub fn toggle_filter(
		&self,
		filters: &mut Filters,
		field: &str,
		value: &str,
		exact: bool,
		should_exist: Option<bool>,
	) {
		if let Some(prefixed) = self.family(field) {
			let key = prefixed.key_for(value);
			let exists = filters.contains_key(&key);
			match (exists, should_exist.unwrap_or(!exists)) {
				(false, true) => filters.extend_field(&key, [""]),
				(true, false) => {
					filters.remove(&key);
				}
				_ => {}
			}
			return;
		}

		let term = marked(value, exact);
		let position = filters.get(field).and_then(|values| term_position(values, &term));
		match (position, should_exist.unwrap_or(position.is_none())) {
			(None, true) => filters.extend_field(field, [term]),
			(Some(index), false) => {
				let now_empty = filters.get_mut(field).is_some_and(|values| {
					values.remove(index);
					values.is_empty()
				});
				if now_empty {
					filters.remove(field);
				}
			}
			_ => {}
		}
	}

	fn family(&self, filter: &str) -> Option<&PrefixedFilter> {
		self.prefixed.iter().find(|prefixed| prefixed.filter == filter)
	}
}

fn marked(value: &str, exact: bool) -> String {
	if exact {
		format!("{EXACT_MARKER}{value}")
	} else {
		value.to_string()
	}
}

fn term_position(values: &[String], term: &str) -> Option<usize> {
	let term = term.to_lowercase();
	values.iter().position(|v| v.to_lowercase() == term)
}
