// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Matching domain objects against parsed filters.

use serde_json::Value;
use tracing::trace;

use crate::extract::{annotation_value, direct_value, MappingTable};
use crate::filters::{Filters, FREE_TEXT_KEY, SELECTION_KEY};
use crate::handlers::{FilterHandlers, PrefixedFilter, EXACT_MARKER};
use crate::parser::to_query_string;
use crate::value::{FilterValue, Resolved};

const NEGATION: char = '!';

/// Value of the selection key for selected objects. Unselected objects
/// resolve to `!selected`.
pub const SELECTED: &str = "selected";

/// Primary key used when none is configured.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// A filter term with its negation resolved. `!!x` cancels out to `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term<'t> {
	Include(&'t str),
	Exclude(&'t str),
}

impl<'t> Term<'t> {
	fn parse(raw: &'t str) -> Self {
		if let Some(rest) = raw.strip_prefix("!!") {
			Self::Include(rest)
		} else if let Some(rest) = raw.strip_prefix(NEGATION) {
			Self::Exclude(rest)
		} else {
			Self::Include(raw)
		}
	}
}

/// Filters one kind of domain object.
///
/// Holds the resource's mapping table, the fields searched by free text,
/// the prefixed filter families and the primary key used by the `in`
/// selection filter. Immutable once built.
#[derive(Debug, Clone)]
pub struct FilterItems<A> {
	table: MappingTable<A>,
	handlers: FilterHandlers,
	searchable: Vec<String>,
	primary_key: String,
}

impl<A> FilterItems<A> {
	pub fn new<I, S>(table: MappingTable<A>, searchable: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			table,
			handlers: FilterHandlers::default(),
			searchable: searchable.into_iter().map(Into::into).collect(),
			primary_key: DEFAULT_PRIMARY_KEY.to_string(),
		}
	}

	#[must_use]
	pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
		self.primary_key = primary_key.into();
		self
	}

	pub fn primary_key(&self) -> &str {
		&self.primary_key
	}

	#[must_use]
	pub fn with_prefixed_filters(mut self, prefixed: Vec<PrefixedFilter>) -> Self {
		self.handlers = FilterHandlers::new(prefixed);
		self
	}

	#[must_use]
	pub fn with_searchable_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.searchable = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn handlers(&self) -> &FilterHandlers {
		&self.handlers
	}

	pub fn mapping_table(&self) -> &MappingTable<A> {
		&self.table
	}

	pub fn searchable_fields(&self) -> &[String] {
		&self.searchable
	}

	pub fn get_current_filters(&self, query: &str) -> Filters {
		self.handlers.get_current_filters(query)
	}

	pub fn to_query_string(&self, filters: &Filters) -> String {
		to_query_string(filters)
	}

	/// Resolve the comparable value(s) of `field` on `object`.
	///
	/// A mapping table entry wins and its answer is final even when it is
	/// `None`. Otherwise the raw property is used, then the annotations map
	/// for prefixed keys such as `workload-owner`.
	pub fn get_value(&self, object: &Value, field: &str, aux: Option<&A>) -> Option<Resolved> {
		if let Some(mapper) = self.table.get(field) {
			return mapper(object, aux);
		}
		direct_value(object, field).or_else(|| {
			let (prefixed, name) = self.handlers.split_prefixed_key(field)?;
			annotation_value(object, &prefixed.source, name)
		})
	}

	/// Whether `object` satisfies every key of `filters`, with nothing
	/// selected.
	pub fn matches(&self, object: &Value, filters: &Filters, aux: Option<&A>) -> bool {
		self.matches_selected(object, filters, &[], aux)
	}

	/// Whether `object` satisfies every key of `filters`. `selected` holds
	/// the primary keys of the selected objects, used by `in:(selected)` and
	/// `in:(!selected)`.
	pub fn matches_selected(
		&self,
		object: &Value,
		filters: &Filters,
		selected: &[String],
		aux: Option<&A>,
	) -> bool {
		filters.iter().all(|(field, terms)| {
			if field == FREE_TEXT_KEY {
				self.free_text_matches(object, terms, aux)
			} else if field == SELECTION_KEY {
				field_matches(Some(self.selection_state(object, selected)), field, terms)
			} else {
				field_matches(self.get_value(object, field, aux), field, terms)
			}
		})
	}

	/// Keep the objects matching `filters`, in their original order.
	pub fn filter_items<'a, I>(&self, items: I, filters: &Filters, aux: Option<&A>) -> Vec<&'a Value>
	where
		I: IntoIterator<Item = &'a Value>,
	{
		self.filter_selected(items, filters, &[], aux)
	}

	/// Keep the objects matching `filters` given the selected primary keys.
	pub fn filter_selected<'a, I>(
		&self,
		items: I,
		filters: &Filters,
		selected: &[String],
		aux: Option<&A>,
	) -> Vec<&'a Value>
	where
		I: IntoIterator<Item = &'a Value>,
	{
		items
			.into_iter()
			.filter(|object| self.matches_selected(object, filters, selected, aux))
			.collect()
	}

	/// Parse `query` and filter `items` with it.
	pub fn search<'a>(&self, items: &'a [Value], query: &str, aux: Option<&A>) -> Vec<&'a Value> {
		self.search_selected(items, query, &[], aux)
	}

	/// Parse `query` and filter `items` with it given the selected primary
	/// keys.
	pub fn search_selected<'a>(
		&self,
		items: &'a [Value],
		query: &str,
		selected: &[String],
		aux: Option<&A>,
	) -> Vec<&'a Value> {
		let filters = self.get_current_filters(query);
		self.filter_selected(items, &filters, selected, aux)
	}

	/// `selected` or `!selected` depending on whether the object's primary
	/// key is in `selected`. Objects without a primary key are unselected.
	fn selection_state(&self, object: &Value, selected: &[String]) -> Resolved {
		let is_selected = direct_value(object, &self.primary_key).is_some_and(|pk| {
			pk.as_slice()
				.iter()
				.any(|value| selected.iter().any(|id| value.matches_term(id)))
		});
		if is_selected {
			Resolved::from(SELECTED)
		} else {
			Resolved::from(format!("{NEGATION}{SELECTED}"))
		}
	}

	fn free_text_matches(&self, object: &Value, terms: &[String], aux: Option<&A>) -> bool {
		if terms.is_empty() {
			return true;
		}
		let haystack: Vec<FilterValue> = self
			.searchable
			.iter()
			.filter_map(|field| self.get_value(object, field, aux))
			.flat_map(|resolved| resolved.as_slice().to_vec())
			.collect();
		let found = |needle: &str| {
			let needle = needle.to_lowercase();
			haystack.iter().any(|value| value.contains_lowercase(&needle))
		};
		terms.iter().all(|raw| match Term::parse(raw) {
			Term::Include(term) => found(term),
			Term::Exclude(term) => term.is_empty() || !found(term),
		})
	}
}

fn field_matches(resolved: Option<Resolved>, field: &str, terms: &[String]) -> bool {
	let Some(resolved) = resolved else {
		trace!(field, "field did not resolve");
		return false;
	};
	let values = resolved.as_slice();

	let mut wants_match = false;
	let mut matched = false;
	for raw in terms {
		match Term::parse(raw) {
			Term::Include(term) => {
				wants_match = true;
				let term = term.strip_prefix(EXACT_MARKER).unwrap_or(term);
				// An empty term only asks for the field to be present.
				if term.is_empty() || contains_term(values, term) {
					matched = true;
				}
			}
			Term::Exclude(term) => {
				let term = term.strip_prefix(EXACT_MARKER).unwrap_or(term);
				if !term.is_empty() && contains_term(values, term) {
					return false;
				}
			}
		}
	}
	!wants_match || matched
}

fn contains_term(values: &[FilterValue], term: &str) -> bool {
	values.iter().any(|value| value.matches_term(term))
}
