// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The parsed form of a search query.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::form_urlencoded;

/// Key holding free-text terms that are not bound to a field. It matches the
/// `q` parameter used in list view URLs and cannot clash with an attribute.
pub const FREE_TEXT_KEY: &str = "q";

/// Key holding list selection state. It is never written to URLs.
pub const SELECTION_KEY: &str = "in";

/// Ordered mapping of field name to filter terms.
///
/// The free-text bucket is always present and always first. Other fields keep
/// the order in which they were first inserted, which is the order they are
/// rendered back into a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
	entries: Vec<(String, Vec<String>)>,
}

impl Filters {
	/// An empty filter: just the free-text bucket with no terms.
	pub fn new() -> Self {
		Self {
			entries: vec![(FREE_TEXT_KEY.to_string(), Vec::new())],
		}
	}

	pub fn free_text(&self) -> &[String] {
		&self.entries[0].1
	}

	pub fn push_free_text(&mut self, term: impl Into<String>) {
		self.entries[0].1.push(term.into());
	}

	pub fn get(&self, field: &str) -> Option<&[String]> {
		self.position(field).map(|i| self.entries[i].1.as_slice())
	}

	pub fn get_mut(&mut self, field: &str) -> Option<&mut Vec<String>> {
		self.position(field).map(|i| &mut self.entries[i].1)
	}

	pub fn contains_key(&self, field: &str) -> bool {
		self.position(field).is_some()
	}

	/// Append terms to a field, creating it at the end if it is new.
	pub fn extend_field<I, S>(&mut self, field: &str, values: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let values = values.into_iter().map(Into::into);
		match self.get_mut(field) {
			Some(existing) => existing.extend(values),
			None => self.entries.push((field.to_string(), values.collect())),
		}
	}

	/// Replace the terms of a field, returning the previous ones.
	pub fn insert(&mut self, field: &str, values: Vec<String>) -> Option<Vec<String>> {
		match self.get_mut(field) {
			Some(existing) => Some(std::mem::replace(existing, values)),
			None => {
				self.entries.push((field.to_string(), values));
				None
			}
		}
	}

	/// Remove a field. Removing the free-text bucket clears it instead.
	pub fn remove(&mut self, field: &str) -> Option<Vec<String>> {
		if field == FREE_TEXT_KEY {
			return Some(std::mem::take(&mut self.entries[0].1));
		}
		let index = self.position(field)?;
		Some(self.entries.remove(index).1)
	}

	/// Every key including the free-text bucket, in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}

	/// Field-scoped keys only.
	pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.iter().skip(1)
	}

	/// True when no key carries any term.
	pub fn is_empty(&self) -> bool {
		self.entries.iter().all(|(_, values)| values.is_empty())
	}

	/// Build filters from a URL query string such as
	/// `?q=moon%2Csun&status=new,deployed`. Parameters without a value are
	/// ignored and every value is split on commas.
	pub fn from_url_query(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		let mut filters = Self::new();
		for (name, values) in form_urlencoded::parse(query.as_bytes()) {
			if values.is_empty() {
				continue;
			}
			filters.insert(&name, values.split(',').map(str::to_string).collect());
		}
		filters
	}

	/// Render filters as a URL query string. Empty fields and the selection
	/// key are left out.
	pub fn to_url_query(&self) -> String {
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		for (name, values) in self.iter() {
			if values.is_empty() || name == SELECTION_KEY {
				continue;
			}
			serializer.append_pair(name, &values.join(","));
		}
		format!("?{}", serializer.finish())
	}

	fn position(&self, field: &str) -> Option<usize> {
		self.entries.iter().position(|(k, _)| k == field)
	}
}

impl Default for Filters {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for Filters {
	fn from_iter<I: IntoIterator<Item = (S, Vec<String>)>>(iter: I) -> Self {
		let mut filters = Self::new();
		for (field, values) in iter {
			let field: String = field.into();
			filters.insert(&field, values);
		}
		filters
	}
}

impl Serialize for Filters {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (field, values) in &self.entries {
			map.serialize_entry(field, values)?;
		}
		map.end()
	}
}

impl<'de> Deserialize<'de> for Filters {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct FiltersVisitor;

		impl<'de> Visitor<'de> for FiltersVisitor {
			type Value = Filters;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("a map of field names to lists of terms")
			}

			fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Filters, A::Error> {
				let mut filters = Filters::new();
				while let Some((field, values)) = access.next_entry::<String, Vec<String>>()? {
					filters.insert(&field, values);
				}
				Ok(filters)
			}
		}

		deserializer.deserialize_map(FiltersVisitor)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn strings(values: &[&str]) -> Vec<String> {
		values.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_new_has_empty_free_text() {
		let filters = Filters::new();
		assert!(filters.free_text().is_empty());
		assert_eq!(filters.iter().count(), 1);
		assert!(filters.is_empty());
	}

	#[test]
	fn test_extend_field_appends() {
		let mut filters = Filters::new();
		filters.extend_field("hostname", ["a"]);
		filters.extend_field("tags", ["x"]);
		filters.extend_field("hostname", ["b"]);
		assert_eq!(filters.get("hostname"), Some(&strings(&["a", "b"])[..]));
		let keys: Vec<_> = filters.fields().map(|(k, _)| k).collect();
		assert_eq!(keys, vec!["hostname", "tags"]);
	}

	#[test]
	fn test_remove_free_text_clears() {
		let mut filters = Filters::new();
		filters.push_free_text("moon");
		assert_eq!(filters.remove(FREE_TEXT_KEY), Some(strings(&["moon"])));
		assert!(filters.contains_key(FREE_TEXT_KEY));
		assert!(filters.free_text().is_empty());
	}

	#[test]
	fn test_from_url_query() {
		let filters =
			Filters::from_url_query("?q=moon%2Csun&status=new,failed+comissioning&zone=!south&hostname=");
		let expected: Filters = [
			("q", strings(&["moon", "sun"])),
			("status", strings(&["new", "failed comissioning"])),
			("zone", strings(&["!south"])),
		]
		.into_iter()
		.collect();
		assert_eq!(filters, expected);
	}

	#[test]
	fn test_to_url_query_skips_empty_and_selection() {
		let filters: Filters = [
			("q", strings(&["moon", "sun"])),
			("hostname", vec![]),
			("status", strings(&["new", "failed comissioning"])),
			("zone", strings(&["!south"])),
			("in", strings(&["selected"])),
		]
		.into_iter()
		.collect();
		assert_eq!(
			filters.to_url_query(),
			"?q=moon%2Csun&status=new%2Cfailed+comissioning&zone=%21south"
		);
	}

	#[test]
	fn test_url_query_round_trip() {
		let query = "?q=moon%2Csun&status=new%2Cfailed+comissioning&zone=%21south";
		assert_eq!(Filters::from_url_query(query).to_url_query(), query);
	}

	#[test]
	fn test_serde_keeps_order() {
		let mut filters = Filters::new();
		filters.push_free_text("moon");
		filters.extend_field("zone", ["a"]);
		filters.extend_field("arch", ["amd64"]);
		let json = serde_json::to_string(&filters).unwrap();
		assert_eq!(json, r#"{"q":["moon"],"zone":["a"],"arch":["amd64"]}"#);
		let back: Filters = serde_json::from_str(&json).unwrap();
		assert_eq!(back, filters);
	}

	#[test]
	fn test_deserialize_without_free_text_key() {
		let filters: Filters = serde_json::from_str(r#"{"tags":["a"]}"#).unwrap();
		assert!(filters.free_text().is_empty());
		assert_eq!(filters.get("tags"), Some(&strings(&["a"])[..]));
	}
}
