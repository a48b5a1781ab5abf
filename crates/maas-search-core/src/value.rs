// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Comparable values extracted from domain objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A primitive value a filter term can be compared against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
	Number(Number),
	Text(String),
}

impl FilterValue {
	/// Convert a JSON scalar into a filter value. Anything other than a
	/// string or a number yields `None`.
	pub fn from_json(value: &Value) -> Option<Self> {
		match value {
			Value::String(s) => Some(Self::Text(s.clone())),
			Value::Number(n) => Some(Self::Number(n.clone())),
			_ => None,
		}
	}

	/// Exact comparison against a single filter term.
	///
	/// Text is compared byte for byte. A number matches a term that parses to
	/// the same numeric value, so `3` matches both `"3"` and `"3.0"` while
	/// `"1nam"` never matches `1`. Integer terms against integer values are
	/// compared without going through `f64`.
	pub fn matches_term(&self, term: &str) -> bool {
		match self {
			Self::Text(s) => s == term,
			Self::Number(n) => number_matches(n, term),
		}
	}

	/// Case-insensitive substring test used by free-text search.
	/// `needle` must already be lower-cased.
	pub fn contains_lowercase(&self, needle: &str) -> bool {
		self.to_string().to_lowercase().contains(needle)
	}
}

fn number_matches(n: &Number, term: &str) -> bool {
	if let (Some(actual), Ok(expected)) = (n.as_u64(), term.parse::<u64>()) {
		return actual == expected;
	}
	if let (Some(actual), Ok(expected)) = (n.as_i64(), term.parse::<i64>()) {
		return actual == expected;
	}
	match (n.as_f64(), term.parse::<f64>()) {
		(Some(actual), Ok(expected)) => actual == expected,
		_ => false,
	}
}

impl fmt::Display for FilterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<u64> for FilterValue {
	fn from(value: u64) -> Self {
		Self::Number(value.into())
	}
}

impl From<i64> for FilterValue {
	fn from(value: i64) -> Self {
		Self::Number(value.into())
	}
}

/// The value(s) resolved for one field of one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolved {
	Many(Vec<FilterValue>),
	One(FilterValue),
}

impl Resolved {
	/// Convert a JSON property into resolved values.
	///
	/// Accepts strings, numbers and arrays made only of strings or only of
	/// numbers. Mixed arrays, arrays of objects, empty arrays, booleans and
	/// nulls are rejected.
	pub fn from_json(value: &Value) -> Option<Self> {
		if let Some(single) = FilterValue::from_json(value) {
			return Some(Self::One(single));
		}
		if !is_filter_value_array(value) {
			return None;
		}
		let items = value.as_array()?;
		let homogeneous = items.iter().all(|item| item.is_string())
			|| items.iter().all(|item| item.is_number());
		if !homogeneous {
			return None;
		}
		items
			.iter()
			.map(FilterValue::from_json)
			.collect::<Option<Vec<_>>>()
			.map(Self::Many)
	}

	/// Collect text values, e.g. names looked up from a catalog.
	pub fn texts<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Many(values.into_iter().map(|s| FilterValue::Text(s.into())).collect())
	}

	pub fn as_slice(&self) -> &[FilterValue] {
		match self {
			Self::One(value) => std::slice::from_ref(value),
			Self::Many(values) => values,
		}
	}
}

impl From<FilterValue> for Resolved {
	fn from(value: FilterValue) -> Self {
		Self::One(value)
	}
}

impl From<Vec<FilterValue>> for Resolved {
	fn from(values: Vec<FilterValue>) -> Self {
		Self::Many(values)
	}
}

impl From<&str> for Resolved {
	fn from(value: &str) -> Self {
		Self::One(value.into())
	}
}

impl From<String> for Resolved {
	fn from(value: String) -> Self {
		Self::One(value.into())
	}
}

/// Whether a JSON value can be compared directly by the filter engine.
/// Empty strings and zero count as values.
pub fn is_filter_value(value: &Value) -> bool {
	matches!(value, Value::String(_) | Value::Number(_))
}

/// Whether a JSON value is an array whose first element is a filter value.
pub fn is_filter_value_array(value: &Value) -> bool {
	value
		.as_array()
		.and_then(|items| items.first())
		.is_some_and(is_filter_value)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_is_filter_value() {
		assert!(is_filter_value(&json!("name")));
		assert!(is_filter_value(&json!("")));
		assert!(is_filter_value(&json!(0)));
		assert!(is_filter_value(&json!(1.5)));
		assert!(!is_filter_value(&json!(null)));
		assert!(!is_filter_value(&json!(true)));
		assert!(!is_filter_value(&json!({"id": 1})));
		assert!(!is_filter_value(&json!(["a"])));
	}

	#[test]
	fn test_is_filter_value_array() {
		assert!(is_filter_value_array(&json!(["a", "b"])));
		assert!(is_filter_value_array(&json!([1, 2])));
		assert!(!is_filter_value_array(&json!([])));
		assert!(!is_filter_value_array(&json!([{"id": 1}])));
		assert!(!is_filter_value_array(&json!("a")));
	}

	#[test]
	fn test_resolved_from_json_rejects_objects() {
		assert_eq!(Resolved::from_json(&json!({"name": "x"})), None);
		assert_eq!(Resolved::from_json(&json!([{"name": "x"}])), None);
		assert_eq!(Resolved::from_json(&json!(["a", {"name": "x"}])), None);
		assert_eq!(Resolved::from_json(&json!(null)), None);
	}

	#[test]
	fn test_resolved_from_json_rejects_mixed_arrays() {
		assert_eq!(Resolved::from_json(&json!(["a", 1])), None);
		assert_eq!(Resolved::from_json(&json!([1, "a"])), None);
		assert_eq!(
			Resolved::from_json(&json!([1, 2.5])),
			Some(Resolved::Many(vec![
				FilterValue::from_json(&json!(1)).unwrap(),
				FilterValue::from_json(&json!(2.5)).unwrap(),
			]))
		);
	}

	#[test]
	fn test_large_integers_compare_exactly() {
		let value = FilterValue::from(9_007_199_254_740_993u64);
		assert!(value.matches_term("9007199254740993"));
		assert!(!value.matches_term("9007199254740992"));
		assert!(FilterValue::from(-5i64).matches_term("-5"));
		assert!(!FilterValue::from(5u64).matches_term("-5"));
		let float = FilterValue::from_json(&json!(2.5)).unwrap();
		assert!(float.matches_term("2.5"));
		assert!(!float.matches_term("2"));
	}

	#[test]
	fn test_resolved_from_json_keeps_zero_and_empty() {
		assert_eq!(Resolved::from_json(&json!(0)), Some(Resolved::One(0u64.into())));
		assert_eq!(Resolved::from_json(&json!("")), Some(Resolved::from("")));
	}

	#[test]
	fn test_number_matches_numeric_terms_only() {
		let value = FilterValue::from(3u64);
		assert!(value.matches_term("3"));
		assert!(value.matches_term("3.0"));
		assert!(!value.matches_term("3a"));
		assert!(!FilterValue::from(1u64).matches_term("1nam"));
	}

	#[test]
	fn test_text_matches_exactly() {
		let value = FilterValue::from("Deployed");
		assert!(value.matches_term("Deployed"));
		assert!(!value.matches_term("deployed"));
		assert!(!value.matches_term("Deploy"));
	}

	#[test]
	fn test_contains_lowercase() {
		assert!(FilterValue::from("Failed Commissioning").contains_lowercase("commiss"));
		assert!(FilterValue::from(2048u64).contains_lowercase("04"));
	}
}
