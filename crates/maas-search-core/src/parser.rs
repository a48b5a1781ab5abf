// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search string grammar.
//!
//! A query is a whitespace separated list of tokens. A token of the form
//! `field:(v1,v2)` scopes its values to `field`; every other token is free
//! text. Parsing is total: a token that is not a well formed field filter is
//! kept as free text.

use tracing::trace;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{rest, take_while};

use crate::filters::{Filters, FREE_TEXT_KEY};

/// Parse a search string into filters.
pub fn parse_query(query: &str) -> Filters {
	parse_query_with(query, |_| false)
}

/// Parse a search string, treating `field:()` as an annotation presence
/// check for keys accepted by `is_prefixed_key`.
pub fn parse_query_with<F>(query: &str, is_prefixed_key: F) -> Filters
where
	F: Fn(&str) -> bool,
{
	let mut filters = Filters::new();
	for token in query.split_whitespace() {
		match field_filter.parse(token) {
			// `q` is the free-text bucket, never a field.
			Ok((field, _)) if field == FREE_TEXT_KEY => filters.push_free_text(token),
			Ok((field, body)) => {
				let values: Vec<&str> = body.split(',').filter(|v| !v.is_empty()).collect();
				if !values.is_empty() {
					filters.extend_field(field, values);
				} else if is_prefixed_key(field) {
					filters.extend_field(field, [""]);
				} else {
					trace!(field, "ignoring field filter without values");
				}
			}
			Err(_) => filters.push_free_text(token),
		}
	}
	filters
}

/// Render filters back into a search string: free text first, then each
/// non-empty field in insertion order.
pub fn to_query_string(filters: &Filters) -> String {
	let mut parts: Vec<String> = filters.free_text().to_vec();
	parts.extend(
		filters
			.fields()
			.filter(|(_, values)| !values.is_empty())
			.map(|(field, values)| format!("{}:({})", field, values.join(","))),
	);
	parts.join(" ")
}

fn field_filter<'s>(input: &mut &'s str) -> Result<(&'s str, &'s str), ContextError> {
	let (field, _, _, body) = (
		take_while(1.., is_field_char),
		':',
		'(',
		rest.verify(|body: &str| body.ends_with(')')),
	)
		.parse_next(input)?;
	Ok((field, &body[..body.len() - 1]))
}

fn is_field_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
