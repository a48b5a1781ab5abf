// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Result type alias for search operations that touch caller-supplied data.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors raised while loading records or selecting a resource.
///
/// Parsing a query and matching records never fail; these errors only cover
/// the edges where callers hand the engine raw input.
#[derive(Error, Debug)]
pub enum SearchError {
	#[error("Unknown resource: {0}")]
	UnknownResource(String),

	#[error("Invalid records: {0}")]
	InvalidRecords(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
