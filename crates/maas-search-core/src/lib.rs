// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search filtering for MAAS node lists.
//!
//! This crate provides:
//! - [`parse_query`] / [`to_query_string`]: the `field:(v1,v2) free text`
//!   search grammar and its canonical rendering
//! - [`Filters`]: the parsed query, including URL query string conversion
//! - [`FilterHandlers`]: filter editing (toggle, active checks) and prefixed
//!   annotation filters such as `workload-owner:(alice)`
//! - [`FilterItems`]: value extraction and matching of JSON records
//! - [`resources`]: mapping tables for machines, devices and controllers
//!
//! # Usage
//!
//! ```
//! use maas_search_core::resources::ResourceKind;
//! use serde_json::json;
//!
//! let machines = vec![
//! 	json!({"hostname": "koala", "zone": {"id": 1, "name": "danger"}}),
//! 	json!({"hostname": "wombat", "zone": {"id": 2, "name": "safe"}}),
//! ];
//! let items = ResourceKind::Machine.filter_items();
//! let found = items.search(&machines, "zone:(danger)", None);
//! assert_eq!(found, vec![&machines[0]]);
//! ```

pub mod error;
pub mod extract;
pub mod filters;
pub mod handlers;
pub mod items;
pub mod parser;
pub mod resources;
pub mod value;

pub use error::{SearchError, SearchResult};
pub use extract::{Mapper, MappingTable};
pub use filters::{Filters, FREE_TEXT_KEY};
pub use handlers::{FilterHandlers, PrefixedFilter};
pub use items::{FilterItems, SELECTED};
pub use parser::{parse_query, parse_query_with, to_query_string};
pub use value::{is_filter_value, is_filter_value_array, FilterValue, Resolved};

/// Parse a search string. Alias of [`parse_query`] named after the list
/// view operation.
pub fn get_current_filters(query: &str) -> Filters {
	parse_query(query)
}
