// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Conversions between search queries and URL query strings.

use maas_search_config::SearchConfig;
use maas_search_core::resources::ResourceKind;
use maas_search_core::{to_query_string, Filters};

#[derive(Debug, Clone, clap::Args)]
pub struct UrlEncodeArgs {
	/// Search query
	pub query: String,

	/// Resource whose annotation prefixes apply
	#[arg(long, short, default_value = "machine")]
	pub resource: ResourceKind,
}

#[derive(Debug, Clone, clap::Args)]
pub struct UrlDecodeArgs {
	/// URL query string, with or without the leading `?`
	pub query_string: String,
}

pub fn encode(config: &SearchConfig, args: UrlEncodeArgs) -> String {
	let items = config.filter_items(args.resource);
	items.get_current_filters(&args.query).to_url_query()
}

pub fn decode(args: UrlDecodeArgs) -> String {
	to_query_string(&Filters::from_url_query(&args.query_string))
}
