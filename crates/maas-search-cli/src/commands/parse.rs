// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use maas_search_config::SearchConfig;
use maas_search_core::resources::ResourceKind;

#[derive(Debug, Clone, clap::Args)]
pub struct ParseArgs {
	/// Search query, e.g. `koala status:(deployed) tags:(virtual)`
	pub query: String,

	/// Resource whose annotation prefixes apply
	#[arg(long, short, default_value = "machine")]
	pub resource: ResourceKind,
}

pub fn run(config: &SearchConfig, args: ParseArgs) -> anyhow::Result<String> {
	let items = config.filter_items(args.resource);
	let filters = items.get_current_filters(&args.query);
	tracing::debug!(fields = filters.fields().count(), "parsed query");
	Ok(serde_json::to_string_pretty(&filters)?)
}
