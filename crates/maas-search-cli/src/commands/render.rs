// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::Context;
use maas_search_core::{to_query_string, Filters};

#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
	/// Filters as a JSON object of field name to value list
	pub filters: String,
}

pub fn run(args: RenderArgs) -> anyhow::Result<String> {
	let filters: Filters =
		serde_json::from_str(&args.filters).context("filters must be a JSON object of string lists")?;
	Ok(to_query_string(&filters))
}
