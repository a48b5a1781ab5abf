// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use maas_search_config::SearchConfig;
use maas_search_core::resources::{load_records, load_tags, NodeAuxData, ResourceKind};
use tracing::info;

#[derive(Debug, Clone, clap::Args)]
pub struct FilterArgs {
	/// Search query
	pub query: String,

	/// Kind of records in the input
	#[arg(long, short, default_value = "machine")]
	pub resource: ResourceKind,

	/// JSON array of records, or `-` for stdin
	#[arg(long, short)]
	pub input: PathBuf,

	/// JSON array of tags used to resolve tag ids
	#[arg(long)]
	pub tags: Option<PathBuf>,

	/// Primary keys (`system_id`) of selected records, for `in:(selected)`
	#[arg(long, value_delimiter = ',')]
	pub selected: Vec<String>,
}

pub fn run(config: &SearchConfig, args: FilterArgs) -> anyhow::Result<String> {
	let records = load_records(&read_input(&args.input)?)
		.with_context(|| format!("invalid records in {}", args.input.display()))?;

	let aux = match &args.tags {
		Some(path) => {
			let tags = load_tags(&read_input(path)?)
				.with_context(|| format!("invalid tags in {}", path.display()))?;
			Some(NodeAuxData::with_tags(tags))
		}
		None => None,
	};

	let items = config.filter_items(args.resource);
	let found = items.search_selected(&records, &args.query, &args.selected, aux.as_ref());
	info!(
		resource = %args.resource,
		total = records.len(),
		selected = args.selected.len(),
		matched = found.len(),
		"filtered records"
	);

	Ok(serde_json::to_string_pretty(&found)?)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
	if path == Path::new("-") {
		let mut buf = String::new();
		std::io::stdin()
			.read_to_string(&mut buf)
			.context("failed to read stdin")?;
		return Ok(buf);
	}
	std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
