// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `maas-search` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod version;

/// Parse, render and apply MAAS search filter queries.
#[derive(Parser, Debug)]
#[command(name = "maas-search", about = "MAAS search filter tool", version)]
struct Args {
	/// Config file (defaults to /etc/maas-search/search.toml)
	#[arg(long, global = true, env = "MAAS_SEARCH_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Parse a query and print its filters as JSON
	Parse(commands::parse::ParseArgs),
	/// Render filters (JSON) back into a query string
	Render(commands::render::RenderArgs),
	/// Filter node records with a query
	Filter(commands::filter::FilterArgs),
	/// Convert a query into a URL query string
	UrlEncode(commands::url::UrlEncodeArgs),
	/// Convert a URL query string into a query
	UrlDecode(commands::url::UrlDecodeArgs),
	/// Show version and build information
	Version,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Command::Version = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	let config = match &args.config {
		Some(path) => maas_search_config::load_config_with_file(path)?,
		None => maas_search_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	tracing::debug!(command = ?args.command, "running command");

	let output = match args.command {
		Command::Parse(parse_args) => commands::parse::run(&config, parse_args)?,
		Command::Render(render_args) => commands::render::run(render_args)?,
		Command::Filter(filter_args) => commands::filter::run(&config, filter_args)?,
		Command::UrlEncode(encode_args) => commands::url::encode(&config, encode_args),
		Command::UrlDecode(decode_args) => commands::url::decode(decode_args),
		Command::Version => version::format_version_info(),
	};
	println!("{output}");

	Ok(())
}
