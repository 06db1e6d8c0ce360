// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use loom_crash::{error_report_from_error_log, CrashStorageConfig};

use super::{find_log, open_store};

#[derive(Debug, Clone, clap::Args)]
pub struct ReportArgs {
	/// Log id, or `latest`
	#[arg(default_value = "latest")]
	pub log: String,
}

pub fn run(config: &CrashStorageConfig, args: ReportArgs) -> anyhow::Result<()> {
	let store = open_store(config);
	let path = find_log(&store, &args.log)?;
	let log = store.read_error_log(&path)?;

	let report = error_report_from_error_log(&log, log.exception.stack_trace_text());
	println!("{}", serde_json::to_string_pretty(&report)?);
	Ok(())
}
