// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use colored::Colorize;
use loom_crash::{CrashStorageConfig, ErrorLog};

use super::open_store;

#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
	/// Maximum number of logs to show
	#[arg(long, short = 'n', default_value_t = 20)]
	pub limit: usize,
}

pub fn run(config: &CrashStorageConfig, args: ListArgs) -> anyhow::Result<()> {
	let store = open_store(config);

	let mut logs: Vec<ErrorLog> = Vec::new();
	for path in store.list_stored_log_files() {
		match store.read_error_log(&path) {
			Ok(log) => logs.push(log),
			Err(e) => {
				tracing::warn!(path = %path.display(), error = %e, "skipping unreadable error log");
			}
		}
	}

	if logs.is_empty() {
		println!("{}", "No error logs stored.".dimmed());
		return Ok(());
	}

	logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
	let total = logs.len();
	logs.truncate(args.limit);

	for log in &logs {
		println!(
			"{} {} {}",
			log.id().to_string().yellow(),
			log.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
			log.exception.type_name.bold()
		);
		if let Some(message) = &log.exception.message {
			println!("    {message}");
		}
	}

	if total > logs.len() {
		println!();
		println!("{}", format!("... and {} more", total - logs.len()).dimmed());
	}

	Ok(())
}
