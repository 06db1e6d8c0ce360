// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use colored::Colorize;
use loom_crash::CrashStorageConfig;

use super::{find_log, open_store};

#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
	/// Log id, or `latest`
	#[arg(default_value = "latest")]
	pub log: String,

	/// Print the stored JSON instead of a summary
	#[arg(long)]
	pub json: bool,

	/// Include the stacks of every thread
	#[arg(long)]
	pub threads: bool,
}

pub fn run(config: &CrashStorageConfig, args: ShowArgs) -> anyhow::Result<()> {
	let store = open_store(config);
	let path = find_log(&store, &args.log)?;
	let log = store.read_error_log(&path)?;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&log)?);
		return Ok(());
	}

	println!("{}: {}", "Log".bold(), log.id().to_string().yellow());
	println!("{}: {}", "Time".bold(), log.timestamp.format("%Y-%m-%d %H:%M:%S %z"));
	println!(
		"{}: {}",
		"Launched".bold(),
		log.app_launch_timestamp.format("%Y-%m-%d %H:%M:%S %z")
	);

	let process_name = if log.process_name.is_empty() {
		"(unknown)"
	} else {
		log.process_name.as_str()
	};
	println!("{}: {} ({})", "Process".bold(), process_name, log.process_id);
	if let Some(parent_id) = log.parent_process_id {
		println!(
			"{}: {} ({})",
			"Parent".bold(),
			log.parent_process_name.as_deref().unwrap_or("(unknown)"),
			parent_id
		);
	}
	println!(
		"{}: {}",
		"Architecture".bold(),
		log.architecture.as_deref().unwrap_or("(unknown)")
	);
	if let Some(device) = &log.device {
		let model = device.model.as_deref().unwrap_or("(unknown model)");
		let os = [device.os_name.as_deref(), device.os_version.as_deref()]
			.into_iter()
			.flatten()
			.collect::<Vec<_>>()
			.join(" ");
		println!("{}: {} {}", "Device".bold(), model, os.dimmed());
	}
	println!(
		"{}: {} ({})",
		"Thread".bold(),
		log.error_thread_name,
		log.error_thread_id
	);

	println!();
	print!("{}", log.exception.stack_trace_text().red());

	if args.threads {
		for thread in &log.threads {
			println!();
			println!("{} {} ({})", "Thread".bold(), thread.name.cyan(), thread.id);
			for frame in &thread.frames {
				println!("\tat {}.{}", frame.class_name, frame.method_name);
			}
		}
	}

	Ok(())
}
