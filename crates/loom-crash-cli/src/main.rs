// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `loom-crash`: inspect crash logs and staged minidump folders on this machine.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use loom_crash::CrashStorageConfig;
use tracing_subscriber::EnvFilter;

use commands::{device_info, list, report, show};

#[derive(Debug, Parser)]
#[command(name = "loom-crash", version, about = "Inspect local crash logs")]
struct Cli {
	/// Error log directory (defaults to <data dir>/loom/crash)
	#[arg(long, global = true, env = "LOOM_CRASH_DIR")]
	dir: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// List stored error logs, newest first
	List(list::ListArgs),
	/// Show one error log with its stack trace
	Show(show::ShowArgs),
	/// Print the caller-facing report for an error log as JSON
	Report(report::ReportArgs),
	/// List staged minidump folders and their device snapshots
	DeviceInfo(device_info::DeviceInfoArgs),
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();
	let config = match cli.dir {
		Some(dir) => CrashStorageConfig::new(dir),
		None => CrashStorageConfig::from_xdg()?,
	};
	tracing::debug!(error_dir = %config.error_dir().display(), "using crash directory");

	match cli.command {
		Command::List(args) => list::run(&config, args),
		Command::Show(args) => show::run(&config, args),
		Command::Report(args) => report::run(&config, args),
		Command::DeviceInfo(args) => device_info::run(&config, args),
	}
}
