// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use colored::Colorize;
use loom_crash::{read_stored_device_info, CrashStorageConfig, MinidumpStagingManager};

#[derive(Debug, Clone, clap::Args)]
pub struct DeviceInfoArgs {
	/// Remove folders whose device snapshot cannot be read
	#[arg(long)]
	pub prune: bool,
}

pub fn run(config: &CrashStorageConfig, args: DeviceInfoArgs) -> anyhow::Result<()> {
	let staging = MinidumpStagingManager::from_config(config);
	let folders = staging.staged_folders();

	if folders.is_empty() {
		println!("{}", "No staged minidump folders.".dimmed());
		return Ok(());
	}

	for folder in folders {
		let name = folder
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();

		match read_stored_device_info(&folder) {
			Some(device) => {
				println!("{} {}", "✓".green(), name.yellow());
				println!("    {}", serde_json::to_string(&device)?.dimmed());
			}
			None if args.prune => {
				if staging.remove_staged_folder(&folder) {
					println!("{} {} {}", "✗".red(), name.yellow(), "(removed)".dimmed());
				} else {
					println!("{} {} {}", "✗".red(), name.yellow(), "(could not remove)".red());
				}
			}
			None => {
				println!("{} {} {}", "✗".red(), name.yellow(), "(no device info)".dimmed());
			}
		}
	}

	Ok(())
}
