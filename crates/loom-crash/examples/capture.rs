// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: Capture a panic as an error log and stage a minidump folder.
//!
//! Run with:
//!   cargo run --example capture -p loom-crash

use chrono::Utc;
use loom_crash::{
	create_error_log, read_stored_device_info, CapturedThrowable, CrashContext, CrashStorageConfig,
	CrashingThread, HostBuildInfo, HostDeviceInfoResolver, MinidumpStagingManager,
	PersistedLogStore, SystemProcessTable, ThreadStackSnapshot,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let launched_at = Utc::now();

	// Keep the demo out of the real crash directory.
	let temp = tempfile::TempDir::new()?;
	let config = CrashStorageConfig::new(temp.path());
	println!("Crash directory: {}", config.error_dir().display());

	let device = HostDeviceInfoResolver::new("com.ghuntley.loom.example").app_version("0.1.0-example");
	let processes = SystemProcessTable;
	let build = HostBuildInfo::new();
	let ctx = CrashContext::new(&device, &processes, &build);

	let throwable = CapturedThrowable::new("std::io::Error")
		.with_message("failed to open config")
		.caused_by(CapturedThrowable::from_panic("called `Option::unwrap()` on a `None` value"));
	let snapshot = ThreadStackSnapshot::new(1, "main", throwable.stack_trace.clone());

	let log = create_error_log(&ctx, &CrashingThread::new(1, "main"), &throwable, &[snapshot], launched_at);
	println!("Assembled error log {}", log.id());
	println!("  Process: {} ({})", log.process_name, log.process_id);
	println!("  Architecture: {}", log.architecture.as_deref().unwrap_or("unknown"));
	print!("{}", log.exception.stack_trace_text());

	let store = PersistedLogStore::new(Some(config.error_dir.clone()));
	let path = store.store_error_log(&log)?;
	println!("Stored at {}", path.display());

	let staging = MinidumpStagingManager::from_config(&config);
	let folder = staging.stage_new_crash_folder(&device)?;
	let staged_device = read_stored_device_info(&folder);
	println!(
		"Staged {} (os: {})",
		folder.display(),
		staged_device
			.and_then(|d| d.os_name)
			.unwrap_or_else(|| "unknown".to_string())
	);

	Ok(())
}
