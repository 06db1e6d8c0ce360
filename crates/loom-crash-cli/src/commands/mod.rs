// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod device_info;
pub mod list;
pub mod report;
pub mod show;

use std::path::PathBuf;

use loom_crash::{CrashStorageConfig, ErrorLogId, PersistedLogStore};

pub fn open_store(config: &CrashStorageConfig) -> PersistedLogStore {
	PersistedLogStore::new(Some(config.error_dir.clone()))
}

/// Resolve a log argument: a full log id, or `latest` for the newest log.
pub fn find_log(store: &PersistedLogStore, log: &str) -> anyhow::Result<PathBuf> {
	if log == "latest" {
		return store
			.last_log_file()
			.ok_or_else(|| anyhow::anyhow!("no error logs stored"));
	}

	let id: ErrorLogId = log.parse()?;
	store
		.stored_log_file(&id)
		.ok_or_else(|| anyhow::anyhow!("error log {id} not found"))
}
