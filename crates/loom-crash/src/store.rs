// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error logs persisted as `<id>.json` files in a flat directory.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use loom_crash_core::{ErrorLog, ErrorLogId, ERROR_LOG_FILE_EXTENSION};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// Directory of serialized error logs.
///
/// Listing and lookup never fail: an unset or unreadable directory simply
/// has no logs in it.
#[derive(Debug, Default)]
pub struct PersistedLogStore {
	directory: RwLock<Option<PathBuf>>,
}

impl PersistedLogStore {
	pub fn new(directory: Option<PathBuf>) -> Self {
		Self {
			directory: RwLock::new(directory),
		}
	}

	pub fn directory(&self) -> Option<PathBuf> {
		self.read_dir_lock().clone()
	}

	/// Point the store at another directory, or at none.
	pub fn set_directory(&self, directory: Option<PathBuf>) {
		*self.write_dir_lock() = directory;
	}

	/// Every `*.json` file in the directory, in no particular order.
	pub fn list_stored_log_files(&self) -> Vec<PathBuf> {
		let Some(dir) = self.directory() else {
			return Vec::new();
		};

		let entries = match std::fs::read_dir(&dir) {
			Ok(entries) => entries,
			Err(e) => {
				debug!(path = %dir.display(), error = %e, "error log directory unreadable");
				return Vec::new();
			}
		};

		entries
			.filter_map(|entry| entry.ok())
			.map(|entry| entry.path())
			.filter(|path| is_log_file(path))
			.collect()
	}

	/// Path of the stored log with `id`, if it exists.
	pub fn stored_log_file(&self, id: &ErrorLogId) -> Option<PathBuf> {
		let path = self.log_path(id)?;
		path.is_file().then_some(path)
	}

	/// Write `log` to `<id>.json`, replacing any previous file atomically.
	pub fn store_error_log(&self, log: &ErrorLog) -> Result<PathBuf> {
		let dir = self.directory().ok_or(StoreError::NotConfigured)?;
		std::fs::create_dir_all(&dir)?;

		let path = dir.join(log.file_name());
		let tmp_path = dir.join(format!("{}.tmp", log.file_name()));

		let json = serde_json::to_string_pretty(log)?;
		std::fs::write(&tmp_path, &json)?;
		std::fs::rename(&tmp_path, &path)?;

		debug!(log_id = %log.id(), path = %path.display(), "saved error log to disk");
		Ok(path)
	}

	pub fn read_error_log(&self, path: &Path) -> Result<ErrorLog> {
		let contents = std::fs::read_to_string(path)?;
		let log: ErrorLog = serde_json::from_str(&contents)?;
		Ok(log)
	}

	/// Delete the stored log with `id`. Returns whether a file was removed.
	pub fn remove_stored_log_file(&self, id: &ErrorLogId) -> bool {
		let Some(path) = self.stored_log_file(id) else {
			return false;
		};
		match std::fs::remove_file(&path) {
			Ok(()) => {
				debug!(log_id = %id, "deleted error log");
				true
			}
			Err(e) => {
				warn!(log_id = %id, path = %path.display(), error = %e, "failed to delete error log");
				false
			}
		}
	}

	/// The most recently modified stored log.
	pub fn last_log_file(&self) -> Option<PathBuf> {
		self.list_stored_log_files()
			.into_iter()
			.filter_map(|path| {
				let modified = modified_time(&path)?;
				Some((modified, path))
			})
			.max_by(|a, b| a.0.cmp(&b.0))
			.map(|(_, path)| path)
	}

	fn log_path(&self, id: &ErrorLogId) -> Option<PathBuf> {
		let dir = self.directory()?;
		Some(dir.join(format!("{id}{ERROR_LOG_FILE_EXTENSION}")))
	}

	fn read_dir_lock(&self) -> RwLockReadGuard<'_, Option<PathBuf>> {
		self.directory
			.read()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	fn write_dir_lock(&self) -> RwLockWriteGuard<'_, Option<PathBuf>> {
		self.directory
			.write()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

fn is_log_file(path: &Path) -> bool {
	path.is_file()
		&& path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| name.ends_with(ERROR_LOG_FILE_EXTENSION))
}

fn modified_time(path: &Path) -> Option<SystemTime> {
	std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
