// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where crash artifacts live on disk.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::StoreError;

/// Environment variable overriding the error directory.
pub const CRASH_DIR_ENV: &str = "LOOM_CRASH_DIR";

const MINIDUMP_DIR: &str = "minidump";
const NEW_MINIDUMP_DIR: &str = "new";

/// Storage layout for error logs and staged minidumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashStorageConfig {
	/// Directory holding `<id>.json` error logs.
	pub error_dir: PathBuf,
}

impl CrashStorageConfig {
	pub fn new(error_dir: impl Into<PathBuf>) -> Self {
		Self {
			error_dir: error_dir.into(),
		}
	}

	/// Resolve from `LOOM_CRASH_DIR`, falling back to `<data dir>/loom/crash`.
	pub fn from_env_or_xdg() -> Result<Self, StoreError> {
		if let Some(dir) = std::env::var_os(CRASH_DIR_ENV).filter(|dir| !dir.is_empty()) {
			return Ok(Self::new(dir));
		}
		Self::from_xdg()
	}

	pub fn from_xdg() -> Result<Self, StoreError> {
		let data_dir = dirs::data_dir().ok_or_else(|| {
			StoreError::Io(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				"could not determine XDG data directory",
			))
		})?;

		let error_dir = data_dir.join("loom").join("crash");
		info!(error_dir = %error_dir.display(), "resolved crash storage directory");
		Ok(Self::new(error_dir))
	}

	pub fn error_dir(&self) -> &Path {
		&self.error_dir
	}

	/// Root under which each native crash gets its own staging folder.
	pub fn minidump_new_dir(&self) -> PathBuf {
		self.error_dir.join(MINIDUMP_DIR).join(NEW_MINIDUMP_DIR)
	}
}
