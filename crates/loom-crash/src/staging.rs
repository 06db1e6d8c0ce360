// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Staging folders for native crash dumps.
//!
//! Before a native crash handler is armed, a fresh folder is created under
//! `minidump/new` and the current device snapshot is written next to where the
//! dump will land. A folder either ends up with a complete `deviceInfo` sidecar
//! or does not exist at all.

use std::io;
use std::path::{Path, PathBuf};

use loom_crash_core::DeviceInfo;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CrashStorageConfig;
use crate::error::StagingError;
use crate::platform::DeviceInfoResolver;

/// Name of the device snapshot file inside a staging folder.
pub const DEVICE_INFO_FILE: &str = "deviceInfo";

/// Suffix of folders still being staged. Such folders are also dot-prefixed.
const STAGING_SUFFIX: &str = ".tmp";

/// Destination for sidecar bytes.
pub trait SidecarSink: Send + Sync {
	fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writes sidecars straight to the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSidecarSink;

impl SidecarSink for FsSidecarSink {
	fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
		std::fs::write(path, contents)
	}
}

/// Removes a staging folder on drop unless committed.
struct StagedFolder<'a> {
	path: &'a Path,
	committed: bool,
}

impl<'a> StagedFolder<'a> {
	fn new(path: &'a Path) -> Self {
		Self {
			path,
			committed: false,
		}
	}

	fn commit(mut self) {
		self.committed = true;
	}
}

impl Drop for StagedFolder<'_> {
	fn drop(&mut self) {
		if self.committed {
			return;
		}
		match std::fs::remove_dir_all(self.path) {
			Ok(()) => debug!(path = %self.path.display(), "rolled back staging folder"),
			Err(e) => warn!(
				path = %self.path.display(),
				error = %e,
				"failed to remove staging folder after rollback"
			),
		}
	}
}

/// Owner of the `minidump/new` staging root.
pub struct MinidumpStagingManager {
	root: PathBuf,
	sink: Box<dyn SidecarSink>,
}

impl MinidumpStagingManager {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			sink: Box::new(FsSidecarSink),
		}
	}

	pub fn from_config(config: &CrashStorageConfig) -> Self {
		Self::new(config.minidump_new_dir())
	}

	pub fn with_sink(mut self, sink: impl SidecarSink + 'static) -> Self {
		self.sink = Box::new(sink);
		self
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Create a uniquely named folder holding the current device snapshot.
	///
	/// The folder is built under a hidden `.<id>.tmp` name and renamed into
	/// place once the sidecar is complete, so [`staged_folders`] never sees a
	/// folder without one. On any failure the temporary folder is removed and
	/// the cause is returned.
	///
	/// [`staged_folders`]: Self::staged_folders
	pub fn stage_new_crash_folder(
		&self,
		device: &dyn DeviceInfoResolver,
	) -> Result<PathBuf, StagingError> {
		let id = Uuid::new_v4().to_string();
		let folder = self.root.join(&id);
		let tmp_folder = self.root.join(format!(".{id}{STAGING_SUFFIX}"));

		std::fs::create_dir_all(&tmp_folder).map_err(|source| StagingError::CreateFolder {
			path: tmp_folder.clone(),
			source,
		})?;
		let staged = StagedFolder::new(&tmp_folder);

		let device_info = device.resolve()?;
		let json = serde_json::to_string(&device_info).map_err(StagingError::Encode)?;
		self.sink
			.write(&tmp_folder.join(DEVICE_INFO_FILE), json.as_bytes())
			.map_err(StagingError::Write)?;

		std::fs::rename(&tmp_folder, &folder).map_err(|source| StagingError::Commit {
			path: folder.clone(),
			source,
		})?;
		staged.commit();

		info!(path = %folder.display(), "staged minidump folder");
		Ok(folder)
	}

	/// Every staging folder currently under the root.
	pub fn staged_folders(&self) -> Vec<PathBuf> {
		let entries = match std::fs::read_dir(&self.root) {
			Ok(entries) => entries,
			Err(e) => {
				debug!(path = %self.root.display(), error = %e, "staging root unreadable");
				return Vec::new();
			}
		};

		entries
			.filter_map(|entry| entry.ok())
			.map(|entry| entry.path())
			.filter(|path| path.is_dir() && !is_in_progress(path))
			.collect()
	}

	/// Delete a staging folder once its dump has been processed.
	///
	/// Paths outside the staging root are refused.
	pub fn remove_staged_folder(&self, folder: &Path) -> bool {
		if folder.parent() != Some(self.root.as_path()) {
			warn!(path = %folder.display(), "refusing to remove folder outside staging root");
			return false;
		}
		match std::fs::remove_dir_all(folder) {
			Ok(()) => {
				debug!(path = %folder.display(), "removed staging folder");
				true
			}
			Err(e) => {
				warn!(path = %folder.display(), error = %e, "failed to remove staging folder");
				false
			}
		}
	}
}

fn is_in_progress(path: &Path) -> bool {
	path.file_name()
		.and_then(|name| name.to_str())
		.is_some_and(|name| name.starts_with('.'))
}

/// Device snapshot stored in a staging folder, if there is a readable one.
pub fn read_stored_device_info(folder: &Path) -> Option<DeviceInfo> {
	let mut entries = match std::fs::read_dir(folder) {
		Ok(entries) => entries,
		Err(e) => {
			warn!(path = %folder.display(), error = %e, "cannot read staging folder");
			return None;
		}
	};
	if entries.next().is_none() {
		debug!(path = %folder.display(), "staging folder is empty");
		return None;
	}

	let sidecar = folder.join(DEVICE_INFO_FILE);
	let contents = match std::fs::read_to_string(&sidecar) {
		Ok(contents) => contents,
		Err(e) => {
			warn!(path = %sidecar.display(), error = %e, "cannot read device info sidecar");
			return None;
		}
	};

	match serde_json::from_str::<Option<DeviceInfo>>(&contents) {
		Ok(device) => device,
		Err(e) => {
			warn!(path = %sidecar.display(), error = %e, "cannot parse device info sidecar");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::DeviceInfoError;
	use std::sync::{Arc, Mutex};
	use tempfile::TempDir;

	struct FixedDevice;

	impl DeviceInfoResolver for FixedDevice {
		fn resolve(&self) -> Result<DeviceInfo, DeviceInfoError> {
			Ok(DeviceInfo {
				sdk_name: Some("loom-crash-rust".to_string()),
				os_name: Some("Android".to_string()),
				os_api_level: Some(34),
				..Default::default()
			})
		}
	}

	struct BrokenDevice;

	impl DeviceInfoResolver for BrokenDevice {
		fn resolve(&self) -> Result<DeviceInfo, DeviceInfoError> {
			Err(DeviceInfoError::new("telephony service unavailable"))
		}
	}

	/// Writes half the bytes, then fails like a full disk would.
	struct TruncatingSink;

	impl SidecarSink for TruncatingSink {
		fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
			std::fs::write(path, &contents[..contents.len() / 2])?;
			Err(io::Error::other("no space left on device"))
		}
	}

	/// Records what the staging root lists while the sidecar is written.
	struct ListingSink {
		root: PathBuf,
		seen: Arc<Mutex<Option<Vec<PathBuf>>>>,
	}

	impl SidecarSink for ListingSink {
		fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
			let listed = MinidumpStagingManager::new(&self.root).staged_folders();
			*self.seen.lock().unwrap() = Some(listed);
			std::fs::write(path, contents)
		}
	}

	fn root_entries(manager: &MinidumpStagingManager) -> usize {
		std::fs::read_dir(manager.root()).map(|entries| entries.count()).unwrap_or(0)
	}

	fn manager(temp: &TempDir) -> MinidumpStagingManager {
		MinidumpStagingManager::new(temp.path().join("minidump").join("new"))
	}

	#[test]
	fn test_stage_writes_sidecar() {
		let temp = TempDir::new().unwrap();
		let manager = manager(&temp);

		let folder = manager.stage_new_crash_folder(&FixedDevice).unwrap();
		assert_eq!(folder.parent(), Some(manager.root()));
		assert!(folder.join(DEVICE_INFO_FILE).is_file());

		let device = read_stored_device_info(&folder).unwrap();
		assert_eq!(device.os_name.as_deref(), Some("Android"));
		assert_eq!(device.os_api_level, Some(34));
	}

	#[test]
	fn test_each_stage_gets_its_own_folder() {
		let temp = TempDir::new().unwrap();
		let manager = manager(&temp);
		let a = manager.stage_new_crash_folder(&FixedDevice).unwrap();
		let b = manager.stage_new_crash_folder(&FixedDevice).unwrap();
		assert_ne!(a, b);
		assert_eq!(manager.staged_folders().len(), 2);
	}

	#[test]
	fn test_device_failure_rolls_back() {
		let temp = TempDir::new().unwrap();
		let manager = manager(&temp);

		let err = manager.stage_new_crash_folder(&BrokenDevice).unwrap_err();
		assert!(matches!(err, StagingError::DeviceInfo(_)));
		assert_eq!(root_entries(&manager), 0);
	}

	#[test]
	fn test_partial_write_rolls_back() {
		let temp = TempDir::new().unwrap();
		let manager = manager(&temp).with_sink(TruncatingSink);

		let err = manager.stage_new_crash_folder(&FixedDevice).unwrap_err();
		assert!(matches!(err, StagingError::Write(_)));
		assert_eq!(root_entries(&manager), 0);
	}

	#[test]
	fn test_folder_is_invisible_until_committed() {
		let temp = TempDir::new().unwrap();
		let seen = Arc::new(Mutex::new(None));
		let root = manager(&temp).root().to_path_buf();
		let manager = manager(&temp).with_sink(ListingSink {
			root,
			seen: Arc::clone(&seen),
		});

		let folder = manager.stage_new_crash_folder(&FixedDevice).unwrap();

		let during_write = seen.lock().unwrap().take().unwrap();
		assert!(during_write.is_empty(), "{during_write:?}");
		assert_eq!(manager.staged_folders(), vec![folder]);
		assert_eq!(root_entries(&manager), 1);
	}

	#[test]
	fn test_unusable_root_fails_to_create() {
		let temp = TempDir::new().unwrap();
		let blocker = temp.path().join("blocker");
		std::fs::write(&blocker, "file, not a directory").unwrap();
		let manager = MinidumpStagingManager::new(blocker.join("new"));

		let err = manager.stage_new_crash_folder(&FixedDevice).unwrap_err();
		assert!(matches!(err, StagingError::CreateFolder { .. }));
	}

	#[test]
	fn test_read_sample_sidecar() {
		let temp = TempDir::new().unwrap();
		std::fs::write(
			temp.path().join(DEVICE_INFO_FILE),
			r#"{"sdkName":"appcenter.ndk","model":"Pixel","osApiLevel":29,"unknownField":true}"#,
		)
		.unwrap();
		let device = read_stored_device_info(temp.path()).unwrap();
		assert_eq!(device.sdk_name.as_deref(), Some("appcenter.ndk"));
		assert_eq!(device.model.as_deref(), Some("Pixel"));
		assert_eq!(device.os_api_level, Some(29));
	}

	#[test]
	fn test_read_degrades_to_none() {
		let temp = TempDir::new().unwrap();

		assert!(read_stored_device_info(&temp.path().join("missing")).is_none());
		assert!(read_stored_device_info(temp.path()).is_none());

		std::fs::write(temp.path().join("crash.dmp"), [0u8; 4]).unwrap();
		assert!(read_stored_device_info(temp.path()).is_none());

		let sidecar = temp.path().join(DEVICE_INFO_FILE);
		for contents in ["null", "", "{truncated"] {
			std::fs::write(&sidecar, contents).unwrap();
			assert!(read_stored_device_info(temp.path()).is_none(), "{contents:?}");
		}
	}

	#[test]
	fn test_remove_staged_folder() {
		let temp = TempDir::new().unwrap();
		let manager = manager(&temp);
		let folder = manager.stage_new_crash_folder(&FixedDevice).unwrap();

		assert!(!manager.remove_staged_folder(temp.path()));
		assert!(manager.remove_staged_folder(&folder));
		assert!(!folder.exists());
		assert!(manager.staged_folders().is_empty());
	}
}
