// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Thread dumps taken at crash time.

use loom_crash_core::ThreadRecord;
use tracing::debug;

use crate::frames::extract_frames;
use crate::throwable::NativeStackElement;

/// Snapshot of one live thread as handed over by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadStackSnapshot {
	/// Runtime thread id, expected to be non-zero. Recorded as given.
	pub id: u64,
	pub name: String,
	/// `None` when the thread's stack could not be read.
	pub stack: Option<Vec<NativeStackElement>>,
}

impl ThreadStackSnapshot {
	pub fn new(id: u64, name: impl Into<String>, stack: Vec<NativeStackElement>) -> Self {
		Self {
			id,
			name: name.into(),
			stack: Some(stack),
		}
	}
}

/// The thread that crashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashingThread {
	pub id: u64,
	pub name: String,
}

impl CrashingThread {
	pub fn new(id: u64, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}

/// One record per snapshot, in the order the runtime enumerated them.
///
/// Ids are passed through untouched; a zero id is logged but still recorded.
pub fn collect_threads(snapshots: &[ThreadStackSnapshot]) -> Vec<ThreadRecord> {
	snapshots
		.iter()
		.map(|snapshot| {
			if snapshot.id == 0 {
				debug!(thread_name = %snapshot.name, "runtime reported thread id 0");
			}
			let frames = match &snapshot.stack {
				Some(stack) => extract_frames(stack),
				None => {
					debug!(thread_id = snapshot.id, "thread stack unavailable");
					Vec::new()
				}
			};
			ThreadRecord {
				id: snapshot.id,
				name: snapshot.name.clone(),
				frames,
			}
		})
		.collect()
}
