// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Current and parent process identity.

use tracing::debug;

use crate::platform::{ProcessTable, RunningProcess};

/// Process identity recorded on an error log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
	pub process_id: i32,
	/// Empty when the process table has no entry for `process_id`.
	pub process_name: String,
	pub parent_process_id: Option<i32>,
	pub parent_process_name: Option<String>,
}

/// Resolve the current process from the OS process table.
///
/// The pid always comes from the OS. Name and parent are looked up in the
/// running-process list and degrade to empty/absent when the list is
/// unavailable or has no matching entry.
pub fn resolve_process_info(table: &dyn ProcessTable) -> ProcessInfo {
	let process_id = table.current_pid();
	let mut info = ProcessInfo {
		process_id,
		process_name: String::new(),
		parent_process_id: None,
		parent_process_name: None,
	};

	let Some(processes) = table.running_processes() else {
		debug!(pid = process_id, "running process list unavailable");
		return info;
	};

	let Some(current) = find(&processes, process_id) else {
		debug!(pid = process_id, "current process not in running process list");
		return info;
	};

	info.process_name = current.name.clone();
	if let Some(parent_pid) = current.parent_pid {
		info.parent_process_id = Some(parent_pid);
		info.parent_process_name = find(&processes, parent_pid).map(|parent| parent.name.clone());
	}
	info
}

fn find(processes: &[RunningProcess], pid: i32) -> Option<&RunningProcess> {
	processes.iter().find(|process| process.pid == pid)
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FakeTable {
		pid: i32,
		processes: Option<Vec<RunningProcess>>,
	}

	impl ProcessTable for FakeTable {
		fn current_pid(&self) -> i32 {
			self.pid
		}

		fn running_processes(&self) -> Option<Vec<RunningProcess>> {
			self.processes.clone()
		}
	}

	fn process(pid: i32, name: &str, parent_pid: Option<i32>) -> RunningProcess {
		RunningProcess {
			pid,
			name: name.to_string(),
			parent_pid,
		}
	}

	#[test]
	fn test_matching_entry_gives_name() {
		let table = FakeTable {
			pid: 123,
			processes: Some(vec![process(1, "wrong.process", None), process(123, "right.process", None)]),
		};
		let info = resolve_process_info(&table);
		assert_eq!(info.process_id, 123);
		assert_eq!(info.process_name, "right.process");
		assert!(info.parent_process_id.is_none());
		assert!(info.parent_process_name.is_none());
	}

	#[test]
	fn test_null_list_degrades() {
		let table = FakeTable {
			pid: 123,
			processes: None,
		};
		let info = resolve_process_info(&table);
		assert_eq!(info.process_id, 123);
		assert_eq!(info.process_name, "");
		assert!(info.parent_process_id.is_none());
		assert!(info.parent_process_name.is_none());
	}

	#[test]
	fn test_no_match_degrades() {
		let table = FakeTable {
			pid: 123,
			processes: Some(vec![process(9, "other", Some(1))]),
		};
		let info = resolve_process_info(&table);
		assert_eq!(info.process_name, "");
		assert!(info.parent_process_id.is_none());
	}

	#[test]
	fn test_parent_is_resolved_from_same_list() {
		let table = FakeTable {
			pid: 123,
			processes: Some(vec![process(1, "zygote", None), process(123, "app", Some(1))]),
		};
		let info = resolve_process_info(&table);
		assert_eq!(info.parent_process_id, Some(1));
		assert_eq!(info.parent_process_name.as_deref(), Some("zygote"));
	}

	#[test]
	fn test_parent_outside_sandbox_has_no_name() {
		let table = FakeTable {
			pid: 123,
			processes: Some(vec![process(123, "app", Some(1))]),
		};
		let info = resolve_process_info(&table);
		assert_eq!(info.parent_process_id, Some(1));
		assert!(info.parent_process_name.is_none());
	}
}
