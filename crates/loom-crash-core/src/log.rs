// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error log records written at crash time.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::device::DeviceInfo;
use crate::error::CrashError;
use crate::exception::{ExceptionNode, StackFrame};

/// Identity of an error log. Also the stem of its file name on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLogId(pub Uuid);

impl ErrorLogId {
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for ErrorLogId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for ErrorLogId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for ErrorLogId {
	type Err = CrashError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}

/// Stack of one live thread at crash time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRecord {
	pub id: u64,
	pub name: String,
	pub frames: Vec<StackFrame>,
}

/// A fatal crash, assembled once from a frozen snapshot of runtime state.
///
/// Environment fields that could not be resolved are `None` (or empty for
/// `process_name`); only `id`, `timestamp` and `process_id` are guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLog {
	id: ErrorLogId,
	pub timestamp: DateTime<Utc>,
	pub app_launch_timestamp: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sid: Option<Uuid>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device: Option<DeviceInfo>,
	pub process_id: i32,
	#[serde(default)]
	pub process_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_process_id: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_process_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub architecture: Option<String>,
	pub fatal: bool,
	pub error_thread_id: u64,
	pub error_thread_name: String,
	pub exception: ExceptionNode,
	#[serde(default)]
	pub threads: Vec<ThreadRecord>,
}

impl ErrorLog {
	/// Create a log with the mandatory fields set and every environment field
	/// in its degraded state.
	pub fn new(
		id: ErrorLogId,
		timestamp: DateTime<Utc>,
		app_launch_timestamp: DateTime<Utc>,
		process_id: i32,
		exception: ExceptionNode,
	) -> Self {
		Self {
			id,
			timestamp,
			app_launch_timestamp,
			sid: None,
			user_id: None,
			device: None,
			process_id,
			process_name: String::new(),
			parent_process_id: None,
			parent_process_name: None,
			architecture: None,
			fatal: true,
			error_thread_id: 0,
			error_thread_name: String::new(),
			exception,
			threads: Vec::new(),
		}
	}

	pub fn id(&self) -> ErrorLogId {
		self.id
	}

	/// File name used when the log is persisted.
	pub fn file_name(&self) -> String {
		format!("{}{}", self.id, ERROR_LOG_FILE_EXTENSION)
	}
}

/// Extension of persisted error log files.
pub const ERROR_LOG_FILE_EXTENSION: &str = ".json";

/// A handled (non-fatal) error reported by the application itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandledErrorLog {
	id: ErrorLogId,
	pub timestamp: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device: Option<DeviceInfo>,
	pub exception: ExceptionNode,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub properties: BTreeMap<String, String>,
}

impl HandledErrorLog {
	pub fn new(id: ErrorLogId, timestamp: DateTime<Utc>, exception: ExceptionNode) -> Self {
		Self {
			id,
			timestamp,
			device: None,
			exception,
			properties: BTreeMap::new(),
		}
	}

	pub fn id(&self) -> ErrorLogId {
		self.id
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn exception() -> ExceptionNode {
		ExceptionNode {
			type_name: "java.lang.Exception".to_string(),
			message: None,
			frames: vec![StackFrame::placeholder()],
			cause: None,
		}
	}

	#[test]
	fn test_new_log_is_degraded_but_complete() {
		let now = Utc::now();
		let log = ErrorLog::new(ErrorLogId::new(), now, now, 42, exception());
		assert_eq!(log.process_id, 42);
		assert!(log.process_name.is_empty());
		assert!(log.device.is_none());
		assert!(log.fatal);
	}

	#[test]
	fn test_json_omits_absent_fields() {
		let now = Utc::now();
		let log = ErrorLog::new(ErrorLogId::new(), now, now, 7, exception());
		let json = serde_json::to_value(&log).unwrap();
		assert_eq!(json["processId"], 7);
		assert!(json.get("device").is_none());
		assert!(json.get("parentProcessId").is_none());
		assert_eq!(json["id"], log.id().to_string());

		let back: ErrorLog = serde_json::from_value(json).unwrap();
		assert_eq!(back, log);
	}

	#[test]
	fn test_file_name_is_keyed_on_id() {
		let now = Utc::now();
		let log = ErrorLog::new(ErrorLogId::new(), now, now, 1, exception());
		assert_eq!(log.file_name(), format!("{}.json", log.id()));
	}

	#[test]
	fn test_invalid_id_is_rejected() {
		assert!(matches!(
			"not-a-uuid".parse::<ErrorLogId>(),
			Err(CrashError::InvalidLogId(_))
		));
	}

	proptest! {
		#[test]
		fn error_log_id_roundtrip(uuid_bytes in any::<[u8; 16]>()) {
			let id = ErrorLogId(Uuid::from_bytes(uuid_bytes));
			let parsed: ErrorLogId = id.to_string().parse().unwrap();
			prop_assert_eq!(id, parsed);
		}
	}
}
