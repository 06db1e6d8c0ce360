// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller-facing view of a crash.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::device::DeviceInfo;
use crate::log::ErrorLog;

/// Read-only projection of an [`ErrorLog`] handed to UI code and callbacks.
///
/// Never stored; rebuild it from the log whenever it is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
	pub id: String,
	pub thread_name: String,
	pub stack_trace: String,
	pub app_start_time: DateTime<Utc>,
	pub app_error_time: DateTime<Utc>,
	pub device: Option<DeviceInfo>,
}

impl ErrorReport {
	pub fn from_log(log: &ErrorLog, stack_trace: impl Into<String>) -> Self {
		Self {
			id: log.id().to_string(),
			thread_name: log.error_thread_name.clone(),
			stack_trace: stack_trace.into(),
			app_start_time: log.app_launch_timestamp,
			app_error_time: log.timestamp,
			device: log.device.clone(),
		}
	}
}
