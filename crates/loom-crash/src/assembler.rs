// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Assembly of error logs from a frozen crash snapshot.
//!
//! Assembly never fails: every environment source is queried on a best-effort
//! basis and degrades to an absent field. Only the exception tree, the process
//! id and the timestamps are always present.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use loom_crash_core::{
	validate_properties, DeviceInfo, ErrorLog, ErrorLogId, ErrorReport, HandledErrorLog,
};
use tracing::{debug, warn};

use crate::arch::resolve_architecture;
use crate::exception::exception_from_throwable;
use crate::platform::{CrashContext, DeviceInfoResolver, ProcessTable};
use crate::process::{resolve_process_info, ProcessInfo};
use crate::threads::{collect_threads, CrashingThread, ThreadStackSnapshot};
use crate::throwable::Throwable;

/// Log type handed to the property validator for handled errors.
pub const HANDLED_ERROR_LOG_TYPE: &str = "HandledError";

/// Build the log for a fatal crash on `thread`.
///
/// Platform collaborators that fail or panic leave their fields absent.
pub fn create_error_log(
	ctx: &CrashContext<'_>,
	thread: &CrashingThread,
	throwable: &dyn Throwable,
	threads: &[ThreadStackSnapshot],
	app_launch_timestamp: DateTime<Utc>,
) -> ErrorLog {
	let process = resolve_process(ctx.processes);

	let mut log = ErrorLog::new(
		ErrorLogId::new(),
		Utc::now(),
		app_launch_timestamp,
		process.process_id,
		exception_from_throwable(throwable),
	);
	log.sid = ctx.session_id;
	log.user_id = ctx.user_id.map(str::to_string);
	log.device = resolve_device(ctx.device);
	log.process_name = process.process_name;
	log.parent_process_id = process.parent_process_id;
	log.parent_process_name = process.parent_process_name;
	log.architecture = contained("build info", || resolve_architecture(ctx.build)).flatten();
	log.error_thread_id = thread.id;
	log.error_thread_name = thread.name.clone();
	log.threads = collect_threads(threads);

	debug!(
		log_id = %log.id(),
		exception_type = %log.exception.type_name,
		thread_count = log.threads.len(),
		"error log assembled"
	);
	log
}

/// Build the log for an error the application caught and reported itself.
pub fn create_handled_error_log<'a, I>(
	ctx: &CrashContext<'_>,
	throwable: &dyn Throwable,
	properties: I,
) -> HandledErrorLog
where
	I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
	let mut log = HandledErrorLog::new(ErrorLogId::new(), Utc::now(), exception_from_throwable(throwable));
	log.device = resolve_device(ctx.device);
	log.properties = validate_properties(properties, HANDLED_ERROR_LOG_TYPE);
	log
}

/// Caller-facing projection of `log`.
pub fn error_report_from_error_log(log: &ErrorLog, stack_trace: impl Into<String>) -> ErrorReport {
	ErrorReport::from_log(log, stack_trace)
}

fn resolve_device(resolver: &dyn DeviceInfoResolver) -> Option<DeviceInfo> {
	match contained("device info", || resolver.resolve())? {
		Ok(device) => Some(device),
		Err(e) => {
			warn!(error = %e, "could not attach device info to error log");
			None
		}
	}
}

/// Process info, falling back to the pid alone, and to the OS pid if even the
/// table's own pid lookup panics.
fn resolve_process(table: &dyn ProcessTable) -> ProcessInfo {
	contained("process table", || resolve_process_info(table)).unwrap_or_else(|| ProcessInfo {
		process_id: contained("process id", || table.current_pid())
			.unwrap_or_else(|| std::process::id() as i32),
		process_name: String::new(),
		parent_process_id: None,
		parent_process_name: None,
	})
}

/// Run one metadata lookup, turning a panic into `None`.
fn contained<T>(source: &'static str, lookup: impl FnOnce() -> T) -> Option<T> {
	match panic::catch_unwind(AssertUnwindSafe(lookup)) {
		Ok(value) => Some(value),
		Err(payload) => {
			warn!(source, panic = %panic_message(payload.as_ref()), "metadata source panicked");
			None
		}
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		s.to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"Box<dyn Any>".to_string()
	}
}
