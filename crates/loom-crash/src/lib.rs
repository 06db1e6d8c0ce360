// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crash capture SDK.
//!
//! Turns a crash on a running process into a size-bounded [`ErrorLog`],
//! persists logs for later upload and stages folders for native crash dumps.
//!
//! # Quick Start
//!
//! ```ignore
//! use loom_crash::{
//!     create_error_log, CapturedThrowable, CrashContext, CrashStorageConfig, CrashingThread,
//!     HostBuildInfo, HostDeviceInfoResolver, PersistedLogStore, SystemProcessTable,
//! };
//!
//! let device = HostDeviceInfoResolver::new("com.example.app").app_version("1.4.0");
//! let processes = SystemProcessTable;
//! let build = HostBuildInfo::new();
//! let ctx = CrashContext::new(&device, &processes, &build);
//!
//! let throwable = CapturedThrowable::from_panic("index out of bounds");
//! let log = create_error_log(&ctx, &CrashingThread::new(1, "main"), &throwable, &[], launched_at);
//!
//! let config = CrashStorageConfig::from_env_or_xdg()?;
//! let store = PersistedLogStore::new(Some(config.error_dir.clone()));
//! store.store_error_log(&log)?;
//! ```
//!
//! # Reliability
//!
//! Assembly never fails. Device, process and architecture lookups degrade to
//! absent fields and are logged with `tracing`. Exception cause chains are cut
//! at [`CAUSE_LIMIT`](loom_crash_core::CAUSE_LIMIT) nodes and cycles end the
//! chain.

pub mod arch;
pub mod assembler;
pub mod backtrace;
pub mod config;
pub mod error;
pub mod exception;
pub mod frames;
pub mod platform;
pub mod process;
pub mod staging;
pub mod store;
pub mod threads;
pub mod throwable;

pub use arch::resolve_architecture;
pub use assembler::{
	create_error_log, create_handled_error_log, error_report_from_error_log, HANDLED_ERROR_LOG_TYPE,
};
pub use crate::backtrace::capture_native_stack;
pub use config::{CrashStorageConfig, CRASH_DIR_ENV};
pub use error::{DeviceInfoError, Result, StagingError, StoreError};
pub use exception::exception_from_throwable;
pub use frames::extract_frames;
pub use platform::{
	BuildInfo, CrashContext, DeviceInfoResolver, HostBuildInfo, HostDeviceInfoResolver, ProcessTable,
	RunningProcess, SystemProcessTable, SUPPORTED_ABIS_MIN_API_LEVEL,
};
pub use process::{resolve_process_info, ProcessInfo};
pub use staging::{
	read_stored_device_info, FsSidecarSink, MinidumpStagingManager, SidecarSink, DEVICE_INFO_FILE,
};
pub use store::PersistedLogStore;
pub use threads::{collect_threads, CrashingThread, ThreadStackSnapshot};
pub use throwable::{CapturedThrowable, NativeStackElement, Throwable};

pub use loom_crash_core::{
	DeviceInfo, ErrorLog, ErrorLogId, ErrorReport, ExceptionNode, HandledErrorLog, StackFrame,
	ThreadRecord,
};

/// SDK name reported in device snapshots.
pub const SDK_NAME: &str = "loom-crash-rust";

/// SDK version reported in device snapshots.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
