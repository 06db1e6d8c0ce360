// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Loom crash capture.
//!
//! This crate holds the serializable model shared by the capture SDK
//! (`loom-crash`) and anything that reads its artifacts back: error logs,
//! exception trees, thread dumps, device snapshots and the caller-facing
//! [`ErrorReport`]. It performs no I/O.
//!
//! # Bounds
//!
//! Crash input is unbounded, transport is not. The model carries the limits
//! the capture side enforces:
//! - [`CAUSE_LIMIT`] nodes per exception tree
//! - [`MAX_PROPERTY_COUNT`] properties per log, each key and value at most
//!   [`MAX_PROPERTY_ITEM_LENGTH`] characters

pub mod device;
pub mod error;
pub mod exception;
pub mod log;
pub mod properties;
pub mod report;

pub use device::DeviceInfo;
pub use error::{CrashError, Result};
pub use exception::{ExceptionNode, StackFrame, CAUSE_LIMIT, UNKNOWN_CLASS, UNKNOWN_METHOD};
pub use log::{ErrorLog, ErrorLogId, HandledErrorLog, ThreadRecord, ERROR_LOG_FILE_EXTENSION};
pub use properties::{validate_properties, MAX_PROPERTY_COUNT, MAX_PROPERTY_ITEM_LENGTH};
pub use report::ErrorReport;
