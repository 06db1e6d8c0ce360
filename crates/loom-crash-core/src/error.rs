// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the crash model.

use thiserror::Error;

/// Errors raised while parsing or encoding crash model values.
#[derive(Debug, Error)]
pub enum CrashError {
	#[error("invalid error log id: {0}")]
	InvalidLogId(#[from] uuid::Error),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Result type for crash model operations.
pub type Result<T> = std::result::Result<T, CrashError>;
