// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the crash SDK.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for persisted log operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Device introspection failed.
#[derive(Debug, Error)]
#[error("failed to resolve device info: {message}")]
pub struct DeviceInfoError {
	message: String,
	#[source]
	source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DeviceInfoError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			source: None,
		}
	}

	pub fn with_source(
		message: impl Into<String>,
		source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
	) -> Self {
		Self {
			message: message.into(),
			source: Some(source.into()),
		}
	}
}

/// Errors from the persisted error log store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// No directory has been configured for the store.
	#[error("error log directory is not configured")]
	NotConfigured,

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Why staging a minidump folder was rolled back.
#[derive(Debug, Error)]
pub enum StagingError {
	#[error("failed to create staging folder {path}: {source}")]
	CreateFolder {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	DeviceInfo(#[from] DeviceInfoError),

	#[error("failed to encode device info: {0}")]
	Encode(#[source] serde_json::Error),

	#[error("failed to write device info sidecar: {0}")]
	Write(#[source] std::io::Error),

	#[error("failed to move staging folder into place at {path}: {source}")]
	Commit {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}
