// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Device snapshot attached to crash logs.

use serde::{Deserialize, Serialize};

/// Environment snapshot taken at crash time.
///
/// Produced by a device-info resolver outside this crate. The crash pipeline
/// treats it as an opaque value: either it was obtained or it was not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sdk_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sdk_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub oem_name: Option<String>,
	/// "Android", "iOS", "Linux"
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub os_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub os_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub os_build: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub os_api_level: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
	/// Offset from UTC in minutes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub time_zone_offset: Option<i32>,
	/// "1080x1794"
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub screen_size: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub app_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub app_build: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub app_namespace: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub carrier_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub carrier_country: Option<String>,
}
