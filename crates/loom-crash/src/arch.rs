// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Primary CPU architecture of the device.

use crate::platform::{BuildInfo, SUPPORTED_ABIS_MIN_API_LEVEL};

/// Where the platform reports its ABIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AbiSource {
	/// Ordered list of supported ABIs, preferred first.
	SupportedList,
	/// Single legacy ABI field.
	Legacy,
}

fn detect_source(build: &dyn BuildInfo) -> AbiSource {
	if build.api_level() >= SUPPORTED_ABIS_MIN_API_LEVEL {
		AbiSource::SupportedList
	} else {
		AbiSource::Legacy
	}
}

/// Best guess at the primary instruction set, `None` when the platform does
/// not say.
pub fn resolve_architecture(build: &dyn BuildInfo) -> Option<String> {
	let abi = match detect_source(build) {
		AbiSource::SupportedList => build.supported_abis().and_then(|abis| abis.into_iter().next()),
		AbiSource::Legacy => build.legacy_abi(),
	};
	abi.filter(|abi| !abi.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FakeBuild {
		api_level: u32,
		supported_abis: Option<Vec<String>>,
		legacy_abi: Option<String>,
	}

	impl BuildInfo for FakeBuild {
		fn api_level(&self) -> u32 {
			self.api_level
		}

		fn supported_abis(&self) -> Option<Vec<String>> {
			self.supported_abis.clone()
		}

		fn legacy_abi(&self) -> Option<String> {
			self.legacy_abi.clone()
		}
	}

	fn abis(list: &[&str]) -> Option<Vec<String>> {
		Some(list.iter().map(|s| s.to_string()).collect())
	}

	#[test]
	fn test_modern_platform_uses_first_supported_abi() {
		let build = FakeBuild {
			api_level: 23,
			supported_abis: abis(&["armeabi-v7a", "arm"]),
			legacy_abi: Some("x86".to_string()),
		};
		assert_eq!(resolve_architecture(&build).as_deref(), Some("armeabi-v7a"));
	}

	#[test]
	fn test_legacy_platform_uses_legacy_abi() {
		let build = FakeBuild {
			api_level: 15,
			supported_abis: abis(&["arm64-v8a"]),
			legacy_abi: Some("armeabi-v7a".to_string()),
		};
		assert_eq!(resolve_architecture(&build).as_deref(), Some("armeabi-v7a"));
	}

	#[test]
	fn test_absent_sources_give_none() {
		let modern = FakeBuild {
			api_level: 30,
			supported_abis: Some(Vec::new()),
			legacy_abi: None,
		};
		assert_eq!(resolve_architecture(&modern), None);

		let legacy = FakeBuild {
			api_level: 10,
			supported_abis: None,
			legacy_abi: Some(String::new()),
		};
		assert_eq!(resolve_architecture(&legacy), None);
	}

	#[test]
	fn test_gate_boundary() {
		let build = FakeBuild {
			api_level: SUPPORTED_ABIS_MIN_API_LEVEL,
			supported_abis: abis(&["x86_64"]),
			legacy_abi: Some("x86".to_string()),
		};
		assert_eq!(detect_source(&build), AbiSource::SupportedList);
		assert_eq!(resolve_architecture(&build).as_deref(), Some("x86_64"));
	}
}
