// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform collaborators queried while assembling a crash log.
//!
//! Each source of environment metadata sits behind a small trait so the
//! assembler can be driven by the host OS in production and by fakes in
//! tests. Host implementations are provided for desktop and server targets.

use loom_crash_core::DeviceInfo;
use sysinfo::System;
use uuid::Uuid;

use crate::error::DeviceInfoError;

/// First platform API level that exposes an ordered list of supported ABIs.
pub const SUPPORTED_ABIS_MIN_API_LEVEL: u32 = 21;

/// Produces the device snapshot attached to logs.
pub trait DeviceInfoResolver: Send + Sync {
	fn resolve(&self) -> Result<DeviceInfo, DeviceInfoError>;
}

/// One entry of the OS list of running processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningProcess {
	pub pid: i32,
	pub name: String,
	pub parent_pid: Option<i32>,
}

/// Read access to the OS process table.
pub trait ProcessTable: Send + Sync {
	/// Pid of the current process. Never fails.
	fn current_pid(&self) -> i32;

	/// Running processes visible to this one, `None` when the OS refuses to
	/// list them.
	fn running_processes(&self) -> Option<Vec<RunningProcess>>;
}

/// Build properties describing the CPU instruction sets the platform runs.
pub trait BuildInfo: Send + Sync {
	fn api_level(&self) -> u32;

	/// Supported ABIs, most preferred first. Only meaningful at or above
	/// [`SUPPORTED_ABIS_MIN_API_LEVEL`].
	fn supported_abis(&self) -> Option<Vec<String>>;

	/// Single primary ABI reported by older platforms.
	fn legacy_abi(&self) -> Option<String>;
}

/// Everything the assembler needs from the environment, borrowed for the
/// duration of one capture.
#[derive(Clone, Copy)]
pub struct CrashContext<'a> {
	pub device: &'a dyn DeviceInfoResolver,
	pub processes: &'a dyn ProcessTable,
	pub build: &'a dyn BuildInfo,
	pub session_id: Option<Uuid>,
	pub user_id: Option<&'a str>,
}

impl<'a> CrashContext<'a> {
	pub fn new(
		device: &'a dyn DeviceInfoResolver,
		processes: &'a dyn ProcessTable,
		build: &'a dyn BuildInfo,
	) -> Self {
		Self {
			device,
			processes,
			build,
			session_id: None,
			user_id: None,
		}
	}

	pub fn with_session(mut self, session_id: Uuid) -> Self {
		self.session_id = Some(session_id);
		self
	}

	pub fn with_user(mut self, user_id: &'a str) -> Self {
		self.user_id = Some(user_id);
		self
	}
}

/// Process table backed by `sysinfo`.
#[derive(Debug, Default)]
pub struct SystemProcessTable;

impl ProcessTable for SystemProcessTable {
	fn current_pid(&self) -> i32 {
		std::process::id() as i32
	}

	fn running_processes(&self) -> Option<Vec<RunningProcess>> {
		let mut system = System::new();
		system.refresh_processes();

		let processes: Vec<RunningProcess> = system
			.processes()
			.iter()
			.map(|(pid, process)| RunningProcess {
				pid: pid.as_u32() as i32,
				name: process.name().to_string(),
				parent_pid: process.parent().map(|parent| parent.as_u32() as i32),
			})
			.collect();

		if processes.is_empty() {
			None
		} else {
			Some(processes)
		}
	}
}

/// Build info for the target this binary was compiled for.
#[derive(Debug, Clone)]
pub struct HostBuildInfo {
	abi: Option<String>,
}

impl HostBuildInfo {
	pub fn new() -> Self {
		Self {
			abi: abi_for_arch(std::env::consts::ARCH),
		}
	}
}

impl Default for HostBuildInfo {
	fn default() -> Self {
		Self::new()
	}
}

impl BuildInfo for HostBuildInfo {
	fn api_level(&self) -> u32 {
		SUPPORTED_ABIS_MIN_API_LEVEL
	}

	fn supported_abis(&self) -> Option<Vec<String>> {
		self.abi.clone().map(|abi| vec![abi])
	}

	fn legacy_abi(&self) -> Option<String> {
		self.abi.clone()
	}
}

/// Map a Rust target architecture to the ABI name mobile platforms use.
pub fn abi_for_arch(arch: &str) -> Option<String> {
	let abi = match arch {
		"aarch64" => "arm64-v8a",
		"arm" => "armeabi-v7a",
		"x86" => "x86",
		"x86_64" => "x86_64",
		"riscv64" => "riscv64",
		"" => return None,
		other => other,
	};
	Some(abi.to_string())
}

/// Device info resolver for desktop and server hosts.
///
/// Application identity cannot be discovered from the OS, so the embedder
/// supplies it; resolution fails when no namespace was given.
#[derive(Debug, Clone, Default)]
pub struct HostDeviceInfoResolver {
	pub app_namespace: String,
	pub app_version: Option<String>,
	pub app_build: Option<String>,
}

impl HostDeviceInfoResolver {
	pub fn new(app_namespace: impl Into<String>) -> Self {
		Self {
			app_namespace: app_namespace.into(),
			app_version: None,
			app_build: None,
		}
	}

	pub fn app_version(mut self, version: impl Into<String>) -> Self {
		self.app_version = Some(version.into());
		self
	}

	pub fn app_build(mut self, build: impl Into<String>) -> Self {
		self.app_build = Some(build.into());
		self
	}
}

impl DeviceInfoResolver for HostDeviceInfoResolver {
	fn resolve(&self) -> Result<DeviceInfo, DeviceInfoError> {
		if self.app_namespace.is_empty() {
			return Err(DeviceInfoError::new("application namespace is not set"));
		}

		let offset_minutes = chrono::Local::now().offset().local_minus_utc() / 60;

		Ok(DeviceInfo {
			sdk_name: Some(crate::SDK_NAME.to_string()),
			sdk_version: Some(crate::SDK_VERSION.to_string()),
			os_name: Some(System::name().unwrap_or_else(|| std::env::consts::OS.to_string())),
			os_version: System::os_version(),
			os_build: System::kernel_version(),
			locale: locale_from_env(),
			time_zone_offset: Some(offset_minutes),
			app_version: self.app_version.clone(),
			app_build: self.app_build.clone(),
			app_namespace: Some(self.app_namespace.clone()),
			..Default::default()
		})
	}
}

fn locale_from_env() -> Option<String> {
	["LC_ALL", "LC_MESSAGES", "LANG"]
		.iter()
		.filter_map(|var| std::env::var(var).ok())
		.find(|value| !value.is_empty())
		.map(|value| value.split('.').next().unwrap_or(&value).to_string())
}
