// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Conversion of native stack traces into model frames.

use loom_crash_core::{StackFrame, UNKNOWN_CLASS, UNKNOWN_METHOD};

use crate::throwable::NativeStackElement;

/// Convert a native stack trace into frames, one per element, same order.
///
/// Missing or empty class and method names become [`UNKNOWN_CLASS`] and
/// [`UNKNOWN_METHOD`]; file and line pass through untouched.
pub fn extract_frames(stack_trace: &[NativeStackElement]) -> Vec<StackFrame> {
	stack_trace.iter().map(extract_frame).collect()
}

fn extract_frame(element: &NativeStackElement) -> StackFrame {
	StackFrame {
		class_name: non_empty_or(element.class_name.as_deref(), UNKNOWN_CLASS),
		method_name: non_empty_or(element.method_name.as_deref(), UNKNOWN_METHOD),
		file_name: element.file_name.clone(),
		line_number: element.line_number,
	}
}

fn non_empty_or(value: Option<&str>, placeholder: &str) -> String {
	match value {
		Some(value) if !value.trim().is_empty() => value.to_string(),
		_ => placeholder.to_string(),
	}
}
