// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Exception trees and stack frames.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Maximum number of nodes kept when converting a cause chain.
pub const CAUSE_LIMIT: usize = 16;

/// Class name used when the runtime reports none.
pub const UNKNOWN_CLASS: &str = "<unknown class>";

/// Method name used when the runtime reports none.
pub const UNKNOWN_METHOD: &str = "<unknown method>";

/// A single stack frame.
///
/// `class_name` and `method_name` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
	pub class_name: String,
	pub method_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub line_number: Option<u32>,
}

impl StackFrame {
	/// Synthetic frame standing in for a stack the runtime could not provide.
	pub fn placeholder() -> Self {
		Self {
			class_name: UNKNOWN_CLASS.to_string(),
			method_name: UNKNOWN_METHOD.to_string(),
			file_name: None,
			line_number: None,
		}
	}

	fn location(&self) -> String {
		match (&self.file_name, self.line_number) {
			(Some(file), Some(line)) => format!("{file}:{line}"),
			(Some(file), None) => file.clone(),
			(None, _) => "Unknown Source".to_string(),
		}
	}
}

/// One exception in a cause chain.
///
/// `frames` is never empty; the child in `cause` is the exception that
/// triggered this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionNode {
	/// Fully qualified type name.
	#[serde(rename = "type")]
	pub type_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	pub frames: Vec<StackFrame>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cause: Option<Box<ExceptionNode>>,
}

impl ExceptionNode {
	/// Iterate this node followed by every cause, root to leaf.
	pub fn chain(&self) -> impl Iterator<Item = &ExceptionNode> {
		std::iter::successors(Some(self), |node| node.cause.as_deref())
	}

	/// Number of nodes from this one down to the deepest cause.
	pub fn depth(&self) -> usize {
		self.chain().count()
	}

	/// Render the tree the way JVM-style runtimes print stack traces.
	///
	/// ```
	/// use loom_crash_core::{ExceptionNode, StackFrame};
	///
	/// let node = ExceptionNode {
	///     type_name: "java.lang.IllegalStateException".into(),
	///     message: Some("boom".into()),
	///     frames: vec![StackFrame::placeholder()],
	///     cause: None,
	/// };
	/// assert!(node.stack_trace_text().starts_with("java.lang.IllegalStateException: boom\n"));
	/// ```
	pub fn stack_trace_text(&self) -> String {
		let mut out = String::new();
		for (index, node) in self.chain().enumerate() {
			if index > 0 {
				out.push_str("Caused by: ");
			}
			out.push_str(&node.type_name);
			if let Some(message) = &node.message {
				let _ = write!(out, ": {message}");
			}
			out.push('\n');
			for frame in &node.frames {
				let _ = writeln!(
					out,
					"\tat {}.{}({})",
					frame.class_name,
					frame.method_name,
					frame.location()
				);
			}
		}
		out
	}
}
