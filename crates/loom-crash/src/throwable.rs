// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime-side view of a thrown error and its cause chain.

use crate::backtrace::capture_native_stack;

/// One element of a stack trace as reported by the runtime unwinder.
///
/// Any field may be missing; the frame extractor fills in placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeStackElement {
	pub class_name: Option<String>,
	pub method_name: Option<String>,
	pub file_name: Option<String>,
	pub line_number: Option<u32>,
}

impl NativeStackElement {
	pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
		Self {
			class_name: Some(class_name.into()),
			method_name: Some(method_name.into()),
			file_name: None,
			line_number: None,
		}
	}

	pub fn at(mut self, file_name: impl Into<String>, line_number: u32) -> Self {
		self.file_name = Some(file_name.into());
		self.line_number = Some(line_number);
		self
	}
}

/// A thrown error as the runtime exposes it.
///
/// `cause` may return a node already seen earlier in the chain, including
/// `self`; consumers must not assume the chain terminates.
pub trait Throwable {
	/// Fully qualified type name.
	fn type_name(&self) -> &str;

	fn message(&self) -> Option<&str>;

	/// Stack at the throw site, innermost frame first.
	fn stack_trace(&self) -> &[NativeStackElement];

	fn cause(&self) -> Option<&dyn Throwable>;
}

/// Owned throwable, used for errors reported from Rust code and for replaying
/// throwables received from a foreign runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedThrowable {
	pub type_name: String,
	pub message: Option<String>,
	pub stack_trace: Vec<NativeStackElement>,
	pub cause: Option<Box<CapturedThrowable>>,
}

impl CapturedThrowable {
	pub fn new(type_name: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			message: None,
			stack_trace: Vec::new(),
			cause: None,
		}
	}

	/// Capture a panic at the current location, with the current stack.
	pub fn from_panic(message: impl Into<String>) -> Self {
		Self::new("panic")
			.with_message(message)
			.with_stack_trace(capture_native_stack())
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn with_stack_trace(mut self, stack_trace: Vec<NativeStackElement>) -> Self {
		self.stack_trace = stack_trace;
		self
	}

	pub fn caused_by(mut self, cause: CapturedThrowable) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}
}

impl Throwable for CapturedThrowable {
	fn type_name(&self) -> &str {
		&self.type_name
	}

	fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	fn stack_trace(&self) -> &[NativeStackElement] {
		&self.stack_trace
	}

	fn cause(&self) -> Option<&dyn Throwable> {
		self.cause.as_deref().map(|cause| cause as &dyn Throwable)
	}
}
