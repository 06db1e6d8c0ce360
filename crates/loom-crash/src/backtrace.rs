// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capture of the current Rust stack as native stack elements.

use backtrace::Backtrace;
use rustc_demangle::try_demangle;

use crate::throwable::NativeStackElement;

/// Frames belonging to the capture machinery itself, skipped at the top of
/// every captured stack.
const CAPTURE_PREFIXES: &[&str] = &[
	"backtrace::",
	"<backtrace::",
	"loom_crash::backtrace::",
	"loom_crash::throwable::",
];

/// Capture the calling thread's stack, innermost frame (the caller) first.
pub fn capture_native_stack() -> Vec<NativeStackElement> {
	let backtrace = Backtrace::new();
	let mut elements = Vec::new();

	for frame in backtrace.frames() {
		for symbol in frame.symbols() {
			let function = symbol
				.name()
				.and_then(|name| name.as_str().map(demangle_symbol));
			let file_name = symbol
				.filename()
				.and_then(|path| path.file_name())
				.map(|name| name.to_string_lossy().into_owned());

			let mut element = split_function(function.as_deref());
			element.file_name = file_name;
			element.line_number = symbol.lineno();
			elements.push(element);
		}
	}

	let skip = elements
		.iter()
		.take_while(|element| is_capture_frame(element))
		.count();
	elements.drain(..skip);
	elements
}

fn demangle_symbol(raw: &str) -> String {
	match try_demangle(raw) {
		// Alternate formatting drops the trailing hash.
		Ok(demangled) => format!("{demangled:#}"),
		Err(_) => raw.to_string(),
	}
}

/// Split `crate::module::function` into a class-like module path and a method.
fn split_function(function: Option<&str>) -> NativeStackElement {
	let Some(function) = function.filter(|f| !f.is_empty()) else {
		return NativeStackElement::default();
	};

	match function.rfind("::") {
		Some(idx) => NativeStackElement {
			class_name: Some(function[..idx].to_string()),
			method_name: Some(function[idx + 2..].to_string()),
			..Default::default()
		},
		None => NativeStackElement {
			class_name: None,
			method_name: Some(function.to_string()),
			..Default::default()
		},
	}
}

fn is_capture_frame(element: &NativeStackElement) -> bool {
	let Some(class_name) = element.class_name.as_deref() else {
		return false;
	};
	let class_name = format!("{class_name}::");
	CAPTURE_PREFIXES
		.iter()
		.any(|prefix| class_name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_split_function_module_path() {
		let element = split_function(Some("my_app::handlers::process"));
		assert_eq!(element.class_name.as_deref(), Some("my_app::handlers"));
		assert_eq!(element.method_name.as_deref(), Some("process"));
	}

	#[test]
	fn test_split_function_without_module() {
		let element = split_function(Some("main"));
		assert!(element.class_name.is_none());
		assert_eq!(element.method_name.as_deref(), Some("main"));
	}

	#[test]
	fn test_split_function_missing_name() {
		assert_eq!(split_function(None), NativeStackElement::default());
		assert_eq!(split_function(Some("")), NativeStackElement::default());
	}

	#[test]
	fn test_demangle_strips_hash() {
		let demangled = demangle_symbol("_ZN8my_crate4main17h0123456789abcdefE");
		assert_eq!(demangled, "my_crate::main");
	}

	#[test]
	fn test_demangle_passes_through_c_symbols() {
		assert_eq!(demangle_symbol("malloc"), "malloc");
	}

	#[test]
	fn test_capture_frame_detection() {
		assert!(is_capture_frame(&NativeStackElement::new("backtrace::backtrace", "trace")));
		assert!(is_capture_frame(&NativeStackElement::new(
			"loom_crash::backtrace",
			"capture_native_stack"
		)));
		assert!(!is_capture_frame(&NativeStackElement::new("my_app", "main")));
		assert!(!is_capture_frame(&NativeStackElement::default()));
	}

	#[test]
	fn test_capture_native_stack() {
		// Frame contents depend on debug info; only check the call is safe.
		let _elements = capture_native_stack();
	}
}
