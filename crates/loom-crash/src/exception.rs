// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Conversion of throwables into bounded exception trees.

use loom_crash_core::{ExceptionNode, StackFrame, CAUSE_LIMIT};
use tracing::warn;

use crate::frames::extract_frames;
use crate::throwable::Throwable;

/// Convert a throwable and its causes into an exception tree.
///
/// The tree holds at most [`CAUSE_LIMIT`] nodes: the thrown exception and its
/// closest causes are kept, deeper causes are dropped. A cause that was
/// already visited ends the chain. Every node has at least one frame.
pub fn exception_from_throwable(throwable: &dyn Throwable) -> ExceptionNode {
	let mut chain = bounded_chain(throwable);

	let mut tree = convert_node(chain.pop().unwrap_or(throwable));
	while let Some(parent) = chain.pop() {
		let mut node = convert_node(parent);
		node.cause = Some(Box::new(tree));
		tree = node;
	}
	tree
}

/// Walk the cause chain root first, stopping at the end of the chain, at
/// [`CAUSE_LIMIT`] nodes, or on the first revisited node.
fn bounded_chain(throwable: &dyn Throwable) -> Vec<&dyn Throwable> {
	let mut chain: Vec<&dyn Throwable> = Vec::new();
	let mut next = Some(throwable);

	while let Some(current) = next {
		if chain.iter().any(|seen| same_node(*seen, current)) {
			warn!(
				type_name = current.type_name(),
				"cause chain contains a cycle, stopping"
			);
			break;
		}
		if chain.len() == CAUSE_LIMIT {
			warn!(limit = CAUSE_LIMIT, "exception causes truncated");
			break;
		}
		chain.push(current);
		next = current.cause();
	}

	chain
}

/// Same address and same vtable. A cause stored first inside its parent
/// shares the address only.
fn same_node(a: &dyn Throwable, b: &dyn Throwable) -> bool {
	std::ptr::eq(a, b)
}

fn convert_node(throwable: &dyn Throwable) -> ExceptionNode {
	let mut frames = extract_frames(throwable.stack_trace());
	if frames.is_empty() {
		frames.push(StackFrame::placeholder());
	}

	let type_name = match throwable.type_name() {
		"" => "<unknown type>".to_string(),
		name => name.to_string(),
	};

	ExceptionNode {
		type_name,
		message: throwable.message().map(str::to_string),
		frames,
		cause: None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::throwable::{CapturedThrowable, NativeStackElement};
	use proptest::prelude::*;

	fn chain_of(len: usize) -> CapturedThrowable {
		let mut t = CapturedThrowable::new("java.lang.RuntimeException").with_message("0");
		for i in 1..len {
			t = CapturedThrowable::new("java.lang.RuntimeException")
				.with_message(i.to_string())
				.caused_by(t);
		}
		t
	}

	/// Throwable whose cause is itself.
	struct SelfCaused {
		stack: Vec<NativeStackElement>,
	}

	impl Throwable for SelfCaused {
		fn type_name(&self) -> &str {
			"com.example.SelfCaused"
		}

		fn message(&self) -> Option<&str> {
			None
		}

		fn stack_trace(&self) -> &[NativeStackElement] {
			&self.stack
		}

		fn cause(&self) -> Option<&dyn Throwable> {
			Some(self)
		}
	}

	#[test]
	fn test_three_level_chain_in_order() {
		let t = CapturedThrowable::new("java.lang.RuntimeException").caused_by(
			CapturedThrowable::new("java.io.IOException")
				.caused_by(CapturedThrowable::new("com.example.CustomException")),
		);
		let tree = exception_from_throwable(&t);
		let types: Vec<&str> = tree.chain().map(|n| n.type_name.as_str()).collect();
		assert_eq!(
			types,
			["java.lang.RuntimeException", "java.io.IOException", "com.example.CustomException"]
		);
		assert!(tree.chain().last().unwrap().cause.is_none());
	}

	#[test]
	fn test_long_chain_is_truncated_to_limit() {
		let tree = exception_from_throwable(&chain_of(33));
		assert_eq!(tree.depth(), CAUSE_LIMIT);
		// The thrown exception stays at the root.
		assert_eq!(tree.message.as_deref(), Some("32"));
	}

	#[test]
	fn test_chain_at_limit_is_kept_whole() {
		let tree = exception_from_throwable(&chain_of(CAUSE_LIMIT));
		assert_eq!(tree.depth(), CAUSE_LIMIT);
		assert_eq!(tree.chain().last().unwrap().message.as_deref(), Some("0"));
	}

	#[test]
	fn test_self_cause_terminates() {
		let t = SelfCaused { stack: Vec::new() };
		let tree = exception_from_throwable(&t);
		assert_eq!(tree.depth(), 1);
		assert_eq!(tree.type_name, "com.example.SelfCaused");
	}

	/// Throwable whose cause lives at offset 0, sharing its address.
	#[repr(C)]
	struct Wrapper {
		inner: CapturedThrowable,
	}

	impl Throwable for Wrapper {
		fn type_name(&self) -> &str {
			"com.example.WrapperException"
		}

		fn message(&self) -> Option<&str> {
			None
		}

		fn stack_trace(&self) -> &[NativeStackElement] {
			&[]
		}

		fn cause(&self) -> Option<&dyn Throwable> {
			Some(&self.inner)
		}
	}

	#[test]
	fn test_cause_sharing_parent_address_is_kept() {
		let wrapper = Wrapper {
			inner: CapturedThrowable::new("java.io.IOException"),
		};
		assert_eq!(
			&wrapper as *const Wrapper as *const (),
			&wrapper.inner as *const CapturedThrowable as *const ()
		);

		let tree = exception_from_throwable(&wrapper);
		let types: Vec<&str> = tree.chain().map(|n| n.type_name.as_str()).collect();
		assert_eq!(types, ["com.example.WrapperException", "java.io.IOException"]);
	}

	#[test]
	fn test_missing_stack_gets_placeholder_frame() {
		let tree = exception_from_throwable(&CapturedThrowable::new("java.lang.Exception"));
		assert_eq!(tree.frames, vec![StackFrame::placeholder()]);
	}

	#[test]
	fn test_message_is_verbatim() {
		let t = CapturedThrowable::new("java.lang.Exception").with_message("  spaced  ");
		assert_eq!(exception_from_throwable(&t).message.as_deref(), Some("  spaced  "));
	}

	#[test]
	fn test_frames_come_from_stack_trace() {
		let t = CapturedThrowable::new("java.lang.Exception").with_stack_trace(vec![
			NativeStackElement::new("com.example.A", "a").at("A.java", 1),
			NativeStackElement::new("com.example.B", "b").at("B.java", 2),
		]);
		let tree = exception_from_throwable(&t);
		assert_eq!(tree.frames.len(), 2);
		assert_eq!(tree.frames[1].class_name, "com.example.B");
	}

	proptest! {
		#[test]
		fn depth_is_bounded_and_frames_never_empty(len in 1usize..64) {
			let tree = exception_from_throwable(&chain_of(len));
			prop_assert_eq!(tree.depth(), len.min(CAUSE_LIMIT));
			for node in tree.chain() {
				prop_assert!(!node.type_name.is_empty());
				prop_assert!(!node.frames.is_empty());
				for frame in &node.frames {
					prop_assert!(!frame.class_name.is_empty());
					prop_assert!(!frame.method_name.is_empty());
				}
			}
		}
	}
}
