// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validation of user-supplied log properties.

use std::collections::BTreeMap;

use tracing::warn;

/// Maximum number of properties kept on a single log.
pub const MAX_PROPERTY_COUNT: usize = 20;

/// Maximum length, in characters, of a property key or value.
pub const MAX_PROPERTY_ITEM_LENGTH: usize = 125;

/// Sanitize properties before attaching them to an outgoing log.
///
/// Entries are visited in the iteration order of `properties`. Entries with a
/// missing or empty key or value are dropped, keys and values longer than
/// [`MAX_PROPERTY_ITEM_LENGTH`] characters are truncated, and at most
/// [`MAX_PROPERTY_COUNT`] entries are kept (the first ones visited).
///
/// ```
/// use loom_crash_core::validate_properties;
///
/// let props = validate_properties([(Some("screen"), Some("checkout")), (Some(""), Some("x"))], "HandledError");
/// assert_eq!(props.len(), 1);
/// assert_eq!(props["screen"], "checkout");
/// ```
pub fn validate_properties<'a, I>(properties: I, log_type: &str) -> BTreeMap<String, String>
where
	I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
	let mut result = BTreeMap::new();

	for (key, value) in properties {
		if result.len() >= MAX_PROPERTY_COUNT {
			warn!(
				log_type,
				max = MAX_PROPERTY_COUNT,
				"properties exceed the maximum count, dropping the rest"
			);
			break;
		}

		let key = match key {
			Some(key) if !key.is_empty() => key,
			_ => {
				warn!(log_type, "property key is missing or empty, dropping property");
				continue;
			}
		};

		let value = match value {
			Some(value) if !value.is_empty() => value,
			_ => {
				warn!(log_type, key, "property value is missing or empty, dropping property");
				continue;
			}
		};

		let key = truncate_item(key, log_type, "key");
		let value = truncate_item(value, log_type, "value");
		result.insert(key, value);
	}

	result
}

fn truncate_item(item: &str, log_type: &str, kind: &str) -> String {
	match item.char_indices().nth(MAX_PROPERTY_ITEM_LENGTH) {
		Some((cut, _)) => {
			warn!(
				log_type,
				kind,
				max = MAX_PROPERTY_ITEM_LENGTH,
				"property {kind} too long, truncating"
			);
			item[..cut].to_string()
		}
		None => item.to_string(),
	}
}
