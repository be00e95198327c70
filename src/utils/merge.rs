// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::work::WorkValue;

/// Overlay `top` onto `base`; keys present in both take `top`'s value.
///
/// This is how a result reaches the items after it: the staged value of a
/// `next` item or a fan-out task is the base, the incoming result is laid on
/// top.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use the_workchain::utils::overlay;
/// use the_workchain::work::WorkValue;
///
/// let mut staged = WorkValue::new();
/// staged.insert("val".to_string(), json!("dog"));
/// staged.insert("foo".to_string(), json!("old"));
///
/// let mut result = WorkValue::new();
/// result.insert("foo".to_string(), json!("foo"));
///
/// let merged = overlay(staged, result);
///
/// assert_eq!(merged.get("val"), Some(&json!("dog")));
/// assert_eq!(merged.get("foo"), Some(&json!("foo")));
/// ```
pub fn overlay(mut base: WorkValue, top: WorkValue) -> WorkValue {
    for (key, value) in top {
        base.insert(key, value);
    }
    base
}

/// Copy of `value` with an `error` key holding `error`, replacing any
/// existing `error` entry.
pub fn with_error(value: &WorkValue, error: serde_json::Value) -> WorkValue {
    let mut merged = value.clone();
    merged.insert("error".to_string(), error);
    merged
}
