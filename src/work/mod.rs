// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Work items and the values that flow between them.

pub mod chain;
mod item;
mod outcome;
mod retry;

pub use chain::{append, link, link_sequence};
pub use item::Work;
pub use outcome::Outcome;
pub use retry::RetryDelay;

/// The payload threaded along a chain: a mapping from string keys to
/// arbitrary JSON values.
pub type WorkValue = serde_json::Map<String, serde_json::Value>;
