// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod builder;
pub mod executor;
mod record;
pub mod submission;
#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::ExecutorBuilder;
pub use executor::Executor;
pub use submission::Submission;
