// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod executor;
pub mod operation;

pub use executor::WorkExecutor;
pub use operation::{operation_fn, FnOperation, Operation};
