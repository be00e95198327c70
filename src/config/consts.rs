// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Retry budget used when neither the work item nor the config sets one
pub const DEFAULT_RETRY: u32 = 0;
/// Label prefixed to every diagnostic line
pub const DEFAULT_MODULE: &str = "[Executor]";
/// Filter for `init_tracing` when `RUST_LOG` is unset and debug output is
/// wanted: executor lifecycle lines are emitted at debug level
pub const DEBUG_LOG_FILTER: &str = "info,the_workchain=debug";
