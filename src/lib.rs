// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Async work chains: run a unit of work, retry it, route its failures,
//! fan out side tasks and continue down a linked chain, with one correlation
//! id shared by everything a submission touches.

pub mod config;        // executor config files + validation
pub mod engine;        // the executor
pub mod errors;        // error handling
pub mod identity;      // correlation ids
pub mod observability;
pub mod traits;        // operation + executor abstractions
pub mod utils;         // value merging
pub mod work;          // work items, outcomes, chain linking
