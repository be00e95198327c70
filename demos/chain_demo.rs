// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use the_workchain::config::{consts::DEBUG_LOG_FILTER, load_and_validate_config};
use the_workchain::engine::{Executor, ExecutorBuilder};
use the_workchain::errors::WorkError;
use the_workchain::observability::init_tracing;
use the_workchain::traits::{operation_fn, WorkExecutor};
use the_workchain::work::{Outcome, Work, WorkValue};

/// Demo showing an order chain: validate -> charge (flaky) -> ship,
/// with an audit task fanned out after validation and a fallback handler
/// rescuing a charge that keeps failing.
///
/// Usage: `cargo run --example chain_demo [demos/executor.yaml]`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(DEBUG_LOG_FILTER);

    let executor = match env::args().nth(1) {
        Some(path) => ExecutorBuilder::from_config(&load_and_validate_config(&path)?).build(),
        None => Executor::builder().debug(true).retry(2).build(),
    };

    println!("=== Work Chain Demo ({}) ===\n", executor.module());

    let charge_calls = Arc::new(AtomicU32::new(0));
    let calls = charge_calls.clone();

    let validate = Work::new(
        "validate",
        operation_fn(|input: WorkValue| async move {
            if input.get("order").is_none() {
                return Err(WorkError::no_retry(anyhow::anyhow!("missing order")));
            }
            Ok(Outcome::Continue(input))
        }),
    );

    let audit = Work::new(
        "audit",
        operation_fn(|input: WorkValue| async move {
            println!("  [audit] saw {}", serde_json::Value::Object(input));
            Ok(Outcome::empty())
        }),
    )
    .with_value([("source", "demo")]);

    let charge = Work::new(
        "charge",
        operation_fn(move |input: WorkValue| {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if attempt < 3 {
                    return Err(WorkError::msg(format!("gateway timeout on attempt {attempt}")));
                }
                let mut value = input;
                value.insert("charged".to_string(), true.into());
                Ok(Outcome::Continue(value))
            }
        }),
    )
    .with_retry(3)
    .with_initial_delay(Duration::from_millis(50))
    .on_error(Work::new(
        "charge-fallback",
        operation_fn(|mut input: WorkValue| async move {
            input.insert("charged".to_string(), false.into());
            Ok(Outcome::Continue(input))
        }),
    ));

    let ship = Work::new(
        "ship",
        operation_fn(|input: WorkValue| async move {
            let mut value = input;
            value.insert("shipped".to_string(), true.into());
            Ok(Outcome::Continue(value))
        }),
    );

    let chain = Executor::link_sequence(vec![
        validate.with_value([("order", 1001)]).with_task(audit),
        charge,
        ship,
    ])
    .ok_or("empty chain")?;

    println!("Chain: {}", chain.chain_names().join(" -> "));

    let result = executor.submit(chain.into()).await?;
    executor.wait_for_tasks().await;

    match result {
        Some(value) => println!("\nFinal value: {}", serde_json::Value::Object(value)),
        None => println!("\nChain failed without a handler"),
    }
    println!("Charge attempts: {}", charge_calls.load(Ordering::SeqCst));

    Ok(())
}
