//! # Example: basic_notify
//!
//! Demonstrates the core registration/broadcast loop.
//!
//! Shows how to:
//! - Attach closure listeners with [`Listener::handler`].
//! - Broadcast with positional arguments via [`Mediator::notify`].
//! - Stop a chain early by returning exactly `Bool(false)`.
//!
//! ## Flow
//! ```text
//! push("payment.settled", validator)   queue: [validator]
//! push("payment.settled", ledger)      queue: [validator, ledger]
//! push("payment.settled", mailer)      queue: [validator, ledger, mailer]
//!
//! notify("payment.settled", [amount])
//!     ├─► validator  (returns false for amount <= 0 → chain stops)
//!     ├─► ledger
//!     └─► mailer
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_notify
//! ```

use eventvisor::{Listener, Mediator};
use serde_json::{json, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mediator = Mediator::new();

    mediator.push(
        "payment.settled",
        Listener::handler(|args| {
            let amount = args.first().and_then(Value::as_i64).unwrap_or(0);
            if amount <= 0 {
                println!("[validator] rejecting amount={amount}");
                return Ok(Value::Bool(false)); // strict false stops the chain
            }
            println!("[validator] ok amount={amount}");
            Ok(Value::Null)
        }),
    )?;

    mediator.push(
        "payment.settled",
        Listener::handler(|args| {
            println!("[ledger] recording {args:?}");
            Ok(Value::Null)
        }),
    )?;

    mediator.push(
        "payment.settled",
        Listener::handler(|_args| {
            println!("[mailer] sending receipt");
            Ok(Value::Null)
        }),
    )?;

    let invoked = mediator.notify("payment.settled", &[json!(1250)])?;
    println!("valid payment: {invoked} listener(s) invoked");

    let invoked = mediator.notify("payment.settled", &[json!(-3)])?;
    println!("invalid payment: {invoked} listener(s) invoked");

    println!(
        "broadcasts={} invocations={}",
        mediator.count_notifications("payment.settled"),
        mediator.count_invocations("payment.settled"),
    );
    Ok(())
}
