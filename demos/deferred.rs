//! # Example: deferred
//!
//! Demonstrates deferred listeners and delta observation.
//!
//! Shows how to:
//! - Register identifier strings that are materialized per broadcast through
//!   a [`Catalog`] provider.
//! - Attach the built-in [`DeltaLog`] listener to [`DELTA_EVENT`] so every
//!   queue mutation is logged.
//!
//! ## Flow
//! ```text
//! Catalog: "audit.writer" → factory ──► fresh listener per broadcast
//!
//! push(DELTA_EVENT, DeltaLog)          every mutation is logged from here on
//! push("user.login", "audit.writer")   logged: [delta] event=user.login op=push
//! notify("user.login", [name])
//!     └─► Catalog.resolve("audit.writer") ──► invoke
//! ```
//!
//! ## Run
//! Requires the `logging` feature to export [`DeltaLog`].
//! ```bash
//! RUST_LOG=info cargo run --example deferred --features logging
//! ```

use std::sync::Arc;

use eventvisor::{Catalog, Config, DeltaLog, InvokeFn, Listener, Mediator, DELTA_EVENT};
use serde_json::{json, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let catalog = Catalog::new().with("audit.writer", || {
        Ok(InvokeFn::arc(|args| {
            println!("[audit] {args:?}");
            Ok(Value::Null)
        }))
    });

    let mediator = Mediator::builder(Config::default())
        .with_instantiator(Arc::new(catalog))
        .build();

    // Observe every queue mutation from here on.
    mediator.push(DELTA_EVENT, Listener::Handler(Arc::new(DeltaLog)))?;

    // Bulk registration from a JSON mapping: identifiers only.
    mediator.push_all_json(&json!({
        "user.login": "audit.writer",
        "user.logout": ["audit.writer"],
    }))?;

    mediator.notify("user.login", &[json!("ada")])?;
    mediator.notify("user.logout", &[json!("ada")])?;

    // Drain one queue; the delta log shows shift/clear as they happen.
    mediator.shift("user.login");
    mediator.clear("user.logout");

    println!(
        "last delta: {:?}",
        mediator.last_queue_delta().map(|d| (d.event().to_string(), d.op))
    );
    Ok(())
}
