//! # Example: basic
//!
//! Demonstrates both dispatchers side by side.
//!
//! Shows how to:
//! - Implement the [`Observe`] trait and adapt closures with [`ObserverFn`].
//! - Deliver in order with [`SyncDispatcher`].
//! - Fan out concurrently with [`ParallelDispatcher`] and wait through a channel.
//! - Remove an observer from inside its own `on_event`.
//!
//! ## Flow
//! ```text
//! SyncDispatcher::emit(Deploy)
//!     └─► log ─► audit ─► once (removes itself)
//!
//! ParallelDispatcher::emit(Deploy)
//!     ├─► task: log.on_event()
//!     └─► task: notify.on_event() ──► mpsc ──► main waits
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example basic --features logging
//! ```

use std::sync::{Arc, Weak};
use std::time::Duration;

use fanout::{
    Dispatch, LogObserver, Observe, ObserverFn, ObserverRef, ParallelDispatcher, SyncDispatcher,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Deploy {
    service: &'static str,
    version: u32,
}

/// Reacts to the first deploy only, then unregisters itself.
struct Once {
    dispatcher: Weak<SyncDispatcher<Deploy>>,
    me: Weak<Once>,
}

impl Observe<Deploy> for Once {
    fn on_event(&self, ev: &Deploy) {
        println!("[once] first deploy seen: {} v{}", ev.service, ev.version);
        if let (Some(d), Some(me)) = (self.dispatcher.upgrade(), self.me.upgrade()) {
            let me: ObserverRef<Deploy> = me;
            d.remove(&me);
        }
    }

    fn name(&self) -> &'static str {
        "once"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // ---- synchronous ----
    let sync: Arc<SyncDispatcher<Deploy>> = Arc::new(SyncDispatcher::new());
    sync.add(Arc::new(LogObserver::default()));
    sync.add(ObserverFn::arc("audit", |ev: &Deploy| {
        println!("[audit] {} -> v{}", ev.service, ev.version);
    }));
    let once = Arc::new_cyclic(|me| Once {
        dispatcher: Arc::downgrade(&sync),
        me: me.clone(),
    });
    sync.add(once);

    sync.emit(Deploy { service: "api", version: 1 });
    sync.emit_ref(&Deploy { service: "api", version: 2 });
    println!("[sync] observers left: {}", sync.len());

    // ---- parallel ----
    let parallel: ParallelDispatcher<Deploy> = ParallelDispatcher::new()?;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    parallel.add(Arc::new(LogObserver::named("parallel-log")));
    parallel.add(ObserverFn::arc("notify", move |ev: &Deploy| {
        let _ = tx.send(format!("{} v{}", ev.service, ev.version));
    }));

    parallel.emit(Deploy { service: "worker", version: 7 });
    match tokio::time::timeout(Duration::from_secs(1), rx.recv()).await {
        Ok(Some(msg)) => println!("[parallel] notified: {msg}"),
        _ => println!("[parallel] no notification"),
    }

    Ok(())
}
