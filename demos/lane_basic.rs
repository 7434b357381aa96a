//! # Example: lane_basic
//!
//! Instruments a ticking stream and prints every lane report.
//!
//! Shows how to:
//! - Fan lane events out to async subscribers with [`SubscriberSet`].
//! - Build a reusable [`Lane`] from [`Config`] and attach it twice.
//! - Cancel one subscription through its [`LaneHandle`] while the other completes.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► SubscriberSet[LogWriter]
//!   ├─► lane.attach(ticks) ──► Begin
//!   │     ├─► Value("0") Value("1") Value("2")
//!   │     └─► End(completed) + Completion
//!   └─► lane.attach(pending) ──► Begin
//!         └─► handle.cancel() ──► End(cancelled) + Cancelled
//! ```
//!
//! ## Run
//! ```bash
//! TIMELANE_FILTER=subscription,event cargo run --example lane_basic --features logging
//! ```

use std::{sync::Arc, time::Duration};

use futures::{stream, StreamExt};
use timelane::{here, Config, Lane, LogWriter, Subscribe, SubscriberSet};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Configure lanes (env overrides defaults)
    let cfg = Config::from_env()?;

    // 2. Subscribers
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let set = Arc::new(SubscriberSet::new(subs));

    // 3. One lane, two subscriptions
    let lane = Lane::<u64>::builder("ticks")
        .with_config(&cfg)
        .source(here!())
        .logger(set.clone())
        .formatter(|n| format!("tick #{n}"))
        .build();

    let ticks = stream::iter(0..3u64).then(|n| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        n
    });
    let seen: Vec<u64> = lane.attach(ticks).collect().await;
    println!("consumer saw {seen:?}");

    let mut idle = lane.attach(stream::pending::<u64>());
    let handle = idle.handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });
    assert_eq!(idle.next().await, None);

    // 4. Drain subscriber queues
    set.shutdown().await;
    Ok(())
}
