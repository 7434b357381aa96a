//! # Example: lane_race
//!
//! Races completion against cancellation many times and checks that every
//! subscription reports exactly one end.
//!
//! ## Run
//! ```bash
//! cargo run --example lane_race
//! ```

use std::sync::{Arc, Barrier};
use std::thread;

use futures::{executor::block_on, stream, StreamExt};
use timelane::{EventKind, Lane, Recorder, SubscriptionState};

fn main() -> anyhow::Result<()> {
    let rec = Arc::new(Recorder::new());
    let lane = Lane::<u32>::builder("race").logger(rec.clone()).build();

    let (mut completed, mut cancelled) = (0usize, 0usize);
    for _ in 0..1_000 {
        let mut s = lane.attach(stream::iter([1u32]));
        let handle = s.handle();
        let id = s.subscription_id();
        let barrier = Arc::new(Barrier::new(2));

        let b = Arc::clone(&barrier);
        let consumer = thread::spawn(move || {
            b.wait();
            while block_on(s.next()).is_some() {}
        });
        barrier.wait();
        handle.cancel();
        consumer
            .join()
            .map_err(|_| anyhow::anyhow!("consumer thread panicked"))?;

        let ends: Vec<_> = rec
            .events()
            .into_iter()
            .filter(|e| e.subscription == id && e.kind == EventKind::End)
            .collect();
        anyhow::ensure!(ends.len() == 1, "subscription {id}: {} ends", ends.len());
        match ends[0].state {
            Some(SubscriptionState::Completed) => completed += 1,
            Some(SubscriptionState::Cancelled) => cancelled += 1,
            ref other => anyhow::bail!("unexpected end state {other:?}"),
        }
    }

    println!("1000 subscriptions: {completed} completed, {cancelled} cancelled, 0 double ends");
    Ok(())
}
