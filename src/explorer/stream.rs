use crate::core::synthesize;
use crate::rpc::RpcClient;
use crate::storage::Ledger;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Granularity at which a sleeping stream notices a stop request.
const STOP_POLL_SLICE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Demo,
    Live,
}

/// An owned block-producing timer.
///
/// The producer thread runs until the stop flag is set; `stop` (and `Drop`)
/// joins the thread, so replacing a stream is always cancel-then-start and at
/// most one producer of a kind is alive per owner.
pub struct BlockStream {
    kind: StreamKind,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl BlockStream {
    /// Synthesize one block per tick, numbered after the ledger's latest.
    pub fn spawn_demo(ledger: Arc<Ledger>, interval: Duration) -> BlockStream {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = thread::spawn(move || {
            info!("Demo block stream started ({interval:?} per block)");
            while !sleep_until_stop(&flag, interval) {
                let next = ledger.latest_number() + 1;
                ledger.insert(synthesize(next));
            }
            info!("Demo block stream stopped");
        });
        BlockStream {
            kind: StreamKind::Demo,
            stop,
            handle: Some(handle),
        }
    }

    /// Poll the node each tick and ingest any block newer than the ledger's
    /// latest. Poll failures are logged and retried on the next tick.
    pub fn spawn_live(
        ledger: Arc<Ledger>,
        client: Arc<RpcClient>,
        interval: Duration,
    ) -> BlockStream {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = thread::spawn(move || {
            info!("Live block stream started ({interval:?} poll)");
            while !sleep_until_stop(&flag, interval) {
                match client.fetch_latest_number() {
                    Ok(latest) if latest > ledger.latest_number() => {
                        match client.fetch_block_by_number(latest) {
                            Ok(Some(block)) => ledger.insert(block),
                            Ok(None) => {}
                            Err(e) => warn!("Failed to fetch block {latest}: {e}"),
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Live stream poll failed: {e}"),
                }
            }
            info!("Live block stream stopped");
        });
        BlockStream {
            kind: StreamKind::Live,
            stop,
            handle: Some(handle),
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// Request the producer thread to stop and wait for it. Safe to call
    /// more than once.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Block stream thread panicked");
            }
        }
    }
}

impl Drop for BlockStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleep for `interval` in small slices; returns true once stop is requested.
fn sleep_until_stop(flag: &AtomicBool, interval: Duration) -> bool {
    let mut waited = Duration::ZERO;
    while waited < interval {
        if flag.load(Ordering::Relaxed) {
            return true;
        }
        let slice = STOP_POLL_SLICE.min(interval - waited);
        thread::sleep(slice);
        waited += slice;
    }
    flag.load(Ordering::Relaxed)
}
