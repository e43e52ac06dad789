//! Request coalescing
//!
//! At most one fetch runs at a time; callers arriving while it is in flight
//! await the same future and receive the same result.
//!
//! Each flight is stamped with the epoch current when it started. A writer
//! calls [`SingleFlight::invalidate`] once its change has reached the
//! backend; flights stamped earlier may have read the old state, so callers
//! that need the write wait them out and start a new one instead of joining.

use crate::error::Result;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

type InFlight<T> = Shared<BoxFuture<'static, Result<Arc<T>>>>;

struct Slot<T> {
    epoch: u64,
    in_flight: Option<(u64, InFlight<T>)>,
}

/// Coalesces concurrent calls onto one in-flight operation
pub struct SingleFlight<T> {
    name: &'static str,
    slot: Mutex<Slot<T>>,
}

impl<T: Send + Sync + 'static> SingleFlight<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Mutex::new(Slot {
                epoch: 0,
                in_flight: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    /// Mark everything started so far as stale; returns the new epoch.
    pub fn invalidate(&self) -> u64 {
        let mut slot = self.lock();
        slot.epoch += 1;
        slot.epoch
    }

    /// Join the in-flight operation, or start one with `start`.
    ///
    /// `start` is only called when nothing is in flight. The slot is cleared
    /// once the operation completes, so the next call starts afresh.
    pub async fn run<F, Fut>(&self, start: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<T>>> + Send + 'static,
    {
        let epoch = self.epoch();
        self.run_since(epoch, start).await
    }

    /// Like [`run`](Self::run), but only joins a flight started at or after
    /// `epoch`. An older flight is awaited first and its result discarded.
    pub async fn run_since<F, Fut>(&self, epoch: u64, start: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<T>>> + Send + 'static,
    {
        let flight = loop {
            let stale = {
                let mut slot = self.lock();
                let current = slot
                    .in_flight
                    .as_ref()
                    .map(|(started, flight)| (*started >= epoch, flight.clone()));

                match current {
                    Some((true, flight)) => {
                        debug!(flight = self.name, "Joining in-flight request");
                        break flight;
                    }
                    Some((false, stale)) => stale,
                    None => {
                        let started = slot.epoch;
                        let flight = start().boxed().shared();
                        slot.in_flight = Some((started, flight.clone()));
                        break flight;
                    }
                }
            };

            debug!(flight = self.name, "Waiting out a request that predates the last write");
            let _ = stale.clone().await;
            self.clear(&stale);
        };

        let result = flight.clone().await;
        self.clear(&flight);
        result
    }

    fn clear(&self, flight: &InFlight<T>) {
        let mut slot = self.lock();
        if slot
            .in_flight
            .as_ref()
            .is_some_and(|(_, current)| current.ptr_eq(flight))
        {
            slot.in_flight = None;
        }
    }

    /// Whether an operation is currently in flight
    pub fn in_flight(&self) -> bool {
        self.lock().in_flight.is_some()
    }
}
