//! Upstream doubles shared by the cache tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{FetchError, Result};
use crate::upstream::Upstream;

/// Returns `vec![n]` on the n-th call, or a configured error.
#[derive(Debug, Default)]
pub struct ScriptedUpstream {
    calls: AtomicUsize,
    failure: Mutex<Option<FetchError>>,
}

impl ScriptedUpstream {
    pub fn counting() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes every following call fail with `err`.
    pub fn fail_with(&self, err: FetchError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    type Item = u32;

    async fn fetch(&self) -> Result<Vec<u32>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let failure = self.failure.lock().unwrap().clone();
        match failure {
            Some(err) => Err(err),
            None => Ok(vec![n as u32]),
        }
    }
}

/// Never answers within any reasonable timeout.
#[derive(Debug, Default)]
pub struct HangingUpstream;

#[async_trait]
impl Upstream for HangingUpstream {
    type Item = u32;

    async fn fetch(&self) -> Result<Vec<u32>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }
}

/// Returns `vec![n]` on the n-th call; one chosen call blocks until released.
#[derive(Debug)]
pub struct GatedUpstream {
    calls: AtomicUsize,
    held_call: usize,
    held: Notify,
    released: Notify,
}

impl GatedUpstream {
    pub fn holding_call(held_call: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            held_call,
            held: Notify::new(),
            released: Notify::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Waits until the held call has entered `fetch`.
    pub async fn wait_until_held(&self) {
        self.held.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[async_trait]
impl Upstream for GatedUpstream {
    type Item = u32;

    async fn fetch(&self) -> Result<Vec<u32>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.held_call {
            self.held.notify_one();
            self.released.notified().await;
        }
        Ok(vec![n as u32])
    }
}
