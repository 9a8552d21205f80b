//! Cancellation signal owned by a view.
//!
//! `Teardown::run` races a future against the signal. Once `cancel` has been
//! called, pending and future runs resolve to `None` and their output is
//! dropped, so a destroyed view never observes a late result.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct Teardown {
    signal: Arc<watch::Sender<bool>>,
}

impl Default for Teardown {
    fn default() -> Self {
        Self::new()
    }
}

impl Teardown {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }

    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        let mut cancelled = self.signal.subscribe();
        if *cancelled.borrow_and_update() {
            return None;
        }
        tokio::select! {
            biased;
            _ = cancelled.wait_for(|flag| *flag) => None,
            output = future => Some(output),
        }
    }
}
