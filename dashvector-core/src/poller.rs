//! "Create and wait until serving".
//!
//! ```text
//! Creating --code 0--> Polling --serving--> Serving
//!    |                    |
//!    +--error/code!=0     +--describe error--> Errored
//!       (returned as-is)  +--max_wait elapsed--> Errored (Timeout)
//! ```
//!
//! Only the describe step is retried. With the default poller there is no
//! upper bound on how long `Polling` lasts.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::codec::NoOutput;
use crate::error::{Error, Result};
use crate::response::{Ack, Response};

/// Fixed sleep between describe calls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// States of a create-and-wait call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Creating,
    Polling,
    Serving,
    Errored,
}

/// Outcome of a create-and-wait call that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness<T> {
    /// The create call returned a non-zero code; no polling happened.
    Rejected(Ack),
    /// The describe response that first reported the resource as serving.
    Serving(Response<T>),
}

impl<T> Readiness<T> {
    pub fn code(&self) -> i32 {
        match self {
            Readiness::Rejected(ack) => ack.code,
            Readiness::Serving(resp) => resp.code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Readiness::Rejected(ack) => &ack.message,
            Readiness::Serving(resp) => &resp.message,
        }
    }

    pub fn request_id(&self) -> &str {
        match self {
            Readiness::Rejected(ack) => &ack.request_id,
            Readiness::Serving(resp) => &resp.request_id,
        }
    }

    pub fn is_serving(&self) -> bool {
        matches!(self, Readiness::Serving(_))
    }

    /// Envelope of whichever response ended the call.
    pub fn ack(&self) -> Ack {
        match self {
            Readiness::Rejected(ack) => ack.clone(),
            Readiness::Serving(resp) => resp.ack(),
        }
    }
}

/// Polls a describe call until the resource reports serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPoller {
    interval: Duration,
    max_wait: Option<Duration>,
}

impl Default for ReadinessPoller {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
        }
    }
}

impl ReadinessPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Gives up with [`Error::Timeout`] once `max_wait` has elapsed in
    /// `Polling`. Unset by default.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }

    /// Runs `create` once, then `describe` every interval until
    /// `is_serving` accepts a describe response.
    ///
    /// A describe response with a non-zero code keeps the poll going; a
    /// describe error ends it.
    pub fn run<T, C, D, S>(&self, create: C, mut describe: D, is_serving: S) -> Result<Readiness<T>>
    where
        C: FnOnce() -> Result<Response<NoOutput>>,
        D: FnMut() -> Result<Response<T>>,
        S: Fn(&Response<T>) -> bool,
    {
        let mut state = PollState::Creating;
        let created = create()?;
        if !created.is_success() {
            debug!(code = created.code, message = %created.message, "create rejected");
            return Ok(Readiness::Rejected(created));
        }

        transition(&mut state, PollState::Polling);
        let started = Instant::now();
        let mut attempts = 0u32;
        loop {
            thread::sleep(self.interval);
            attempts += 1;

            match describe() {
                Err(err) => {
                    transition(&mut state, PollState::Errored);
                    return Err(err);
                }
                Ok(resp) if is_serving(&resp) => {
                    transition(&mut state, PollState::Serving);
                    debug!(attempts, elapsed = ?started.elapsed(), "resource serving");
                    return Ok(Readiness::Serving(resp));
                }
                Ok(_) => {}
            }

            if let Some(max_wait) = self.max_wait {
                let waited = started.elapsed();
                if waited >= max_wait {
                    transition(&mut state, PollState::Errored);
                    warn!(attempts, ?waited, "gave up waiting for serving status");
                    return Err(Error::Timeout { waited });
                }
            }
        }
    }
}

fn transition(state: &mut PollState, next: PollState) {
    debug!(from = ?*state, to = ?next, "readiness poll");
    *state = next;
}
