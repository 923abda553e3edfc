use std::collections::{HashMap, VecDeque};
use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::Error;

/// Replaces the HTTP transport in tests. Receives the endpoint path without leading slash.
#[async_trait]
pub trait MockTransport: 'static + Send + Sync + Debug {
    async fn get(&self, _path: &str) -> Result<String, Error> {
        unimplemented!()
    }
}

/// Outcome of one scripted attempt
pub enum Step {
    Body(String),
    Status(u16),
    Error(Box<dyn Fn() -> Error + Send + Sync>),
    CancelThenBody(CancellationToken, String),
}

impl Step {
    pub fn body(body: &str) -> Self {
        Self::Body(body.to_string())
    }

    pub fn status(status: u16) -> Self {
        Self::Status(status)
    }

    pub fn error(f: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        Self::Error(Box::new(f))
    }

    /// Cancels the token while the attempt is in flight, then completes it
    pub fn cancel_then_body(cancellation: CancellationToken, body: &str) -> Self {
        Self::CancelThenBody(cancellation, body.to_string())
    }

    fn run(self) -> Result<String, Error> {
        match self {
            Self::Body(body) => Ok(body),
            Self::Status(status) => Err(Error::Status {
                status,
                body: String::new(),
            }),
            Self::Error(f) => Err(f()),
            Self::CancelThenBody(cancellation, body) => {
                cancellation.cancel();
                Ok(body)
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Call {
    pub path: String,
    pub at: Instant,
}

#[derive(Default)]
struct Script {
    steps: HashMap<String, VecDeque<Step>>,
    calls: Vec<Call>,
}

/// Transport answering each path with its queued steps, in order, and recording every call.
/// A path without remaining steps answers with a 404 status.
#[derive(Clone, Default)]
pub struct ScriptedTransport(Arc<Mutex<Script>>);

impl Debug for ScriptedTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedTransport").field("calls", &self.script().calls).finish()
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &str, step: Step) -> Self {
        self.script()
            .steps
            .entry(path.trim_start_matches('/').to_string())
            .or_default()
            .push_back(step);

        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MockTransport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<String, Error> {
        let step = {
            let mut script = self.script();
            script.calls.push(Call {
                path: path.to_string(),
                at: Instant::now(),
            });

            script.steps.get_mut(path).and_then(|x| x.pop_front())
        };

        match step {
            Some(step) => step.run(),
            None => Err(Error::Status {
                status: 404,
                body: format!("no scripted response for {}", path),
            }),
        }
    }
}
