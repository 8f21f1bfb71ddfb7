//! Commands: queued requests to mutate or act upon the processing network.
//!
//! A command is created by any thread, enqueued, executed exactly once on the
//! worker thread, and marked handled there. Completion is reported through an
//! optional [`CommandObserver`], or synchronously via [`Command::wait`].

use crate::network::algorithm::NetworkNode;
use crate::types::SharedDataset;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// The discriminated request a command carries.
#[derive(Debug, Clone)]
pub enum CommandKind {
    /// Load a dataset from a file via the registered readers. The produced
    /// dataset is stored on the command itself.
    ReadFile { path: PathBuf },
    /// Insert an algorithm into the node set (idempotent).
    AddAlgorithm { node: NetworkNode },
    /// Create a connection between two named connectors.
    Connect {
        from: NetworkNode,
        from_connector: String,
        to: NetworkNode,
        to_connector: String,
    },
    /// Re-execute the whole network.
    RunNetwork,
}

impl CommandKind {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::ReadFile { .. } => "ReadFile",
            CommandKind::AddAlgorithm { .. } => "AddAlgorithm",
            CommandKind::Connect { .. } => "Connect",
            CommandKind::RunNetwork => "RunNetwork",
        }
    }
}

/// How an executed command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    Failure(String),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }
}

/// Execution state of a command.
///
/// Transitions `Pending -> Handled` exactly once, on the worker thread.
/// Commands abandoned by a hard stop stay `Pending` forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandState {
    Pending,
    Handled(CommandOutcome),
}

/// Callback contract notified of a command's completion.
///
/// Exactly one of the two methods fires per executed command, on the worker
/// thread, after the command's effects are fully applied. Observers of
/// commands abandoned by a hard stop are never invoked.
pub trait CommandObserver: Send + Sync {
    fn on_success(&self, command: &Command);
    fn on_failure(&self, command: &Command, reason: &str);
}

/// A queued request against the processing network.
pub struct Command {
    kind: CommandKind,
    state: Mutex<CommandState>,
    handled: Condvar,
    observer: Option<Arc<dyn CommandObserver>>,
    /// Result slot for `ReadFile`.
    result: Mutex<Option<SharedDataset>>,
}

impl Command {
    pub fn new(kind: CommandKind, observer: Option<Arc<dyn CommandObserver>>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            state: Mutex::new(CommandState::Pending),
            handled: Condvar::new(),
            observer,
            result: Mutex::new(None),
        })
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn state(&self) -> CommandState {
        self.state.lock().unwrap().clone()
    }

    pub fn is_handled(&self) -> bool {
        matches!(*self.state.lock().unwrap(), CommandState::Handled(_))
    }

    /// The dataset produced by a successful `ReadFile`.
    pub fn result(&self) -> Option<SharedDataset> {
        self.result.lock().unwrap().clone()
    }

    pub(crate) fn set_result(&self, dataset: SharedDataset) {
        *self.result.lock().unwrap() = Some(dataset);
    }

    /// Mark the command handled and fire its observer. Worker thread only.
    pub(crate) fn mark_handled(&self, outcome: CommandOutcome) {
        {
            let mut state = self.state.lock().unwrap();
            if matches!(*state, CommandState::Handled(_)) {
                tracing::warn!("command {} handled twice, ignoring", self.kind.name());
                return;
            }
            *state = CommandState::Handled(outcome.clone());
        }
        self.handled.notify_all();

        if let Some(observer) = &self.observer {
            match &outcome {
                CommandOutcome::Success => observer.on_success(self),
                CommandOutcome::Failure(reason) => observer.on_failure(self, reason),
            }
        }
    }

    /// Block until the command has been handled.
    ///
    /// Never returns for commands abandoned by a hard stop; prefer
    /// [`Command::wait_timeout`] when that is a possibility.
    pub fn wait(&self) -> CommandOutcome {
        let mut state = self.state.lock().unwrap();
        loop {
            if let CommandState::Handled(outcome) = &*state {
                return outcome.clone();
            }
            state = self.handled.wait(state).unwrap();
        }
    }

    /// Block until the command has been handled or the timeout elapses.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<CommandOutcome> {
        let deadline = std::time::Instant::now() + timeout;
        let mut state = self.state.lock().unwrap();
        loop {
            if let CommandState::Handled(outcome) = &*state {
                return Some(outcome.clone());
            }
            let remaining = deadline.checked_duration_since(std::time::Instant::now())?;
            let (next, res) = self.handled.wait_timeout(state, remaining).unwrap();
            state = next;
            if res.timed_out() {
                if let CommandState::Handled(outcome) = &*state {
                    return Some(outcome.clone());
                }
                return None;
            }
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("kind", &self.kind.name())
            .field("state", &self.state())
            .finish()
    }
}

/// A [`CommandObserver`] that forwards outcomes over a crossbeam channel.
///
/// Handy for callers that want to await completion without writing their own
/// observer type.
pub struct ChannelObserver {
    tx: Sender<CommandOutcome>,
}

impl ChannelObserver {
    /// Build an observer and the receiving end of its channel.
    pub fn new() -> (Arc<Self>, Receiver<CommandOutcome>) {
        let (tx, rx) = unbounded();
        (Arc::new(Self { tx }), rx)
    }
}

impl CommandObserver for ChannelObserver {
    fn on_success(&self, _command: &Command) {
        let _ = self.tx.send(CommandOutcome::Success);
    }

    fn on_failure(&self, _command: &Command, reason: &str) {
        let _ = self.tx.send(CommandOutcome::Failure(reason.to_string()));
    }
}
