//! The ordered command queue and its worker thread.
//!
//! Commands are appended from any thread and executed strictly in arrival
//! order on a single dedicated worker thread. Failures inside a command are
//! caught at the per-command boundary; the worker never dies because of a
//! bad command.

use crate::error::Result;
use crate::network::command::{Command, CommandOutcome};
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, Weak};
use std::thread::JoinHandle;

/// The hook a queue owner implements to interpret commands.
pub trait CommandProcessor: Send + Sync + 'static {
    /// Execute one command. Runs on the worker thread. An `Err` marks the
    /// command failed; the queue keeps running either way.
    fn process(&self, command: &Arc<Command>) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopMode {
    /// Drain all enqueued commands, then exit.
    Graceful,
    /// Exit as soon as the worker notices; remaining commands are abandoned
    /// unhandled and their observers never fire.
    Immediate,
}

#[derive(Default)]
struct QueueState {
    commands: VecDeque<Arc<Command>>,
    stop: Option<StopMode>,
}

struct Shared {
    state: Mutex<QueueState>,
    wakeup: Condvar,
}

/// FIFO command queue with a dedicated worker thread.
pub struct CommandQueue {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState::default()),
                wakeup: Condvar::new(),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Append a command to the tail of the queue and wake the worker.
    ///
    /// Thread-safe. A command committed after a stop was requested is
    /// accepted but will not execute until the queue is started again; its
    /// observer must not be relied upon to fire.
    pub fn commit(&self, command: Arc<Command>) -> Arc<Command> {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.commands.push_back(command.clone());
        }
        self.shared.wakeup.notify_one();
        command
    }

    /// Number of commands waiting to be executed.
    pub fn pending(&self) -> usize {
        self.shared.state.lock().unwrap().commands.len()
    }

    /// True if the worker thread is running.
    pub fn is_running(&self) -> bool {
        self.worker.lock().unwrap().is_some()
    }

    /// Spawn the worker thread. Starting an already-running queue is a no-op.
    ///
    /// The worker holds only a weak reference to the processor so a queue
    /// embedded in its own processor does not keep it alive forever; the
    /// worker exits when the processor is dropped.
    pub fn start<P: CommandProcessor>(&self, processor: &Arc<P>) {
        let mut worker = self.worker.lock().unwrap();
        if worker.is_some() {
            return;
        }

        // A fresh start clears any previous stop request.
        self.shared.state.lock().unwrap().stop = None;

        let processor = Arc::downgrade(processor);
        let processor: Weak<dyn CommandProcessor> = processor;
        let shared = self.shared.clone();
        let handle = std::thread::Builder::new()
            .name("flowvis-worker".to_string())
            .spawn(move || worker_loop(shared, processor))
            .expect("failed to spawn worker thread");
        *worker = Some(handle);
        tracing::info!("command queue started");
    }

    /// Stop the worker thread and block until it has exited.
    ///
    /// With `graceful == true` all currently enqueued commands are drained
    /// first. With `graceful == false` the worker exits as soon as it notices
    /// the request and the remaining commands are abandoned: they are never
    /// marked handled and their observers never fire.
    ///
    /// Returns immediately when no worker is running. Must not be called
    /// from the worker thread itself.
    pub fn stop(&self, graceful: bool) {
        let handle = {
            let mut worker = self.worker.lock().unwrap();
            match worker.take() {
                Some(handle) => handle,
                None => return,
            }
        };

        {
            let mut state = self.shared.state.lock().unwrap();
            state.stop = Some(if graceful {
                StopMode::Graceful
            } else {
                StopMode::Immediate
            });
        }
        self.shared.wakeup.notify_all();

        if handle.join().is_err() {
            tracing::error!("worker thread panicked outside a command boundary");
        }
        tracing::info!(graceful, "command queue stopped");
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CommandQueue {
    fn drop(&mut self) {
        // A queue dropped while running drains its remaining work.
        self.stop(true);
    }
}

fn worker_loop(shared: Arc<Shared>, processor: Weak<dyn CommandProcessor>) {
    tracing::debug!("worker thread running");
    loop {
        let command = {
            let mut state = shared.state.lock().unwrap();
            loop {
                if state.stop == Some(StopMode::Immediate) {
                    // Abandon everything still queued.
                    state.commands.clear();
                    tracing::debug!("worker thread exiting (immediate stop)");
                    return;
                }
                if let Some(command) = state.commands.pop_front() {
                    break command;
                }
                if state.stop == Some(StopMode::Graceful) {
                    tracing::debug!("worker thread exiting (queue drained)");
                    return;
                }
                state = shared.wakeup.wait(state).unwrap();
            }
        };

        let Some(processor) = processor.upgrade() else {
            tracing::debug!("worker thread exiting (processor dropped)");
            return;
        };
        execute(&processor, &command);
    }
}

/// Execute a single command, catching both `Err` returns and panics so a
/// failing command cannot take down the worker thread.
fn execute(processor: &Arc<dyn CommandProcessor>, command: &Arc<Command>) {
    tracing::trace!(kind = command.kind().name(), "executing command");

    let outcome = match catch_unwind(AssertUnwindSafe(|| processor.process(command))) {
        Ok(Ok(())) => CommandOutcome::Success,
        Ok(Err(err)) => CommandOutcome::Failure(err.to_string()),
        Err(panic) => CommandOutcome::Failure(panic_message(panic)),
    };

    if let CommandOutcome::Failure(reason) = &outcome {
        tracing::warn!(kind = command.kind().name(), reason, "command failed");
    }
    command.mark_handled(outcome);
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("panic: {msg}")
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("panic: {msg}")
    } else {
        "panic: unknown cause".to_string()
    }
}
