//! The processing network: a command queue specialization that owns the
//! node and edge sets.
//!
//! All graph mutation happens on the worker thread through commands. Other
//! threads interact through the convenience enqueuers or through the
//! snapshot-based visit operations, which copy the node list under a short
//! lock and run the visitor unlocked.

use crate::error::{FlowVisError, Result};
use crate::io::{ObjReader, Reader};
use crate::network::algorithm::{Algorithm, NetworkNode};
use crate::network::command::{Command, CommandKind, CommandObserver};
use crate::network::connection::Connection;
use crate::network::handle::NetworkHandle;
use crate::network::queue::{CommandProcessor, CommandQueue};
use crate::network::visualization::Visualization;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Container controlling a data-flow network.
///
/// The network runs its own worker thread and propagates updates and newly
/// loaded data through the graph without blocking callers. All operations on
/// the network go through commands.
pub struct ProcessingNetwork {
    queue: CommandQueue,
    /// All known readers.
    readers: Mutex<Vec<Arc<dyn Reader>>>,
    /// The node set. Locked briefly for mutation (worker thread) and for
    /// snapshot copies (any thread).
    algorithms: Mutex<Vec<NetworkNode>>,
    /// The edge set of the multigraph. Worker thread only.
    connections: Mutex<Vec<Connection>>,
}

impl ProcessingNetwork {
    /// Create an empty network with the built-in readers registered.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            queue: CommandQueue::new(),
            readers: Mutex::new(vec![Arc::new(ObjReader::new()) as Arc<dyn Reader>]),
            algorithms: Mutex::new(Vec::new()),
            connections: Mutex::new(Vec::new()),
        })
    }

    /// Start the worker thread. Does nothing if it is already running.
    pub fn start(self: &Arc<Self>) {
        self.queue.start(self);
    }

    /// Stop the worker thread; see [`CommandQueue::stop`] for the
    /// graceful/immediate contract. Call from outside the worker thread only.
    pub fn stop(&self, graceful: bool) {
        self.queue.stop(graceful);
    }

    /// True if the worker thread is running.
    pub fn is_running(&self) -> bool {
        self.queue.is_running()
    }

    /// A weak handle suitable for handing to UI/strategy components.
    pub fn handle(self: &Arc<Self>) -> NetworkHandle {
        NetworkHandle::new(self)
    }

    /// Register an additional file reader.
    pub fn register_reader(&self, reader: Arc<dyn Reader>) {
        self.readers.lock().unwrap().push(reader);
    }

    // ── Convenience enqueuers. Each wraps command creation; callable from
    // any thread. The command itself reports success or failure through the
    // observer; these functions do not fail. ──

    /// Load the specified file on the worker thread. The produced dataset is
    /// stored on the returned command.
    pub fn load_file(
        &self,
        path: impl Into<PathBuf>,
        observer: Option<Arc<dyn CommandObserver>>,
    ) -> Arc<Command> {
        self.commit(Command::new(
            CommandKind::ReadFile { path: path.into() },
            observer,
        ))
    }

    /// Add an algorithm node to the network.
    pub fn add_algorithm(
        &self,
        node: NetworkNode,
        observer: Option<Arc<dyn CommandObserver>>,
    ) -> Arc<Command> {
        self.commit(Command::new(CommandKind::AddAlgorithm { node }, observer))
    }

    /// Connect two algorithm connectors by name.
    ///
    /// The command fails (not this function) if a name cannot be resolved or
    /// the types are incompatible. This is deliberate: the referenced nodes
    /// may still be mid-flight in the queue.
    pub fn connect(
        &self,
        from: &NetworkNode,
        from_connector: impl Into<String>,
        to: &NetworkNode,
        to_connector: impl Into<String>,
        observer: Option<Arc<dyn CommandObserver>>,
    ) -> Arc<Command> {
        self.commit(Command::new(
            CommandKind::Connect {
                from: from.clone(),
                from_connector: from_connector.into(),
                to: to.clone(),
                to_connector: to_connector.into(),
            },
            observer,
        ))
    }

    /// Re-run the whole network. Nodes execute in insertion order; there is
    /// no dependency-aware scheduling.
    pub fn run_network(&self, observer: Option<Arc<dyn CommandObserver>>) -> Arc<Command> {
        self.commit(Command::new(CommandKind::RunNetwork, observer))
    }

    /// Enqueue an already-built command.
    pub fn commit(&self, command: Arc<Command>) -> Arc<Command> {
        self.queue.commit(command)
    }

    // ── Snapshot reads ──

    /// Visit every algorithm node in the network.
    ///
    /// The node list is locked, copied and unlocked before the visitor runs,
    /// so a long-running visitor never blocks the worker thread. The visitor
    /// sees either the complete pre-command or complete post-command node
    /// set of any concurrent mutation, never a partial one.
    pub fn visit_algorithms(&self, mut visitor: impl FnMut(&NetworkNode)) {
        let snapshot: Vec<NetworkNode> = self.algorithms.lock().unwrap().clone();
        for node in &snapshot {
            visitor(node);
        }
    }

    /// Visit every node that carries the rendering capability.
    pub fn visit_visualizations(&self, mut visitor: impl FnMut(&Arc<dyn Visualization>)) {
        self.visit_algorithms(|node| {
            if let Some(vis) = node.visualization() {
                visitor(vis);
            }
        });
    }

    /// Number of nodes currently in the network.
    pub fn node_count(&self) -> usize {
        self.algorithms.lock().unwrap().len()
    }

    /// Number of edges currently in the network.
    pub fn edge_count(&self) -> usize {
        self.connections.lock().unwrap().len()
    }

    // ── Graph mutation primitives. Not independently thread-safe: called
    // only from `process()` on the worker thread. ──

    /// Insert a node. Re-adding an already-present instance is a silent
    /// no-op. After committing a node it belongs to this network; do not add
    /// it to another one.
    fn add_network_node(&self, node: NetworkNode) {
        let mut algorithms = self.algorithms.lock().unwrap();
        if algorithms.iter().any(|existing| existing.same_instance(&node)) {
            tracing::debug!(name = node.algorithm().name(), "node already present");
            return;
        }
        tracing::info!(name = node.algorithm().name(), "added network node");
        algorithms.push(node);
    }

    /// Insert an edge. An identical edge definition is a silent no-op; a
    /// second writer to an already-fed input connector is rejected. Edges
    /// may reference nodes outside the node set (break-out taps).
    fn add_network_node_edge(&self, connection: Connection) -> Result<()> {
        let mut connections = self.connections.lock().unwrap();
        if connections
            .iter()
            .any(|existing| existing.same_definition(&connection))
        {
            tracing::debug!(?connection, "connection already present");
            return Ok(());
        }
        if connections
            .iter()
            .any(|existing| Arc::ptr_eq(existing.to_connector(), connection.to_connector()))
        {
            return Err(FlowVisError::InputAlreadyConnected {
                algorithm: connection.to().algorithm().name().to_string(),
                connector: connection.to_connector().name().to_string(),
            });
        }
        tracing::info!(?connection, "added network edge");
        connections.push(connection);
        Ok(())
    }

    /// Execute one ReadFile command on the worker thread.
    fn read_file_impl(&self, path: &PathBuf, command: &Arc<Command>) -> Result<()> {
        let reader = {
            let readers = self.readers.lock().unwrap();
            readers.iter().find(|r| r.can_load(path)).cloned()
        };
        let reader = reader.ok_or_else(|| FlowVisError::UnsupportedFormat {
            path: path.clone(),
        })?;

        tracing::info!(?path, reader = reader.name(), "loading file");
        let dataset = reader.load(path)?;
        command.set_result(Arc::new(dataset));
        Ok(())
    }

    /// Re-run the whole network sequentially, in node insertion order.
    ///
    /// For every node, incoming connections are propagated first, then the
    /// node's `process()` runs. A failing node does not abort the pass; the
    /// remaining nodes still run and the first failure is reported as the
    /// command's outcome.
    fn run_network_impl(&self) -> Result<()> {
        let nodes: Vec<NetworkNode> = self.algorithms.lock().unwrap().clone();
        let connections: Vec<Connection> = self.connections.lock().unwrap().clone();

        tracing::debug!(
            nodes = nodes.len(),
            edges = connections.len(),
            "running network"
        );

        let mut first_error: Option<FlowVisError> = None;
        for node in &nodes {
            for connection in connections.iter().filter(|c| c.to().same_instance(node)) {
                if let Err(err) = connection.propagate() {
                    tracing::warn!(?connection, %err, "propagation failed");
                    first_error.get_or_insert(err);
                }
            }

            let name = node.algorithm().name().to_string();
            let result = catch_unwind(AssertUnwindSafe(|| node.algorithm().process()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!(algorithm = %name, %err, "algorithm failed");
                    first_error.get_or_insert(FlowVisError::Node {
                        algorithm: name,
                        message: err.to_string(),
                    });
                }
                Err(_) => {
                    tracing::warn!(algorithm = %name, "algorithm panicked");
                    first_error.get_or_insert(FlowVisError::Node {
                        algorithm: name,
                        message: "process() panicked".to_string(),
                    });
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl CommandProcessor for ProcessingNetwork {
    /// Interpret one command. Runs on the worker thread; the queue marks the
    /// command handled and notifies its observer based on the returned
    /// result.
    fn process(&self, command: &Arc<Command>) -> Result<()> {
        match command.kind() {
            CommandKind::ReadFile { path } => self.read_file_impl(path, command),
            CommandKind::AddAlgorithm { node } => {
                self.add_network_node(node.clone());
                Ok(())
            }
            CommandKind::Connect {
                from,
                from_connector,
                to,
                to_connector,
            } => {
                let connection = Connection::resolve(from, from_connector, to, to_connector)?;
                self.add_network_node_edge(connection)
            }
            CommandKind::RunNetwork => self.run_network_impl(),
        }
    }
}
