//! Weak application-level handle to the active network.
//!
//! Components that merely trigger work (UI panels, strategy selectors) get a
//! `NetworkHandle` from whoever owns the network instead of looking it up
//! through a global. Every operation degrades to a no-op when the network is
//! gone or not yet created, so callers need no startup-order coordination.

use crate::network::algorithm::NetworkNode;
use crate::network::command::{Command, CommandObserver};
use crate::network::network::ProcessingNetwork;
use crate::network::visualization::Visualization;
use std::sync::{Arc, Weak};

/// Cloneable weak reference to a [`ProcessingNetwork`].
#[derive(Clone, Default)]
pub struct NetworkHandle {
    network: Weak<ProcessingNetwork>,
}

impl NetworkHandle {
    pub(crate) fn new(network: &Arc<ProcessingNetwork>) -> Self {
        Self {
            network: Arc::downgrade(network),
        }
    }

    /// A handle that refers to no network; all operations are no-ops.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// The network, if it is still alive.
    pub fn upgrade(&self) -> Option<Arc<ProcessingNetwork>> {
        self.network.upgrade()
    }

    /// Trigger a network re-run. No-op without an active network.
    pub fn run_network(&self, observer: Option<Arc<dyn CommandObserver>>) -> Option<Arc<Command>> {
        self.upgrade().map(|network| network.run_network(observer))
    }

    /// Add an algorithm. No-op without an active network.
    pub fn add_algorithm(
        &self,
        node: NetworkNode,
        observer: Option<Arc<dyn CommandObserver>>,
    ) -> Option<Arc<Command>> {
        self.upgrade()
            .map(|network| network.add_algorithm(node, observer))
    }

    /// Enqueue an already-built command. No-op without an active network.
    pub fn commit(&self, command: Arc<Command>) -> Option<Arc<Command>> {
        self.upgrade().map(|network| network.commit(command))
    }

    /// Visit all visualization-capable nodes. No-op without an active
    /// network.
    pub fn visit_visualizations(&self, visitor: impl FnMut(&Arc<dyn Visualization>)) {
        if let Some(network) = self.upgrade() {
            network.visit_visualizations(visitor);
        }
    }
}
