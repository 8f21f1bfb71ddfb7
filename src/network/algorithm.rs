//! The algorithm (node) contract and the node handle stored in the network.

use crate::error::Result;
use crate::network::connector::Connector;
use crate::network::visualization::Visualization;
use std::sync::Arc;

/// An algorithm node: a fixed set of typed connectors plus a `process()`
/// operation that reads its inputs and publishes to its outputs.
///
/// `process()` is invoked only by the network's worker thread. It must be
/// safe to call repeatedly and must only touch its declared connectors.
pub trait Algorithm: Send + Sync {
    /// Human-readable name of this algorithm.
    fn name(&self) -> &str;

    /// Short description of what this algorithm does.
    fn description(&self) -> &str;

    /// Ordered input connectors. Names are unique among inputs.
    fn inputs(&self) -> &[Arc<Connector>];

    /// Ordered output connectors. Names are unique among outputs.
    fn outputs(&self) -> &[Arc<Connector>];

    /// Read the inputs, compute, publish to the outputs.
    fn process(&self) -> Result<()>;

    /// Look up an input connector by name.
    fn input(&self, name: &str) -> Option<Arc<Connector>> {
        self.inputs().iter().find(|c| c.name() == name).cloned()
    }

    /// Look up an output connector by name.
    fn output(&self, name: &str) -> Option<Arc<Connector>> {
        self.outputs().iter().find(|c| c.name() == name).cloned()
    }
}

/// A node handle as stored in the network: the algorithm plus its optional
/// visualization facet, captured at construction time.
///
/// Storing the facet alongside the algorithm makes capability-filtered
/// iteration a direct field check instead of a runtime downcast.
///
/// Node identity is instance identity of the algorithm `Arc`, not its name.
#[derive(Clone)]
pub struct NetworkNode {
    algorithm: Arc<dyn Algorithm>,
    visualization: Option<Arc<dyn Visualization>>,
}

impl NetworkNode {
    /// Wrap a plain algorithm without rendering capability.
    pub fn new(algorithm: Arc<dyn Algorithm>) -> Self {
        Self {
            algorithm,
            visualization: None,
        }
    }

    /// Wrap an algorithm that is also a visualization. Both facets refer to
    /// the same instance.
    pub fn with_visualization<T>(instance: Arc<T>) -> Self
    where
        T: Algorithm + Visualization + 'static,
    {
        Self {
            algorithm: instance.clone(),
            visualization: Some(instance),
        }
    }

    pub fn algorithm(&self) -> &Arc<dyn Algorithm> {
        &self.algorithm
    }

    /// The rendering facet, if this node supports it.
    pub fn visualization(&self) -> Option<&Arc<dyn Visualization>> {
        self.visualization.as_ref()
    }

    /// True if both handles refer to the same algorithm instance.
    pub fn same_instance(&self, other: &NetworkNode) -> bool {
        Arc::ptr_eq(&self.algorithm, &other.algorithm)
    }

    /// True if this handle wraps the given algorithm instance.
    pub fn is_instance(&self, algorithm: &Arc<dyn Algorithm>) -> bool {
        Arc::ptr_eq(&self.algorithm, algorithm)
    }
}

impl std::fmt::Debug for NetworkNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkNode")
            .field("name", &self.algorithm.name())
            .field("visualization", &self.visualization.is_some())
            .finish()
    }
}
