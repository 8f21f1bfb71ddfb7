//! Directed edges between connectors.

use crate::error::{FlowVisError, Result};
use crate::network::algorithm::{Algorithm, NetworkNode};
use crate::network::connector::Connector;
use std::sync::Arc;

/// A directed edge from one output connector to one input connector.
///
/// The edge set forms a multigraph: fan-out from one output is supported,
/// and edges may reference nodes that are not part of the network's node set
/// (break-out taps). Fan-in to one input is rejected by the network at
/// connect time.
#[derive(Clone)]
pub struct Connection {
    from: NetworkNode,
    from_connector: Arc<Connector>,
    to: NetworkNode,
    to_connector: Arc<Connector>,
}

impl Connection {
    /// Resolve connector names on the given nodes and build a validated
    /// connection.
    ///
    /// Fails if either node lacks the named connector or if the connector
    /// types are incompatible. This validates names and types, not data
    /// readiness: connectors may be empty because the producing node has not
    /// run yet.
    pub fn resolve(
        from: &NetworkNode,
        from_connector: &str,
        to: &NetworkNode,
        to_connector: &str,
    ) -> Result<Self> {
        let source = from.algorithm().output(from_connector).ok_or_else(|| {
            FlowVisError::ConnectorNotFound {
                algorithm: from.algorithm().name().to_string(),
                connector: from_connector.to_string(),
            }
        })?;
        let target = to.algorithm().input(to_connector).ok_or_else(|| {
            FlowVisError::ConnectorNotFound {
                algorithm: to.algorithm().name().to_string(),
                connector: to_connector.to_string(),
            }
        })?;
        Self::new(from.clone(), source, to.clone(), target)
    }

    /// Build a connection from already-resolved connectors, validating
    /// direction and type compatibility.
    pub fn new(
        from: NetworkNode,
        from_connector: Arc<Connector>,
        to: NetworkNode,
        to_connector: Arc<Connector>,
    ) -> Result<Self> {
        use crate::network::connector::ConnectorDirection;

        if from_connector.direction() != ConnectorDirection::Output {
            return Err(FlowVisError::DirectionMismatch {
                connector: from_connector.name().to_string(),
            });
        }
        if to_connector.direction() != ConnectorDirection::Input {
            return Err(FlowVisError::DirectionMismatch {
                connector: to_connector.name().to_string(),
            });
        }
        if !to_connector.accepts(&from_connector) {
            return Err(FlowVisError::TypeMismatch {
                from: from_connector.name().to_string(),
                to: to_connector.name().to_string(),
                expected: to_connector.data_type(),
                actual: from_connector.data_type(),
            });
        }

        Ok(Self {
            from,
            from_connector,
            to,
            to_connector,
        })
    }

    pub fn from(&self) -> &NetworkNode {
        &self.from
    }

    pub fn from_connector(&self) -> &Arc<Connector> {
        &self.from_connector
    }

    pub fn to(&self) -> &NetworkNode {
        &self.to
    }

    pub fn to_connector(&self) -> &Arc<Connector> {
        &self.to_connector
    }

    /// Copy the source's published value into the target connector.
    ///
    /// A source with no published value clears the target, so a consumer
    /// never sees stale data from a previous run.
    pub fn propagate(&self) -> Result<()> {
        match self.from_connector.value() {
            Some(dataset) => self.to_connector.publish(dataset),
            None => {
                self.to_connector.clear();
                Ok(())
            }
        }
    }

    /// True if `other` names the same pair of connector instances.
    pub fn same_definition(&self, other: &Connection) -> bool {
        Arc::ptr_eq(&self.from_connector, &other.from_connector)
            && Arc::ptr_eq(&self.to_connector, &other.to_connector)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Connection({}.{} -> {}.{})",
            self.from.algorithm().name(),
            self.from_connector.name(),
            self.to.algorithm().name(),
            self.to_connector.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{CenterMesh, DatasetSource};
    use crate::types::{DataType, Dataset, TriangleMesh};

    #[test]
    fn test_resolve_valid_connection() {
        let source = NetworkNode::new(DatasetSource::new(DataType::TriangleMesh));
        let center = NetworkNode::new(CenterMesh::new());
        let conn = Connection::resolve(&source, "data", &center, "mesh");
        assert!(conn.is_ok());
    }

    #[test]
    fn test_resolve_unknown_connector() {
        let source = NetworkNode::new(DatasetSource::new(DataType::TriangleMesh));
        let center = NetworkNode::new(CenterMesh::new());
        let err = Connection::resolve(&source, "data", &center, "Bar").unwrap_err();
        assert!(matches!(
            err,
            FlowVisError::ConnectorNotFound { .. }
        ));
    }

    #[test]
    fn test_resolve_type_mismatch() {
        let source = NetworkNode::new(DatasetSource::new(DataType::Lines));
        let center = NetworkNode::new(CenterMesh::new());
        let err = Connection::resolve(&source, "data", &center, "mesh").unwrap_err();
        assert!(matches!(err, FlowVisError::TypeMismatch { .. }));
    }

    #[test]
    fn test_propagate_copies_snapshot() {
        let source_algo = DatasetSource::new(DataType::TriangleMesh);
        let source = NetworkNode::new(source_algo.clone());
        let center = NetworkNode::new(CenterMesh::new());
        let conn = Connection::resolve(&source, "data", &center, "mesh").unwrap();

        // Nothing published yet: propagation clears the target.
        conn.propagate().unwrap();
        assert!(conn.to_connector().value().is_none());

        source_algo
            .set_dataset(Arc::new(Dataset::TriangleMesh(TriangleMesh::default())))
            .unwrap();
        source_algo.process().unwrap();
        conn.propagate().unwrap();
        assert!(conn.to_connector().value().is_some());
    }
}
