//! Typed, named ports on algorithm nodes.
//!
//! A connector holds at most one published value. Values are written only by
//! the owning algorithm's `process()` (worker thread) or by connection
//! propagation (also worker thread); readers get a cloned `Arc` snapshot.

use crate::error::{FlowVisError, Result};
use crate::types::{DataType, SharedDataset};
use std::sync::{Arc, Mutex};

/// Whether a connector accepts or produces data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorDirection {
    Input,
    Output,
}

/// A typed, named, directional port on an algorithm.
#[derive(Debug)]
pub struct Connector {
    name: String,
    description: String,
    direction: ConnectorDirection,
    data_type: DataType,
    value: Mutex<Option<SharedDataset>>,
}

impl Connector {
    /// Create an input connector.
    pub fn input(name: impl Into<String>, description: impl Into<String>, data_type: DataType) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            description: description.into(),
            direction: ConnectorDirection::Input,
            data_type,
            value: Mutex::new(None),
        })
    }

    /// Create an output connector.
    pub fn output(name: impl Into<String>, description: impl Into<String>, data_type: DataType) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            description: description.into(),
            direction: ConnectorDirection::Output,
            data_type,
            value: Mutex::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn direction(&self) -> ConnectorDirection {
        self.direction
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Publish a value on this connector. Rejects values whose type differs
    /// from the declared type.
    pub fn publish(&self, dataset: SharedDataset) -> Result<()> {
        if dataset.data_type() != self.data_type {
            return Err(FlowVisError::InvalidValue {
                connector: self.name.clone(),
                expected: self.data_type,
                actual: dataset.data_type(),
            });
        }
        *self.value.lock().unwrap() = Some(dataset);
        Ok(())
    }

    /// The currently published value, if any.
    pub fn value(&self) -> Option<SharedDataset> {
        self.value.lock().unwrap().clone()
    }

    /// Drop the published value.
    pub fn clear(&self) {
        *self.value.lock().unwrap() = None;
    }

    /// True if data published by `source` may flow into `self`.
    ///
    /// Requires `source` to be an output, `self` to be an input, and both to
    /// declare the same data type.
    pub fn accepts(&self, source: &Connector) -> bool {
        self.direction == ConnectorDirection::Input
            && source.direction == ConnectorDirection::Output
            && self.data_type == source.data_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dataset, LineSet, TriangleMesh};

    #[test]
    fn test_publish_matching_type() {
        let out = Connector::output("mesh", "produced mesh", DataType::TriangleMesh);
        let data = Arc::new(Dataset::TriangleMesh(TriangleMesh::default()));
        assert!(out.publish(data).is_ok());
        assert!(out.value().is_some());
    }

    #[test]
    fn test_publish_wrong_type_rejected() {
        let out = Connector::output("mesh", "produced mesh", DataType::TriangleMesh);
        let data = Arc::new(Dataset::Lines(LineSet::default()));
        assert!(matches!(
            out.publish(data),
            Err(FlowVisError::InvalidValue { .. })
        ));
        assert!(out.value().is_none());
    }

    #[test]
    fn test_accepts_direction_and_type() {
        let out = Connector::output("mesh", "", DataType::TriangleMesh);
        let input = Connector::input("mesh", "", DataType::TriangleMesh);
        let lines_in = Connector::input("lines", "", DataType::Lines);

        assert!(input.accepts(&out));
        // Wrong type.
        assert!(!lines_in.accepts(&out));
        // Wrong directions.
        assert!(!out.accepts(&input));
        assert!(!input.accepts(&input));
    }

    #[test]
    fn test_clear() {
        let out = Connector::output("mesh", "", DataType::TriangleMesh);
        out.publish(Arc::new(Dataset::TriangleMesh(TriangleMesh::default())))
            .unwrap();
        out.clear();
        assert!(out.value().is_none());
    }
}
