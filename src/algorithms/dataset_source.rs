//! Source node that injects an externally produced dataset into the network.

use crate::error::{FlowVisError, Result};
use crate::network::algorithm::Algorithm;
use crate::network::connector::Connector;
use crate::types::{DataType, SharedDataset};
use std::sync::{Arc, Mutex};

/// A zero-input algorithm that publishes an injected dataset on its single
/// output.
///
/// This is the usual landing spot for a dataset produced by a `ReadFile`
/// command: the caller injects it with [`DatasetSource::set_dataset`] and the
/// next network run publishes it downstream.
pub struct DatasetSource {
    outputs: Vec<Arc<Connector>>,
    dataset: Mutex<Option<SharedDataset>>,
    data_type: DataType,
}

impl DatasetSource {
    /// Create a source producing datasets of the given type on its `data`
    /// output.
    pub fn new(data_type: DataType) -> Arc<Self> {
        Arc::new(Self {
            outputs: vec![Connector::output(
                "data",
                "the injected dataset",
                data_type,
            )],
            dataset: Mutex::new(None),
            data_type,
        })
    }

    /// Inject the dataset to publish on the next run. Rejects datasets of
    /// the wrong type.
    pub fn set_dataset(&self, dataset: SharedDataset) -> Result<()> {
        if dataset.data_type() != self.data_type {
            return Err(FlowVisError::InvalidValue {
                connector: "data".to_string(),
                expected: self.data_type,
                actual: dataset.data_type(),
            });
        }
        *self.dataset.lock().unwrap() = Some(dataset);
        Ok(())
    }

    /// The currently injected dataset, if any.
    pub fn dataset(&self) -> Option<SharedDataset> {
        self.dataset.lock().unwrap().clone()
    }
}

impl Algorithm for DatasetSource {
    fn name(&self) -> &str {
        "Data Source"
    }

    fn description(&self) -> &str {
        "Publishes an externally injected dataset"
    }

    fn inputs(&self) -> &[Arc<Connector>] {
        &[]
    }

    fn outputs(&self) -> &[Arc<Connector>] {
        &self.outputs
    }

    fn process(&self) -> Result<()> {
        match self.dataset() {
            Some(dataset) => self.outputs[0].publish(dataset),
            None => {
                // Nothing injected yet: publish nothing, downstream sees an
                // unconnected-style empty input.
                self.outputs[0].clear();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dataset, LineSet, TriangleMesh};

    #[test]
    fn test_publishes_injected_dataset() {
        let source = DatasetSource::new(DataType::TriangleMesh);
        source.process().unwrap();
        assert!(source.outputs[0].value().is_none());

        source
            .set_dataset(Arc::new(Dataset::TriangleMesh(TriangleMesh::default())))
            .unwrap();
        source.process().unwrap();
        assert!(source.outputs[0].value().is_some());
    }

    #[test]
    fn test_rejects_wrong_type() {
        let source = DatasetSource::new(DataType::TriangleMesh);
        let err = source
            .set_dataset(Arc::new(Dataset::Lines(LineSet::default())))
            .unwrap_err();
        assert!(matches!(err, FlowVisError::InvalidValue { .. }));
    }
}
