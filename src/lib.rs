//! # flowvis: a command-queue-driven visual data-flow engine
//!
//! Algorithms are nodes with typed named connectors; connections carry
//! immutable dataset snapshots between them. A single background worker
//! thread mutates and executes the graph strictly through an ordered command
//! queue, so graph mutation, data propagation and rendering never race.
//!
//! ## Architecture
//!
//! - **Network**: the command queue, its worker thread, and the node/edge
//!   graph it owns
//! - **Algorithms**: built-in sources, transforms and renderers
//! - **IO**: file readers producing typed datasets
//! - **Render**: a frame loop driving the visualization lifecycle on its own
//!   thread
//! - **Communication**: crossbeam channels for observer notifications
//!
//! ## Example
//!
//! ```no_run
//! use flowvis::algorithms::{DatasetSource, RenderMesh};
//! use flowvis::network::{NetworkNode, ProcessingNetwork};
//! use flowvis::types::DataType;
//!
//! let network = ProcessingNetwork::new();
//! network.start();
//!
//! // Load a mesh and wait for the dataset.
//! let read = network.load_file("mesh.obj", None);
//! read.wait();
//! let dataset = read.result().expect("mesh.obj should produce a dataset");
//!
//! // Wire a source into a renderer and run.
//! let source_algo = DatasetSource::new(DataType::TriangleMesh);
//! source_algo.set_dataset(dataset).unwrap();
//! let source = NetworkNode::new(source_algo);
//! let renderer = NetworkNode::with_visualization(RenderMesh::new());
//!
//! network.add_algorithm(source.clone(), None);
//! network.add_algorithm(renderer.clone(), None);
//! network.connect(&source, "data", &renderer, "mesh", None);
//! network.run_network(None).wait();
//!
//! network.stop(true);
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod io;
pub mod network;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, RenderConfig};
pub use error::{FlowVisError, Result};
pub use network::{
    Algorithm, ChannelObserver, Command, CommandKind, CommandObserver, CommandOutcome,
    CommandQueue, Connection, Connector, ConnectorDirection, NetworkHandle, NetworkNode,
    ProcessingNetwork, Visualization,
};
pub use render::RenderDriver;
pub use types::{BoundingBox, DataType, Dataset, LineSet, SharedDataset, TriangleMesh};
