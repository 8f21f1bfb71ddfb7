//! The command-queue-driven processing network.
//!
//! Algorithms are nodes with typed named connectors; connections carry
//! immutable dataset snapshots between them. A single worker thread executes
//! all commands in strict FIFO order and is the only thread that mutates the
//! graph.
//!
//! ```text
//! caller threads ──commit──► [CommandQueue] ──► worker thread
//!                                                   │ mutates nodes/edges,
//!                                                   │ runs process()
//! render thread ◄── snapshot handoff + render-request flag
//! ```

pub mod algorithm;
pub mod command;
pub mod connection;
pub mod connector;
pub mod handle;
pub mod network;
pub mod queue;
pub mod visualization;

pub use algorithm::{Algorithm, NetworkNode};
pub use command::{
    ChannelObserver, Command, CommandKind, CommandObserver, CommandOutcome, CommandState,
};
pub use connection::Connection;
pub use connector::{Connector, ConnectorDirection};
pub use handle::NetworkHandle;
pub use network::ProcessingNetwork;
pub use queue::{CommandProcessor, CommandQueue};
pub use visualization::{RenderRequest, Visualization};
