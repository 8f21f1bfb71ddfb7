//! The rendering thread.
//!
//! The renderer itself (turning a dataset snapshot into pixels) is external;
//! this module only drives the visualization lifecycle at frame rate,
//! isolated from the worker thread.

pub mod driver;

pub use driver::RenderDriver;
