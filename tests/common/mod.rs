//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use flowvis::network::{Command, CommandObserver};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Create a test timeout duration
pub fn test_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Observer that records the name of every command it sees, in order.
#[derive(Default)]
pub struct RecordingObserver {
    seen: Mutex<Vec<(String, bool)>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seen(&self) -> Vec<(String, bool)> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl CommandObserver for RecordingObserver {
    fn on_success(&self, command: &Command) {
        self.seen
            .lock()
            .unwrap()
            .push((command.kind().name().to_string(), true));
    }

    fn on_failure(&self, command: &Command, _message: &str) {
        self.seen
            .lock()
            .unwrap()
            .push((command.kind().name().to_string(), false));
    }
}

/// Write a unit cube OBJ file into a fresh temp directory.
///
/// The cube spans `[0,1]^3`, so its bounding box center is (0.5, 0.5, 0.5).
pub fn write_cube_obj() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cube.obj");
    let mut file = std::fs::File::create(&path).expect("create cube.obj");
    writeln!(
        file,
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 0 1\nv 1 0 1\nv 1 1 1\nv 0 1 1\n\
         f 1 2 3 4\nf 5 8 7 6\nf 1 5 6 2\nf 2 6 7 3\nf 3 7 8 4\nf 5 1 4 8"
    )
    .expect("write cube.obj");
    (dir, path)
}
