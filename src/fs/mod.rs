//! Filesystem utilities for captioner.

pub mod atomic;

pub use atomic::atomic_write_file;
