// src/core/mod.rs
//! Core services shared across exports

pub mod fs_ops;

pub use fs_ops::FsOps;
