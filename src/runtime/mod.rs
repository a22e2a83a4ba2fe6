// ABOUTME: Local container runtime access.
// ABOUTME: Defines the Engine capability trait and the bollard-backed implementation.

mod docker;
mod engine;

pub use docker::DockerEngine;
pub use engine::{Engine, EngineError};
