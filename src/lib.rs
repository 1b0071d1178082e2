// ABOUTME: Library root for berth, a container lifecycle orchestration core.
// ABOUTME: Drives a Docker-compatible daemon through an injectable client.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod runtime;
pub mod types;
