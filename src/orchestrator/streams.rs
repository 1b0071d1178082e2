// ABOUTME: Caller-facing stream types for logs and statistics.
// ABOUTME: Dropping a stream closes the daemon-side stream.

use super::error::{OrchestratorError, map_client_error};
use crate::runtime::{ClientStream, LogChunk, Statistics};
use futures::{Stream, StreamExt};
use std::pin::Pin;

pub type LogStream = Pin<Box<dyn Stream<Item = Result<LogChunk, OrchestratorError>> + Send>>;

pub type StatsStream = Pin<Box<dyn Stream<Item = Result<Statistics, OrchestratorError>> + Send>>;

/// Re-map errors surfacing mid-stream with the same rules as the opening call.
pub(crate) fn map_stream<T: Send + 'static>(
    stream: ClientStream<T>,
    operation: &'static str,
    target: String,
) -> Pin<Box<dyn Stream<Item = Result<T, OrchestratorError>> + Send>> {
    Box::pin(stream.map(move |item| item.map_err(|e| map_client_error(operation, &target, e))))
}
