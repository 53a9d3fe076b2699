//! Analysis engine process management.
//!
//! The engine is a child process speaking line-delimited JSON: one query
//! object per line on stdin, one response object per line on stdout, logging
//! on stderr. Queries are correlated to responses by `id`; a query may
//! stream intermediate responses (`isDuringSearch`) before the final one.

mod process;
mod wire;

use crate::analysis::{retain_region_moves, AnalysisRequest, AnalysisResponse};
use crate::board::RegionError;
use crate::config::EngineConfig;
use compact_str::{format_compact, CompactString};
use rustc_hash::FxHashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};
use wire::{EngineProcess, EngineState, Waiters};

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug)]
pub enum EngineError {
    /// The engine is not running and could not be started (spawn failure or
    /// restart backoff in effect).
    NotRunning,
    /// The request carried region bounds that fail validation.
    InvalidBounds(RegionError),
    Encode(serde_json::Error),
    /// No final response within the configured query timeout.
    Timeout,
    /// The engine process died while the query was in flight.
    Disconnected,
    /// The engine answered with an error response.
    Engine(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotRunning => write!(f, "analysis engine is not running"),
            EngineError::InvalidBounds(e) => write!(f, "invalid region bounds: {}", e),
            EngineError::Encode(e) => write!(f, "failed to encode query: {}", e),
            EngineError::Timeout => write!(f, "timed out waiting for the engine"),
            EngineError::Disconnected => write!(f, "analysis engine terminated"),
            EngineError::Engine(message) => write!(f, "engine error: {}", message),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<RegionError> for EngineError {
    fn from(e: RegionError) -> Self {
        EngineError::InvalidBounds(e)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Encode(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    pub running: bool,
    pub ready: bool,
    pub pid: Option<u32>,
    pub has_human_model: bool,
}

/// An in-flight query. Dropping the handle abandons the query; late
/// responses are discarded by the reader.
pub struct QueryHandle {
    id: CompactString,
    rx: mpsc::Receiver<AnalysisResponse>,
    waiters: Waiters,
}

impl QueryHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Blocks until the final response (`isDuringSearch: false` or an error
    /// response), discarding streamed intermediates.
    pub fn wait(self, timeout: Duration) -> Result<AnalysisResponse> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(EngineError::Timeout);
            }
            match self.rx.recv_timeout(remaining) {
                Ok(response) => {
                    if !response.is_during_search || response.error.is_some() {
                        return Ok(response);
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => return Err(EngineError::Timeout),
                Err(mpsc::RecvTimeoutError::Disconnected) => return Err(EngineError::Disconnected),
            }
        }
    }
}

impl Drop for QueryHandle {
    fn drop(&mut self) {
        if let Ok(mut waiters) = self.waiters.lock() {
            waiters.remove(&self.id);
        }
    }
}

/// Owns the engine child process and hands analysis queries to it.
pub struct EngineService {
    config: EngineConfig,
    process: Option<EngineProcess>,
    waiters: Waiters,
    restart_attempts: u32,
    restart_backoff_until: Option<Instant>,
    exiting: bool,
    next_id: u64,
}

impl EngineService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            process: None,
            waiters: Arc::new(Mutex::new(FxHashMap::default())),
            restart_attempts: 0,
            restart_backoff_until: None,
            exiting: false,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Spawns the engine eagerly instead of on the first query.
    pub fn start(&mut self) -> bool {
        self.ensure_started()
    }

    fn next_query_id(&mut self) -> CompactString {
        self.next_id = self.next_id.saturating_add(1);
        format_compact!("query_{}", self.next_id)
    }

    /// Validates and submits a query without blocking. Assigns an id when
    /// the request has none; the caller reads it back from the handle.
    pub fn submit(&mut self, request: &mut AnalysisRequest) -> Result<QueryHandle> {
        if let Some(region) = &request.region_bounds {
            region.validate(request.board_x_size, request.board_y_size)?;
        }

        if request.id.is_empty() {
            request.id = self.next_query_id();
        }

        if !self.ensure_started() {
            return Err(EngineError::NotRunning);
        }

        let line = serde_json::to_string(request)?;

        let (tx, rx) = mpsc::channel();
        let handle = QueryHandle {
            id: request.id.clone(),
            rx,
            waiters: self.waiters.clone(),
        };
        if let Ok(mut waiters) = self.waiters.lock() {
            waiters.insert(request.id.clone(), tx);
        }

        self.send_line(line);
        Ok(handle)
    }

    /// Blocking analysis round-trip: validate, submit, wait for the final
    /// response, then enforce the request's region bounds on it.
    pub fn query(&mut self, mut request: AnalysisRequest) -> Result<AnalysisResponse> {
        let region = request.region_bounds;
        let y_size = request.board_y_size;

        let handle = self.submit(&mut request)?;
        let timeout = Duration::from_secs(self.config.query_timeout_secs);
        let mut response = handle.wait(timeout)?;

        if let Some(message) = response.error.take() {
            return Err(EngineError::Engine(message));
        }

        if let Some(region) = region {
            retain_region_moves(&mut response, &region, y_size);
        }

        Ok(response)
    }

    pub fn status(&self) -> EngineStatus {
        let state = self.process.as_ref().and_then(|p| p.state());
        EngineStatus {
            running: matches!(state, Some(EngineState::Starting | EngineState::Ready)),
            ready: matches!(state, Some(EngineState::Ready)),
            pid: self.process.as_ref().and_then(|p| p.pid()),
            has_human_model: self.config.human_model_path.is_some(),
        }
    }

    /// Terminates the engine and fails every in-flight query. Idempotent.
    pub fn stop(&mut self) {
        self.exiting = true;
        // EngineProcess kills the child on drop; the watch loop then fails
        // the remaining waiters.
        self.process = None;
        if let Ok(mut waiters) = self.waiters.lock() {
            waiters.clear();
        }
    }
}

impl Drop for EngineService {
    fn drop(&mut self) {
        self.stop();
    }
}
