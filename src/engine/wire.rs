use super::EngineService;
use crate::analysis::AnalysisResponse;
use compact_str::CompactString;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

/// The engine reports this on stderr once it accepts queries.
pub(super) const READY_BANNER: &str = "ready to begin handling requests";

/// Queries submitted before the banner arrives wait here.
pub(super) struct EnginePending {
    pub(super) state: EngineState,
    pub(super) queue: VecDeque<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EngineState {
    Starting,
    Ready,
    Failed,
}

/// One response waiter per in-flight query id. Streaming updates
/// (`isDuringSearch`) go to the same waiter; the entry is removed on the
/// final response.
pub(super) type Waiters = Arc<Mutex<FxHashMap<CompactString, mpsc::Sender<AnalysisResponse>>>>;

pub(super) struct EngineProcess {
    pub(super) tx: mpsc::Sender<String>,
    pub(super) pending: Arc<Mutex<EnginePending>>,
    pub(super) child: Arc<Mutex<std::process::Child>>,
}

impl EngineProcess {
    pub(super) fn pid(&self) -> Option<u32> {
        self.child.lock().ok().map(|child| child.id())
    }

    pub(super) fn state(&self) -> Option<EngineState> {
        self.pending.lock().ok().map(|p| p.state)
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        let Ok(mut child) = self.child.lock() else {
            return;
        };
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl EngineService {
    /// Hands one serialized query line to the writer, queueing it while the
    /// engine is still starting up.
    pub(super) fn send_line(&mut self, line: String) {
        let Some(process) = self.process.as_ref() else {
            return;
        };

        if let Ok(mut pending) = process.pending.lock() {
            match pending.state {
                EngineState::Starting => {
                    pending.queue.push_back(line);
                    return;
                }
                EngineState::Failed => return,
                EngineState::Ready => {}
            }
        }

        if process.tx.send(line).is_err() {
            tracing::warn!("engine writer channel closed");
            mark_failed(&process.pending, &self.waiters);
        }
    }
}

pub(super) fn mark_failed(pending: &Arc<Mutex<EnginePending>>, waiters: &Waiters) {
    if let Ok(mut pending) = pending.lock() {
        pending.queue.clear();
        pending.state = EngineState::Failed;
    }
    // Dropping the senders wakes every blocked waiter with a disconnect.
    if let Ok(mut waiters) = waiters.lock() {
        waiters.clear();
    }
}

pub(super) fn writer_loop(
    stdin: std::process::ChildStdin,
    rx: mpsc::Receiver<String>,
    pending: Arc<Mutex<EnginePending>>,
    waiters: Waiters,
) {
    let mut writer = BufWriter::new(stdin);
    while let Ok(line) = rx.recv() {
        if writeln!(writer, "{}", line).and_then(|()| writer.flush()).is_err() {
            break;
        }
    }
    mark_failed(&pending, &waiters);
}

pub(super) fn reader_loop(
    stdout: std::process::ChildStdout,
    pending: Arc<Mutex<EnginePending>>,
    waiters: Waiters,
) {
    let reader = BufReader::new(stdout);

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "engine read failed");
                mark_failed(&pending, &waiters);
                return;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response: AnalysisResponse = match serde_json::from_str(&line) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, line = %line, "engine response decode failed");
                continue;
            }
        };

        deliver(&waiters, response);
    }

    mark_failed(&pending, &waiters);
}

fn deliver(waiters: &Waiters, response: AnalysisResponse) {
    let Ok(mut waiters) = waiters.lock() else {
        return;
    };

    let id = response.id.clone();
    let final_response = !response.is_during_search || response.error.is_some();

    let Some(tx) = waiters.get(&id) else {
        tracing::debug!(id = %id, "engine response with no waiter");
        return;
    };

    if tx.send(response).is_err() || final_response {
        waiters.remove(&id);
    }
}

pub(super) fn stderr_loop(
    stderr: std::process::ChildStderr,
    tx: mpsc::Sender<String>,
    pending: Arc<Mutex<EnginePending>>,
    waiters: Waiters,
) {
    let reader = BufReader::new(stderr);

    for line in reader.lines() {
        let Ok(line) = line else {
            return;
        };

        tracing::debug!(line = %line, "engine");

        if line.contains(READY_BANNER) {
            let queued = {
                let Ok(mut pending) = pending.lock() else {
                    return;
                };
                if pending.state != EngineState::Starting {
                    continue;
                }
                pending.state = EngineState::Ready;
                pending.queue.drain(..).collect::<Vec<_>>()
            };

            tracing::info!("engine ready");
            for line in queued {
                if tx.send(line).is_err() {
                    mark_failed(&pending, &waiters);
                    return;
                }
            }
        }
    }
}

pub(super) fn child_watch_loop(
    child: Arc<Mutex<std::process::Child>>,
    pending: Arc<Mutex<EnginePending>>,
    waiters: Waiters,
) {
    loop {
        let status = {
            let Ok(mut child) = child.lock() else {
                break;
            };
            child.try_wait()
        };

        match status {
            Ok(Some(status)) => {
                tracing::warn!(status = ?status, "engine process exited");
                break;
            }
            Ok(None) => {
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => {
                tracing::warn!(error = %e, "engine process wait failed");
                break;
            }
        }
    }

    mark_failed(&pending, &waiters);
}
