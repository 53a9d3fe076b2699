use super::wire::{
    child_watch_loop, reader_loop, stderr_loop, writer_loop, EnginePending, EngineProcess,
    EngineState,
};
use super::EngineService;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::process::Command;
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

impl EngineService {
    pub(super) fn schedule_restart_backoff(&mut self) {
        let attempt = self.restart_attempts.saturating_add(1);
        self.restart_attempts = attempt;

        let shift = attempt.saturating_sub(1).min(6);
        let delay_ms = 200u64.saturating_mul(1u64 << shift);
        let delay = Duration::from_millis(delay_ms.min(5_000));
        self.restart_backoff_until = Some(Instant::now() + delay);
    }

    /// Spawns the engine process if needed. Returns false while a failed
    /// process is inside its restart backoff window.
    pub(super) fn ensure_started(&mut self) -> bool {
        if self.exiting {
            return false;
        }

        if self
            .restart_backoff_until
            .is_some_and(|until| Instant::now() < until)
        {
            return false;
        }

        if let Some(process) = self.process.as_ref() {
            let state = process.state();

            if matches!(state, Some(EngineState::Ready)) {
                self.restart_attempts = 0;
                self.restart_backoff_until = None;
                return true;
            }

            if !matches!(state, Some(EngineState::Failed)) {
                return true;
            }

            self.process = None;
            if let Ok(mut waiters) = self.waiters.lock() {
                waiters.clear();
            }

            self.schedule_restart_backoff();
            return false;
        }

        self.restart_backoff_until = None;

        let mut cmd = Command::new(&self.config.path);
        cmd.args(self.config.command_args())
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());

        if !self.config.ld_library_paths.is_empty() {
            cmd.env("LD_LIBRARY_PATH", self.library_path_env());
        }

        tracing::info!(engine = %self.config.path.display(), "starting analysis engine");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::error!(error = %e, "spawn analysis engine failed");
                self.schedule_restart_backoff();
                return false;
            }
        };

        let stdin = match child.stdin.take() {
            Some(stdin) => stdin,
            None => {
                tracing::error!("engine stdin unavailable");
                let _ = child.kill();
                let _ = child.wait();
                self.schedule_restart_backoff();
                return false;
            }
        };

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                tracing::error!("engine stdout unavailable");
                let _ = child.kill();
                let _ = child.wait();
                self.schedule_restart_backoff();
                return false;
            }
        };

        let stderr = child.stderr.take();
        let child = Arc::new(Mutex::new(child));

        let (tx, rx) = mpsc::channel::<String>();

        let pending = Arc::new(Mutex::new(EnginePending {
            state: EngineState::Starting,
            queue: VecDeque::new(),
        }));

        if let Err(e) = std::thread::Builder::new()
            .name("sente-engine-writer".to_string())
            .spawn({
                let pending = pending.clone();
                let waiters = self.waiters.clone();
                move || writer_loop(stdin, rx, pending, waiters)
            })
        {
            tracing::error!(error = %e, "spawn engine writer thread failed");
            if let Ok(mut child) = child.lock() {
                let _ = child.kill();
                let _ = child.wait();
            }
            self.schedule_restart_backoff();
            return false;
        }

        if let Err(e) = std::thread::Builder::new()
            .name("sente-engine-reader".to_string())
            .spawn({
                let pending = pending.clone();
                let waiters = self.waiters.clone();
                move || reader_loop(stdout, pending, waiters)
            })
        {
            tracing::error!(error = %e, "spawn engine reader thread failed");
            if let Ok(mut child) = child.lock() {
                let _ = child.kill();
                let _ = child.wait();
            }
            self.schedule_restart_backoff();
            return false;
        }

        if let Some(stderr) = stderr {
            if let Err(e) = std::thread::Builder::new()
                .name("sente-engine-stderr".to_string())
                .spawn({
                    let tx = tx.clone();
                    let pending = pending.clone();
                    let waiters = self.waiters.clone();
                    move || stderr_loop(stderr, tx, pending, waiters)
                })
            {
                tracing::warn!(error = %e, "spawn engine stderr thread failed");
            }
        }

        if let Err(e) = std::thread::Builder::new()
            .name("sente-engine-watch".to_string())
            .spawn({
                let child = child.clone();
                let pending = pending.clone();
                let waiters = self.waiters.clone();
                move || child_watch_loop(child, pending, waiters)
            })
        {
            tracing::error!(error = %e, "spawn engine watch thread failed");
            if let Ok(mut child) = child.lock() {
                let _ = child.kill();
                let _ = child.wait();
            }
            self.schedule_restart_backoff();
            return false;
        }

        self.process = Some(EngineProcess { tx, pending, child });
        true
    }

    fn library_path_env(&self) -> OsString {
        let mut value = OsString::new();
        for (i, path) in self.config.ld_library_paths.iter().enumerate() {
            if i > 0 {
                value.push(":");
            }
            value.push(path);
        }
        if let Some(existing) = std::env::var_os("LD_LIBRARY_PATH") {
            if !existing.is_empty() {
                value.push(":");
                value.push(existing);
            }
        }
        value
    }
}
