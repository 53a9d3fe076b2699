use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sente::analysis::{AnalysisRequest, AnalysisResponse};
use sente::config;
use sente::engine::EngineService;
use sente::logging;
use signal_hook::consts::signal::{SIGINT, SIGTERM};

fn main() {
    let _logging = logging::init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "fatal");
        eprintln!("sente: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);

    let config = config::load_config(&config_path)?;
    config::ensure_engine_available(&config.engine)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, shutdown.clone())?;
    signal_hook::flag::register(SIGTERM, shutdown.clone())?;

    let mut engine = EngineService::new(config.engine);
    if !engine.start() {
        tracing::warn!("engine did not start; queries will retry");
    }

    // One JSON query per stdin line, one JSON response per stdout line.
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        if shutdown.load(Ordering::Relaxed) {
            tracing::info!("shutdown signal received");
            break;
        }

        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let request: AnalysisRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                let response =
                    AnalysisResponse::error("", format!("failed to parse query: {}", e));
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                continue;
            }
        };

        let id = request.id.clone();
        let response = match engine.query(request) {
            Ok(response) => response,
            Err(e) => AnalysisResponse::error(id, e.to_string()),
        };
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
    }

    engine.stop();
    Ok(())
}
