//! Stand-in analysis engine for integration tests.
//!
//! Speaks the real engine's line protocol: JSON queries on stdin, JSON
//! responses on stdout, the readiness banner on stderr. Behavior is tuned
//! through env vars so tests can simulate slow startup, streamed responses,
//! out-of-region suggestions, and crashes.

use sente::analysis::{AnalysisRequest, AnalysisResponse, MoveInfo, RootInfo};
use sente::board::Vertex;
use std::io::{self, BufRead, Write};
use std::time::Duration;

struct StubOptions {
    banner: bool,
    banner_delay: Option<Duration>,
    delay: Option<Duration>,
    /// Extra candidate appended to every response, e.g. to leak a move the
    /// wrapper must filter out.
    extra_move: Option<String>,
    stream: bool,
    exit_after: Option<u64>,
}

impl StubOptions {
    fn from_env() -> Self {
        let delay = std::env::var("SENTE_STUB_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis);
        let exit_after = std::env::var("SENTE_STUB_EXIT_AFTER")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());
        let banner_delay = std::env::var("SENTE_STUB_BANNER_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis);
        Self {
            banner: std::env::var_os("SENTE_STUB_NO_BANNER").is_none(),
            banner_delay,
            delay,
            extra_move: std::env::var("SENTE_STUB_EXTRA_MOVE").ok(),
            stream: std::env::var_os("SENTE_STUB_STREAM").is_some(),
            exit_after,
        }
    }
}

fn move_info(mv: impl Into<compact_str::CompactString>, order: i32) -> MoveInfo {
    MoveInfo {
        mv: mv.into(),
        visits: 50,
        winrate: 0.48,
        score_lead: -0.5,
        order,
        ..MoveInfo::default()
    }
}

/// Candidates for a query: region corners when bounds are present, a fixed
/// opening point otherwise.
fn candidates(request: &AnalysisRequest) -> Vec<MoveInfo> {
    let y_size = request.board_y_size;

    match &request.region_bounds {
        Some(region) => {
            let corner = |x: i32, y: i32| {
                Vertex::Point { x, y }
                    .to_gtp(y_size)
                    .unwrap_or_else(|| "pass".into())
            };
            let first = move_info(corner(region.x1, region.y1), 0);
            let mut second = move_info(corner(region.x2, region.y2), 1);
            second.pv = vec![corner(region.x1, region.y2), corner(region.x2, region.y1)];
            vec![first, second]
        }
        None => {
            let mut info = move_info("Q16", 0);
            info.pv = vec!["Q16".into(), "D4".into()];
            vec![info]
        }
    }
}

fn respond(request: &AnalysisRequest, options: &StubOptions) -> AnalysisResponse {
    let mut move_infos = candidates(request);
    if let Some(extra) = &options.extra_move {
        move_infos.push(move_info(extra.as_str(), move_infos.len() as i32));
    }

    let suggested = move_infos.first().map(|info| info.mv.clone());
    AnalysisResponse {
        id: request.id.clone(),
        root_info: Some(RootInfo {
            winrate: 0.48,
            score_lead: -0.5,
            visits: 50,
            utility: 0.0,
            current_player: Some("B".into()),
            suggested_move: suggested,
        }),
        move_infos,
        is_during_search: false,
        turn_number: request.moves.len() as i32,
        ..AnalysisResponse::default()
    }
}

fn main() -> io::Result<()> {
    let options = StubOptions::from_env();

    if options.banner {
        if let Some(delay) = options.banner_delay {
            std::thread::sleep(delay);
        }
        eprintln!("Started, ready to begin handling requests");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut responded = 0u64;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let request: AnalysisRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                let error = AnalysisResponse::error("", format!("could not parse query: {}", e));
                writeln!(stdout, "{}", serde_json::to_string(&error)?)?;
                continue;
            }
        };

        if let Some(delay) = options.delay {
            std::thread::sleep(delay);
        }

        if options.stream {
            let mut during = respond(&request, &options);
            during.is_during_search = true;
            writeln!(stdout, "{}", serde_json::to_string(&during)?)?;
            stdout.flush()?;
        }

        let response = respond(&request, &options);
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;

        responded += 1;
        if options.exit_after.is_some_and(|limit| responded >= limit) {
            std::process::exit(3);
        }
    }

    Ok(())
}
