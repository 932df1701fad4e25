//! Engagement Quality - Host Entry Point
//!
//! Runs one interactive session over stdin/stdout using the line protocol in
//! `api::commands`. The model is loaded once at startup; failure to load it
//! ends the process.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use engagement_quality_core::api::commands;
use engagement_quality_core::constants::{APP_NAME, APP_VERSION};
use engagement_quality_core::{ModelAdapter, Scorer, ScoringConfig, SessionContext};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config = ScoringConfig::from_env();

    let adapter = match ModelAdapter::load(&config) {
        Ok(adapter) => Arc::new(adapter),
        Err(e) => {
            log::error!("Cannot start without a model: {}", e);
            std::process::exit(1);
        }
    };

    let scorer = Scorer::new(adapter, &config);
    let mut session = SessionContext::new();
    log::info!("Session {} started", session.id());

    if let Err(e) = serve(&scorer, &mut session) {
        log::error!("I/O error: {}", e);
        std::process::exit(1);
    }

    let summary = session.summary();
    log::info!(
        "Session {} ended after {} predictions",
        summary.session_id,
        summary.stats.sample_count
    );
}

fn serve(scorer: &Scorer, session: &mut SessionContext) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = commands::handle_line(scorer, session, &line);
        writeln!(out, "{}", response)?;
        out.flush()?;
    }

    Ok(())
}
