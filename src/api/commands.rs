//! Host Commands - Line protocol cho host binary
//!
//! One JSON command per line in, one JSON response per line out:
//!
//! ```text
//! {"command": "assess", "inputs": {"likes": 50, "caption_length": "Medium"}}
//! {"command": "status"}
//! {"command": "session"}
//! {"command": "layout"}
//! ```
//!
//! `assess` is the input boundary: inputs are range-checked here before
//! they reach the scorer. Missing input fields take the UI defaults.

use serde::{Deserialize, Serialize};

use crate::logic::error::{ErrorReport, ScoringError, ScoringResult};
use crate::logic::features::{LayoutInfo, PostInputs};
use crate::logic::model::EngineStatus;
use crate::logic::pipeline::{Assessment, Scorer};
use crate::logic::rank::{SessionContext, SessionSummary};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Assess {
        #[serde(default)]
        inputs: PostInputs,
    },
    Status,
    Session,
    Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Assessment(Box<Assessment>),
    Status(EngineStatus),
    Session(SessionSummary),
    Layout(LayoutInfo),
    Error(ErrorReport),
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Validate at the boundary, then score
pub fn assess(scorer: &Scorer, session: &mut SessionContext, inputs: &PostInputs) -> ScoringResult<Assessment> {
    inputs.validate()?;
    scorer.assess(session, inputs)
}

pub fn execute(scorer: &Scorer, session: &mut SessionContext, command: Command) -> Response {
    match command {
        Command::Assess { inputs } => match assess(scorer, session, &inputs) {
            Ok(assessment) => Response::Assessment(Box::new(assessment)),
            Err(e) => {
                log::warn!("Assessment rejected: {}", e);
                Response::Error(ErrorReport::from(&e))
            }
        },
        Command::Status => Response::Status(scorer.adapter().status()),
        Command::Session => Response::Session(session.summary()),
        Command::Layout => Response::Layout(LayoutInfo::current()),
    }
}

/// Parse, execute and serialize one protocol line
pub fn handle_line(scorer: &Scorer, session: &mut SessionContext, line: &str) -> String {
    let response = match serde_json::from_str::<Command>(line) {
        Ok(command) => execute(scorer, session, command),
        Err(e) => Response::Error(ErrorReport::from(&ScoringError::from(e))),
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"error":"serialization","message":"{}"}}"#, e.to_string().replace('"', "'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::logic::config::ScoringConfig;
    use crate::logic::model::forest::tests::sample_forest;
    use crate::logic::model::{ModelAdapter, ModelMetadata};

    fn scorer() -> Scorer {
        let adapter =
            ModelAdapter::from_classifier(Box::new(sample_forest()), ModelMetadata::in_memory("tree_ensemble"))
                .unwrap();
        Scorer::new(Arc::new(adapter), &ScoringConfig::default())
    }

    fn run(scorer: &Scorer, session: &mut SessionContext, line: &str) -> serde_json::Value {
        serde_json::from_str(&handle_line(scorer, session, line)).unwrap()
    }

    #[test]
    fn test_assess_line() {
        let scorer = scorer();
        let mut session = SessionContext::new();

        let out = run(
            &scorer,
            &mut session,
            r#"{"command":"assess","inputs":{"likes":50,"comments":10,"caption_length":"Medium","hashtag_usage":"Optimal"}}"#,
        );

        assert_eq!(out["prediction"]["rank"], 0.0);
        assert_eq!(out["prediction"]["verdict"], "LOW");
        assert_eq!(out["features"]["values"][6], 1.0);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_assess_without_inputs_uses_defaults() {
        let scorer = scorer();
        let mut session = SessionContext::new();
        let out = run(&scorer, &mut session, r#"{"command":"assess"}"#);
        assert_eq!(out["features"]["values"][0], 50.0);
    }

    #[test]
    fn test_out_of_range_input_rejected_before_scoring() {
        let scorer = scorer();
        let mut session = SessionContext::new();

        let out = run(&scorer, &mut session, r#"{"command":"assess","inputs":{"likes":900}}"#);

        assert_eq!(out["error"], "input_out_of_range");
        assert!(session.history().is_empty());
        assert_eq!(scorer.adapter().status().inference_count, 0);
    }

    #[test]
    fn test_malformed_line_reports_error() {
        let scorer = scorer();
        let mut session = SessionContext::new();
        let out = run(&scorer, &mut session, "not json");
        assert_eq!(out["error"], "serialization");
    }

    #[test]
    fn test_status_and_session_commands() {
        let scorer = scorer();
        let mut session = SessionContext::new();
        run(&scorer, &mut session, r#"{"command":"assess"}"#);
        run(&scorer, &mut session, r#"{"command":"assess"}"#);

        let status = run(&scorer, &mut session, r#"{"command":"status"}"#);
        assert_eq!(status["inference_count"], 2);
        assert_eq!(status["model_type"], "tree_ensemble");

        let summary = run(&scorer, &mut session, r#"{"command":"session"}"#);
        assert_eq!(summary["stats"]["sample_count"], 2);

        let layout = run(&scorer, &mut session, r#"{"command":"layout"}"#);
        assert_eq!(layout["feature_count"], 8);
    }
}
