//! End-to-end walk of the analysis state machine against realistic
//! backend payloads, from submission to the rendered statistics.

use serde_json::json;

use ui::analysis::engine::{AnalysisEngine, AnalysisPhase, PollOutcome};
use ui::analysis::request::{AnalysisForm, AnalysisPayload, InputMode, SelectedFile};
use ui::core::timing::InstantStamp;
use ui::net::schema::{AnalysisReport, TaskStatus};
use ui::report::stats::{ClaimLabel, LabelDistribution};

fn stamp(ms: f64) -> InstantStamp {
    InstantStamp::from_epoch_ms(ms)
}

fn decode(payload: serde_json::Value) -> AnalysisReport {
    serde_json::from_value(payload).expect("backend payload decodes")
}

#[test]
fn file_submission_polls_to_completion() {
    // A valid file-mode form with both keys set.
    let form = AnalysisForm {
        mode: InputMode::File,
        file: Some(SelectedFile {
            name: "episode.mp3".into(),
            bytes: vec![0u8; 16],
        }),
        rss_url: String::new(),
        api_key_openai: "sk-openai".into(),
        api_key_perplexity: "pplx".into(),
    };
    let request = form.validate().expect("form is valid");
    assert!(matches!(request.payload, AnalysisPayload::File(_)));

    // Backend accepts the upload and hands back a task id.
    let mut engine = AnalysisEngine::default();
    let run_id = engine.begin(stamp(0.0)).expect("engine idle");
    assert!(engine.task_created(run_id, "abc".into()));
    assert!(matches!(engine.phase(), AnalysisPhase::Polling { task_id } if task_id.as_str() == "abc"));

    // First poll: still pending.
    let pending = decode(json!({ "status": "pending" }));
    assert_eq!(
        engine.report_received(run_id, pending, stamp(2_000.0)),
        PollOutcome::Continue
    );

    // Second poll: done, two claims.
    let done = decode(json!({
        "task_id": "abc",
        "metadata": {
            "finished_time": "2026-08-01T12:30:00Z",
            "file_name": "episode.mp3",
            "openai_model": "gpt-5-mini",
            "temprature": 0.2,
            "perplexity_model": "sonar"
        },
        "data": [
            {
                "num": 1,
                "extracted_claim": "The first claim.",
                "label": "True",
                "sources": ["* https://example.org/a"]
            },
            {
                "num": 2,
                "extracted_claim": "The second claim.",
                "label": "False",
                "sources": ["https://example.org/b"]
            }
        ],
        "status": "done"
    }));

    let (report, elapsed_seconds) =
        match engine.report_received(run_id, done, stamp(4_000.0)) {
            PollOutcome::Finished {
                report,
                elapsed_seconds,
            } => (report, elapsed_seconds),
            other => panic!("expected a finished run, got {other:?}"),
        };

    // Elapsed time reflects the wall clock from submit to completion.
    assert_eq!(elapsed_seconds, 4);
    assert_eq!(report.status, TaskStatus::Done);
    assert_eq!(report.claims.len(), 2);

    // The statistics strip shows a 50/50 split and zero everywhere else.
    let distribution = LabelDistribution::from_claims(&report.claims).expect("two claims");
    assert_eq!(distribution.percent(ClaimLabel::True), 50.0);
    assert_eq!(distribution.percent(ClaimLabel::False), 50.0);
    assert_eq!(distribution.percent(ClaimLabel::Misleading), 0.0);
    assert_eq!(distribution.percent(ClaimLabel::Unverifiable), 0.0);
    assert_eq!(distribution.percent(ClaimLabel::Other), 0.0);

    // The engine is idle again and a new run can begin.
    assert!(!engine.is_active());
    assert!(engine.begin(stamp(10_000.0)).is_some());
}

#[test]
fn cancelled_run_discards_the_in_flight_poll() {
    let mut engine = AnalysisEngine::default();
    let run_id = engine.begin(stamp(0.0)).unwrap();
    engine.task_created(run_id, "abc".into());

    // The user cancels while a poll is on the wire.
    assert_eq!(engine.cancel(), Some("abc".into()));

    // The poll resolves afterwards with a terminal payload; nothing
    // happens — no transition, no finished report.
    let done = decode(json!({ "task_id": "abc", "status": "done", "data": [] }));
    assert_eq!(
        engine.report_received(run_id, done, stamp(6_000.0)),
        PollOutcome::Ignored
    );
    assert!(!engine.is_active());
}

#[test]
fn backend_error_status_finishes_the_run_with_the_message() {
    let mut engine = AnalysisEngine::default();
    let run_id = engine.begin(stamp(0.0)).unwrap();
    engine.task_created(run_id, "abc".into());

    let errored = decode(json!({
        "task_id": "abc",
        "status": "error",
        "error": "transcription failed"
    }));
    match engine.report_received(run_id, errored, stamp(3_000.0)) {
        PollOutcome::Finished { report, .. } => {
            assert_eq!(report.status, TaskStatus::Error);
            assert_eq!(report.error.as_deref(), Some("transcription failed"));
        }
        other => panic!("expected a finished run, got {other:?}"),
    }
}
