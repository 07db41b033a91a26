//! End-to-end submit scenarios against a scripted backend.

use fever_triage_core::testing::{RecordingSurface, ScriptedTransport};
use fever_triage_core::text;
use fever_triage_core::{
    ClientConfig, DiagnosisFlow, FormState, HttpReply, Navigator, PageId, SeverityTier,
    SubmitControlView, SubmitOutcome, SubmitState, SymptomFeatures, Tone, TriageError,
};
use proptest::prelude::*;

fn run(
    transport: ScriptedTransport,
    form: &FormState,
) -> (DiagnosisFlow<ScriptedTransport>, RecordingSurface, SubmitOutcome) {
    let config = ClientConfig::default();
    let flow = DiagnosisFlow::new(transport, &config);
    let mut surface = RecordingSurface::with_navigator(Navigator::from_config(&config));
    let outcome = pollster::block_on(flow.submit(form, &mut surface));
    (flow, surface, outcome)
}

fn body(severity: &str, probability: f64) -> String {
    serde_json::json!({
        "prediction": 1,
        "severity_level": severity,
        "probability": probability,
        "message": "m",
        "medical_advice": "a",
    })
    .to_string()
}

fn assert_restored(surface: &RecordingSurface) {
    assert_eq!(surface.last_control(), Some(&SubmitControlView::IDLE));
    let idle = SubmitControlView::IDLE;
    assert!(!idle.disabled && idle.icon_visible && !idle.spinner_visible);
    assert_eq!(idle.label, text::SUBMIT_IDLE);
}

#[test]
fn empty_form_sends_defaults() {
    let transport = ScriptedTransport::new().reply(HttpReply::new(200, body("Low", 5.0)));
    let (flow, _, _) = run(transport, &FormState::new().with("age", ""));

    let sent: SymptomFeatures =
        serde_json::from_str(&flow.client().transport().requests()[0].body).unwrap();
    assert_eq!(sent.age, 30);
    assert_eq!(sent.gender, 0);
    assert_eq!(
        [
            sent.fever,
            sent.headache,
            sent.eye_pain,
            sent.joint_muscle_pain,
            sent.nausea_vomiting,
            sent.rash,
            sent.bleeding,
        ],
        [0; 7]
    );
}

#[test]
fn busy_state_restored_on_every_outcome() {
    let scripts = [
        ScriptedTransport::new().reply(HttpReply::new(200, body("Medium", 50.0))),
        ScriptedTransport::new().fail("connection reset"),
        ScriptedTransport::new().time_out(15_000),
        ScriptedTransport::new().reply(HttpReply::new(503, "Service Unavailable")),
        ScriptedTransport::new().reply(HttpReply::new(200, r#"{"error": "no model"}"#)),
        ScriptedTransport::new().reply(HttpReply::new(200, "not json")),
    ];
    for transport in scripts {
        let (flow, surface, _) = run(transport, &FormState::new());
        assert_eq!(surface.controls.first(), Some(&SubmitControlView::LOADING));
        assert_restored(&surface);
        assert_ne!(flow.state(), SubmitState::Loading);
    }
}

#[test]
fn network_failure_shows_fixed_message_and_stays() {
    let (_, surface, outcome) = run(ScriptedTransport::new().fail("dns"), &FormState::new());
    assert!(matches!(outcome, SubmitOutcome::Failed(TriageError::Network(_))));
    assert_eq!(surface.last_error(), Some(text::CONNECTIVITY_ERROR));
    assert!(surface.pages.is_empty());
    assert!(surface.shell.visible_sections().is_empty());
}

#[test]
fn backend_error_is_shown_verbatim_and_stays() {
    let transport =
        ScriptedTransport::new().reply(HttpReply::new(200, r#"{"error": "no model"}"#));
    let (flow, surface, outcome) = run(transport, &FormState::new());
    assert!(matches!(outcome, SubmitOutcome::Failed(TriageError::BackendReported(_))));
    assert_eq!(surface.last_error(), Some("no model"));
    assert!(surface.pages.is_empty());
    assert_eq!(flow.state(), SubmitState::Error);
}

#[test]
fn high_severity_scenario_end_to_end() {
    let form = FormState::new().with("fever", "1").with("headache", "1");
    let transport = ScriptedTransport::new().reply(HttpReply::new(200, body("High", 82.0)));
    let (flow, surface, outcome) = run(transport, &form);

    let sent: SymptomFeatures =
        serde_json::from_str(&flow.client().transport().requests()[0].body).unwrap();
    assert_eq!((sent.fever, sent.headache, sent.rash), (1, 1, 0));

    let SubmitOutcome::Shown(view) = outcome else {
        panic!("expected result to be shown");
    };
    assert_eq!(view.tier, SeverityTier::High);
    assert_eq!(view.title, text::TITLE_HIGH);
    assert_eq!(view.progress.label, "82%");
    assert_eq!(view.progress.width, "82%");
    assert_eq!(view.progress.tone, Tone::Danger);
    assert!(view.advice.label.contains("82"));
    assert_eq!(view.advice.text, "a");

    assert_eq!(surface.results.len(), 1);
    assert_eq!(surface.pages, vec![PageId::new("result")]);
    assert_eq!(surface.shell.visible_sections(), vec![PageId::new("result")]);
    assert_eq!(surface.shell.fragment(), "#result");
    assert_restored(&surface);
}

#[test]
fn breakdown_rendered_only_when_present() {
    let with = serde_json::json!({
        "severity_level": "Low", "probability": 30, "message": "m", "medical_advice": "a",
        "disease_breakdown": {"dengue": 60, "malaria": 10, "normal": 30}
    })
    .to_string();
    let (_, surface, _) = run(
        ScriptedTransport::new().reply(HttpReply::new(200, with)),
        &FormState::new(),
    );
    let rows = surface.results[0].breakdown.clone().unwrap();
    let values: Vec<_> = rows.iter().map(|r| r.value.clone()).collect();
    assert_eq!(values, ["60%", "10%", "30%"]);

    let (_, surface, _) = run(
        ScriptedTransport::new().reply(HttpReply::new(200, body("Low", 30.0))),
        &FormState::new(),
    );
    assert!(surface.results[0].breakdown.is_none());
}

#[test]
fn breakdown_from_previous_submit_does_not_carry_over() {
    let with = serde_json::json!({
        "severity_level": "High", "probability": 60, "message": "m", "medical_advice": "a",
        "disease_breakdown": {"dengue": 60, "malaria": 10, "normal": 30}
    })
    .to_string();
    let transport = ScriptedTransport::new()
        .reply(HttpReply::new(200, with))
        .reply(HttpReply::new(200, body("Low", 12.0)));
    let config = ClientConfig::default();
    let flow = DiagnosisFlow::new(transport, &config);
    let mut surface = RecordingSurface::with_navigator(Navigator::from_config(&config));

    let first = pollster::block_on(flow.submit(&FormState::new(), &mut surface));
    let second = pollster::block_on(flow.submit(&FormState::new(), &mut surface));

    assert!(first.is_shown() && second.is_shown());
    assert_eq!(surface.results.len(), 2);
    assert!(surface.results[0].breakdown.is_some());
    assert!(surface.results[1].breakdown.is_none());
    assert_eq!(surface.results[1].progress.label, "12%");
}

#[test]
fn fill_color_ignores_severity_label() {
    for (severity, probability, tone) in [
        ("Low", 80.0, Tone::Danger),
        ("High", 50.0, Tone::Warning),
        ("High", 10.0, Tone::Success),
    ] {
        let (_, surface, _) = run(
            ScriptedTransport::new().reply(HttpReply::new(200, body(severity, probability))),
            &FormState::new(),
        );
        assert_eq!(surface.results[0].progress.tone, tone);
    }
}

proptest! {
    #[test]
    fn prop_tier_depends_only_on_label(probability in -10.0f64..150.0, label in prop_oneof![
        Just("High".to_string()),
        Just("Medium".to_string()),
        "[A-Za-z]{0,8}",
    ]) {
        let (_, surface, _) = run(
            ScriptedTransport::new().reply(HttpReply::new(200, body(&label, probability))),
            &FormState::new(),
        );
        let expected = match label.as_str() {
            "High" => SeverityTier::High,
            "Medium" => SeverityTier::Medium,
            _ => SeverityTier::Low,
        };
        prop_assert_eq!(surface.results[0].tier, expected);
    }
}
