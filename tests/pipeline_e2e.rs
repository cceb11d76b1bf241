//! End-to-end checks against the shipped asset bundle.

use std::path::PathBuf;

use wellness_cluster::pipeline::InferencePipeline;
use wellness_cluster::report::{self, layout};
use wellness_cluster::{AppConfig, AppState, Error, FormController, ResponseRecord};

fn assets() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn state() -> AppState {
    AppState::load(&AppConfig::from_dir(assets())).unwrap()
}

fn example_record() -> ResponseRecord {
    ResponseRecord::new()
        .with("family_history", "Yes")
        .with("treatment", "No")
        .with("Growing_Stress", "Yes")
        .with("Changes_Habits", "No")
        .with("Mood_Swings", "Yes")
        .with("Coping_Struggles", "No")
        .with("Work_Interest", "High")
        .with("Social_Weakness", "No")
}

#[test]
fn example_record_lands_in_rising_stress_cluster() {
    let state = state();
    let form = FormController::new(&state);
    let prediction = form.predict(&example_record()).unwrap();

    assert_eq!(prediction.cluster, 3);
    let expected = state.interpretations.interpretation(3).unwrap();
    assert_eq!(&prediction.interpretation, expected);
    assert_eq!(prediction.interpretation.title, "Rising Stress Signals");
    assert_eq!(prediction.interpretation.suggestions.len(), 5);

    let profile = prediction.profile.unwrap();
    assert_eq!(profile.cluster, 3);
    assert!(profile.fields.contains(&("Summary".to_string(), "Rising stress without treatment".to_string())));
}

#[test]
fn known_records_cover_every_cluster() {
    let state = state();
    let form = FormController::new(&state);

    let cases = [
        (["Yes", "Yes", "Yes", "Yes", "Maybe", "Yes", "High", "No"], 0),
        (["No", "No", "Maybe", "Maybe", "Maybe", "No", "Low", "Maybe"], 1),
        (["No", "No", "No", "No", "No", "No", "Medium", "No"], 2),
        (["Yes", "Yes", "Yes", "Yes", "Yes", "Yes", "High", "Yes"], 3),
    ];
    let ids: Vec<String> = state.catalog.questions().iter().map(|q| q.id.clone()).collect();

    for (values, expected) in cases {
        let record: ResponseRecord = ids.iter().cloned().zip(values).collect();
        assert_eq!(form.predict(&record).unwrap().cluster, expected, "{values:?}");
    }
}

#[test]
fn assignment_is_deterministic() {
    let state = state();
    let record = example_record();
    let first = state.pipeline.assign_cluster(&record).unwrap();
    for _ in 0..10 {
        assert_eq!(state.pipeline.assign_cluster(&record).unwrap(), first);
    }

    let reloaded = InferencePipeline::load(
        assets().join("mca_transformer.json"),
        assets().join("scaler.json"),
        assets().join("kmeans_model.json"),
    )
    .unwrap();
    assert_eq!(reloaded.assign_cluster(&record).unwrap(), first);
}

#[test]
fn every_cluster_has_complete_interpretation() {
    let state = state();
    for id in 0..state.pipeline.n_clusters() {
        let interp = state.interpretations.interpretation(id).unwrap();
        assert!(!interp.title.is_empty());
        assert!(!interp.description.is_empty());
        assert!(!interp.suggestions.is_empty());
    }
}

#[test]
fn every_catalog_record_is_assignable() {
    let state = state();
    let form = FormController::new(&state);
    let questions = state.catalog.questions();

    // Vary one question at a time away from the defaults.
    for q in questions {
        for value in &q.domain {
            let record = form.record_from_pairs([(q.id.as_str(), value.as_str())]).unwrap();
            let cluster = state.pipeline.assign_cluster(&record).unwrap();
            assert!(cluster < state.pipeline.n_clusters());
        }
    }
}

#[test]
fn unseen_category_is_a_hard_failure() {
    let state = state();
    let record = example_record().with("Work_Interest", "Extreme");
    assert!(matches!(
        state.pipeline.assign_cluster(&record),
        Err(Error::UnseenCategory { .. })
    ));
}

#[test]
fn shipped_interpretations_fit_on_one_page() {
    let state = state();
    let form = FormController::new(&state);
    let answers = form.defaults();
    for id in 0..state.pipeline.n_clusters() {
        let interp = state.interpretations.interpretation(id).unwrap();
        let pages = layout::layout_report(&layout::ReportContent {
            interpretation: interp,
            answers: &answers,
            requester: Some("Alex"),
            generated_at: fixed_timestamp(),
        });
        assert_eq!(pages.len(), 1);
    }
}

#[test]
fn submission_report_parses_as_pdf() {
    let state = state();
    let form = FormController::new(&state);
    let submission = form.submit(&example_record(), Some("Alex")).unwrap();

    assert_eq!(submission.file_name, "Wellness_Report_Alex.pdf");
    let doc = lopdf::Document::load_mem(&submission.report).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    let direct = report::render(&submission.prediction.interpretation, &example_record(), None).unwrap();
    assert_eq!(direct.position(), 0);
}

fn fixed_timestamp() -> chrono::NaiveDateTime {
    chrono::NaiveDateTime::parse_from_str("2026-10-16 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}
