use std::io::Cursor;

use pretty_assertions::assert_eq;
use stopwatcher_core::api::{
    fallback_path, save_json, AudioMode, ManifestDraft, ManifestError, Prompter, Questionnaire,
};
use tempfile::TempDir;

fn prompter(lines: &[&str]) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = lines.join("\n");
    input.push('\n');
    Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

const FULL: &[&str] = &[
    "2024-01-01",
    "09:30",
    "P07",
    "AB",
    "biology",
    "2",
    "yes",
    "female",
    "2",
    "4",
    "1",
    "1", // duplicate, asked again
    "3",
    "1920x1080",
    "60 cm",
    "120",
    "",
    "TWO",
];

#[test]
fn duplicate_profile_is_rejected_then_accepted() {
    let q = Questionnaire::new();
    let mut p = prompter(FULL);
    let manifest = q.run(&mut p, "2024-01-01T09:31:00".into()).unwrap();

    assert_eq!(manifest.subject_knowledge_topics, [2, 4]);
    assert_eq!(manifest.behavioral_profiles, [1, 3]);
    assert_eq!(manifest.audio_recording, AudioMode::Two);
    assert!(manifest.recruitment_form_completed);
    assert_eq!(manifest.additional_notes, "");

    let out = String::from_utf8(p.into_output()).unwrap();
    assert_eq!(out.matches("Enter second behavioral profile (1-5): ").count(), 2);
    assert_eq!(out.matches("Enter first behavioral profile (1-5): ").count(), 1);
    assert!(out.contains("The second number cannot be the same as the first."));
}

#[test]
fn saved_manifest_keeps_key_order() {
    let temp = TempDir::new().unwrap();
    let q = Questionnaire::new();
    let manifest = q.run(&mut prompter(FULL), "2024-01-01T09:31:00".into()).unwrap();

    let path = temp.path().join("participant_P07.json");
    save_json(&path, &manifest).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    let keys: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("    \""))
        .filter_map(|l| l.trim().split('"').nth(1))
        .collect();
    assert_eq!(
        keys,
        vec![
            "date",
            "current_time",
            "participant_id",
            "participant_initials",
            "assigned_subject_knowledge",
            "methods_of_analysis",
            "recruitment_form_completed",
            "participant_gender",
            "subject_knowledge_topics",
            "behavioral_profiles",
            "screen_resolution",
            "screen_distance",
            "sampling_rate",
            "additional_notes",
            "audio_recording",
            "generated_at",
            "generator_version",
        ]
    );
    assert!(text.contains("    \"audio_recording\": \"two\""));
}

#[test]
fn interrupted_run_leaves_partial_draft() {
    let temp = TempDir::new().unwrap();
    let q = Questionnaire::new();
    let handle = q.draft_handle();

    let err = q
        .run(&mut prompter(&["2024-01-01", "bad", "09:30", "P07"]), "now".into())
        .unwrap_err();
    assert!(matches!(err, ManifestError::Interrupted));

    let draft = handle.lock().unwrap().clone();
    assert_eq!(
        draft,
        ManifestDraft {
            date: Some("2024-01-01".into()),
            current_time: Some("09:30".into()),
            participant_id: Some("P07".into()),
            ..Default::default()
        }
    );

    let path = fallback_path(temp.path(), chrono::Local::now());
    save_json(&path, &draft).unwrap();
    let back: ManifestDraft =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, draft);
}
