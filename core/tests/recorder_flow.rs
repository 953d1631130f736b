mod common;

use common::{at, data_rows, files_in, recorder_in, type_text};
use pretty_assertions::assert_eq;
use stopwatcher_core::api::{
    BackupStore, DialogKind, ExportOutcome, KeyInput, RecorderEvent, SessionStatus,
};
use tempfile::TempDir;

#[test]
fn three_marks_export_in_order_with_millis() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), None);

    let events = rec.handle_key(KeyInput::Enter, at(0));
    assert_eq!(events, vec![RecorderEvent::DialogOpened(DialogKind::ParticipantId)]);

    type_text(&mut rec, "P07", at(100));
    let events = rec.handle_key(KeyInput::Enter, at(200));
    assert_eq!(
        events,
        vec![
            RecorderEvent::ParticipantAssigned("P07".into()),
            RecorderEvent::DialogOpened(DialogKind::Annotation),
        ]
    );
    type_text(&mut rec, "baseline, eyes open", at(300));
    rec.handle_key(KeyInput::Enter, at(400));

    rec.handle_key(KeyInput::Char('e'), at(5_250));
    rec.handle_key(KeyInput::Esc, at(5_300));

    rec.handle_key(KeyInput::Enter, at(12_500));
    rec.handle_key(KeyInput::Enter, at(12_600));

    let events = rec.handle_key(KeyInput::Char('r'), at(20_000));
    let Some(RecorderEvent::Ended(report)) = events.last() else {
        panic!("expected Ended, got {events:?}");
    };
    assert_eq!(report.mark_count, 3);
    assert_eq!(report.participant_id.as_deref(), Some("P07"));
    let ExportOutcome::Written(path) = &report.export else {
        panic!("expected a written export, got {:?}", report.export);
    };
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("session_recording_P07_20240101_"));

    let csv = std::fs::read_to_string(path).unwrap();
    assert!(csv.starts_with("# Session Recording for Participant: P07\n"));
    assert!(csv.contains("# Date: 2024-01-01\n"));
    assert!(csv.contains("# Total Timestamps: 3\n"));
    assert_eq!(
        data_rows(&csv),
        vec![
            "1,2024-01-01,10,0,0,0,2024-01-01T10:00:00.000,\"baseline, eyes open\"",
            "2,2024-01-01,10,0,5,250,2024-01-01T10:00:05.250,",
            "3,2024-01-01,10,0,12,500,2024-01-01T10:00:12.500,",
        ]
    );
    assert_eq!(rec.session().status(), SessionStatus::Ended);
}

#[test]
fn zero_marks_produce_no_export() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), Some("P01"));

    let report = rec.end(at(1_000)).unwrap();
    assert_eq!(report.export, ExportOutcome::Skipped);
    assert_eq!(report.mark_count, 0);
    assert!(files_in(&temp.path().join("exports")).is_empty());
}

#[test]
fn end_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), Some("P01"));
    rec.handle_key(KeyInput::Enter, at(0));
    rec.handle_key(KeyInput::Enter, at(10));

    assert!(rec.handle_key(KeyInput::Interrupt, at(100)).len() == 1);
    assert!(rec.end(at(200)).is_none());
    assert!(rec.handle_key(KeyInput::Char('r'), at(300)).is_empty());
    assert!(rec.handle_key(KeyInput::Enter, at(400)).is_empty());

    assert_eq!(files_in(&temp.path().join("exports")).len(), 1);
    assert_eq!(rec.report().unwrap().mark_count, 1);
}

#[test]
fn end_key_is_text_while_dialog_is_open() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), Some("P01"));
    rec.handle_key(KeyInput::Enter, at(0));
    assert!(rec.dialog_open());

    type_text(&mut rec, "red", at(10));
    assert!(rec.session().is_recording());
    assert_eq!(rec.dialog().unwrap().input().text(), "red");

    // a second mark key inside the dialog is typed, not recorded
    rec.handle_key(KeyInput::Char('e'), at(20));
    assert_eq!(rec.session().marks().len(), 1);

    let events = rec.handle_key(KeyInput::Enter, at(30));
    assert!(matches!(
        events.first(),
        Some(RecorderEvent::MarkRecorded { sequence_id: 1, .. })
    ));
    assert_eq!(rec.session().marks()[0].annotation, "rede");
}

#[test]
fn interrupt_closes_even_with_dialog_open_and_keeps_typed_note() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), Some("P01"));
    rec.handle_key(KeyInput::Enter, at(0));
    type_text(&mut rec, "half", at(10));

    let events = rec.handle_key(KeyInput::Interrupt, at(20));
    let Some(RecorderEvent::Ended(report)) = events.last() else {
        panic!("expected Ended, got {events:?}");
    };
    let ExportOutcome::Written(path) = &report.export else {
        panic!("expected a written export");
    };
    let csv = std::fs::read_to_string(path).unwrap();
    assert!(data_rows(&csv)[0].ends_with(",half"));
}

#[test]
fn empty_participant_id_discards_the_mark() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), None);

    rec.handle_key(KeyInput::Enter, at(0));
    type_text(&mut rec, "   ", at(10));
    let events = rec.handle_key(KeyInput::Enter, at(20));
    assert_eq!(events, vec![RecorderEvent::ParticipantMissing]);
    assert!(rec.session().marks().is_empty());
    assert!(!rec.dialog_open());

    rec.handle_key(KeyInput::Enter, at(30));
    let events = rec.handle_key(KeyInput::Esc, at(40));
    assert_eq!(events, vec![RecorderEvent::ParticipantMissing]);

    let report = rec.end(at(50)).unwrap();
    assert_eq!(report.export, ExportOutcome::Skipped);
    assert_eq!(report.participant_id, None);
}

#[test]
fn backup_tracks_every_finalized_mark() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), Some("P07"));
    let store = BackupStore::new(temp.path().join("backups"));

    for n in 1..=4u32 {
        let t = at(n as i64 * 1_000);
        rec.handle_key(KeyInput::Enter, t);

        // pending mark is not in the backup yet
        let before = store.load("P07").unwrap().map(|s| s.marks.len()).unwrap_or(0);
        assert_eq!(before, (n - 1) as usize);
        assert!(before <= rec.session().marks().len());

        let events = rec.handle_key(KeyInput::Enter, t);
        assert!(events
            .iter()
            .any(|e| matches!(e, RecorderEvent::BackupWritten(_))));
        let snapshot = store.load("P07").unwrap().unwrap();
        assert_eq!(snapshot.marks.len(), rec.session().marks().len());
        assert_eq!(snapshot.marks.last().unwrap().sequence_id, n);
    }
    assert_eq!(rec.last_backup(), Some(&store.path_for("P07")));
}

#[test]
fn export_failure_reports_backup_location() {
    let temp = TempDir::new().unwrap();
    // a file where the export directory should be
    std::fs::write(temp.path().join("exports"), b"not a dir").unwrap();
    let mut rec = recorder_in(temp.path(), Some("P07"));
    rec.handle_key(KeyInput::Enter, at(0));
    rec.handle_key(KeyInput::Enter, at(10));

    let report = rec.end(at(20)).unwrap();
    match report.export {
        ExportOutcome::Failed { backup, .. } => {
            assert_eq!(
                backup,
                Some(BackupStore::new(temp.path().join("backups")).path_for("P07"))
            );
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn failed_backup_at_close_is_reported() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), Some("P07"));
    rec.handle_key(KeyInput::Enter, at(0));
    rec.handle_key(KeyInput::Enter, at(10));
    assert!(rec.last_backup().is_some());

    // backup directory replaced by a plain file before the second mark is finalized
    let backups = temp.path().join("backups");
    std::fs::remove_dir_all(&backups).unwrap();
    std::fs::write(&backups, b"not a dir").unwrap();

    rec.handle_key(KeyInput::Enter, at(1_000));
    type_text(&mut rec, "last", at(1_010));
    let report = rec.end(at(1_020)).unwrap();

    assert_eq!(report.mark_count, 2);
    assert!(matches!(report.export, ExportOutcome::Written(_)));
    let error = report.backup_error.expect("final backup should have failed");
    assert!(error.contains("backup directory"), "{error}");
}

#[test]
fn clean_close_has_no_backup_error() {
    let temp = TempDir::new().unwrap();
    let mut rec = recorder_in(temp.path(), Some("P07"));
    rec.handle_key(KeyInput::Enter, at(0));
    type_text(&mut rec, "open", at(5));
    let report = rec.end(at(10)).unwrap();
    assert_eq!(report.backup_error, None);
    let snapshot = BackupStore::new(temp.path().join("backups"))
        .load("P07")
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.marks[0].annotation, "open");
}
