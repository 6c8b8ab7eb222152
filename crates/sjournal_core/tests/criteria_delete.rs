use rusqlite::Connection;
use sjournal_core::db::open_db_in_memory;
use sjournal_core::{JournalService, NewNote, NoteRepository, SqliteNoteRepository};

fn seeded(conn: &Connection, count: usize) -> JournalService<SqliteNoteRepository<'_>> {
    let service = JournalService::new(SqliteNoteRepository::try_new(conn).unwrap());
    for idx in 1..=count {
        service.add(NewNote::from_text(format!("note {idx}"))).unwrap();
    }
    service
}

fn remaining(service: &JournalService<SqliteNoteRepository<'_>>) -> Vec<i64> {
    let mut ids: Vec<i64> = service.fetch().unwrap().iter().map(|note| note.id).collect();
    ids.sort_unstable();
    ids
}

#[test]
fn exact_token_removes_only_that_note() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 5);

    let report = service.delete(&["3"]).unwrap();
    assert_eq!(report.removed, vec![3]);
    assert_eq!(remaining(&service), vec![1, 2, 4, 5]);
    assert_eq!(service.repo().get_note(3).unwrap(), None);
}

#[test]
fn trailing_separator_deletes_through_max_id() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 8);

    let report = service.delete(&["5-"]).unwrap();
    assert_eq!(report.removed, vec![5, 6, 7, 8]);
    assert_eq!(remaining(&service), vec![1, 2, 3, 4]);
}

#[test]
fn leading_separator_deletes_from_zero_and_tolerates_gaps() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 6);
    service.delete(&["2"]).unwrap();

    let report = service.delete(&["-3"]).unwrap();
    assert_eq!(report.removed, vec![1, 3]);
    assert!(report.skipped.is_empty());
    assert_eq!(remaining(&service), vec![4, 5, 6]);
}

#[test]
fn leading_separator_bound_beyond_max_clears_everything() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 3);

    service.delete(&["-1000000000"]).unwrap();
    assert!(remaining(&service).is_empty());
}

#[test]
fn deleting_absent_id_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 2);

    let report = service.delete(&["9"]).unwrap();
    assert!(report.removed.is_empty());
    assert_eq!(remaining(&service), vec![1, 2]);
}

#[test]
fn open_ranges_on_empty_journal_are_noops() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 0);

    let report = service.delete(&["4-", "-4", "1"]).unwrap();
    assert!(report.removed.is_empty());
    assert_eq!(service.repo().max_id().unwrap(), None);
}

#[test]
fn empty_criteria_list_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 2);

    let report = service.delete::<&str>(&[]).unwrap();
    assert!(report.removed.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(remaining(&service), vec![1, 2]);
}

#[test]
fn quirk_unrecognized_tokens_are_skipped_not_raised() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 3);

    let report = service.delete(&["abc", "x2", "1"]).unwrap();
    assert_eq!(report.skipped, vec!["abc".to_string(), "x2".to_string()]);
    assert_eq!(report.removed, vec![1]);
    assert_eq!(remaining(&service), vec![2, 3]);
}

#[test]
fn quirk_dash_between_numbers_is_not_a_closed_range() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 7);

    // `3-5` reads as "everything up to 5", so notes 1 and 2 go too.
    service.delete(&["3-5"]).unwrap();
    assert_eq!(remaining(&service), vec![6, 7]);
}

#[test]
fn upper_range_is_resolved_against_max_at_token_time() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, 6);

    // `6` removes the max first, so `4-` then only reaches the new max.
    let report = service.delete(&["6", "4-"]).unwrap();
    assert_eq!(report.removed, vec![6, 4, 5]);
    assert_eq!(remaining(&service), vec![1, 2, 3]);
}
