use carecard_core::db::open_db_in_memory;
use carecard_core::{
    FieldLimits, Record, RecordField, RecordService, RecordStore, RecordValidationError,
    RepoError, SqliteRecordRepository,
};
use rusqlite::Connection;

fn insert_raw(conn: &Connection, identity: &str) {
    conn.execute("INSERT INTO records (identity) VALUES (?1);", [identity])
        .unwrap();
}

#[test]
fn save_and_fetch_ignore_identity_case() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, FieldLimits::default());

    let mut record = Record::new("Monstera deliciosa");
    record.set_common_name("Swiss Cheese Plant");
    record.set_field(RecordField::Light, "Bright indirect");
    repo.save(&record).unwrap();

    let loaded = repo.fetch("MONSTERA DELICIOSA").unwrap().unwrap();
    assert_eq!(loaded, record);
    assert!(repo.fetch("Monstera adansonii").unwrap().is_none());
}

#[test]
fn saving_an_existing_identity_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, FieldLimits::default());

    let mut record = Record::new("Hoya carnosa");
    record.set_field(RecordField::Water, "Weekly");
    repo.save(&record).unwrap();

    record.set_field(RecordField::Water, "When dry");
    record.card_path = Some("cards/hoya_carnosa.pdf".to_string());
    repo.save(&record).unwrap();

    let all = repo.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].field(RecordField::Water), Some("When dry"));
    assert_eq!(all[0].card_path.as_deref(), Some("cards/hoya_carnosa.pdf"));
}

#[test]
fn save_rejects_unnormalized_or_unbounded_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, FieldLimits::default());

    let raw = Record {
        identity: "hoya CARNOSA".to_string(),
        ..Record::default()
    };
    assert!(matches!(
        repo.save(&raw),
        Err(RepoError::Validation(
            RecordValidationError::IdentityNotNormalized { .. }
        ))
    ));

    let mut long = Record::new("Hoya carnosa");
    long.toxicity = Some("t".repeat(151));
    assert!(matches!(
        repo.save(&long),
        Err(RepoError::Validation(RecordValidationError::FieldTooLong {
            field: "toxicity",
            ..
        }))
    ));

    assert!(matches!(
        repo.save(&Record::default()),
        Err(RepoError::Validation(RecordValidationError::EmptyIdentity))
    ));
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn list_returns_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, FieldLimits::default());

    for name in ["Hoya carnosa", "Ficus elastica", "Zea mays"] {
        repo.save(&Record::new(name)).unwrap();
    }

    let identities: Vec<String> = repo
        .list()
        .unwrap()
        .into_iter()
        .map(|record| record.identity)
        .collect();
    assert_eq!(identities, vec!["Zea mays", "Ficus elastica", "Hoya carnosa"]);
}

#[test]
fn rename_identity_reports_missing_and_conflicting_keys() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, FieldLimits::default());
    repo.save(&Record::new("Hoya carnosa")).unwrap();
    insert_raw(&conn, "HOYA  kerrii");

    assert!(matches!(
        repo.rename_identity("Hoya pubicalyx", "Hoya pubicalyx"),
        Err(RepoError::NotFound(_))
    ));
    assert!(matches!(
        repo.rename_identity("HOYA  kerrii", "Hoya carnosa"),
        Err(RepoError::IdentityConflict(_))
    ));

    repo.rename_identity("HOYA  kerrii", "Hoya kerrii").unwrap();
    assert!(repo.fetch("hoya kerrii").unwrap().is_some());
}

#[test]
fn service_save_normalizes_and_bounds() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(
        SqliteRecordRepository::new(&conn, FieldLimits::default()),
        FieldLimits::default(),
    );

    let mut record = Record {
        identity: "  hoya   CARNOSA ".to_string(),
        ..Record::default()
    };
    record.set_field(RecordField::Water, "Let the soil dry out fully. ".repeat(12));

    let stored = service.save_record(record).unwrap();
    assert_eq!(stored.identity, "Hoya carnosa");
    assert!(stored.field(RecordField::Water).unwrap().chars().count() <= 180);

    let loaded = service.get_record("Hoya carnosa").unwrap().unwrap();
    assert_eq!(loaded, stored);
}

#[test]
fn records_missing_finds_gaps_for_backfill() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(
        SqliteRecordRepository::new(&conn, FieldLimits::default()),
        FieldLimits::default(),
    );

    let mut hoya = Record::new("Hoya carnosa");
    hoya.set_field(RecordField::Humidity, "40-60%");
    service.save_record(hoya).unwrap();
    service.save_record(Record::new("Ficus elastica")).unwrap();

    let missing: Vec<String> = service
        .records_missing(RecordField::Humidity)
        .unwrap()
        .into_iter()
        .map(|record| record.identity)
        .collect();
    assert_eq!(missing, vec!["Ficus elastica"]);
    assert_eq!(service.records_missing(RecordField::Light).unwrap().len(), 2);
}

#[test]
fn identity_migration_renames_once_and_reports_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(
        SqliteRecordRepository::new(&conn, FieldLimits::default()),
        FieldLimits::default(),
    );
    service.save_record(Record::new("Hoya carnosa")).unwrap();
    insert_raw(&conn, "MONSTERA DELICIOSA 'thai constellation'");
    insert_raw(&conn, "hoya  carnosa");

    let first = service.normalize_identities().unwrap();
    assert_eq!(
        first.renamed,
        vec![(
            "MONSTERA DELICIOSA 'thai constellation'".to_string(),
            "Monstera deliciosa 'Thai Constellation'".to_string()
        )]
    );
    assert_eq!(
        first.conflicts,
        vec![("hoya  carnosa".to_string(), "Hoya carnosa".to_string())]
    );

    let second = service.normalize_identities().unwrap();
    assert!(second.renamed.is_empty());
    assert_eq!(second.conflicts, first.conflicts);

    assert!(service
        .get_record("monstera deliciosa 'THAI CONSTELLATION'")
        .unwrap()
        .is_some());
    assert_eq!(service.list_records().unwrap().len(), 3);
}
