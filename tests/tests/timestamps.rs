use tests::prelude::*;

use tether::persist;

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
#[has_one(note: Note, key = id, references = owner_id)]
struct Owner {
    #[key]
    #[auto]
    id: i64,
}

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
struct Note {
    #[key]
    #[auto]
    id: i64,

    body: String,

    owner_id: Option<i64>,

    #[auto]
    created_at: jiff::Timestamp,

    #[auto]
    updated_at: jiff::Timestamp,
}

async fn create_stamps_both(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Owner, Note)).await;

    let mut note = Note::default();
    persist::create(&mut db, &mut note).await.unwrap();

    assert_ne!(note.created_at, jiff::Timestamp::default());
    assert_eq!(note.created_at, note.updated_at);
}

async fn update_stamps_updated_at_only(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Owner, Note)).await;

    let mut note = Note::default();
    persist::create(&mut db, &mut note).await.unwrap();
    let created_at = note.created_at;

    note.body = "edited".into();
    let count = persist::update(&mut note).exec(&mut db).await.unwrap();

    assert_eq!(count, 1);
    assert_eq!(note.created_at, created_at);
    assert!(note.updated_at >= created_at);
}

async fn scoped_update_still_stamps_updated_at(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Owner, Note)).await;

    let mut owner = Owner::default();
    persist::create(&mut db, &mut owner).await.unwrap();

    let mut note = Note::default();
    persist::create(&mut db, &mut note).await.unwrap();

    let mut log = test.log();
    log.clear();

    owner.note().set(&mut db, &mut note).await.unwrap();

    let statements = log.statements();
    let update = statements[0].as_update().unwrap();
    let mut columns: Vec<_> = update.assignments.iter().map(|a| a.column.as_str()).collect();
    columns.sort();
    assert_eq!(columns, ["owner_id", "updated_at"]);

    // The stamp written is the one kept in memory
    let stored = owner.note().get(&mut db).await.unwrap();
    assert_eq!(stored.updated_at, note.updated_at);
}

async fn update_of_missing_row_keeps_stamp(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Owner, Note)).await;

    let mut note = Note {
        id: 42,
        ..Default::default()
    };

    let count = persist::update(&mut note).exec(&mut db).await.unwrap();
    assert_eq!(count, 0);
    assert_eq!(note.updated_at, jiff::Timestamp::default());
}

tests!(
    create_stamps_both,
    update_stamps_updated_at_only,
    scoped_update_still_stamps_updated_at,
    update_of_missing_row_keeps_stamp,
);
