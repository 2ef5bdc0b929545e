//! `belongs_to`: the base row holds the foreign key.

use tests::{prelude::*, table_rows};

use tether::{persist, stmt::Type};
use tether_core::stmt::{Statement, Value};

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
struct User {
    #[key]
    #[auto]
    id: i64,

    name: String,
}

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
#[belongs_to(author: User, key = author_id, references = id)]
struct Story {
    #[key]
    #[auto]
    id: i64,

    title: String,

    author_id: Option<i64>,
}

async fn create_then_get(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut story = Story {
        title: "hello".into(),
        ..Default::default()
    };
    persist::create(&mut db, &mut story).await.unwrap();

    let mut author = User {
        name: "Ann".into(),
        ..Default::default()
    };
    story.author().create(&mut db, &mut author).await.unwrap();

    assert_ne!(author.id, 0);
    assert_eq!(story.author_id, Some(author.id));

    let found = story.author().get(&mut db).await.unwrap();
    assert_eq!(found, author);

    // The foreign key was persisted, not only set in memory
    let rows = table_rows(&mut db, "stories", &[("author_id", Type::I64)])
        .await
        .unwrap();
    assert_eq!(rows[0][0], Value::I64(author.id));
}

async fn set_writes_only_the_foreign_key(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut author = User::default();
    persist::create(&mut db, &mut author).await.unwrap();

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();
    story.title = "not saved".into();

    let mut log = test.log();
    log.clear();

    story.author().set(&mut db, &author).await.unwrap();

    let statements = log.statements();
    assert_eq!(statements.len(), 1);

    let Statement::Update(update) = &statements[0] else {
        panic!("expected update; actual={:?}", statements[0]);
    };

    let columns: Vec<_> = update.assignments.iter().map(|a| a.column.as_str()).collect();
    assert_eq!(columns, ["author_id"]);
}

async fn get_without_foreign_key_is_not_found(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();

    let err = story.author().get(&mut db).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");
}

async fn create_is_atomic(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();

    test.fail_on(FailPoint::update_of("stories"));

    let mut author = User::default();
    assert_err!(story.author().create(&mut db, &mut author).await);

    test.clear_fail_point();

    // The inserted user was rolled back with the failed link
    assert_empty!(table_rows(&mut db, "users", &[("id", Type::I64)]).await.unwrap());

    // So was the key pointing at it
    assert_eq!(story.author_id, None);
}

async fn set_on_missing_row_keeps_foreign_key(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut author = User::default();
    persist::create(&mut db, &mut author).await.unwrap();

    // Never inserted
    let mut story = Story {
        id: 99,
        ..Default::default()
    };

    let err = story.author().set(&mut db, &author).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");
    assert_eq!(story.author_id, None);
}

tests!(
    create_then_get,
    set_writes_only_the_foreign_key,
    get_without_foreign_key_is_not_found,
    create_is_atomic,
    set_on_missing_row_keeps_foreign_key,
);
