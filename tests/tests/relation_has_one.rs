//! `has_one`: the related row holds the foreign key back to the base row.

use tests::{prelude::*, table_rows};

use tether::{persist, stmt::Type};
use tether_core::stmt::{Statement, Value};

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
#[has_one(story: Story, key = id, references = author_id)]
#[has_one(profile: Profile, key = id, references = user_id)]
struct User {
    #[key]
    #[auto]
    id: i64,

    name: String,
}

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
struct Story {
    #[key]
    #[auto]
    id: i64,

    title: String,

    author_id: Option<i64>,
}

/// Every non-key column is the foreign key.
#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
struct Profile {
    #[key]
    #[auto]
    id: i64,

    user_id: i64,
}

fn updated_columns(log: &ExecLog) -> Vec<Vec<String>> {
    log.statements()
        .into_iter()
        .filter_map(|stmt| match stmt {
            Statement::Update(update) => Some(
                update
                    .assignments
                    .into_iter()
                    .map(|assignment| assignment.column)
                    .collect(),
            ),
            _ => None,
        })
        .collect()
}

async fn set_writes_only_the_foreign_key(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story, Profile)).await;

    let mut user = User {
        name: "Ann".into(),
        ..Default::default()
    };
    persist::create(&mut db, &mut user).await.unwrap();
    assert_eq!(user.id, 1);

    let mut story = Story {
        id: 5,
        title: "X".into(),
        author_id: None,
    };
    persist::create(&mut db, &mut story).await.unwrap();

    // A stale title in memory must not be written by `set`
    story.title = "not saved".into();

    let mut log = test.log();
    log.clear();

    assert_ok!(user.story().set(&mut db, &mut story).await);
    assert_eq!(story.author_id, Some(1));
    assert_eq!(updated_columns(&log), [vec!["author_id".to_string()]]);

    let found = user.story().get(&mut db).await.unwrap();
    assert_eq!(
        found,
        Story {
            id: 5,
            title: "X".into(),
            author_id: Some(1),
        }
    );
}

async fn set_is_idempotent(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story, Profile)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    let mut story = Story {
        title: "X".into(),
        ..Default::default()
    };
    persist::create(&mut db, &mut story).await.unwrap();

    let mut log = test.log();

    for _ in 0..2 {
        log.clear();
        user.story().set(&mut db, &mut story).await.unwrap();
        assert_eq!(updated_columns(&log), [vec!["author_id".to_string()]]);
    }

    let rows = table_rows(&mut db, "stories", &[("id", Type::I64), ("author_id", Type::I64)])
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Value::I64(story.id));
    assert_eq!(rows[0][1], Value::I64(user.id));
}

async fn set_missing_row_is_not_found(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story, Profile)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    // Never inserted
    let mut story = Story {
        id: 99,
        ..Default::default()
    };

    let err = user.story().set(&mut db, &mut story).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");

    // The projected key is not left behind in memory
    assert_eq!(story.author_id, None);
}

async fn get_without_related_row_is_not_found(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story, Profile)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    let err = user.story().get(&mut db).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");
}

async fn create_update_delete(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story, Profile)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    let mut story = Story {
        title: "draft".into(),
        ..Default::default()
    };
    user.story().create(&mut db, &mut story).await.unwrap();
    assert_ne!(story.id, 0);
    assert_eq!(story.author_id, Some(user.id));

    story.title = "final".into();
    user.story().update(&mut db, &mut story).await.unwrap();
    assert_eq!(user.story().get(&mut db).await.unwrap().title, "final");

    user.story().delete(&mut db, &story).await.unwrap();
    assert_err!(user.story().get(&mut db).await);
    assert_empty!(table_rows(&mut db, "stories", &[("id", Type::I64)]).await.unwrap());
}

async fn update_and_delete_require_linkage(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story, Profile)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    let mut other = Story {
        title: "someone else's".into(),
        ..Default::default()
    };
    persist::create(&mut db, &mut other).await.unwrap();

    other.title = "hijacked".into();
    let err = user.story().update(&mut db, &mut other).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");

    let err = user.story().delete(&mut db, &other).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");

    let rows = table_rows(&mut db, "stories", &[("title", Type::String)])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Value::from("someone else's"));
}

async fn update_with_only_key_columns_checks_linkage(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story, Profile)).await;

    let mut ann = User::default();
    let mut bob = User::default();
    persist::create(&mut db, &mut ann).await.unwrap();
    persist::create(&mut db, &mut bob).await.unwrap();

    let mut profile = Profile::default();
    ann.profile().create(&mut db, &mut profile).await.unwrap();

    let mut log = test.log();
    log.clear();

    // Nothing is left to write once the foreign key is excluded
    assert_ok!(ann.profile().update(&mut db, &mut profile).await);
    assert_empty!(updated_columns(&log));

    let err = bob.profile().update(&mut db, &mut profile).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");

    assert_eq!(profile.user_id, ann.id);
}

tests!(
    set_writes_only_the_foreign_key,
    set_is_idempotent,
    set_missing_row_is_not_found,
    get_without_related_row_is_not_found,
    create_update_delete,
    update_and_delete_require_linkage,
    update_with_only_key_columns_checks_linkage,
);
