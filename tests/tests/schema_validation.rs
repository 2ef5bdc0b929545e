//! Configuration errors surface when the database is built or when an
//! accessor resolves its relation.

use tests::prelude::*;

use tether::{persist, BelongsTo, HasMany, HasOne, Query};

#[derive(Debug, Default, tether::Model)]
#[has_many(stories: Story, key = id, references = author_id)]
struct User {
    #[key]
    #[auto]
    id: i64,
}

#[derive(Debug, Default, tether::Model)]
#[belongs_to(author: User, key = author_id, references = id)]
struct Story {
    #[key]
    #[auto]
    id: i64,

    author_id: i64,
}

#[derive(Debug, Default, tether::Model)]
#[belongs_to(owner: User, key = owner_name, references = id)]
struct Pet {
    #[key]
    #[auto]
    id: i64,

    owner_name: String,
}

#[derive(Debug, Default, tether::Model)]
#[has_many(stories: Story, key = id, references = writer_id)]
struct Editor {
    #[key]
    #[auto]
    id: i64,
}

async fn unregistered_target(test: &mut DbTest) {
    let err = test.try_setup_db(models!(User)).await.unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
    assert!(err.to_string().contains("relation `stories` on model `User`"), "{err}");
}

async fn key_type_mismatch(test: &mut DbTest) {
    let err = test.try_setup_db(models!(User, Story, Pet)).await.unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
    assert!(err.to_string().contains("key type mismatch"), "{err}");
}

async fn unknown_referenced_field(test: &mut DbTest) {
    let err = test
        .try_setup_db(models!(User, Story, Editor))
        .await
        .unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
    assert!(err.to_string().contains("unknown field `writer_id`"), "{err}");
}

async fn accessor_checks_kind_and_name(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    // Declared, but as `has_many`
    let err = HasOne::<User, Story>::new(&user, "stories")
        .get(&mut db)
        .await
        .unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");

    let err = HasMany::<User, Story>::new(&user, "posts")
        .all(&mut db, Query::new())
        .await
        .unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
    assert!(err.to_string().contains("relation `posts` not declared on model `User`"), "{err}");

    // Right name, wrong target type
    let mut story = Story::default();
    let err = BelongsTo::<Story, Story>::new(&mut story, "author")
        .get(&mut db)
        .await
        .unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");

    // Nothing ran against the database
    assert_empty!(test.log().statements().into_iter().filter(|s| s.is_select()).collect::<Vec<_>>());
}

tests!(
    unregistered_target,
    key_type_mismatch,
    unknown_referenced_field,
    accessor_checks_kind_and_name,
);
