//! `many_to_many`: base and related rows are linked through a join table.

use tests::{prelude::*, table_rows};

use tether::{persist, stmt::Type, HasMany, Query};
use tether_core::stmt::{Value, ValueRecord};

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
#[many_to_many(tags: Tag, through = "story_tags", key = id, join_key = story_id, join_references = tag_id, references = id)]
struct Story {
    #[key]
    #[auto]
    id: i64,

    title: String,
}

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
struct Tag {
    #[key]
    #[auto]
    id: i64,

    name: String,
}

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
#[many_to_many(books: Book, through = "shelf_books", key = slug, join_key = shelf_slug, join_references = book_isbn, references = isbn)]
struct Shelf {
    #[key]
    #[auto]
    id: i64,

    slug: Option<String>,
}

/// Every column is part of the key.
#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
struct Book {
    #[key]
    isbn: String,
}

fn tag(name: &str) -> Tag {
    Tag {
        name: name.to_string(),
        ..Default::default()
    }
}

async fn join_rows(db: &mut tether::Db) -> Vec<(i64, i64)> {
    table_rows(
        db,
        "story_tags",
        &[("story_id", Type::I64), ("tag_id", Type::I64)],
    )
    .await
    .unwrap()
    .into_iter()
    .map(|row| match &row[..] {
        [Value::I64(story), Value::I64(tag)] => (*story, *tag),
        _ => panic!("unexpected join row; row={row:?}"),
    })
    .collect()
}

async fn tag_names(db: &mut tether::Db) -> Vec<ValueRecord> {
    table_rows(db, "tags", &[("name", Type::String)])
        .await
        .unwrap()
}

async fn create_then_all(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Story, Tag)).await;

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();

    let mut tags = vec![tag("rust"), tag("orm")];
    story.tags().create(&mut db, &mut tags).await.unwrap();

    let all = story.tags().all(&mut db, Query::new()).await.unwrap();
    assert_eq_unordered!(all, tags.clone());

    assert_eq_unordered!(
        join_rows(&mut db).await,
        tags.iter().map(|tag| (story.id, tag.id))
    );

    // `has_many` accessors read many-to-many declarations the same way
    let all = HasMany::<Story, Tag>::new(&story, "tags")
        .all(&mut db, Query::new())
        .await
        .unwrap();
    assert_eq_unordered!(all, tags.clone());

    let first = story.tags().first(&mut db, Query::new().asc("name")).await.unwrap();
    assert_eq!(first.name, "orm");
}

async fn all_without_links_is_empty(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Story, Tag)).await;

    let mut story = Story::default();
    let mut other = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();
    persist::create(&mut db, &mut other).await.unwrap();

    other.tags().create(&mut db, &mut [tag("elsewhere")]).await.unwrap();

    assert_empty!(story.tags().all(&mut db, Query::new()).await.unwrap());

    let err = story.tags().first(&mut db, Query::new()).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");
}

async fn update_requires_link(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Story, Tag)).await;

    let mut story = Story::default();
    let mut other = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();
    persist::create(&mut db, &mut other).await.unwrap();

    let mut linked = vec![tag("mine")];
    story.tags().create(&mut db, &mut linked).await.unwrap();

    let mut foreign = vec![tag("theirs")];
    other.tags().create(&mut db, &mut foreign).await.unwrap();

    // Mixing a linked and an unlinked row changes neither
    let mut batch = vec![linked[0].clone(), foreign[0].clone()];
    batch[0].name = "mine, renamed".into();
    batch[1].name = "theirs, renamed".into();

    let err = story.tags().update(&mut db, &mut batch).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");

    assert_eq_unordered!(
        tag_names(&mut db).await,
        [
            ValueRecord::from_vec(vec![Value::from("mine")]),
            ValueRecord::from_vec(vec![Value::from("theirs")]),
        ]
    );

    // Only the linked row
    let mut batch = vec![batch.remove(0)];
    story.tags().update(&mut db, &mut batch).await.unwrap();

    let all = story.tags().all(&mut db, Query::new()).await.unwrap();
    assert_eq!(all, batch);
}

async fn delete_removes_links_and_rows(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Story, Tag)).await;

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();

    let mut tags = vec![tag("a"), tag("b"), tag("c")];
    story.tags().create(&mut db, &mut tags).await.unwrap();

    story.tags().delete(&mut db, &tags[..2]).await.unwrap();

    assert_eq!(join_rows(&mut db).await, [(story.id, tags[2].id)]);
    assert_eq!(
        tag_names(&mut db).await,
        [ValueRecord::from_vec(vec![Value::from("c")])]
    );
}

async fn delete_rolls_back_when_related_delete_fails(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Story, Tag)).await;

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();

    let mut tags = vec![tag("a"), tag("b")];
    story.tags().create(&mut db, &mut tags).await.unwrap();

    test.fail_on(FailPoint::delete_from("tags"));
    assert_err!(story.tags().delete(&mut db, &tags).await);
    test.clear_fail_point();

    // The join rows deleted before the failure are back
    assert_eq!(join_rows(&mut db).await.len(), 2);
    assert_eq!(tag_names(&mut db).await.len(), 2);

    assert_ok!(story.tags().delete(&mut db, &tags).await);
    assert_empty!(join_rows(&mut db).await);
    assert_empty!(tag_names(&mut db).await);
}

async fn create_rolls_back_when_link_fails(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Story, Tag)).await;

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();

    test.fail_on(FailPoint::insert_into("story_tags"));
    assert_err!(story.tags().create(&mut db, &mut [tag("a")]).await);
    test.clear_fail_point();

    assert_empty!(tag_names(&mut db).await);
}

async fn delete_of_unlinked_row_is_not_found(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Story, Tag)).await;

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();

    let mut loose = tag("loose");
    persist::create(&mut db, &mut loose).await.unwrap();

    let err = story.tags().delete(&mut db, &[loose]).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");
    assert_eq!(tag_names(&mut db).await.len(), 1);
}

async fn update_of_row_gone_behind_link_is_not_found(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Story, Tag)).await;

    let mut story = Story::default();
    persist::create(&mut db, &mut story).await.unwrap();

    let mut tags = vec![tag("stale")];
    story.tags().create(&mut db, &mut tags).await.unwrap();

    // The join row survives the tag row
    persist::delete(&tags[0]).exec(&mut db).await.unwrap();
    assert_eq!(join_rows(&mut db).await.len(), 1);

    tags[0].name = "renamed".into();
    let err = story.tags().update(&mut db, &mut tags).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");
}

async fn update_with_only_key_columns_checks_linkage(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Shelf, Book)).await;

    let mut fiction = Shelf {
        slug: Some("fiction".into()),
        ..Default::default()
    };
    let mut poetry = Shelf {
        slug: Some("poetry".into()),
        ..Default::default()
    };
    persist::create(&mut db, &mut fiction).await.unwrap();
    persist::create(&mut db, &mut poetry).await.unwrap();

    let mut books = vec![Book {
        isbn: "978-0".into(),
    }];
    fiction.books().create(&mut db, &mut books).await.unwrap();

    assert_ok!(fiction.books().update(&mut db, &mut books).await);

    let err = poetry.books().update(&mut db, &mut books).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");
}

async fn create_without_base_key_is_not_found(test: &mut DbTest) {
    let mut db = test.setup_db(models!(Shelf, Book)).await;

    let mut shelf = Shelf::default();
    persist::create(&mut db, &mut shelf).await.unwrap();
    assert_eq!(shelf.slug, None);

    let mut books = vec![Book {
        isbn: "978-1".into(),
    }];
    let err = shelf.books().create(&mut db, &mut books).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");

    assert_empty!(table_rows(&mut db, "books", &[("isbn", Type::String)]).await.unwrap());
    assert_empty!(table_rows(&mut db, "shelf_books", &[("book_isbn", Type::String)]).await.unwrap());
}

tests!(
    create_then_all,
    all_without_links_is_empty,
    update_requires_link,
    delete_removes_links_and_rows,
    delete_rolls_back_when_related_delete_fails,
    create_rolls_back_when_link_fails,
    delete_of_unlinked_row_is_not_found,
    update_of_row_gone_behind_link_is_not_found,
    update_with_only_key_columns_checks_linkage,
    create_without_base_key_is_not_found,
);
