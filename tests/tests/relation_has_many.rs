//! `has_many`: every related row holds a foreign key back to the base row.

use tests::{prelude::*, table_rows};

use tether::{col, persist, stmt::Type, Query};

#[derive(Debug, Default, Clone, PartialEq, tether::Model)]
#[has_many(stories: Story, key = id, references = author_id)]
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

    author_id: i64,

    votes: i32,
}

fn story(title: &str, votes: i32) -> Story {
    Story {
        title: title.to_string(),
        votes,
        ..Default::default()
    }
}

async fn empty_all_versus_first(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    let all = user.stories().all(&mut db, Query::new()).await.unwrap();
    assert_empty!(all);

    let err = user.stories().first(&mut db, Query::new()).await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");
}

async fn create_links_every_row(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut ann = User::default();
    let mut bob = User::default();
    persist::create(&mut db, &mut ann).await.unwrap();
    persist::create(&mut db, &mut bob).await.unwrap();

    let mut stories = vec![story("a", 1), story("b", 2), story("c", 3)];
    ann.stories().create(&mut db, &mut stories).await.unwrap();

    for story in &stories {
        assert_ne!(story.id, 0);
        assert_eq!(story.author_id, ann.id);
    }

    let mut other = vec![story("z", 9)];
    bob.stories().create(&mut db, &mut other).await.unwrap();

    let all = ann.stories().all(&mut db, Query::new()).await.unwrap();
    assert_eq_unordered!(all, stories.clone());

    let all = bob.stories().all(&mut db, Query::new()).await.unwrap();
    assert_eq!(all, other);

    let rows = table_rows(&mut db, "stories", &[("id", Type::I64)])
        .await
        .unwrap();
    assert_eq!(rows.len(), 4);
}

async fn create_is_all_or_nothing(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    // The second row collides with the first on the primary key
    let mut stories = vec![
        Story {
            id: 10,
            ..story("a", 1)
        },
        Story {
            id: 10,
            ..story("b", 2)
        },
    ];

    let err = user.stories().create(&mut db, &mut stories).await.unwrap_err();
    assert!(err.is_driver_operation_failed(), "{err}");

    let rows = table_rows(&mut db, "stories", &[("id", Type::I64)])
        .await
        .unwrap();
    assert_empty!(rows);

    let all = user.stories().all(&mut db, Query::new()).await.unwrap();
    assert_empty!(all);
}

async fn query_scopes(test: &mut DbTest) {
    let mut db = test.setup_db(models!(User, Story)).await;

    let mut user = User::default();
    persist::create(&mut db, &mut user).await.unwrap();

    let mut stories = vec![
        story("a", 5),
        story("b", 1),
        story("c", 3),
        story("d", 8),
    ];
    user.stories().create(&mut db, &mut stories).await.unwrap();

    let titles = |stories: Vec<Story>| -> Vec<String> {
        stories.into_iter().map(|story| story.title).collect()
    };

    let popular = user
        .stories()
        .all(&mut db, Query::new().filter(col("votes").ge(3)).asc("votes"))
        .await
        .unwrap();
    assert_eq!(titles(popular), ["c", "a", "d"]);

    let page = user
        .stories()
        .all(&mut db, Query::new().desc("votes").limit(2).offset(1))
        .await
        .unwrap();
    assert_eq!(titles(page), ["a", "c"]);

    let top = user
        .stories()
        .first(&mut db, Query::new().desc("votes"))
        .await
        .unwrap();
    assert_eq!(top.title, "d");

    let none = user
        .stories()
        .all(&mut db, Query::new().filter(col("title").eq("missing")))
        .await
        .unwrap();
    assert_empty!(none);
}

tests!(
    empty_all_versus_first,
    create_links_every_row,
    create_is_all_or_nothing,
    query_scopes,
);
