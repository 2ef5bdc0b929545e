use tether::{persist, Query};

#[derive(Debug, Default, tether::Model)]
#[has_one(story: Story, key = id, references = author_id)]
struct User {
    #[key]
    #[auto]
    id: i64,

    name: String,

    #[auto]
    created_at: jiff::Timestamp,

    #[auto]
    updated_at: jiff::Timestamp,
}

#[derive(Debug, Default, tether::Model)]
#[belongs_to(author: User, key = author_id, references = id)]
#[many_to_many(tags: Tag, through = "story_tags", key = id, join_key = story_id, join_references = tag_id, references = id)]
struct Story {
    #[key]
    #[auto]
    id: i64,

    title: String,

    author_id: Option<i64>,
}

#[derive(Debug, Default, tether::Model)]
struct Tag {
    #[key]
    #[auto]
    id: i64,

    name: String,
}

#[tokio::main]
async fn main() -> tether::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut db = tether::Db::builder()
        .register::<User>()
        .register::<Story>()
        .register::<Tag>()
        .connect("sqlite::memory:")
        .await?;

    let mut user = User {
        name: "John Doe".to_string(),
        ..Default::default()
    };
    persist::create(&mut db, &mut user).await?;
    tracing::info!(id = user.id, created_at = %user.created_at, "created user");

    let mut story = Story {
        title: "Hello, world".to_string(),
        ..Default::default()
    };
    user.story().create(&mut db, &mut story).await?;

    let found = user.story().get(&mut db).await?;
    tracing::info!(?found, "story of the user");

    let author = story.author().get(&mut db).await?;
    tracing::info!(author = %author.name, "author of the story");

    let mut tags = vec![
        Tag {
            name: "greeting".to_string(),
            ..Default::default()
        },
        Tag {
            name: "first".to_string(),
            ..Default::default()
        },
    ];
    story.tags().create(&mut db, &mut tags).await?;

    for tag in story.tags().all(&mut db, Query::new().asc("name")).await? {
        tracing::info!(tag = %tag.name, "story tag");
    }

    Ok(())
}
