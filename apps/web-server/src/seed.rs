//! Sample data for demos and local development.

use thiserror::Error;

use sample_core::ValidationErrors;
use sample_core::domain::{Micropost, Relationship, User};
use sample_core::error::{DomainError, RepoError};
use sample_core::ports::{AuthError, BaseRepository};

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

pub const ADMIN_EMAIL: &str = "example@railstutorial.org";
const ADMIN_PASSWORD: &str = "foobar";
const USER_PASSWORD: &str = "password";
const EXTRA_USERS: usize = 99;
const AUTHORS: usize = 6;
const POSTS_PER_AUTHOR: usize = 50;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Brook", "Cyrus", "Dana", "Elio", "Fern", "Gus", "Hana", "Ivo", "June", "Kai",
];
const LAST_NAMES: &[&str] = &[
    "Abbott", "Baker", "Chen", "Diaz", "Evans", "Fox", "Grant", "Hayes", "Ito",
];
const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "magna", "aliqua",
];

fn sample_name(n: usize) -> String {
    format!(
        "{} {}",
        FIRST_NAMES[n % FIRST_NAMES.len()],
        LAST_NAMES[(n / FIRST_NAMES.len()) % LAST_NAMES.len()]
    )
}

fn sample_sentence(n: usize) -> String {
    let mut words: Vec<&str> = (0..6).map(|i| WORDS[(n * 7 + i * 3) % WORDS.len()]).collect();
    words.dedup();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

/// Populate an empty store: an admin, 99 more users, microposts for the
/// first six and a follower graph around the admin. Does nothing when
/// users already exist.
pub async fn populate(state: &AppState) -> Result<(), SeedError> {
    if state.users.count().await? > 0 {
        tracing::info!("Users already present, skipping sample data");
        return Ok(());
    }

    let mut admin = User::new(
        "Example User",
        ADMIN_EMAIL,
        state.passwords.hash(ADMIN_PASSWORD)?,
    );
    admin.admin = true;
    let mut users = vec![state.users.save(admin).await?];

    // Every sample user shares one password, so hash it once.
    let password_hash = state.passwords.hash(USER_PASSWORD)?;
    for n in 0..EXTRA_USERS {
        let email = format!("example-{}@railstutorial.org", n + 1);
        let user = User::new(sample_name(n), &email, password_hash.clone());
        users.push(state.users.save(user).await?);
    }

    for round in 0..POSTS_PER_AUTHOR {
        for (i, author) in users.iter().take(AUTHORS).enumerate() {
            let micropost = Micropost::new(author.id, &sample_sentence(round * AUTHORS + i))?;
            state.microposts.save(micropost).await?;
        }
    }

    let first = &users[0];
    for followed in &users[1..50] {
        let relationship = Relationship::new(first.id, followed.id)?;
        state.relationships.save(relationship).await?;
    }
    for follower in &users[2..40] {
        let relationship = Relationship::new(follower.id, first.id)?;
        state.relationships.save(relationship).await?;
    }

    tracing::info!(users = users.len(), "Sample data seeded");
    Ok(())
}
