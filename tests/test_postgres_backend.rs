//! Runs the core scenarios against a real Postgres.
//!
//! Requires `DATABASE_URL`; the test returns early without it. Every table is truncated first.

mod common;

use common::{create_users, date, film_draft};
use filmorate::{PgStorage, Services, Storage};
use std::env;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_backend() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let Ok(database_url) = env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping test_postgres_backend");
        return Ok(());
    };

    println!("--- test_postgres_backend ---");

    let storage = PgStorage::connect(&database_url, 4).await?;
    storage.clear_data().await?;
    storage.ping().await?;
    let services = Services::new(Arc::new(storage));

    // Catalogs are seeded on connect.
    assert_eq!(services.catalog.get_all_genres().await?.len(), 6);
    assert_eq!(services.catalog.get_rating_by_id(5).await?.name, "NC-17");

    // --- films ---
    let mut early = film_draft("Arrival of a Train", 1, &[]);
    early.release_date = date(1895, 12, 28);
    let first = services.films.add_film(early.clone()).await?;
    assert_eq!(first.id, 1);

    early.release_date = date(1895, 12, 27);
    assert!(services.films.add_film(early).await.unwrap_err().is_validation());

    let err = services
        .films
        .add_film(film_draft("Ghost", 1, &[2, 99]))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(services.films.get_all_films().await?.len(), 1);

    let second = services.films.add_film(film_draft("Heat", 4, &[1, 2])).await?;
    let updated = services
        .films
        .update_film(second.id, film_draft("Heat", 4, &[5]))
        .await?;
    assert_eq!(updated.genres.iter().map(|g| g.id).collect::<Vec<_>>(), vec![5]);

    // --- likes + ranking ---
    let users = create_users(&services, 3).await;
    services.likes.add_like(second.id, users[0]).await?;
    services.likes.add_like(second.id, users[1]).await?;
    services.likes.add_like(second.id, users[1]).await?;
    services.likes.add_like(first.id, users[2]).await?;
    assert_eq!(services.likes.count_likes(second.id).await?, 2);
    assert!(services.likes.add_like(first.id, 9999).await.unwrap_err().is_not_found());

    let top = services.films.get_most_popular_films(1).await?;
    assert_eq!(top[0].id, second.id);
    assert_eq!(top[0].like_count(), 2);

    services.likes.remove_like(second.id, users[0]).await?;
    services.likes.remove_like(second.id, users[1]).await?;
    let top = services.films.get_most_popular_films(10).await?;
    assert_eq!(top.iter().map(|f| f.id).collect::<Vec<_>>(), vec![first.id, second.id]);

    // --- friendship ---
    services.friends.add_friend(users[0], users[2]).await?;
    services.friends.add_friend(users[1], users[2]).await?;
    services.friends.add_friend(users[0], users[1]).await?;
    services.friends.add_friend(users[0], users[1]).await?;

    let friends: Vec<i64> = services
        .social
        .get_friends(users[0])
        .await?
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(friends, vec![users[1], users[2]]);
    assert_eq!(services.social.get_friends(users[2]).await?.len(), 0);

    let common_ab = services.social.get_common_friends(users[0], users[1]).await?;
    let common_ba = services.social.get_common_friends(users[1], users[0]).await?;
    assert_eq!(common_ab, common_ba);
    assert_eq!(common_ab.len(), 1);
    assert_eq!(common_ab[0].id, users[2]);

    // Updating scalars leaves the outgoing edges alone.
    let mut draft = common::user_draft("user0");
    draft.email = "renamed@example.org".to_string();
    let updated = services.users.update_user(users[0], draft).await?;
    assert_eq!(updated.email, "renamed@example.org");
    assert_eq!(updated.friends.len(), 2);
    assert_eq!(services.social.get_friends(users[0]).await?.len(), 2);

    services.friends.remove_friend(users[0], users[2]).await?;
    let user = services.users.get_user_by_id(users[0]).await?;
    assert_eq!(user.friends.into_iter().collect::<Vec<_>>(), vec![users[1]]);

    println!("--- test_postgres_backend OK ---");
    Ok(())
}
