//! Drives the HTTP surface over the in-memory backend on an ephemeral port.

mod common;

use filmorate::transport::http::{create_router, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn spawn_api(popular_default_count: usize) -> Result<String, Box<dyn std::error::Error>> {
    let app_state = AppState {
        services: common::memory_services(),
        popular_default_count,
    };
    let router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

fn film_body(name: &str, mpa: i32, genres: &[i32]) -> Value {
    json!({
        "name": name,
        "description": "A film",
        "releaseDate": "2001-05-10",
        "duration": 95,
        "mpa": { "id": mpa },
        "genres": genres.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>(),
    })
}

async fn create_user(
    client: &reqwest::Client,
    base_url: &str,
    login: &str,
) -> Result<i64, Box<dyn std::error::Error>> {
    let resp: Value = client
        .post(format!("{}/users", base_url))
        .json(&json!({
            "email": format!("{}@example.com", login),
            "login": login,
            "birthday": "1990-01-01"
        }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(resp["success"], true, "{}", resp);
    assert_eq!(resp["data"]["name"], login);
    Ok(resp["data"]["id"].as_i64().ok_or("user id missing")?)
}

#[tokio::test]
async fn test_catalog_endpoints() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_api(10).await?;
    let client = reqwest::Client::new();

    let health: Value = client.get(format!("{}/health", base_url)).send().await?.json().await?;
    assert_eq!(health["data"]["storage"], "memory");

    let genres: Value = client.get(format!("{}/genres", base_url)).send().await?.json().await?;
    assert_eq!(genres["data"].as_array().map(Vec::len), Some(6));
    assert_eq!(genres["data"][0], json!({ "id": 1, "name": "Comedy" }));

    let mpa: Value = client.get(format!("{}/mpa/3", base_url)).send().await?.json().await?;
    assert_eq!(mpa["data"]["name"], "PG-13");

    let resp = client.get(format!("{}/mpa/9", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = client.get(format!("{}/genres/0", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_film_lifecycle_and_errors() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_api(10).await?;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{}/films", base_url))
        .json(&film_body("Memento", 4, &[4, 2]))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(created["success"], true, "{}", created);
    let film_id = created["data"]["id"].as_i64().ok_or("film id missing")?;
    assert_eq!(created["data"]["mpa"]["name"], "R");
    assert_eq!(created["data"]["releaseDate"], "2001-05-10");
    assert_eq!(created["data"]["genres"][0]["name"], "Drama");

    // Unknown genre: rule violation, nothing stored.
    let resp = client
        .post(format!("{}/films", base_url))
        .json(&film_body("Bad", 1, &[42]))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut early = film_body("Too early", 1, &[]);
    early["releaseDate"] = json!("1895-12-27");
    let resp = client.post(format!("{}/films", base_url)).json(&early).send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Malformed body.
    let resp = client
        .post(format!("{}/films", base_url))
        .json(&json!({ "name": "No date" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let all: Value = client.get(format!("{}/films", base_url)).send().await?.json().await?;
    assert_eq!(all["data"].as_array().map(Vec::len), Some(1));

    // Update replaces the genre set.
    let mut update = film_body("Memento", 3, &[1]);
    update["id"] = json!(film_id);
    let updated: Value = client
        .put(format!("{}/films", base_url))
        .json(&update)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["data"]["genres"], json!([{ "id": 1, "name": "Comedy" }]));

    update["id"] = json!(9999);
    let resp = client.put(format!("{}/films", base_url)).json(&update).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client.get(format!("{}/films/9999", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_likes_and_popular() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_api(1).await?;
    let client = reqwest::Client::new();

    let u1 = create_user(&client, &base_url, "neo").await?;
    let u2 = create_user(&client, &base_url, "morpheus").await?;

    let mut film_ids = Vec::new();
    for name in ["First", "Second"] {
        let created: Value = client
            .post(format!("{}/films", base_url))
            .json(&film_body(name, 2, &[]))
            .send()
            .await?
            .json()
            .await?;
        film_ids.push(created["data"]["id"].as_i64().ok_or("film id missing")?);
    }

    for user in [u1, u2] {
        let resp = client
            .put(format!("{}/films/{}/like/{}", base_url, film_ids[1], user))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    // Repeating a like is accepted and changes nothing.
    client
        .put(format!("{}/films/{}/like/{}", base_url, film_ids[1], u1))
        .send()
        .await?;

    let likes: Value = client
        .get(format!("{}/films/{}/likes", base_url, film_ids[1]))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(likes["data"]["filmId"], film_ids[1]);
    assert_eq!(likes["data"]["likes"], 2);

    let resp = client
        .put(format!("{}/films/{}/like/{}", base_url, film_ids[0], 777))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Default count comes from the server state.
    let popular: Value = client
        .get(format!("{}/films/popular", base_url))
        .send()
        .await?
        .json()
        .await?;
    let ids: Vec<i64> = popular["data"]
        .as_array()
        .ok_or("popular is not an array")?
        .iter()
        .filter_map(|f| f["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![film_ids[1]]);

    let popular: Value = client
        .get(format!("{}/films/popular?count=5", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(popular["data"].as_array().map(Vec::len), Some(2));

    let resp = client
        .get(format!("{}/films/popular?count=-1", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .delete(format!("{}/films/{}/like/{}", base_url, film_ids[1], u2))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_friend_endpoints() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_api(10).await?;
    let client = reqwest::Client::new();

    let a = create_user(&client, &base_url, "alice").await?;
    let b = create_user(&client, &base_url, "bob").await?;
    let c = create_user(&client, &base_url, "carol").await?;

    for (user, friend) in [(a, c), (b, c), (a, b)] {
        let resp = client
            .put(format!("{}/users/{}/friends/{}", base_url, user, friend))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let friends: Value = client
        .get(format!("{}/users/{}/friends", base_url, b))
        .send()
        .await?
        .json()
        .await?;
    // Bob never added Alice.
    assert_eq!(friends["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(friends["data"][0]["id"], c);

    let common: Value = client
        .get(format!("{}/users/{}/friends/common/{}", base_url, b, a))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(common["data"][0]["login"], "carol");

    let resp = client
        .put(format!("{}/users/{}/friends/{}", base_url, a, 404))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .post(format!("{}/users", base_url))
        .json(&json!({ "email": "no-at-sign", "login": "x", "birthday": "1990-01-01" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .delete(format!("{}/users/{}/friends/{}", base_url, a, c))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let user: Value = client
        .get(format!("{}/users/{}", base_url, a))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(user["data"]["friends"], json!([b]));
    Ok(())
}

#[tokio::test]
async fn test_user_update_over_http() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_api(10).await?;
    let client = reqwest::Client::new();

    let a = create_user(&client, &base_url, "alice").await?;
    let b = create_user(&client, &base_url, "bob").await?;
    client
        .put(format!("{}/users/{}/friends/{}", base_url, a, b))
        .send()
        .await?;

    let updated: Value = client
        .put(format!("{}/users", base_url))
        .json(&json!({
            "id": a,
            "email": "alice@example.org",
            "login": "alice",
            "name": "Alice",
            "birthday": "1990-01-01"
        }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["success"], true, "{}", updated);
    assert_eq!(updated["data"]["email"], "alice@example.org");
    assert_eq!(updated["data"]["name"], "Alice");
    assert_eq!(updated["data"]["friends"], json!([b]));

    // Update without an id.
    let resp = client
        .put(format!("{}/users", base_url))
        .json(&json!({ "email": "x@example.org", "login": "x", "birthday": "1990-01-01" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_ids_use_the_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_api(10).await?;
    let client = reqwest::Client::new();

    for path in ["films/abc", "users/abc/friends", "genres/drama"] {
        let resp = client.get(format!("{}/{}", base_url, path)).send().await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", path);
        let body: Value = resp.json().await?;
        assert_eq!(body["success"], false, "{}", path);
        assert!(body["error"].as_str().unwrap_or_default().contains("Invalid path"));
    }

    let resp = client
        .put(format!("{}/films/1/like/x", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], false);
    Ok(())
}
