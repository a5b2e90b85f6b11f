#![allow(dead_code)]

use chrono::NaiveDate;
use filmorate::{FilmDraft, MemoryStorage, Services, UserDraft};
use std::collections::BTreeSet;
use std::sync::Arc;

pub fn memory_services() -> Services {
    Services::new(Arc::new(MemoryStorage::with_default_catalogs()))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn film_draft(name: &str, rating_id: i32, genre_ids: &[i32]) -> FilmDraft {
    FilmDraft {
        name: name.to_string(),
        description: Some(format!("About {}", name)),
        release_date: date(1999, 3, 31),
        duration: 136,
        rating_id,
        genre_ids: genre_ids.iter().copied().collect::<BTreeSet<_>>(),
    }
}

pub fn user_draft(login: &str) -> UserDraft {
    UserDraft {
        email: format!("{}@example.com", login),
        login: login.to_string(),
        name: Some(login.to_uppercase()),
        birthday: date(1985, 7, 14),
    }
}

/// Creates `n` users and returns their ids in creation order.
pub async fn create_users(services: &Services, n: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let user = services
            .users
            .create_user(user_draft(&format!("user{}", i)))
            .await
            .unwrap();
        ids.push(user.id);
    }
    ids
}
