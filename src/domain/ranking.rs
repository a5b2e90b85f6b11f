//! Like-count ranking.

use crate::domain::model::Film;
use std::cmp::Reverse;

/// Orders `films` by descending like count, ties by ascending id, and keeps at most `limit`.
///
/// The sort key is total, so the result is the same for every call against an unchanged ledger.
pub fn most_popular(mut films: Vec<Film>, limit: usize) -> Vec<Film> {
    if limit == 0 {
        return Vec::new();
    }
    films.sort_by_key(|film| (Reverse(film.like_count()), film.id));
    films.truncate(limit);
    films
}
