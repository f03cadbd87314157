use regex::{Regex, RegexBuilder};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::debug;

use crate::{entities::movie, error::AppResult, models::Paged};

/// Compiled-program size cap; keeps caller patterns from ballooning.
const REGEX_SIZE_LIMIT: usize = 1 << 16;
/// Longest accepted pattern, in bytes.
const MAX_PATTERN_LEN: usize = 256;

/// Case-insensitive regular-expression search over movie name and original
/// name. An empty query matches nothing. A pattern that fails to compile is
/// retried as a literal, so typos degrade to substring search.
pub async fn search_movies(
    db: &DatabaseConnection,
    query: &str,
    page: u64,
    page_size: u64,
) -> AppResult<Paged> {
    let Some(pattern) = build_pattern(query) else {
        return Ok(Paged::empty());
    };

    // SQLite ships no regexp function, so matching happens here.
    let movies = movie::Entity::find()
        .order_by_asc(movie::Column::Id)
        .all(db)
        .await?;
    let matches: Vec<_> = movies
        .into_iter()
        .filter(|movie| pattern.is_match(&movie.name) || pattern.is_match(&movie.original_name))
        .collect();
    debug!(pattern = %pattern, matches = matches.len(), "searched catalog");

    Ok(paginate(matches, page, page_size))
}

pub fn build_pattern(query: &str) -> Option<Regex> {
    let pattern = bounded(query.trim());
    if pattern.is_empty() {
        return None;
    }
    compile(pattern).or_else(|| compile(&regex::escape(pattern)))
}

fn compile(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .ok()
}

fn bounded(pattern: &str) -> &str {
    if pattern.len() <= MAX_PATTERN_LEN {
        return pattern;
    }
    let mut end = MAX_PATTERN_LEN;
    while !pattern.is_char_boundary(end) {
        end -= 1;
    }
    &pattern[..end]
}

fn paginate(movies: Vec<movie::Model>, page: u64, page_size: u64) -> Paged {
    let size = page_size.max(1) as usize;
    let pages = movies.len().div_ceil(size) as u64;
    let page = page.max(1).min(pages.max(1));
    let start = (page - 1) as usize * size;
    let movies = movies.into_iter().skip(start).take(size).collect();

    Paged {
        movies,
        page,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    async fn seeded() -> DatabaseConnection {
        let db = test_utils::db().await;
        test_utils::seed_movie(&db, "Матриця", "The Matrix", 1999, "8.7", None).await;
        test_utils::seed_movie(&db, "The Matrix Reloaded", "The Matrix Reloaded", 2003, "7.2", None)
            .await;
        test_utils::seed_movie(&db, "Whiplash", "Whiplash", 2014, "8.5", None).await;
        db
    }

    #[tokio::test]
    async fn matches_name_or_original_name_case_insensitively() {
        let db = seeded().await;
        let paged = search_movies(&db, "matrix", 1, 50).await.unwrap();

        assert_eq!(paged.movies.len(), 2);
        assert!(paged.movies.iter().any(|m| m.name == "Матриця"));
    }

    #[tokio::test]
    async fn regex_syntax_is_honored() {
        let db = seeded().await;
        let paged = search_movies(&db, "^whip.*sh$", 1, 50).await.unwrap();

        assert_eq!(paged.movies.len(), 1);
        assert_eq!(paged.movies[0].name, "Whiplash");
    }

    #[tokio::test]
    async fn empty_query_matches_nothing() {
        let db = seeded().await;
        let paged = search_movies(&db, "   ", 1, 50).await.unwrap();

        assert!(paged.movies.is_empty());
        assert_eq!(paged.pages, 0);
    }

    #[tokio::test]
    async fn invalid_pattern_degrades_to_literal_match() {
        let db = test_utils::db().await;
        test_utils::seed_movie(&db, "Movie (2024", "Movie (2024", 2024, "6.0", None).await;

        // An unclosed group is not valid regex syntax.
        let paged = search_movies(&db, "(2024", 1, 50).await.unwrap();
        assert_eq!(paged.movies.len(), 1);
    }

    #[tokio::test]
    async fn results_paginate_one_per_page() {
        let db = seeded().await;

        let first = search_movies(&db, "matrix", 1, 1).await.unwrap();
        assert_eq!(first.pages, 2);
        assert_eq!(first.page, 1);
        assert_eq!(first.movies.len(), 1);

        let second = search_movies(&db, "matrix", 2, 1).await.unwrap();
        assert_eq!(second.page, 2);
        assert_eq!(second.movies.len(), 1);
        assert_ne!(first.movies[0].id, second.movies[0].id);

        let past_end = search_movies(&db, "matrix", 9, 1).await.unwrap();
        assert_eq!(past_end.page, 2);
    }

    #[test]
    fn oversized_patterns_are_truncated_at_char_boundaries() {
        let pattern = "й".repeat(300);
        assert!(build_pattern(&pattern).is_some());
    }
}
