use crate::entities::{actor, director, genre, movie, place_residence};

/// IMDB floor choices offered by the filter sidebar.
pub const IMDB_FLOOR_CHOICES: [i32; 6] = [4, 5, 6, 7, 8, 9];
/// Recency choices offered by the sidebar, in 30-day periods.
pub const RECENCY_CHOICES: [i64; 6] = [0, 1, 2, 3, 4, 5];

/// Data behind the filter sidebar rendered on listing and detail pages.
#[derive(Debug, Clone, Default)]
pub struct FilterSidebar {
    pub genres: Vec<genre::Model>,
    pub years: Vec<i32>,
}

/// One page of movies plus the paging state the templates need.
#[derive(Debug, Clone, Default)]
pub struct Paged {
    pub movies: Vec<movie::Model>,
    /// 1-based current page, clamped to the available range.
    pub page: u64,
    /// Total page count; zero when nothing matched.
    pub pages: u64,
}

impl Paged {
    pub fn empty() -> Self {
        Self {
            movies: Vec::new(),
            page: 1,
            pages: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MovieDetail {
    pub movie: movie::Model,
    pub genres: Vec<genre::Model>,
    pub actors: Vec<actor::Model>,
    pub director: Option<director::Model>,
}

#[derive(Debug, Clone)]
pub struct ActorDetail {
    pub actor: actor::Model,
    pub residence: Option<place_residence::Model>,
    pub movies: Vec<movie::Model>,
}

#[derive(Debug, Clone)]
pub struct DirectorDetail {
    pub director: director::Model,
    pub movies: Vec<movie::Model>,
}

#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: genre::Model,
    pub movies: Vec<movie::Model>,
}
