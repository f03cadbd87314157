use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use tracing::debug;

use crate::{
    catalog::Catalog,
    client_ip::ClientIp,
    entities::{movie, movie_genre, rating},
    error::AppResult,
    models::Paged,
};

/// IMDB floor applied when the caller picks none.
pub const DEFAULT_IMDB_FLOOR: i32 = 4;

/// Filter selections, straight off the query string. Parsing never fails;
/// entries that do not parse are dropped and fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    pub years: Vec<i32>,
    pub genres: Vec<i32>,
    pub imdb_floor: Option<Decimal>,
    /// Recency window in 30-day periods.
    pub recency_periods: Option<i64>,
    /// Presence switches the query into personalized mode.
    pub my_rating: Option<Decimal>,
    /// 1-based requested page.
    pub page: u64,
}

impl FilterParams {
    pub fn from_query(raw: Option<&str>) -> Self {
        Self::from_pairs(&parse_query(raw.unwrap_or("")))
    }

    /// First parseable occurrence wins for the scalar keys; `year` and
    /// `genre` accumulate.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self {
            page: 1,
            ..Self::default()
        };

        for (key, value) in pairs {
            let value = value.trim();
            match key.as_str() {
                "year" => {
                    if let Ok(year) = value.parse() {
                        params.years.push(year);
                    }
                }
                "genre" => {
                    if let Ok(genre) = value.parse() {
                        params.genres.push(genre);
                    }
                }
                "rating_imdb" => {
                    if params.imdb_floor.is_none() {
                        params.imdb_floor = value.parse().ok();
                    }
                }
                "my_date" => {
                    if params.recency_periods.is_none() {
                        params.recency_periods = value.parse().ok();
                    }
                }
                "my_rating" => {
                    if params.my_rating.is_none() {
                        params.my_rating = value.parse().ok();
                    }
                }
                "page" => {
                    if let Ok(page) = value.parse::<u64>() {
                        params.page = page.max(1);
                    }
                }
                _ => {}
            }
        }

        params
    }
}

/// Query-string fragment that replays the current selection, prepended to
/// page links so pagination keeps the filter.
pub fn selection_echo(params: &FilterParams) -> String {
    use std::fmt::Write;

    let mut echo = String::new();
    for year in &params.years {
        let _ = write!(echo, "year={year}&");
    }
    for genre in &params.genres {
        let _ = write!(echo, "genre={genre}&");
    }
    if let Some(floor) = params.imdb_floor {
        let _ = write!(echo, "rating_imdb={floor}&");
    }
    if let Some(periods) = params.recency_periods {
        let _ = write!(echo, "my_date={periods}&");
    }
    if let Some(my_rating) = params.my_rating {
        let _ = write!(echo, "my_rating={my_rating}&");
    }
    echo
}

/// Runs the filter contract. Absent year and genre selections widen to every
/// value present in the catalog; the IMDB floor defaults; a personal rating
/// threshold joins against the caller's own ratings within the recency
/// window. Results are de-duplicated and ordered by id.
pub async fn filter_movies(
    catalog: &Catalog,
    params: &FilterParams,
    ip: &ClientIp,
    today: NaiveDate,
    page_size: u64,
) -> AppResult<Paged> {
    let years = if params.years.is_empty() {
        catalog.years().await?
    } else {
        params.years.clone()
    };
    let genres = if params.genres.is_empty() {
        catalog.genre_ids().await?
    } else {
        params.genres.clone()
    };
    let floor = params
        .imdb_floor
        .unwrap_or_else(|| Decimal::from(DEFAULT_IMDB_FLOOR));
    debug!(
        years = years.len(),
        genres = genres.len(),
        floor = %floor,
        personalized = params.my_rating.is_some(),
        "filtering movies"
    );

    let mut query = movie::Entity::find()
        .filter(movie::Column::Year.is_in(years))
        .join(JoinType::InnerJoin, movie::Relation::MovieGenre.def())
        .filter(movie_genre::Column::GenreId.is_in(genres))
        .filter(movie::Column::RatingImdb.gte(floor));

    if let Some(my_rating) = params.my_rating {
        // Personalized filtering with no usable client address matches
        // nothing.
        let Some(key) = ip.key() else {
            return Ok(Paged::empty());
        };
        let cutoff = recency_cutoff(today, params.recency_periods.unwrap_or(0));
        query = query
            .join(JoinType::InnerJoin, movie::Relation::Rating.def())
            .filter(rating::Column::Ip.eq(key))
            .filter(rating::Column::Rating.gte(my_rating))
            .filter(rating::Column::ViewedDate.lte(cutoff));
    }

    let paginator = query
        .distinct()
        .order_by_asc(movie::Column::Id)
        .paginate(catalog.db(), page_size);

    let pages = paginator.num_pages().await?;
    let page = params.page.min(pages.max(1));
    let movies = paginator.fetch_page(page - 1).await?;

    Ok(Paged {
        movies,
        page,
        pages,
    })
}

fn recency_cutoff(today: NaiveDate, periods: i64) -> NaiveDate {
    let days = periods.max(0).saturating_mul(30) as u64;
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Minimal query-string parser that keeps repeated keys in order. `+`
/// becomes a space before percent-decoding.
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
