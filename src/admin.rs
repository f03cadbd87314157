use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{ValidateEmail, ValidateUrl};

use crate::{
    entities::{
        actor, actor::Gender, director, feedback, genre, movie, movie_actor, movie_genre,
        place_residence, rating,
    },
    error::AppError,
    forms,
    slug::{slugify, slugify_name},
    AppState,
};

/// Falls back when a place is created without a map link.
const DEFAULT_MAP_URL: &str = "https://www.google.com/maps";

/// Operator console surface. Every entity gets explicit list, create,
/// update and delete endpoints; ratings and feedback are list-and-delete
/// only since they enter through the public submission endpoints.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", put(update_movie).delete(delete_movie))
        .route("/actors", get(list_actors).post(create_actor))
        .route("/actors/set-gender", post(set_actor_gender))
        .route("/actors/{id}", put(update_actor).delete(delete_actor))
        .route("/directors", get(list_directors).post(create_director))
        .route("/directors/{id}", put(update_director).delete(delete_director))
        .route("/genres", get(list_genres).post(create_genre))
        .route("/genres/{id}", put(update_genre).delete(delete_genre))
        .route("/places", get(list_places).post(create_place))
        .route("/places/{id}", put(update_place).delete(delete_place))
        .route("/ratings", get(list_ratings))
        .route("/ratings/{id}", delete(delete_rating))
        .route("/feedback", get(list_feedback))
        .route("/feedback/{id}", delete(delete_feedback))
}

type AdminResult<T> = Result<T, JsonError>;

/// Console errors render as JSON instead of the public HTML pages.
#[derive(Debug)]
pub struct JsonError(AppError);

impl From<AppError> for JsonError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for JsonError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err))
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "console request failed");
        }
        let message = if status.is_server_error() {
            "something went wrong".to_string()
        } else {
            self.0.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Operator-facing bucket label for an IMDB rating.
fn rating_status(rating: Decimal) -> &'static str {
    if rating < Decimal::from(5) {
        "Bad rating"
    } else if rating < Decimal::from(6) {
        "Average rating"
    } else if rating < Decimal::from(7) {
        "Good rating"
    } else {
        "Brilliant rating"
    }
}

#[derive(Debug, Serialize)]
pub struct MovieRow {
    #[serde(flatten)]
    pub movie: movie::Model,
    pub rating_status: &'static str,
}

impl From<movie::Model> for MovieRow {
    fn from(movie: movie::Model) -> Self {
        let rating_status = rating_status(movie.rating_imdb);
        Self {
            movie,
            rating_status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieListQuery {
    pub rating: Option<String>,
    pub era: Option<String>,
    pub director: Option<i32>,
}

async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MovieListQuery>,
) -> AdminResult<Json<Vec<MovieRow>>> {
    let mut select = movie::Entity::find();
    if let Some(bucket) = query.rating.as_deref() {
        select = rating_bucket(select, bucket)?;
    }
    if let Some(bucket) = query.era.as_deref() {
        select = era_bucket(select, bucket)?;
    }
    if let Some(director_id) = query.director {
        select = select.filter(movie::Column::DirectorId.eq(director_id));
    }

    let movies = select
        .order_by_desc(movie::Column::RatingImdb)
        .order_by_asc(movie::Column::Name)
        .all(state.catalog.db())
        .await?;

    Ok(Json(movies.into_iter().map(MovieRow::from).collect()))
}

fn rating_bucket(
    select: Select<movie::Entity>,
    bucket: &str,
) -> AdminResult<Select<movie::Entity>> {
    let column = movie::Column::RatingImdb;
    let select = match bucket {
        "bad" => select.filter(column.lt(5)),
        "average" => select.filter(column.gte(5)).filter(column.lt(6)),
        "good" => select.filter(column.gte(6)).filter(column.lt(7)),
        "brilliant" => select.filter(column.gte(7)),
        other => {
            return Err(AppError::validation(format!("unknown rating bucket '{other}'")).into())
        }
    };
    Ok(select)
}

fn era_bucket(select: Select<movie::Entity>, bucket: &str) -> AdminResult<Select<movie::Entity>> {
    let column = movie::Column::Year;
    let select = match bucket {
        "pre2000" => select.filter(column.lt(2000)),
        "2000s" => select.filter(column.gte(2000)).filter(column.lt(2010)),
        "2010s" => select.filter(column.gte(2010)).filter(column.lt(2020)),
        "2020s" => select.filter(column.gte(2020)),
        other => return Err(AppError::validation(format!("unknown era bucket '{other}'")).into()),
    };
    Ok(select)
}

#[derive(Debug, Deserialize)]
pub struct MoviePayload {
    pub name: String,
    pub original_name: String,
    pub year: i32,
    pub length: i32,
    pub rating_imdb: Decimal,
    pub description: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub director_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    #[serde(default)]
    pub actor_ids: Vec<i32>,
}

fn validate_movie(payload: &MoviePayload) -> AdminResult<()> {
    let mut problems = Vec::new();
    check_name(&mut problems, "name", &payload.name, 50);
    check_name(&mut problems, "original_name", &payload.original_name, 50);
    if !(1895..=2100).contains(&payload.year) {
        problems.push("year must be between 1895 and 2100".to_string());
    }
    if !(0..=1000).contains(&payload.length) {
        problems.push("length must be between 0 and 1000 minutes".to_string());
    }
    if let Err(message) = forms::check_rating(payload.rating_imdb) {
        problems.push(format!("rating_imdb: {message}"));
    }
    if payload.description.trim().is_empty() || payload.description.chars().count() > 2000 {
        problems.push("description must be 1 to 2000 characters".to_string());
    }
    reject(problems)
}

async fn check_movie_refs(
    db: &sea_orm::DatabaseConnection,
    payload: &MoviePayload,
) -> AdminResult<()> {
    if let Some(director_id) = payload.director_id {
        if director::Entity::find_by_id(director_id)
            .one(db)
            .await?
            .is_none()
        {
            return Err(AppError::validation(format!("director {director_id} does not exist")).into());
        }
    }

    let genres = dedup(&payload.genre_ids);
    let found = genre::Entity::find()
        .filter(genre::Column::Id.is_in(genres.clone()))
        .count(db)
        .await?;
    if found as usize != genres.len() {
        return Err(AppError::validation("unknown genre id in genre_ids").into());
    }

    let actors = dedup(&payload.actor_ids);
    let found = actor::Entity::find()
        .filter(actor::Column::Id.is_in(actors.clone()))
        .count(db)
        .await?;
    if found as usize != actors.len() {
        return Err(AppError::validation("unknown actor id in actor_ids").into());
    }

    Ok(())
}

async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MoviePayload>,
) -> AdminResult<Json<MovieRow>> {
    validate_movie(&payload)?;
    let db = state.catalog.db();
    check_movie_refs(db, &payload).await?;

    let slug = match payload.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(&payload.original_name),
    };

    let txn = db.begin().await?;
    let movie = movie::ActiveModel {
        id: Default::default(),
        name: Set(payload.name.trim().to_string()),
        original_name: Set(payload.original_name.trim().to_string()),
        year: Set(payload.year),
        length: Set(payload.length),
        rating_imdb: Set(payload.rating_imdb),
        description: Set(payload.description.clone()),
        slug: Set(slug),
        picture: Set(normalize_opt(&payload.picture)),
        director_id: Set(payload.director_id),
    }
    .insert(&txn)
    .await?;
    replace_junctions(&txn, movie.id, &payload.genre_ids, &payload.actor_ids).await?;
    txn.commit().await?;

    Ok(Json(MovieRow::from(movie)))
}

async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<MoviePayload>,
) -> AdminResult<Json<MovieRow>> {
    validate_movie(&payload)?;
    let db = state.catalog.db();
    let existing = movie::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {id}")))?;
    check_movie_refs(db, &payload).await?;

    let txn = db.begin().await?;
    let mut model: movie::ActiveModel = existing.into();
    model.name = Set(payload.name.trim().to_string());
    model.original_name = Set(payload.original_name.trim().to_string());
    model.year = Set(payload.year);
    model.length = Set(payload.length);
    model.rating_imdb = Set(payload.rating_imdb);
    model.description = Set(payload.description.clone());
    model.picture = Set(normalize_opt(&payload.picture));
    model.director_id = Set(payload.director_id);
    // The slug is fixed at creation; edits never move a movie's URL.
    let movie = model.update(&txn).await?;
    replace_junctions(&txn, movie.id, &payload.genre_ids, &payload.actor_ids).await?;
    txn.commit().await?;

    Ok(Json(MovieRow::from(movie)))
}

async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AdminResult<Json<serde_json::Value>> {
    delete_row::<movie::Entity>(state.catalog.db(), id, "movie").await
}

async fn replace_junctions<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    genre_ids: &[i32],
    actor_ids: &[i32],
) -> Result<(), DbErr> {
    movie_genre::Entity::delete_many()
        .filter(movie_genre::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;
    let rows: Vec<_> = dedup(genre_ids)
        .into_iter()
        .map(|genre_id| movie_genre::ActiveModel {
            id: Default::default(),
            movie_id: Set(movie_id),
            genre_id: Set(genre_id),
        })
        .collect();
    if !rows.is_empty() {
        movie_genre::Entity::insert_many(rows).exec(conn).await?;
    }

    movie_actor::Entity::delete_many()
        .filter(movie_actor::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;
    let rows: Vec<_> = dedup(actor_ids)
        .into_iter()
        .map(|actor_id| movie_actor::ActiveModel {
            id: Default::default(),
            movie_id: Set(movie_id),
            actor_id: Set(actor_id),
        })
        .collect();
    if !rows.is_empty() {
        movie_actor::Entity::insert_many(rows).exec(conn).await?;
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct ActorPayload {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    #[serde(default)]
    pub residence_id: Option<i32>,
}

async fn list_actors(State(state): State<Arc<AppState>>) -> AdminResult<Json<Vec<actor::Model>>> {
    Ok(Json(
        actor::Entity::find()
            .order_by_asc(actor::Column::Id)
            .all(state.catalog.db())
            .await?,
    ))
}

async fn create_actor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ActorPayload>,
) -> AdminResult<Json<actor::Model>> {
    validate_person(&payload.first_name, &payload.last_name)?;
    let db = state.catalog.db();
    check_residence(db, payload.residence_id, None).await?;

    let actor = actor::ActiveModel {
        id: Default::default(),
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        gender: Set(payload.gender),
        residence_id: Set(payload.residence_id),
        slug: Set(slugify_name(&payload.first_name, &payload.last_name)),
    }
    .insert(db)
    .await?;

    Ok(Json(actor))
}

async fn update_actor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ActorPayload>,
) -> AdminResult<Json<actor::Model>> {
    validate_person(&payload.first_name, &payload.last_name)?;
    let db = state.catalog.db();
    let existing = actor::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("actor {id}")))?;
    check_residence(db, payload.residence_id, Some(id)).await?;

    let mut model: actor::ActiveModel = existing.into();
    model.first_name = Set(payload.first_name.trim().to_string());
    model.last_name = Set(payload.last_name.trim().to_string());
    model.gender = Set(payload.gender);
    model.residence_id = Set(payload.residence_id);
    let actor = model.update(db).await?;

    Ok(Json(actor))
}

async fn delete_actor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AdminResult<Json<serde_json::Value>> {
    delete_row::<actor::Entity>(state.catalog.db(), id, "actor").await
}

#[derive(Debug, Deserialize)]
pub struct GenderUpdate {
    pub ids: Vec<i32>,
    pub gender: Gender,
}

/// Bulk gender assignment over a selection of actors.
async fn set_actor_gender(
    State(state): State<Arc<AppState>>,
    Json(update): Json<GenderUpdate>,
) -> AdminResult<Json<serde_json::Value>> {
    let result = actor::Entity::update_many()
        .col_expr(actor::Column::Gender, Expr::value(update.gender))
        .filter(actor::Column::Id.is_in(update.ids))
        .exec(state.catalog.db())
        .await?;

    Ok(Json(json!({ "updated": result.rows_affected })))
}

#[derive(Debug, Deserialize)]
pub struct DirectorPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

async fn list_directors(
    State(state): State<Arc<AppState>>,
) -> AdminResult<Json<Vec<director::Model>>> {
    Ok(Json(
        director::Entity::find()
            .order_by_asc(director::Column::Id)
            .all(state.catalog.db())
            .await?,
    ))
}

async fn create_director(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DirectorPayload>,
) -> AdminResult<Json<director::Model>> {
    validate_director(&payload)?;

    let director = director::ActiveModel {
        id: Default::default(),
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        slug: Set(slugify_name(&payload.first_name, &payload.last_name)),
    }
    .insert(state.catalog.db())
    .await?;

    Ok(Json(director))
}

async fn update_director(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<DirectorPayload>,
) -> AdminResult<Json<director::Model>> {
    validate_director(&payload)?;
    let db = state.catalog.db();
    let existing = director::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("director {id}")))?;

    let mut model: director::ActiveModel = existing.into();
    model.first_name = Set(payload.first_name.trim().to_string());
    model.last_name = Set(payload.last_name.trim().to_string());
    model.email = Set(payload.email.trim().to_string());
    let director = model.update(db).await?;

    Ok(Json(director))
}

async fn delete_director(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AdminResult<Json<serde_json::Value>> {
    delete_row::<director::Entity>(state.catalog.db(), id, "director").await
}

#[derive(Debug, Deserialize)]
pub struct GenrePayload {
    pub name: String,
}

async fn list_genres(State(state): State<Arc<AppState>>) -> AdminResult<Json<Vec<genre::Model>>> {
    Ok(Json(
        genre::Entity::find()
            .order_by_asc(genre::Column::Id)
            .all(state.catalog.db())
            .await?,
    ))
}

async fn create_genre(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenrePayload>,
) -> AdminResult<Json<genre::Model>> {
    let mut problems = Vec::new();
    check_name(&mut problems, "name", &payload.name, 40);
    reject(problems)?;

    let genre = genre::ActiveModel {
        id: Default::default(),
        name: Set(payload.name.trim().to_string()),
    }
    .insert(state.catalog.db())
    .await?;

    Ok(Json(genre))
}

async fn update_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<GenrePayload>,
) -> AdminResult<Json<genre::Model>> {
    let mut problems = Vec::new();
    check_name(&mut problems, "name", &payload.name, 40);
    reject(problems)?;

    let db = state.catalog.db();
    let existing = genre::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("genre {id}")))?;

    let mut model: genre::ActiveModel = existing.into();
    model.name = Set(payload.name.trim().to_string());
    let genre = model.update(db).await?;

    Ok(Json(genre))
}

async fn delete_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AdminResult<Json<serde_json::Value>> {
    delete_row::<genre::Entity>(state.catalog.db(), id, "genre").await
}

#[derive(Debug, Deserialize)]
pub struct PlacePayload {
    pub country: String,
    pub city: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub map_coordinate: Option<String>,
}

async fn list_places(
    State(state): State<Arc<AppState>>,
) -> AdminResult<Json<Vec<place_residence::Model>>> {
    Ok(Json(
        place_residence::Entity::find()
            .order_by_asc(place_residence::Column::Id)
            .all(state.catalog.db())
            .await?,
    ))
}

async fn create_place(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlacePayload>,
) -> AdminResult<Json<place_residence::Model>> {
    validate_place(&payload)?;

    let place = place_residence::ActiveModel {
        id: Default::default(),
        country: Set(payload.country.trim().to_string()),
        city: Set(payload.city.trim().to_string()),
        street: Set(payload.street.trim().to_string()),
        number: Set(payload.number.trim().to_string()),
        map_coordinate: Set(normalize_opt(&payload.map_coordinate)
            .unwrap_or_else(|| DEFAULT_MAP_URL.to_string())),
    }
    .insert(state.catalog.db())
    .await?;

    Ok(Json(place))
}

async fn update_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<PlacePayload>,
) -> AdminResult<Json<place_residence::Model>> {
    validate_place(&payload)?;
    let db = state.catalog.db();
    let existing = place_residence::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("place {id}")))?;

    let mut model: place_residence::ActiveModel = existing.into();
    model.country = Set(payload.country.trim().to_string());
    model.city = Set(payload.city.trim().to_string());
    model.street = Set(payload.street.trim().to_string());
    model.number = Set(payload.number.trim().to_string());
    model.map_coordinate = Set(normalize_opt(&payload.map_coordinate)
        .unwrap_or_else(|| DEFAULT_MAP_URL.to_string()));
    let place = model.update(db).await?;

    Ok(Json(place))
}

async fn delete_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AdminResult<Json<serde_json::Value>> {
    delete_row::<place_residence::Entity>(state.catalog.db(), id, "place").await
}

async fn list_ratings(
    State(state): State<Arc<AppState>>,
) -> AdminResult<Json<Vec<rating::Model>>> {
    Ok(Json(
        rating::Entity::find()
            .order_by_asc(rating::Column::Id)
            .all(state.catalog.db())
            .await?,
    ))
}

async fn delete_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AdminResult<Json<serde_json::Value>> {
    delete_row::<rating::Entity>(state.catalog.db(), id, "rating").await
}

/// Feedback is list-and-delete only; the submitter's email in particular is
/// never editable once stored.
async fn list_feedback(
    State(state): State<Arc<AppState>>,
) -> AdminResult<Json<Vec<feedback::Model>>> {
    Ok(Json(
        feedback::Entity::find()
            .order_by_asc(feedback::Column::Id)
            .all(state.catalog.db())
            .await?,
    ))
}

async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AdminResult<Json<serde_json::Value>> {
    delete_row::<feedback::Entity>(state.catalog.db(), id, "feedback").await
}

async fn delete_row<E>(
    db: &sea_orm::DatabaseConnection,
    id: i32,
    label: &str,
) -> AdminResult<Json<serde_json::Value>>
where
    E: EntityTrait,
    i32: Into<<E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType>,
{
    let result = E::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(format!("{label} {id}")).into());
    }
    Ok(Json(json!({ "deleted": result.rows_affected })))
}

fn validate_person(first_name: &str, last_name: &str) -> AdminResult<()> {
    let mut problems = Vec::new();
    check_name(&mut problems, "first_name", first_name, 100);
    check_name(&mut problems, "last_name", last_name, 100);
    reject(problems)
}

fn validate_director(payload: &DirectorPayload) -> AdminResult<()> {
    let mut problems = Vec::new();
    check_name(&mut problems, "first_name", &payload.first_name, 100);
    check_name(&mut problems, "last_name", &payload.last_name, 100);
    if !payload.email.trim().validate_email() {
        problems.push("email must be a valid address".to_string());
    }
    reject(problems)
}

fn validate_place(payload: &PlacePayload) -> AdminResult<()> {
    let mut problems = Vec::new();
    check_name(&mut problems, "country", &payload.country, 40);
    check_name(&mut problems, "city", &payload.city, 40);
    check_name(&mut problems, "street", &payload.street, 40);
    check_name(&mut problems, "number", &payload.number, 10);
    // An empty link falls back to the default; anything else must be a URL.
    if let Some(url) = normalize_opt(&payload.map_coordinate) {
        if !url.validate_url() {
            problems.push("map_coordinate must be a valid URL".to_string());
        }
    }
    reject(problems)
}

/// A place houses at most one actor, so assignment checks both existence
/// and whether another actor already lives there.
async fn check_residence(
    db: &sea_orm::DatabaseConnection,
    residence_id: Option<i32>,
    actor_id: Option<i32>,
) -> AdminResult<()> {
    let Some(id) = residence_id else {
        return Ok(());
    };
    if place_residence::Entity::find_by_id(id).one(db).await?.is_none() {
        return Err(AppError::validation(format!("place {id} does not exist")).into());
    }
    let mut occupied = actor::Entity::find().filter(actor::Column::ResidenceId.eq(id));
    if let Some(actor_id) = actor_id {
        occupied = occupied.filter(actor::Column::Id.ne(actor_id));
    }
    if occupied.one(db).await?.is_some() {
        return Err(AppError::validation(format!("place {id} is already assigned")).into());
    }
    Ok(())
}

fn check_name(problems: &mut Vec<String>, field: &str, value: &str, max: usize) {
    let length = value.trim().chars().count();
    if length == 0 || length > max {
        problems.push(format!("{field} must be 1 to {max} characters"));
    }
}

fn reject(problems: Vec<String>) -> AdminResult<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(problems.join("; ")).into())
    }
}

fn normalize_opt(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn dedup(ids: &[i32]) -> Vec<i32> {
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique
}
