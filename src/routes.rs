use std::sync::Arc;

use axum::{
    extract::{Form, Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;

use crate::{
    client_ip::ClientIp,
    error::AppResult,
    filter::{self, FilterParams},
    forms::{FeedbackForm, FormErrors, FormState, RatingForm},
    models::MovieDetail,
    review, search, templates, AppState,
};

pub async fn index(State(state): State<Arc<AppState>>, ip: ClientIp) -> AppResult<Html<String>> {
    let movies = state.catalog.movies().await?;
    let sidebar = state.catalog.sidebar().await?;
    Ok(Html(templates::movie_list_page(&movies, &sidebar, &ip)))
}

pub async fn filter_listing(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    ip: ClientIp,
) -> AppResult<Html<String>> {
    let params = FilterParams::from_query(query.as_deref());
    let today = Utc::now().date_naive();
    let paged = filter::filter_movies(
        &state.catalog,
        &params,
        &ip,
        today,
        state.config.filter_page_size,
    )
    .await?;
    let sidebar = state.catalog.sidebar().await?;
    let echo = filter::selection_echo(&params);
    Ok(Html(templates::filter_page(&paged, &sidebar, &echo)))
}

pub async fn search_listing(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> AppResult<Html<String>> {
    let pairs = filter::parse_query(query.as_deref().unwrap_or(""));
    let q = pairs
        .iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();
    let page = pairs
        .iter()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.trim().parse::<u64>().ok())
        .unwrap_or(1);

    let paged =
        search::search_movies(state.catalog.db(), &q, page, state.config.search_page_size).await?;
    let sidebar = state.catalog.sidebar().await?;
    Ok(Html(templates::search_page(&paged, &sidebar, &q)))
}

/// `/movies/{key}`: an integer key names a genre, anything else is a movie
/// slug.
pub async fn movie_or_genre(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    ip: ClientIp,
) -> AppResult<Response> {
    if let Ok(genre_id) = key.parse::<i32>() {
        let detail = state.catalog.genre_detail(genre_id).await?;
        return Ok(Html(templates::genre_page(&detail)).into_response());
    }

    let detail = state.catalog.movie_detail(&key).await?;
    let sidebar = state.catalog.sidebar().await?;
    let html = templates::movie_detail_page(
        &detail,
        &sidebar,
        &ip,
        &FormState::default(),
        &FormState::default(),
    );
    Ok(Html(html).into_response())
}

pub async fn actor_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let actors = state.catalog.actors().await?;
    Ok(Html(templates::actor_list_page(&actors)))
}

pub async fn actor_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let detail = state.catalog.actor_detail(&slug).await?;
    let sidebar = state.catalog.sidebar().await?;
    Ok(Html(templates::actor_detail_page(&detail, &sidebar)))
}

pub async fn director_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let directors = state.catalog.directors().await?;
    Ok(Html(templates::director_list_page(&directors)))
}

pub async fn director_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let detail = state.catalog.director_detail(&slug).await?;
    let sidebar = state.catalog.sidebar().await?;
    Ok(Html(templates::director_detail_page(&detail, &sidebar)))
}

pub async fn submit_rating(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    ip: ClientIp,
    Form(form): Form<RatingForm>,
) -> AppResult<Response> {
    // Resolve the movie before touching the form so an unknown id is a 404,
    // not a validation failure.
    let detail = state.catalog.movie_detail_by_id(movie_id).await?;
    let today = Utc::now().date_naive();

    let errors = match form.parse(today) {
        Ok(values) => {
            if let Some(key) = ip.key() {
                review::upsert_rating(
                    state.catalog.db(),
                    &key,
                    detail.movie.id,
                    values.rating,
                    values.viewed_date,
                )
                .await?;
                return Ok(Redirect::to(&format!("/movies/{}", detail.movie.slug)).into_response());
            }
            let mut errors = FormErrors::default();
            errors.push("rating", "could not determine your address, nothing was saved");
            errors
        }
        Err(errors) => errors,
    };

    rejected_movie_page(
        &state,
        detail,
        &ip,
        FormState::failed(form, errors),
        FormState::default(),
    )
    .await
}

pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    ip: ClientIp,
    Form(form): Form<FeedbackForm>,
) -> AppResult<Response> {
    let detail = state.catalog.movie_detail_by_id(movie_id).await?;
    let form = form.normalized();

    match form.check() {
        Ok(()) => {
            review::insert_feedback(state.catalog.db(), detail.movie.id, &form).await?;
            Ok(Redirect::to(&format!("/movies/{}", detail.movie.slug)).into_response())
        }
        Err(errors) => {
            rejected_movie_page(
                &state,
                detail,
                &ip,
                FormState::default(),
                FormState::failed(form, errors),
            )
            .await
        }
    }
}

async fn rejected_movie_page(
    state: &AppState,
    detail: MovieDetail,
    ip: &ClientIp,
    rating: FormState<RatingForm>,
    feedback: FormState<FeedbackForm>,
) -> AppResult<Response> {
    let sidebar = state.catalog.sidebar().await?;
    let html = templates::movie_detail_page(&detail, &sidebar, ip, &rating, &feedback);
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::Catalog, config::Config, entities::{feedback, rating}, test_utils};
    use axum::{
        body::Body,
        http::Request,
        routing::{get, post},
        Router,
    };
    use sea_orm::EntityTrait;
    use tower::ServiceExt;

    async fn test_state() -> Arc<AppState> {
        let db = test_utils::db().await;
        Arc::new(AppState {
            config: Arc::new(Config {
                listen_addr: "127.0.0.1:0".parse().unwrap(),
                database_url: "sqlite::memory:".to_string(),
                filter_page_size: 2,
                search_page_size: 1,
            }),
            catalog: Catalog::new(db),
        })
    }

    fn app(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/movies/{key}", get(movie_or_genre))
            .route("/review/{movie_id}", post(submit_rating))
            .route("/feedback/{movie_id}", post(submit_feedback))
            .with_state(state)
    }

    fn form_post(uri: String, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn rating_submission_redirects_to_the_movie() {
        let state = test_state().await;
        let movie =
            test_utils::seed_movie(state.catalog.db(), "Heat", "Heat", 1995, "8.3", None).await;

        let response = app(state.clone())
            .oneshot(form_post(
                format!("/review/{}", movie.id),
                "rating=8.5&viewed_date=2024-03-01",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/movies/heat");

        let rows = rating::Entity::find().all(state.catalog.db()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ip, "203.0.113.7");
    }

    #[tokio::test]
    async fn resubmitting_a_rating_keeps_one_row_with_the_latest_values() {
        let state = test_state().await;
        let movie =
            test_utils::seed_movie(state.catalog.db(), "Heat", "Heat", 1995, "8.3", None).await;

        for body in ["rating=7.5&viewed_date=2024-03-01", "rating=8.0&viewed_date=2024-03-01"] {
            let response = app(state.clone())
                .oneshot(form_post(format!("/review/{}", movie.id), body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        }

        let rows = rating::Entity::find().all(state.catalog.db()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rating, "8.0".parse::<rust_decimal::Decimal>().unwrap());
        assert_eq!(
            rows[0].viewed_date,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn rating_an_unknown_movie_is_404_and_writes_nothing() {
        let state = test_state().await;

        let response = app(state.clone())
            .oneshot(form_post("/review/999".to_string(), "rating=8.5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let rows = rating::Entity::find().all(state.catalog.db()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn invalid_rating_rerenders_with_422_and_writes_nothing() {
        let state = test_state().await;
        let movie =
            test_utils::seed_movie(state.catalog.db(), "Heat", "Heat", 1995, "8.3", None).await;

        let response = app(state.clone())
            .oneshot(form_post(format!("/review/{}", movie.id), "rating=eleven"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let rows = rating::Entity::find().all(state.catalog.db()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn rating_without_a_resolvable_address_is_422_and_writes_nothing() {
        let state = test_state().await;
        let movie =
            test_utils::seed_movie(state.catalog.db(), "Heat", "Heat", 1995, "8.3", None).await;

        // No forwarding header and no connection info on the request.
        let request = Request::builder()
            .method("POST")
            .uri(format!("/review/{}", movie.id))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("rating=8.5&viewed_date=2024-03-01"))
            .unwrap();
        let response = app(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let rows = rating::Entity::find().all(state.catalog.db()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn malformed_movie_id_is_a_bad_request() {
        let state = test_state().await;

        let response = app(state.clone())
            .oneshot(form_post("/review/abc".to_string(), "rating=8.5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn feedback_submission_round_trips() {
        let state = test_state().await;
        let movie =
            test_utils::seed_movie(state.catalog.db(), "Heat", "Heat", 1995, "8.3", None).await;

        let response = app(state.clone())
            .oneshot(form_post(
                format!("/feedback/{}", movie.id),
                "name=Ada&surname=Lovelace&email=ada%40example.com&feed=More+like+this",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/movies/heat");

        let rows = feedback::Entity::find().all(state.catalog.db()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].feed, "More like this");
    }

    #[tokio::test]
    async fn feedback_for_an_unknown_movie_is_404_and_writes_nothing() {
        let state = test_state().await;

        let response = app(state.clone())
            .oneshot(form_post(
                "/feedback/999".to_string(),
                "name=Ada&surname=Lovelace&email=ada%40example.com&feed=Great",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let rows = feedback::Entity::find().all(state.catalog.db()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn incomplete_feedback_rerenders_with_422() {
        let state = test_state().await;
        let movie =
            test_utils::seed_movie(state.catalog.db(), "Heat", "Heat", 1995, "8.3", None).await;

        let response = app(state.clone())
            .oneshot(form_post(
                format!("/feedback/{}", movie.id),
                "name=Ada&surname=&email=bad&feed=",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let rows = feedback::Entity::find().all(state.catalog.db()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn numeric_key_is_a_genre_and_slug_is_a_movie() {
        let state = test_state().await;
        let genre = test_utils::seed_genre(state.catalog.db(), "Drama").await;
        test_utils::seed_movie(state.catalog.db(), "Heat", "Heat", 1995, "8.3", None).await;

        let ok = app(state.clone())
            .oneshot(
                Request::builder()
                    .uri(format!("/movies/{}", genre.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let movie = app(state.clone())
            .oneshot(Request::builder().uri("/movies/heat").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(movie.status(), StatusCode::OK);

        let missing = app(state.clone())
            .oneshot(Request::builder().uri("/movies/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
