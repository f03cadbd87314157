use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{sea_query::OnConflict, ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::debug;

use crate::{
    entities::{feedback, rating},
    error::AppResult,
    forms::FeedbackForm,
};

/// Inserts or refreshes the caller's rating for one movie in a single
/// statement. Concurrent submissions for the same (ip, movie) land on the
/// unique index and the later write wins; nothing reads first.
pub async fn upsert_rating(
    db: &DatabaseConnection,
    ip: &str,
    movie_id: i32,
    value: Decimal,
    viewed_date: NaiveDate,
) -> AppResult<()> {
    debug!(ip = %ip, movie_id = movie_id, rating = %value, "storing rating");
    let model = rating::ActiveModel {
        id: Default::default(),
        ip: Set(ip.to_string()),
        rating: Set(value),
        viewed_date: Set(viewed_date),
        movie_id: Set(movie_id),
    };

    rating::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([rating::Column::Ip, rating::Column::MovieId])
                .update_columns([rating::Column::Rating, rating::Column::ViewedDate])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

/// Stores one feedback entry. The caller validates and resolves the movie
/// first; the form is expected to be normalized already.
pub async fn insert_feedback(
    db: &DatabaseConnection,
    movie_id: i32,
    form: &FeedbackForm,
) -> AppResult<()> {
    debug!(movie_id = movie_id, "storing feedback");
    let model = feedback::ActiveModel {
        id: Default::default(),
        email: Set(form.email.clone()),
        name: Set(form.name.clone()),
        surname: Set(form.surname.clone()),
        feed: Set(form.feed.clone()),
        movie_id: Set(movie_id),
    };
    model.insert(db).await?;

    Ok(())
}
