use std::sync::Arc;

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Set,
    Statement,
};

use crate::{
    catalog::Catalog,
    config::Config,
    entities::{actor, director, genre, movie, movie_actor, movie_genre, place_residence, rating},
    slug::{slugify, slugify_name},
    AppState,
};

/// Fresh migrated in-memory database. Pinned to a single connection since
/// every pooled connection would otherwise see its own empty store.
pub async fn db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await.unwrap();
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON".to_string(),
    ))
    .await
    .unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn app_state() -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(Config {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "sqlite::memory:".to_string(),
            filter_page_size: 2,
            search_page_size: 1,
        }),
        catalog: Catalog::new(db().await),
    })
}

pub async fn seed_genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    genre::ActiveModel {
        id: Default::default(),
        name: Set(name.to_string()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_director(db: &DatabaseConnection, first: &str, last: &str) -> director::Model {
    director::ActiveModel {
        id: Default::default(),
        first_name: Set(first.to_string()),
        last_name: Set(last.to_string()),
        email: Set(format!("{}@example.com", slugify(last))),
        slug: Set(slugify_name(first, last)),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_place(db: &DatabaseConnection, country: &str, city: &str) -> place_residence::Model {
    place_residence::ActiveModel {
        id: Default::default(),
        country: Set(country.to_string()),
        city: Set(city.to_string()),
        street: Set("Main Street".to_string()),
        number: Set("1".to_string()),
        map_coordinate: Set("https://www.google.com/maps".to_string()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_actor(
    db: &DatabaseConnection,
    first: &str,
    last: &str,
    residence_id: Option<i32>,
) -> actor::Model {
    actor::ActiveModel {
        id: Default::default(),
        first_name: Set(first.to_string()),
        last_name: Set(last.to_string()),
        gender: Set(actor::Gender::Male),
        residence_id: Set(residence_id),
        slug: Set(slugify_name(first, last)),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_movie(
    db: &DatabaseConnection,
    name: &str,
    original_name: &str,
    year: i32,
    rating_imdb: &str,
    director_id: Option<i32>,
) -> movie::Model {
    movie::ActiveModel {
        id: Default::default(),
        name: Set(name.to_string()),
        original_name: Set(original_name.to_string()),
        year: Set(year),
        length: Set(120),
        rating_imdb: Set(rating_imdb.parse().unwrap()),
        description: Set(format!("About {name}.")),
        slug: Set(slugify(original_name)),
        picture: Set(None),
        director_id: Set(director_id),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn link_genre(db: &DatabaseConnection, movie_id: i32, genre_id: i32) {
    movie_genre::ActiveModel {
        id: Default::default(),
        movie_id: Set(movie_id),
        genre_id: Set(genre_id),
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn link_actor(db: &DatabaseConnection, movie_id: i32, actor_id: i32) {
    movie_actor::ActiveModel {
        id: Default::default(),
        movie_id: Set(movie_id),
        actor_id: Set(actor_id),
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn seed_rating(
    db: &DatabaseConnection,
    ip: &str,
    movie_id: i32,
    value: &str,
    viewed_date: NaiveDate,
) -> rating::Model {
    rating::ActiveModel {
        id: Default::default(),
        ip: Set(ip.to_string()),
        rating: Set(value.parse().unwrap()),
        viewed_date: Set(viewed_date),
        movie_id: Set(movie_id),
    }
    .insert(db)
    .await
    .unwrap()
}
