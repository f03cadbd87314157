use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    entities::{actor, director, genre, movie, place_residence},
    error::{AppError, AppResult},
    models::{ActorDetail, DirectorDetail, FilterSidebar, GenreDetail, MovieDetail},
};

/// Read side of the catalog: listings, slug and id lookups, and the data
/// behind the filter sidebar. Public submissions write through `review`,
/// the operator console through `admin`.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn movies(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn movie_by_id(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("movie {id}")))
    }

    pub async fn movie_detail(&self, slug: &str) -> AppResult<MovieDetail> {
        // Slugs are not unique by schema; the oldest row wins.
        let movie = movie::Entity::find()
            .filter(movie::Column::Slug.eq(slug))
            .order_by_asc(movie::Column::Id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("movie '{slug}'")))?;
        self.movie_context(movie).await
    }

    pub async fn movie_detail_by_id(&self, id: i32) -> AppResult<MovieDetail> {
        let movie = self.movie_by_id(id).await?;
        self.movie_context(movie).await
    }

    async fn movie_context(&self, movie: movie::Model) -> AppResult<MovieDetail> {
        let genres = movie
            .find_related(genre::Entity)
            .order_by_asc(genre::Column::Id)
            .all(&self.db)
            .await?;
        let actors = movie
            .find_related(actor::Entity)
            .order_by_asc(actor::Column::Id)
            .all(&self.db)
            .await?;
        let director = match movie.director_id {
            Some(id) => director::Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };

        Ok(MovieDetail {
            movie,
            genres,
            actors,
            director,
        })
    }

    pub async fn actors(&self) -> AppResult<Vec<actor::Model>> {
        Ok(actor::Entity::find()
            .order_by_asc(actor::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn actor_detail(&self, slug: &str) -> AppResult<ActorDetail> {
        let actor = actor::Entity::find()
            .filter(actor::Column::Slug.eq(slug))
            .order_by_asc(actor::Column::Id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("actor '{slug}'")))?;

        let residence = match actor.residence_id {
            Some(id) => place_residence::Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };
        let movies = actor
            .find_related(movie::Entity)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        Ok(ActorDetail {
            actor,
            residence,
            movies,
        })
    }

    pub async fn directors(&self) -> AppResult<Vec<director::Model>> {
        Ok(director::Entity::find()
            .order_by_asc(director::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn director_detail(&self, slug: &str) -> AppResult<DirectorDetail> {
        let director = director::Entity::find()
            .filter(director::Column::Slug.eq(slug))
            .order_by_asc(director::Column::Id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("director '{slug}'")))?;

        let movies = director
            .find_related(movie::Entity)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        Ok(DirectorDetail { director, movies })
    }

    pub async fn genre_detail(&self, id: i32) -> AppResult<GenreDetail> {
        let genre = genre::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("genre {id}")))?;

        let movies = genre
            .find_related(movie::Entity)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        Ok(GenreDetail { genre, movies })
    }

    pub async fn genres(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find()
            .order_by_asc(genre::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn genre_ids(&self) -> AppResult<Vec<i32>> {
        Ok(genre::Entity::find()
            .select_only()
            .column(genre::Column::Id)
            .order_by_asc(genre::Column::Id)
            .into_tuple::<i32>()
            .all(&self.db)
            .await?)
    }

    /// Distinct release years present in the catalog, ascending.
    pub async fn years(&self) -> AppResult<Vec<i32>> {
        Ok(movie::Entity::find()
            .select_only()
            .column(movie::Column::Year)
            .distinct()
            .order_by_asc(movie::Column::Year)
            .into_tuple::<i32>()
            .all(&self.db)
            .await?)
    }

    pub async fn sidebar(&self) -> AppResult<FilterSidebar> {
        Ok(FilterSidebar {
            genres: self.genres().await?,
            years: self.years().await?,
        })
    }
}
