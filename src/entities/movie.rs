use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub original_name: String,
    pub year: i32,
    /// Running time in minutes.
    pub length: i32,
    #[sea_orm(column_type = "Decimal(Some((3, 1)))")]
    pub rating_imdb: Decimal,
    pub description: String,
    /// Derived from the original name when absent at creation, immutable
    /// afterwards.
    pub slug: String,
    /// Poster path; upload handling lives outside this service.
    pub picture: Option<String>,
    pub director_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::director::Entity",
        from = "Column::DirectorId",
        to = "super::director::Column::Id",
        on_delete = "Cascade"
    )]
    Director,

    #[sea_orm(has_many = "super::movie_genre::Entity")]
    MovieGenre,

    #[sea_orm(has_many = "super::movie_actor::Entity")]
    MovieActor,

    #[sea_orm(has_many = "super::rating::Entity")]
    Rating,

    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::director::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Director.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rating.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_genre::Relation::Movie.def().rev())
    }
}

impl Related<super::actor::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_actor::Relation::Actor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_actor::Relation::Movie.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
