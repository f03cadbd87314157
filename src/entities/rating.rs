use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One viewer's rating of one movie. Unique per (ip, movie_id); the
/// submission endpoint upserts on that key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ip: String,
    #[sea_orm(column_type = "Decimal(Some((3, 1)))")]
    pub rating: Decimal,
    pub viewed_date: Date,
    pub movie_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id",
        on_delete = "Cascade"
    )]
    Movie,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
