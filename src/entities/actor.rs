use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Male
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    /// Nullified when the referenced residence is deleted.
    pub residence_id: Option<i32>,
    /// Derived from "first-last" at creation, immutable afterwards.
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::place_residence::Entity",
        from = "Column::ResidenceId",
        to = "super::place_residence::Column::Id",
        on_delete = "SetNull"
    )]
    Residence,

    #[sea_orm(has_many = "super::movie_actor::Entity")]
    MovieActor,
}

impl Related<super::place_residence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Residence.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_actor::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_actor::Relation::Actor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
