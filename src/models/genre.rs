use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Genre;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub genre_name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie::Entity")]
    Movie,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Genre {
    fn from(model: Model) -> Self {
        Self {
            genre_id: model.id,
            genre_name: model.genre_name,
            created_date: model.created_at,
            modified_date: model.updated_at,
        }
    }
}
