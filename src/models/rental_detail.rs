use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rental_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rental_id: i32,
    pub movie_id: i32,
    /// `None` while the copy is out; set once, never cleared
    pub date_returned: Option<Date>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rental_header::Entity",
        from = "Column::RentalId",
        to = "super::rental_header::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RentalHeader,
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id"
    )]
    Movie,
}

impl Related<super::rental_header::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalHeader.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
