use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Movie;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub movie_name: String,
    pub genre_id: i32,
    pub date_added: Date,
    pub release_date: Date,
    /// Copies owned by the store, 0..=20
    pub number_in_stock: i32,
    /// Copies on the shelf, 0..=number_in_stock
    pub number_available: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::genre::Entity",
        from = "Column::GenreId",
        to = "super::genre::Column::Id"
    )]
    Genre,
    #[sea_orm(has_many = "super::rental_detail::Entity")]
    RentalDetail,
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genre.def()
    }
}

impl Related<super::rental_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the API view, `genre_name` comes from the joined genre row
    pub fn into_movie(self, genre_name: Option<String>) -> Movie {
        Movie {
            movie_id: self.id,
            movie_name: self.movie_name,
            genre_id: self.genre_id,
            genre: genre_name.unwrap_or_else(|| "Unknown".to_string()),
            release_date: self.release_date,
            date_added: self.date_added,
            number_in_stock: self.number_in_stock,
            number_available: self.number_available,
            created_date: self.created_at,
            modified_date: self.updated_at,
        }
    }
}
