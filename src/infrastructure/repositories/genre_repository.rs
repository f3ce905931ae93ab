//! SeaORM implementation of GenreRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::now;
use crate::domain::rules::normalize_name;
use crate::domain::{DomainError, Genre, GenreRepository};
use crate::models::genre::{ActiveModel, Column, Entity as GenreEntity};

/// SeaORM-based implementation of GenreRepository
pub struct SeaOrmGenreRepository {
    db: DatabaseConnection,
}

impl SeaOrmGenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        let genres = GenreEntity::find()
            .order_by_asc(Column::GenreName)
            .all(&self.db)
            .await?;

        Ok(genres.into_iter().map(Genre::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError> {
        let genre = GenreEntity::find_by_id(id).one(&self.db).await?;
        Ok(genre.map(Genre::from))
    }

    async fn create(&self, name: String) -> Result<Genre, DomainError> {
        let genre_name = normalize_name(name.trim());

        let duplicate = GenreEntity::find()
            .filter(Column::GenreName.eq(genre_name.as_str()))
            .one(&self.db)
            .await?;
        if duplicate.is_some() {
            return Err(DomainError::BusinessRule(format!(
                "Genre '{}' already exists",
                genre_name
            )));
        }

        let now = now();
        let new_genre = ActiveModel {
            genre_name: Set(genre_name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_genre.insert(&self.db).await?;
        Ok(Genre::from(result))
    }
}
