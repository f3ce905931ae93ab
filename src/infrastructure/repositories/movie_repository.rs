//! SeaORM implementation of MovieRepository
//!
//! Also hosts the stock counter primitives the rental ledger runs inside its
//! transactions.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};

use super::{now, ordered, unsupported_sort};
use crate::domain::rules::{clamp_stock, normalize_name};
use crate::domain::{DomainError, Movie, MovieRepository, NewMovie, Page, PageRequest};
use crate::models::genre::Entity as GenreEntity;
use crate::models::movie::{ActiveModel, Column, Entity as MovieEntity};

/// SeaORM-based implementation of MovieRepository
pub struct SeaOrmMovieRepository {
    db: DatabaseConnection,
}

impl SeaOrmMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(property: &str) -> Option<Column> {
    match property {
        "movieId" | "id" => Some(Column::Id),
        "movieName" => Some(Column::MovieName),
        "releaseDate" => Some(Column::ReleaseDate),
        "dateAdded" => Some(Column::DateAdded),
        "numberInStock" => Some(Column::NumberInStock),
        "numberAvailable" => Some(Column::NumberAvailable),
        "createdDate" => Some(Column::CreatedAt),
        _ => None,
    }
}

/// Take one copy off the shelf: `number_available - 1` only while it is positive.
///
/// Returns `false` when no copy was available (or the movie does not exist).
pub(crate) async fn take_copy<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
) -> Result<bool, DomainError> {
    let result = MovieEntity::update_many()
        .col_expr(
            Column::NumberAvailable,
            Expr::col(Column::NumberAvailable).sub(1),
        )
        .col_expr(Column::UpdatedAt, Expr::value(now()))
        .filter(Column::Id.eq(movie_id))
        .filter(Column::NumberAvailable.gt(0))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Put one copy back: `number_available + 1` capped at `number_in_stock`.
///
/// Returns `false` when the counter was already at the cap.
pub(crate) async fn return_copy<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
) -> Result<bool, DomainError> {
    let result = MovieEntity::update_many()
        .col_expr(
            Column::NumberAvailable,
            Expr::col(Column::NumberAvailable).add(1),
        )
        .col_expr(Column::UpdatedAt, Expr::value(now()))
        .filter(Column::Id.eq(movie_id))
        .filter(Expr::col(Column::NumberAvailable).lt(Expr::col(Column::NumberInStock)))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

#[async_trait]
impl MovieRepository for SeaOrmMovieRepository {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Movie>, DomainError> {
        let column = sort_column(&request.sort.property)
            .ok_or_else(|| unsupported_sort(&request.sort))?;
        let query = ordered(MovieEntity::find(), column, request.sort.direction, Column::Id)
            .find_also_related(GenreEntity);

        let paginator = query.paginate(&self.db, request.size);
        let total = paginator.num_items().await?;
        let movies = paginator.fetch_page(request.page).await?;

        let content = movies
            .into_iter()
            .map(|(movie, genre)| movie.into_movie(genre.map(|g| g.genre_name)))
            .collect();

        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Movie>, DomainError> {
        let result = MovieEntity::find_by_id(id)
            .find_also_related(GenreEntity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(movie, genre)| movie.into_movie(genre.map(|g| g.genre_name))))
    }

    async fn create(&self, input: NewMovie) -> Result<Movie, DomainError> {
        let genre = GenreEntity::find_by_id(input.genre_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::genre_not_found(input.genre_id))?;

        let (number_in_stock, number_available) =
            clamp_stock(input.number_in_stock, input.number_available);
        let now = now();

        let new_movie = ActiveModel {
            movie_name: Set(normalize_name(input.movie_name.trim())),
            genre_id: Set(genre.id),
            date_added: Set(input.date_added),
            release_date: Set(input.release_date),
            number_in_stock: Set(number_in_stock),
            number_available: Set(number_available),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_movie.insert(&self.db).await?;
        Ok(result.into_movie(Some(genre.genre_name)))
    }

    async fn update_stock(
        &self,
        id: i32,
        number_in_stock: i32,
        number_available: i32,
    ) -> Result<Movie, DomainError> {
        let (existing, genre) = MovieEntity::find_by_id(id)
            .find_also_related(GenreEntity)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::movie_not_found(id))?;

        let (number_in_stock, number_available) = clamp_stock(number_in_stock, number_available);

        let mut active: ActiveModel = existing.into();
        active.number_in_stock = Set(number_in_stock);
        active.number_available = Set(number_available);
        active.updated_at = Set(now());

        let result = active.update(&self.db).await?;
        Ok(result.into_movie(genre.map(|g| g.genre_name)))
    }
}
