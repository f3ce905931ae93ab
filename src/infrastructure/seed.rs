//! Demo catalog loaded when `SEED_DEMO` is set

use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::domain::rules::{clamp_stock, normalize_name};
use crate::models::{customer, genre, movie};

const GENRES: [&str; 4] = ["Action", "Comedy", "Drama", "Science Fiction"];

/// (name, genre, release date, copies)
const MOVIES: [(&str, &str, (i32, u32, u32), i32); 5] = [
    ("Die Hard", "Action", (1988, 7, 15), 5),
    ("Groundhog Day", "Comedy", (1993, 2, 12), 3),
    ("The Shawshank Redemption", "Drama", (1994, 9, 23), 4),
    ("Blade Runner", "Science Fiction", (1982, 6, 25), 2),
    ("Alien", "Science Fiction", (1979, 5, 25), 1),
];

fn date(ymd: (i32, u32, u32)) -> Result<NaiveDate, DbErr> {
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
        .ok_or_else(|| DbErr::Custom(format!("Invalid seed date {:?}", ymd)))
}

/// Safe to run on every start: genres are upserted and movies or customers
/// are only added to empty tables.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();
    let today = chrono::Local::now().date_naive();

    // 1. Genres
    for name in GENRES {
        let genre = genre::ActiveModel {
            genre_name: Set(normalize_name(name)),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        genre::Entity::insert(genre)
            .on_conflict(
                OnConflict::column(genre::Column::GenreName)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    // 2. Movies
    if movie::Entity::find().count(db).await? == 0 {
        for (name, genre_name, released, copies) in MOVIES {
            let Some(genre) = genre::Entity::find()
                .filter(genre::Column::GenreName.eq(normalize_name(genre_name)))
                .one(db)
                .await?
            else {
                continue;
            };

            let (number_in_stock, number_available) = clamp_stock(copies, copies);
            movie::ActiveModel {
                movie_name: Set(normalize_name(name)),
                genre_id: Set(genre.id),
                date_added: Set(today),
                release_date: Set(date(released)?),
                number_in_stock: Set(number_in_stock),
                number_available: Set(number_available),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    // 3. A customer to rent with
    if customer::Entity::find().count(db).await? == 0 {
        customer::ActiveModel {
            customer_name: Set(normalize_name("Jane Demo")),
            birthdate: Set(date((1990, 5, 15))?),
            is_subscribed_to_newsletter: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    tracing::info!("Demo data ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::init_db;

    #[tokio::test]
    async fn seeding_twice_does_not_duplicate() {
        let db = init_db("sqlite::memory:").await.unwrap();

        seed_demo_data(&db).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        assert_eq!(genre::Entity::find().count(&db).await.unwrap(), GENRES.len() as u64);
        assert_eq!(movie::Entity::find().count(&db).await.unwrap(), MOVIES.len() as u64);
        assert_eq!(customer::Entity::find().count(&db).await.unwrap(), 1);
    }
}
