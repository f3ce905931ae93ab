use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_name TEXT NOT NULL,
            birthdate TEXT NOT NULL,
            is_subscribed_to_newsletter INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_customers_name ON customers(customer_name)",
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            genre_name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        // Stock bounds are also clamped in code; the CHECKs catch anything that slips past
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            movie_name TEXT NOT NULL,
            genre_id INTEGER NOT NULL,
            date_added TEXT NOT NULL,
            release_date TEXT NOT NULL,
            number_in_stock INTEGER NOT NULL DEFAULT 0
                CHECK (number_in_stock BETWEEN 0 AND 20),
            number_available INTEGER NOT NULL DEFAULT 0
                CHECK (number_available BETWEEN 0 AND number_in_stock),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (genre_id) REFERENCES genres(id)
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_movies_genre_id ON movies(genre_id)",
        r#"
        CREATE TABLE IF NOT EXISTS rental_headers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL,
            date_rented TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES customers(id)
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_rental_headers_customer_id ON rental_headers(customer_id)",
        r#"
        CREATE TABLE IF NOT EXISTS rental_details (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            rental_id INTEGER NOT NULL,
            movie_id INTEGER NOT NULL,
            date_returned TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (rental_id) REFERENCES rental_headers(id) ON DELETE CASCADE,
            FOREIGN KEY (movie_id) REFERENCES movies(id)
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_rental_details_rental_id ON rental_details(rental_id)",
        "CREATE INDEX IF NOT EXISTS idx_rental_details_movie_id ON rental_details(movie_id)",
    ];

    for sql in statements {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_owned(),
        ))
        .await?;
    }

    tracing::debug!("Schema ready ({} statements)", statements.len());

    Ok(())
}
