use crate::models::{
    join_tokens, parse_tokens, AgeBucket, Dog, DogChanges, Gender, NewDog, Preferences, Size, SwipeFilter,
    SwipeStatus, Token, User,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("No preferences stored for user {0}")]
    MissingPreferences(i64),

    #[error("Invalid stored value: {0}")]
    InvalidData(String),
}

const DOG_COLUMNS: &str = "id, name, image_filename, breed, age, gender, size, sterilized";
const PREFERENCE_COLUMNS: &str = "id, user_id, age, gender, size";

/// PostgreSQL-backed store for users, dogs, swipes and preferences
///
/// Every mutation that touches more than one row runs inside a single
/// transaction, so readers never see a half-applied request.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Wrap an existing pool without running migrations
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- users -----------------------------------------------------------

    /// Create a user together with its default preferences.
    ///
    /// Both rows are written in one transaction; a duplicate username
    /// yields `Conflict` and leaves nothing behind.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                PostgresError::Conflict(format!("username {} is already taken", username))
            } else {
                PostgresError::SqlxError(e)
            }
        })?;

        let user = User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
        };

        create_default_preferences(&mut tx, user.id).await?;

        tx.commit().await?;

        tracing::info!("Created user {} ({})", user.username, user.id);

        Ok(user)
    }

    /// Look up a user's id and password hash by username
    pub async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(i64, String)>, PostgresError> {
        let row = sqlx::query("SELECT id, password_hash FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Ok::<_, PostgresError>((row.try_get("id")?, row.try_get("password_hash")?)))
            .transpose()
    }

    // --- dogs ------------------------------------------------------------

    pub async fn list_dogs(&self) -> Result<Vec<Dog>, PostgresError> {
        let query = format!("SELECT {} FROM dogs ORDER BY id", DOG_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(dog_from_row).collect()
    }

    pub async fn get_dog(&self, dog_id: i64) -> Result<Dog, PostgresError> {
        let query = format!("SELECT {} FROM dogs WHERE id = $1", DOG_COLUMNS);

        let row = sqlx::query(&query)
            .bind(dog_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| dog_not_found(dog_id))?;

        dog_from_row(&row)
    }

    pub async fn create_dog(&self, dog: &NewDog) -> Result<Dog, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO dogs (name, image_filename, breed, age, gender, size, sterilized)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            DOG_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&dog.name)
            .bind(&dog.image_filename)
            .bind(&dog.breed)
            .bind(dog.age)
            .bind(dog.gender.code())
            .bind(dog.size.code())
            .bind(dog.sterilized)
            .fetch_one(&self.pool)
            .await?;

        let created = dog_from_row(&row)?;
        tracing::info!("Created dog {} ({})", created.name, created.id);

        Ok(created)
    }

    /// Replace every field of a dog
    pub async fn update_dog(&self, dog_id: i64, dog: &NewDog) -> Result<Dog, PostgresError> {
        let query = format!(
            r#"
            UPDATE dogs
            SET name = $2, image_filename = $3, breed = $4, age = $5,
                gender = $6, size = $7, sterilized = $8
            WHERE id = $1
            RETURNING {}
            "#,
            DOG_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(dog_id)
            .bind(&dog.name)
            .bind(&dog.image_filename)
            .bind(&dog.breed)
            .bind(dog.age)
            .bind(dog.gender.code())
            .bind(dog.size.code())
            .bind(dog.sterilized)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| dog_not_found(dog_id))?;

        dog_from_row(&row)
    }

    /// Apply the fields present in `changes`, leaving the rest untouched
    pub async fn patch_dog(&self, dog_id: i64, changes: &DogChanges) -> Result<Dog, PostgresError> {
        let query = format!(
            r#"
            UPDATE dogs
            SET name = COALESCE($2, name),
                image_filename = COALESCE($3, image_filename),
                breed = COALESCE($4, breed),
                age = COALESCE($5, age),
                gender = COALESCE($6, gender),
                size = COALESCE($7, size),
                sterilized = COALESCE($8, sterilized)
            WHERE id = $1
            RETURNING {}
            "#,
            DOG_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(dog_id)
            .bind(changes.name.as_deref())
            .bind(changes.image_filename.as_deref())
            .bind(changes.breed.as_deref())
            .bind(changes.age)
            .bind(changes.gender.map(Gender::code))
            .bind(changes.size.map(Size::code))
            .bind(changes.sterilized)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| dog_not_found(dog_id))?;

        dog_from_row(&row)
    }

    /// Mark a dog as sterilized. Repeating the call is harmless.
    pub async fn sterilize_dog(&self, dog_id: i64) -> Result<Dog, PostgresError> {
        let query = format!(
            "UPDATE dogs SET sterilized = TRUE WHERE id = $1 RETURNING {}",
            DOG_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(dog_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| dog_not_found(dog_id))?;

        dog_from_row(&row)
    }

    /// Delete a dog; its swipes go with it through the cascade
    pub async fn delete_dog(&self, dog_id: i64) -> Result<(), PostgresError> {
        let result = sqlx::query("DELETE FROM dogs WHERE id = $1")
            .bind(dog_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(dog_not_found(dog_id));
        }

        tracing::info!("Deleted dog {}", dog_id);
        Ok(())
    }

    /// Dogs whose gender and size are in the given sets, ordered by id
    pub async fn query_candidates(
        &self,
        genders: &BTreeSet<Gender>,
        sizes: &BTreeSet<Size>,
    ) -> Result<Vec<Dog>, PostgresError> {
        let query = format!(
            r#"
            SELECT {}
            FROM dogs
            WHERE gender = ANY($1) AND size = ANY($2)
            ORDER BY id
            "#,
            DOG_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(token_codes(genders))
            .bind(token_codes(sizes))
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Queried {} candidate dogs", rows.len());

        rows.iter().map(dog_from_row).collect()
    }

    // --- swipes ----------------------------------------------------------

    /// Record a user's decision about a dog.
    ///
    /// Liked and disliked upsert the pair, so the last committed write wins
    /// under concurrency; undecided removes any stored record. The dog row is
    /// share-locked for the transaction so a concurrent delete cannot slip in.
    pub async fn set_swipe(
        &self,
        user_id: i64,
        dog_id: i64,
        filter: SwipeFilter,
    ) -> Result<SwipeFilter, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query("SELECT 1 FROM dogs WHERE id = $1 FOR SHARE")
            .bind(dog_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(dog_not_found(dog_id));
        }

        match filter.status() {
            Some(status) => {
                sqlx::query(
                    r#"
                    INSERT INTO swipes (user_id, dog_id, status)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (user_id, dog_id) DO UPDATE SET status = EXCLUDED.status
                    "#,
                )
                .bind(user_id)
                .bind(dog_id)
                .bind(status)
                .execute(&mut *tx)
                .await?;
            }
            None => {
                sqlx::query("DELETE FROM swipes WHERE user_id = $1 AND dog_id = $2")
                    .bind(user_id)
                    .bind(dog_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::debug!("Set swipe: user {} -> dog {} ({:?})", user_id, dog_id, filter);

        Ok(filter)
    }

    /// All of a user's swipe records, keyed by dog id
    pub async fn get_swipes(&self, user_id: i64) -> Result<HashMap<i64, SwipeStatus>, PostgresError> {
        let rows = sqlx::query("SELECT dog_id, status FROM swipes WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let swipes = rows
            .iter()
            .map(|row| Ok::<_, sqlx::Error>((row.try_get("dog_id")?, row.try_get("status")?)))
            .collect::<Result<HashMap<i64, SwipeStatus>, _>>()?;

        tracing::debug!("User {} has {} swipes", user_id, swipes.len());

        Ok(swipes)
    }

    // --- preferences -----------------------------------------------------

    /// Load a user's preferences. A missing row is a consistency error.
    pub async fn get_preferences(&self, user_id: i64) -> Result<Preferences, PostgresError> {
        let query = format!("SELECT {} FROM preferences WHERE user_id = $1", PREFERENCE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(PostgresError::MissingPreferences(user_id))?;

        preferences_from_row(&row)
    }

    /// Replace all three preference sets at once
    pub async fn update_preferences(
        &self,
        user_id: i64,
        ages: &BTreeSet<AgeBucket>,
        genders: &BTreeSet<Gender>,
        sizes: &BTreeSet<Size>,
    ) -> Result<Preferences, PostgresError> {
        let query = format!(
            r#"
            UPDATE preferences
            SET age = $2, gender = $3, size = $4
            WHERE user_id = $1
            RETURNING {}
            "#,
            PREFERENCE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .bind(token_codes(ages))
            .bind(token_codes(genders))
            .bind(token_codes(sizes))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(PostgresError::MissingPreferences(user_id))?;

        let prefs = preferences_from_row(&row)?;

        tracing::info!(
            "Updated preferences for user {}: age={} gender={} size={}",
            user_id,
            join_tokens(&prefs.age),
            join_tokens(&prefs.gender),
            join_tokens(&prefs.size)
        );

        Ok(prefs)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Insert the all-inclusive default preferences for a freshly created user.
///
/// Called from inside the user-creation transaction so a user never exists
/// without exactly one preference row.
pub async fn create_default_preferences(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
) -> Result<Preferences, PostgresError> {
    let defaults = Preferences::defaults(0, user_id);
    let query = format!(
        r#"
        INSERT INTO preferences (user_id, age, gender, size)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        PREFERENCE_COLUMNS
    );

    let row = sqlx::query(&query)
        .bind(user_id)
        .bind(token_codes(&defaults.age))
        .bind(token_codes(&defaults.gender))
        .bind(token_codes(&defaults.size))
        .fetch_one(&mut **tx)
        .await?;

    preferences_from_row(&row)
}

fn dog_not_found(dog_id: i64) -> PostgresError {
    PostgresError::NotFound(format!("dog {}", dog_id))
}

fn token_codes<T: Token>(tokens: &BTreeSet<T>) -> Vec<String> {
    tokens.iter().map(|t| t.code().to_string()).collect()
}

fn dog_from_row(row: &PgRow) -> Result<Dog, PostgresError> {
    let gender: String = row.try_get("gender")?;
    let size: String = row.try_get("size")?;

    Ok(Dog {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        image_filename: row.try_get("image_filename")?,
        breed: row.try_get("breed")?,
        age: row.try_get("age")?,
        gender: gender
            .parse()
            .map_err(|e| PostgresError::InvalidData(format!("dog gender: {}", e)))?,
        size: size
            .parse()
            .map_err(|e| PostgresError::InvalidData(format!("dog size: {}", e)))?,
        sterilized: row.try_get("sterilized")?,
    })
}

fn preferences_from_row(row: &PgRow) -> Result<Preferences, PostgresError> {
    let age: Vec<String> = row.try_get("age")?;
    let gender: Vec<String> = row.try_get("gender")?;
    let size: Vec<String> = row.try_get("size")?;

    Ok(Preferences {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        age: parse_tokens(&age.join(",")),
        gender: parse_tokens(&gender.join(",")),
        size: parse_tokens(&size.join(",")),
    })
}
