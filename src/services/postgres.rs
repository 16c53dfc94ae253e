use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    BudgetLevel, CardType, EventCandidate, EventCard, PreferenceChanges, Profile, SavedCards,
    SavedEvent, SavedVenue, SwipeAction, SwipedCards, UserPreferences, VenueCandidate, VenueCard,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

const VENUE_COLUMNS: &str = r#"
    v.id, v.name, v.city, v.neighborhood, v.image_url, v.description,
    v.venue_type, v.price_level, v.rating, v.vibe_score, v.tags, v.best_nights,
    v.music_genres, v.has_dance_floor, v.has_live_music, v.has_outdoor
"#;

const EVENT_COLUMNS: &str = r#"
    e.id, e.title, e.city, e.venue_name, e.category, e.start_date, e.image_url,
    e.description, e.event_type, e.hype_score, e.price_min, e.price_max, e.is_free,
    e.day_of_week, e.genre, e.music_genres, e.tags, e.artists
"#;

const PROFILE_COLUMNS: &str = r#"
    user_id, current_city, current_country, is_visitor, vibe_styles, go_out_days,
    budget_level, music_genres, updated_at
"#;

/// PostgreSQL store for profiles, venue and event cards, and swipes
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect, then run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
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
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Wrap an existing pool without running migrations
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, PostgresError> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1");

        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose().map_err(Into::into)
    }

    /// Apply a partial preference update
    ///
    /// Returns `None` when the user has no profile.
    pub async fn update_preferences(
        &self,
        user_id: &str,
        changes: &PreferenceChanges,
    ) -> Result<Option<Profile>, PostgresError> {
        let query = format!(
            r#"
            UPDATE profiles SET
                vibe_styles = COALESCE($2, vibe_styles),
                go_out_days = COALESCE($3, go_out_days),
                budget_level = COALESCE($4, budget_level),
                music_genres = COALESCE($5, music_genres),
                current_city = COALESCE($6, current_city),
                current_country = COALESCE($7, current_country),
                is_visitor = COALESCE($8, is_visitor),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .bind(&changes.vibe_styles)
            .bind(&changes.go_out_days)
            .bind(changes.budget_level.as_ref().map(|b| b.as_str().to_string()))
            .bind(&changes.music_genres)
            .bind(&changes.current_city)
            .bind(&changes.current_country)
            .bind(changes.is_visitor)
            .fetch_optional(&self.pool)
            .await?;

        if row.is_some() {
            tracing::debug!("Updated preferences for {}", user_id);
        }

        row.as_ref().map(profile_from_row).transpose().map_err(Into::into)
    }

    /// Venues in a city the user has not swiped yet, most popular first
    pub async fn venues_for_city(
        &self,
        city: &str,
        exclude_ids: &[String],
        limit: i64,
    ) -> Result<Vec<VenueCard>, PostgresError> {
        let query = format!(
            r#"
            SELECT {VENUE_COLUMNS}
            FROM venue_cards v
            WHERE v.city = $1 AND NOT (v.id = ANY($2))
            ORDER BY v.vibe_score DESC
            LIMIT $3
            "#
        );

        let rows = sqlx::query(&query)
            .bind(city)
            .bind(exclude_ids)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let venues = rows.iter().map(venue_from_row).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("Fetched {} venues for {}", venues.len(), city);
        Ok(venues)
    }

    /// Upcoming events in a city the user has not swiped yet, soonest first
    pub async fn upcoming_events_for_city(
        &self,
        city: &str,
        exclude_ids: &[String],
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<EventCard>, PostgresError> {
        let query = format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM event_cards e
            WHERE e.city = $1
              AND NOT (e.id = ANY($2))
              AND e.start_date >= NOW()
              AND ($3::TEXT IS NULL OR e.category = $3)
            ORDER BY e.start_date ASC
            LIMIT $4
            "#
        );

        let rows = sqlx::query(&query)
            .bind(city)
            .bind(exclude_ids)
            .bind(category)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let events = rows.iter().map(event_from_row).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("Fetched {} upcoming events for {}", events.len(), city);
        Ok(events)
    }

    /// Every card the user has swiped on, whatever the action
    pub async fn swiped_cards(&self, user_id: &str) -> Result<SwipedCards, PostgresError> {
        let rows = sqlx::query("SELECT card_type, card_id FROM swipes WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let mut swiped = SwipedCards::default();
        for row in &rows {
            let card_type: CardType = row.try_get("card_type")?;
            swiped.insert(card_type, row.try_get("card_id")?);
        }

        tracing::debug!("User {} has swiped {} cards", user_id, swiped.len());
        Ok(swiped)
    }

    /// Record a swipe
    ///
    /// Swiping the same card again replaces the earlier action.
    pub async fn record_swipe(
        &self,
        user_id: &str,
        card_type: CardType,
        card_id: &str,
        action: SwipeAction,
    ) -> Result<Uuid, PostgresError> {
        let query = r#"
            INSERT INTO swipes (id, user_id, card_type, card_id, action, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (user_id, card_type, card_id)
            DO UPDATE SET
                action = EXCLUDED.action,
                created_at = EXCLUDED.created_at
            RETURNING id
        "#;

        let row = sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(card_type)
            .bind(card_id)
            .bind(action)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded swipe: {} -> {:?} {} ({:?})",
            user_id,
            card_type,
            card_id,
            action
        );

        Ok(row.try_get("id")?)
    }

    /// Liked and superliked cards, most recent swipe first
    pub async fn saved_cards(&self, user_id: &str) -> Result<SavedCards, PostgresError> {
        let venue_query = format!(
            r#"
            SELECT {VENUE_COLUMNS}, s.action, s.created_at AS swiped_at
            FROM swipes s
            JOIN venue_cards v ON v.id = s.card_id
            WHERE s.user_id = $1 AND s.card_type = 'venue' AND s.action IN ('like', 'superlike')
            ORDER BY s.created_at DESC
            "#
        );

        let event_query = format!(
            r#"
            SELECT {EVENT_COLUMNS}, s.action, s.created_at AS swiped_at
            FROM swipes s
            JOIN event_cards e ON e.id = s.card_id
            WHERE s.user_id = $1 AND s.card_type = 'event' AND s.action IN ('like', 'superlike')
            ORDER BY s.created_at DESC
            "#
        );

        let venue_rows = sqlx::query(&venue_query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        let event_rows = sqlx::query(&event_query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let venues = venue_rows
            .iter()
            .map(|row| {
                Ok(SavedVenue {
                    card: venue_from_row(row)?,
                    swipe_action: row.try_get("action")?,
                    swiped_at: row.try_get("swiped_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let events = event_rows
            .iter()
            .map(|row| {
                Ok(SavedEvent {
                    card: event_from_row(row)?,
                    swipe_action: row.try_get("action")?,
                    swiped_at: row.try_get("swiped_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(SavedCards { venues, events })
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

/// NULL arrays decode as empty lists
fn string_list(row: &PgRow, column: &str) -> Result<Vec<String>, sqlx::Error> {
    Ok(row.try_get::<Option<Vec<String>>, _>(column)?.unwrap_or_default())
}

fn profile_from_row(row: &PgRow) -> Result<Profile, sqlx::Error> {
    let budget_level: Option<String> = row.try_get("budget_level")?;

    Ok(Profile {
        user_id: row.try_get("user_id")?,
        current_city: row.try_get::<Option<String>, _>("current_city")?.unwrap_or_default(),
        current_country: row.try_get::<Option<String>, _>("current_country")?.unwrap_or_default(),
        is_visitor: row.try_get("is_visitor")?,
        preferences: UserPreferences {
            vibe_styles: string_list(row, "vibe_styles")?,
            go_out_days: string_list(row, "go_out_days")?,
            budget_level: budget_level.map(BudgetLevel::from).unwrap_or_default(),
            music_genres: string_list(row, "music_genres")?,
        },
        updated_at: row.try_get("updated_at")?,
    })
}

fn venue_from_row(row: &PgRow) -> Result<VenueCard, sqlx::Error> {
    Ok(VenueCard {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        neighborhood: row.try_get("neighborhood")?,
        image_url: row.try_get("image_url")?,
        description: row.try_get("description")?,
        attributes: VenueCandidate {
            venue_type: row.try_get("venue_type")?,
            price_level: row.try_get("price_level")?,
            rating: row.try_get("rating")?,
            vibe_score: row.try_get("vibe_score")?,
            tags: string_list(row, "tags")?,
            best_nights: string_list(row, "best_nights")?,
            music_genres: string_list(row, "music_genres")?,
            has_dance_floor: row.try_get("has_dance_floor")?,
            has_live_music: row.try_get("has_live_music")?,
            has_outdoor: row.try_get("has_outdoor")?,
        },
    })
}

fn event_from_row(row: &PgRow) -> Result<EventCard, sqlx::Error> {
    Ok(EventCard {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        city: row.try_get("city")?,
        venue_name: row.try_get("venue_name")?,
        category: row.try_get("category")?,
        start_date: row.try_get("start_date")?,
        image_url: row.try_get("image_url")?,
        description: row.try_get("description")?,
        attributes: EventCandidate {
            event_type: row.try_get("event_type")?,
            hype_score: row.try_get("hype_score")?,
            price_min: row.try_get("price_min")?,
            price_max: row.try_get("price_max")?,
            is_free: row.try_get("is_free")?,
            day_of_week: row.try_get("day_of_week")?,
            genre: row.try_get("genre")?,
            music_genres: string_list(row, "music_genres")?,
            tags: string_list(row, "tags")?,
            artists: string_list(row, "artists")?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lists_are_prefixed() {
        for column in VENUE_COLUMNS.split(',') {
            assert!(column.trim().starts_with("v."), "{}", column);
        }
        for column in EVENT_COLUMNS.split(',') {
            assert!(column.trim().starts_with("e."), "{}", column);
        }
    }

    fn table_columns(table: &str) -> Vec<String> {
        let schema = include_str!("../../migrations/20240601000000_init.sql");
        let start = schema
            .find(&format!("CREATE TABLE IF NOT EXISTS {} (", table))
            .unwrap();
        let body = &schema[start..];
        let body = &body[..body.find(");").unwrap()];
        body.lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_selected_columns_exist_in_schema() {
        let cases = [
            ("venue_cards", VENUE_COLUMNS, "v."),
            ("event_cards", EVENT_COLUMNS, "e."),
            ("profiles", PROFILE_COLUMNS, ""),
        ];

        for (table, columns, prefix) in cases {
            let schema_columns = table_columns(table);
            for column in columns.split(',') {
                let column = column.trim().trim_start_matches(prefix);
                assert!(
                    schema_columns.iter().any(|c| c == column),
                    "{}.{} missing from migration",
                    table,
                    column
                );
            }
        }
    }
}
