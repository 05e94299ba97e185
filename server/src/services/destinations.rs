//! `destinations` reads.
//!
//! Listings are ordered by rating, highest first. Search fetches the same
//! ordered list and filters it with the shared client-side matcher, so the
//! server and the CLI agree on what a query matches.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use travel::Destination;
use uuid::Uuid;

const DESTINATION_COLUMNS: &str =
    "id, name, location, description, rating, total_reviews, price, amenities, image_url, created_at";

#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    #[error("destination not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn row_to_destination(r: &PgRow) -> Destination {
    Destination {
        id: r.get("id"),
        name: r.get("name"),
        location: r.get("location"),
        description: r.get("description"),
        rating: r.get("rating"),
        total_reviews: r.get("total_reviews"),
        price: r.get("price"),
        amenities: r.get("amenities"),
        image_url: r.get("image_url"),
        created_at: r.get("created_at"),
    }
}

/// All destinations, highest rated first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_destinations(pool: &PgPool) -> Result<Vec<Destination>, DestinationError> {
    let sql = format!("SELECT {DESTINATION_COLUMNS} FROM destinations ORDER BY rating DESC, name ASC");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    Ok(rows.iter().map(row_to_destination).collect())
}

/// Destinations matching `query` by name or location, highest rated first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn search_destinations(pool: &PgPool, query: &str) -> Result<Vec<Destination>, DestinationError> {
    let all = list_destinations(pool).await?;
    Ok(travel::filter_destinations(&all, query))
}

/// One destination by id.
///
/// # Errors
///
/// Returns `NotFound` if no row has that id.
pub async fn get_destination(pool: &PgPool, id: Uuid) -> Result<Destination, DestinationError> {
    let sql = format!("SELECT {DESTINATION_COLUMNS} FROM destinations WHERE id = $1");
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DestinationError::NotFound(id))?;
    Ok(row_to_destination(&row))
}
