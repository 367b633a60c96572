//! # Guest Repository
//!
//! Database operations for guests.
//!
//! ## Dedup on (full_name, phone)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Why add() never creates duplicates                         │
//! │                                                                         │
//! │  Reception re-enters a returning guest all the time. Instead of        │
//! │  erroring on the UNIQUE(full_name, phone) index, add() resolves to     │
//! │  the existing row:                                                      │
//! │                                                                         │
//! │  add("Ivanov I.I.", "+79991234567")                                    │
//! │       │                                                                 │
//! │       ├── INSERT succeeds        → new Guest                           │
//! │       │                                                                 │
//! │       └── UNIQUE violation       → SELECT the existing row             │
//! │                                    → same Guest id as the first call   │
//! │                                                                         │
//! │  Callers never need to ask "does this guest already exist?"            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use harmony_core::{BookingStatus, Guest};

/// Repository for guest database operations.
#[derive(Debug, Clone)]
pub struct GuestRepository {
    pool: SqlitePool,
}

impl GuestRepository {
    /// Creates a new GuestRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GuestRepository { pool }
    }

    /// Registers a guest, resolving duplicates to the existing row.
    ///
    /// Phone and email are optional; pass "" when not provided. Inputs are
    /// trimmed before storage so the dedup key is whitespace-insensitive.
    ///
    /// ## Returns
    /// The stored guest: freshly inserted, or the existing row when the
    /// `(full_name, phone)` pair is already registered.
    pub async fn add(&self, full_name: &str, phone: &str, email: &str) -> DbResult<Guest> {
        let guest = Guest {
            id: Uuid::new_v4().to_string(),
            full_name: full_name.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
            created_at: Utc::now(),
        };

        debug!(full_name = %guest.full_name, "Inserting guest");

        let result = sqlx::query(
            r#"
            INSERT INTO guests (id, full_name, phone, email, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&guest.id)
        .bind(&guest.full_name)
        .bind(&guest.phone)
        .bind(&guest.email)
        .bind(guest.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(guest),
            Err(e) => {
                let db_err = DbError::from(e);
                if let DbError::UniqueViolation { .. } = db_err {
                    // Returning guest: resolve to the existing row
                    warn!(full_name = %guest.full_name, "Guest already registered, reusing");
                    let existing: Option<Guest> = sqlx::query_as(
                        r#"
                        SELECT id, full_name, phone, email, created_at
                        FROM guests
                        WHERE full_name = ?1 AND phone = ?2
                        "#,
                    )
                    .bind(&guest.full_name)
                    .bind(&guest.phone)
                    .fetch_optional(&self.pool)
                    .await?;

                    existing.ok_or(db_err)
                } else {
                    Err(db_err)
                }
            }
        }
    }

    /// Lists all guests ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Guest>> {
        let guests: Vec<Guest> = sqlx::query_as(
            r#"
            SELECT id, full_name, phone, email, created_at
            FROM guests
            ORDER BY full_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    /// Searches guests by name, phone or email (case-insensitive substring).
    pub async fn search(&self, query: &str) -> DbResult<Vec<Guest>> {
        let pattern = format!("%{}%", query.trim());

        debug!(query = %query, "Searching guests");

        let guests: Vec<Guest> = sqlx::query_as(
            r#"
            SELECT id, full_name, phone, email, created_at
            FROM guests
            WHERE full_name LIKE ?1 OR phone LIKE ?1 OR email LIKE ?1
            ORDER BY full_name
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    /// Gets a guest by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Guest>> {
        let guest: Option<Guest> = sqlx::query_as(
            r#"
            SELECT id, full_name, phone, email, created_at
            FROM guests
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guest)
    }

    /// Deletes a guest unless an active booking still references them.
    ///
    /// ## Returns
    /// * `Ok(true)` - Guest deleted
    /// * `Ok(false)` - Active booking exists (no mutation), or no such guest
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        let active: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings WHERE guest_id = ?1 AND status = ?2
            "#,
        )
        .bind(id)
        .bind(BookingStatus::Active)
        .fetch_one(&mut *tx)
        .await?;

        if active > 0 {
            warn!(id = %id, active, "Guest not deleted: active bookings exist");
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM guests WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(DbError::transaction_failed)?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts guests (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use harmony_core::RoomType;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let db = test_db().await;

        let guest = db
            .guests()
            .add("Ivanov I.I.", "+79991234567", "ivanov@example.com")
            .await
            .unwrap();

        let reloaded = db.guests().get_by_id(&guest.id).await.unwrap().unwrap();
        assert_eq!(reloaded.full_name, "Ivanov I.I.");
        assert_eq!(reloaded.phone, "+79991234567");
        assert_eq!(reloaded.email, "ivanov@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_pair_returns_existing_guest() {
        let db = test_db().await;
        let guests = db.guests();

        let first = guests.add("Ivanov I.I.", "+79991234567", "").await.unwrap();
        let second = guests.add("Ivanov I.I.", "+79991234567", "").await.unwrap();

        // Same id, no duplicate row
        assert_eq!(first.id, second.id);
        assert_eq!(guests.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_same_name_different_phone_is_a_new_guest() {
        let db = test_db().await;
        let guests = db.guests();

        let first = guests.add("Ivanov I.I.", "+79991234567", "").await.unwrap();
        let second = guests.add("Ivanov I.I.", "+79997654321", "").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(guests.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_two_guests_without_phones_collide() {
        let db = test_db().await;
        let guests = db.guests();

        // Empty phone is part of the dedup key: same name, no phone = same guest
        let first = guests.add("Sidorov S.S.", "", "").await.unwrap();
        let second = guests.add("Sidorov S.S.", "", "").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(guests.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let db = test_db().await;
        let guests = db.guests();

        guests.add("Petrov P.P.", "", "").await.unwrap();
        guests.add("Ivanov I.I.", "", "").await.unwrap();
        guests.add("Sidorov S.S.", "", "").await.unwrap();

        let listed = guests.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|g| g.full_name.as_str()).collect();
        assert_eq!(names, vec!["Ivanov I.I.", "Petrov P.P.", "Sidorov S.S."]);
    }

    #[tokio::test]
    async fn test_search_matches_name_phone_and_email() {
        let db = test_db().await;
        let guests = db.guests();

        guests
            .add("Ivanov I.I.", "+79991234567", "ivanov@example.com")
            .await
            .unwrap();
        guests
            .add("Petrov P.P.", "+79887654321", "petrov@mail.ru")
            .await
            .unwrap();

        // By name substring (ASCII case-insensitive)
        assert_eq!(guests.search("ivanov").await.unwrap().len(), 1);
        // By phone substring
        assert_eq!(guests.search("9988").await.unwrap().len(), 1);
        // By email substring
        assert_eq!(guests.search("example.com").await.unwrap().len(), 1);
        // No match
        assert!(guests.search("nobody").await.unwrap().is_empty());
        // Empty query matches everyone
        assert_eq!(guests.search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_guard_with_active_booking() {
        let db = test_db().await;

        let room = db
            .rooms()
            .add("101", RoomType::Single, 2000.0)
            .await
            .unwrap()
            .unwrap();
        let guest = db.guests().add("Ivanov I.I.", "+79991234567", "").await.unwrap();

        let booking = db
            .bookings()
            .create(&room.id, &guest.id, d(2024, 5, 1), d(2024, 5, 3), 4000.0)
            .await
            .unwrap()
            .unwrap();

        // Guarded: the guest row stays intact
        assert!(!db.guests().delete(&guest.id).await.unwrap());
        assert!(db.guests().get_by_id(&guest.id).await.unwrap().is_some());

        // After cancellation the deletion goes through
        assert!(db.bookings().cancel(&booking.id).await.unwrap());
        assert!(db.guests().delete(&guest.id).await.unwrap());
        assert!(db.guests().get_by_id(&guest.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_guest_returns_false() {
        let db = test_db().await;
        assert!(!db.guests().delete("missing").await.unwrap());
    }
}
