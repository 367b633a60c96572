//! # Room Repository
//!
//! Database operations for rooms.
//!
//! ## Key Operations
//! - CRUD with a uniqueness guarantee on the door number
//! - Status overrides (manual housekeeping path)
//! - Deletion guard: a room with an active booking cannot be deleted
//!
//! ## Status Changes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Who changes a room's status?                               │
//! │                                                                         │
//! │  Booking lifecycle (BookingRepository, transactional):                 │
//! │    create   → Occupied                                                 │
//! │    cancel   → Free                                                     │
//! │    complete → Cleaning                                                 │
//! │                                                                         │
//! │  Housekeeping (this repository):                                       │
//! │    finish_cleaning  → Cleaning → Free (guarded)                        │
//! │    set_status       → direct override, no side effects                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use harmony_core::{BookingStatus, Room, RoomStatus, RoomType};

/// Repository for room database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = RoomRepository::new(pool);
///
/// let room = repo.add("101", RoomType::Single, 2000.0).await?;
/// let rooms = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    /// Creates a new RoomRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RoomRepository { pool }
    }

    /// Adds a new room, created with status Free.
    ///
    /// ## Returns
    /// * `Ok(Some(Room))` - Room created
    /// * `Ok(None)` - Door number already taken (expected business outcome,
    ///   not an error)
    pub async fn add(&self, number: &str, room_type: RoomType, price: f64) -> DbResult<Option<Room>> {
        let now = Utc::now();
        let room = Room {
            id: Uuid::new_v4().to_string(),
            number: number.trim().to_string(),
            room_type,
            price_per_night: price,
            status: RoomStatus::Free,
            created_at: now,
            updated_at: now,
        };

        debug!(number = %room.number, "Inserting room");

        let result = sqlx::query(
            r#"
            INSERT INTO rooms (id, number, room_type, price_per_night, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&room.id)
        .bind(&room.number)
        .bind(room.room_type)
        .bind(room.price_per_night)
        .bind(room.status)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Some(room)),
            Err(e) => {
                let db_err = crate::error::DbError::from(e);
                if db_err.is_constraint() {
                    warn!(number = %room.number, error = %db_err, "Room not added");
                    Ok(None)
                } else {
                    Err(db_err)
                }
            }
        }
    }

    /// Lists all rooms in numeric order of their door number.
    ///
    /// `CAST(number AS INTEGER)` puts "9" before "10"; the plain column is
    /// the tie-breaker for non-numeric numbers like "101-A".
    pub async fn list(&self) -> DbResult<Vec<Room>> {
        let rooms: Vec<Room> = sqlx::query_as(
            r#"
            SELECT id, number, room_type, price_per_night, status, created_at, updated_at
            FROM rooms
            ORDER BY CAST(number AS INTEGER), number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Gets a room by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Room))` - Room found
    /// * `Ok(None)` - Room not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Room>> {
        let room: Option<Room> = sqlx::query_as(
            r#"
            SELECT id, number, room_type, price_per_night, status, created_at, updated_at
            FROM rooms
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Gets a room by its door number.
    pub async fn get_by_number(&self, number: &str) -> DbResult<Option<Room>> {
        let room: Option<Room> = sqlx::query_as(
            r#"
            SELECT id, number, room_type, price_per_night, status, created_at, updated_at
            FROM rooms
            WHERE number = ?1
            "#,
        )
        .bind(number.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Sets a room's status directly.
    ///
    /// This is the manual override path used by housekeeping: no booking is
    /// touched and no transition rule is enforced. Booking-driven status
    /// changes go through the booking repository instead.
    ///
    /// ## Returns
    /// * `Ok(true)` - Status updated
    /// * `Ok(false)` - No such room
    pub async fn set_status(&self, id: &str, status: RoomStatus) -> DbResult<bool> {
        debug!(id = %id, status = ?status, "Setting room status");

        let result = sqlx::query(
            r#"
            UPDATE rooms SET status = ?2, updated_at = ?3 WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Releases a room from housekeeping: Cleaning → Free.
    ///
    /// Unlike [`set_status`](Self::set_status) this is guarded: it only
    /// succeeds while the room is actually in Cleaning.
    ///
    /// ## Returns
    /// * `Ok(true)` - Room released
    /// * `Ok(false)` - No such room, or room was not in Cleaning
    pub async fn finish_cleaning(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Finishing room cleaning");

        let result = sqlx::query(
            r#"
            UPDATE rooms SET status = ?2, updated_at = ?3
            WHERE id = ?1 AND status = ?4
            "#,
        )
        .bind(id)
        .bind(RoomStatus::Free)
        .bind(Utc::now())
        .bind(RoomStatus::Cleaning)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a room unless an active booking still references it.
    ///
    /// The guard and the delete run in one transaction so a booking created
    /// between them cannot be orphaned.
    ///
    /// ## Returns
    /// * `Ok(true)` - Room deleted
    /// * `Ok(false)` - Active booking exists (no mutation), or no such room
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        let active: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings WHERE room_id = ?1 AND status = ?2
            "#,
        )
        .bind(id)
        .bind(BookingStatus::Active)
        .fetch_one(&mut *tx)
        .await?;

        if active > 0 {
            warn!(id = %id, active, "Room not deleted: active bookings exist");
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM rooms WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(DbError::transaction_failed)?;

        debug!(id = %id, deleted = result.rows_affected() > 0, "Room delete finished");
        Ok(result.rows_affected() > 0)
    }

    /// Counts rooms (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
