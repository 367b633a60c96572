//! # Booking Repository
//!
//! Availability checking and the booking lifecycle.
//!
//! ## Booking Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Booking Lifecycle                                  │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create() ─┬─ availability check  ┐                             │
//! │                   ├─ INSERT booking      ├── ONE transaction           │
//! │                   └─ room → Occupied     ┘                             │
//! │                                                                         │
//! │  2a. CANCEL                                                            │
//! │      └── cancel() → booking → Cancelled, room → Free                   │
//! │                                                                         │
//! │  2b. COMPLETE (checkout)                                               │
//! │      └── complete() → booking → Completed, room → Cleaning             │
//! │          (housekeeping releases the room later, see RoomRepository)    │
//! │                                                                         │
//! │  Completed and Cancelled are terminal: cancel/complete only act on     │
//! │  Active bookings and report false otherwise.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why check-then-insert runs in a transaction
//! A naive "read availability, then write" pair is a race: two callers can
//! both see the room as free and both insert. The reference deployment is
//! single-user, but the invariant "no two overlapping Active bookings per
//! room" must hold even if a second caller ever appears, so the check and
//! the insert share one transaction and either all of it commits or none.

use chrono::{NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use harmony_core::{Booking, BookingStatus, BookingSummary, DateRange, RoomStatus};

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Whether a room is free over the given stay.
    ///
    /// Scans the room's Active bookings for a date-range overlap; ranges
    /// sharing only a boundary day do not conflict (checkout morning =
    /// checkin afternoon). A room with no bookings at all is available.
    ///
    /// This is a convenience read for the presentation layer (e.g. greying
    /// out a calendar); [`create`](Self::create) re-runs the same check
    /// inside its own transaction and never trusts a prior answer.
    pub async fn is_room_available(&self, room_id: &str, stay: &DateRange) -> DbResult<bool> {
        let conflicts = count_conflicts(&self.pool, room_id, stay).await?;
        Ok(conflicts == 0)
    }

    /// Creates a booking, holding the room for the stay.
    ///
    /// ## What This Does (one transaction)
    /// 1. Verifies `check_out > check_in` and a non-negative total
    /// 2. Verifies room and guest exist
    /// 3. Re-checks availability against Active bookings
    /// 4. Inserts the booking with status Active
    /// 5. Moves the room to Occupied
    ///
    /// Any failure rolls back every step: a booking without its room
    /// update (or vice versa) is never observable.
    ///
    /// ## Returns
    /// * `Ok(Some(Booking))` - Booking created
    /// * `Ok(None)` - Room unavailable, or room/guest does not exist
    ///   (expected business outcomes, not errors)
    /// * `Err(DbError::CheckViolation)` - Invalid date ordering or negative total
    pub async fn create(
        &self,
        room_id: &str,
        guest_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        total_price: f64,
    ) -> DbResult<Option<Booking>> {
        // Core invariant, enforced before any write (the schema CHECK is
        // the backstop)
        let stay = DateRange::new(check_in, check_out)
            .map_err(|e| DbError::check_violation(e.to_string()))?;
        if total_price < 0.0 {
            return Err(DbError::check_violation("total_price must be non-negative"));
        }

        let mut tx = self.pool.begin().await?;

        let room_status: Option<RoomStatus> =
            sqlx::query_scalar("SELECT status FROM rooms WHERE id = ?1")
                .bind(room_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(room_status) = room_status else {
            warn!(room_id = %room_id, "Booking refused: no such room");
            return Ok(None);
        };

        let guest_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE id = ?1")
            .bind(guest_id)
            .fetch_one(&mut *tx)
            .await?;
        if guest_exists == 0 {
            warn!(guest_id = %guest_id, "Booking refused: no such guest");
            return Ok(None);
        }

        // The availability check and the insert below share this
        // transaction; nothing can book the room in between
        let conflicts = count_conflicts(&mut *tx, room_id, &stay).await?;
        if conflicts > 0 {
            warn!(room_id = %room_id, stay = %stay, conflicts, "Booking refused: dates taken");
            return Ok(None);
        }

        // Irregular but allowed: a manual override can leave a room in
        // Cleaning or Repair with no active booking, and a new booking
        // still wins the room. Surface it in the log.
        if room_status != RoomStatus::Occupied
            && !room_status.can_transition_to(RoomStatus::Occupied)
        {
            warn!(room_id = %room_id, from = %room_status, "Unusual room status at booking time");
        }

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            room_id: room_id.to_string(),
            guest_id: guest_id.to_string(),
            check_in_date: check_in,
            check_out_date: check_out,
            total_price,
            status: BookingStatus::Active,
            created_at: Utc::now(),
        };

        debug!(id = %booking.id, room_id = %room_id, stay = %stay, "Inserting booking");

        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, room_id, guest_id, check_in_date, check_out_date, total_price, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.room_id)
        .bind(&booking.guest_id)
        .bind(booking.check_in_date)
        .bind(booking.check_out_date)
        .bind(booking.total_price)
        .bind(booking.status)
        .bind(booking.created_at)
        .execute(&mut *tx)
        .await?;

        set_room_status(&mut tx, room_id, RoomStatus::Occupied).await?;

        tx.commit().await.map_err(DbError::transaction_failed)?;

        Ok(Some(booking))
    }

    /// Cancels an Active booking and frees its room.
    ///
    /// ## Returns
    /// * `Ok(true)` - Booking cancelled, room → Free
    /// * `Ok(false)` - No such booking, or booking not Active (terminal
    ///   states never leave)
    pub async fn cancel(&self, booking_id: &str) -> DbResult<bool> {
        self.close_booking(booking_id, BookingStatus::Cancelled, RoomStatus::Free)
            .await
    }

    /// Completes an Active booking (guest checkout).
    ///
    /// The room moves to Cleaning, not Free: housekeeping must release it
    /// via [`RoomRepository::finish_cleaning`](crate::repository::room::RoomRepository::finish_cleaning)
    /// before it is sold again.
    ///
    /// ## Returns
    /// * `Ok(true)` - Booking completed, room → Cleaning
    /// * `Ok(false)` - No such booking, or booking not Active
    pub async fn complete(&self, booking_id: &str) -> DbResult<bool> {
        self.close_booking(booking_id, BookingStatus::Completed, RoomStatus::Cleaning)
            .await
    }

    /// Shared tail of cancel/complete: move an Active booking into a
    /// terminal status and the room into its follow-up status, atomically.
    async fn close_booking(
        &self,
        booking_id: &str,
        to: BookingStatus,
        room_to: RoomStatus,
    ) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(String, BookingStatus)> =
            sqlx::query_as("SELECT room_id, status FROM bookings WHERE id = ?1")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((room_id, status)) = row else {
            debug!(id = %booking_id, "Booking not found");
            return Ok(false);
        };

        // Store-level Active-only guard: terminal bookings stay terminal
        if !status.can_transition_to(to) {
            warn!(id = %booking_id, from = %status, to = %to, "Booking transition refused");
            return Ok(false);
        }

        // The status condition repeats in SQL so a concurrent close of the
        // same booking cannot slip between the read and the write
        let result = sqlx::query("UPDATE bookings SET status = ?2 WHERE id = ?1 AND status = ?3")
            .bind(booking_id)
            .bind(to)
            .bind(BookingStatus::Active)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        set_room_status(&mut tx, &room_id, room_to).await?;

        tx.commit().await.map_err(DbError::transaction_failed)?;

        debug!(id = %booking_id, to = %to, room_to = %room_to, "Booking closed");
        Ok(true)
    }

    /// Lists all bookings joined with room number and guest name,
    /// newest check-in first.
    pub async fn list(&self) -> DbResult<Vec<BookingSummary>> {
        let bookings: Vec<BookingSummary> = sqlx::query_as(
            r#"
            SELECT
                b.id,
                r.number AS room_number,
                g.full_name AS guest_name,
                b.check_in_date,
                b.check_out_date,
                b.total_price,
                b.status
            FROM bookings b
            JOIN rooms r ON b.room_id = r.id
            JOIN guests g ON b.guest_id = g.id
            ORDER BY b.check_in_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Gets a booking by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
        let booking: Option<Booking> = sqlx::query_as(
            r#"
            SELECT id, room_id, guest_id, check_in_date, check_out_date,
                   total_price, status, created_at
            FROM bookings
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Counts bookings (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Counts Active bookings of `room_id` whose stay overlaps `stay`.
///
/// The SQL mirrors [`DateRange::overlaps`]: half-open intervals, ranges
/// sharing only a boundary date do not conflict. Takes any executor so the
/// same query serves both the public read and the in-transaction re-check.
async fn count_conflicts<'e, E>(executor: E, room_id: &str, stay: &DateRange) -> DbResult<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let conflicts: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM bookings
        WHERE room_id = ?1
          AND status = ?2
          AND NOT (check_out_date <= ?3 OR check_in_date >= ?4)
        "#,
    )
    .bind(room_id)
    .bind(BookingStatus::Active)
    .bind(stay.start())
    .bind(stay.end())
    .fetch_one(executor)
    .await?;

    Ok(conflicts)
}

/// Updates a room's status inside an open booking transaction.
async fn set_room_status(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    room_id: &str,
    status: RoomStatus,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE rooms SET status = ?2, updated_at = ?3 WHERE id = ?1")
        .bind(room_id)
        .bind(status)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        // The booking row enforces the FK, so this only fires on a torn
        // database; let the transaction roll back
        return Err(DbError::not_found("Room", room_id));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
