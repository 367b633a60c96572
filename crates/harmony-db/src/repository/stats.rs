//! # Statistics Repository
//!
//! Read-only aggregates over rooms and bookings: the front-desk dashboard
//! counters and revenue totals for a reporting period.
//!
//! Everything here is derived with plain SQL aggregation at read time;
//! nothing is cached or pre-computed, so the numbers can never drift from
//! the underlying rows.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use harmony_core::{BookingStatus, DashboardStats, RoomStatus};

/// Repository for dashboard and reporting queries.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    /// Creates a new StatsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StatsRepository { pool }
    }

    /// Front-desk dashboard counters for the current day.
    pub async fn dashboard(&self) -> DbResult<DashboardStats> {
        self.dashboard_on(chrono::Local::now().date_naive()).await
    }

    /// Dashboard counters as of an explicit date.
    ///
    /// * `free` / `occupied` - room counts by current status (Cleaning and
    ///   Repair rooms appear in neither)
    /// * `check_ins_today` - Active bookings whose stay starts on `today`
    /// * `check_outs_today` - Active bookings whose stay ends on `today`
    pub async fn dashboard_on(&self, today: NaiveDate) -> DbResult<DashboardStats> {
        let free = self.count_rooms_with(RoomStatus::Free).await?;
        let occupied = self.count_rooms_with(RoomStatus::Occupied).await?;

        let check_ins_today: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE status = ?1 AND check_in_date = ?2",
        )
        .bind(BookingStatus::Active)
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let check_outs_today: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE status = ?1 AND check_out_date = ?2",
        )
        .bind(BookingStatus::Active)
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let stats = DashboardStats {
            free,
            occupied,
            check_ins_today,
            check_outs_today,
        };
        debug!(?stats, %today, "Dashboard computed");

        Ok(stats)
    }

    /// Total revenue over a reporting period.
    ///
    /// Sums `total_price` of Active and Completed bookings; Cancelled
    /// bookings never count. A booking belongs to the period by its
    /// check-in date, with both bounds inclusive. Either bound may be
    /// omitted to leave that side open; no bounds at all means all-time
    /// revenue. An empty result sums to 0.0, not an error.
    pub async fn revenue(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> DbResult<f64> {
        const BASE: &str =
            "SELECT SUM(total_price) FROM bookings WHERE status IN (?1, ?2)";

        let mut query = match (from, to) {
            (Some(_), Some(_)) => {
                sqlx::query_scalar(
                    "SELECT SUM(total_price) FROM bookings \
                     WHERE status IN (?1, ?2) AND check_in_date BETWEEN ?3 AND ?4",
                )
            }
            (Some(_), None) => sqlx::query_scalar(
                "SELECT SUM(total_price) FROM bookings \
                 WHERE status IN (?1, ?2) AND check_in_date >= ?3",
            ),
            (None, Some(_)) => sqlx::query_scalar(
                "SELECT SUM(total_price) FROM bookings \
                 WHERE status IN (?1, ?2) AND check_in_date <= ?3",
            ),
            (None, None) => sqlx::query_scalar(BASE),
        }
        .bind(BookingStatus::Active)
        .bind(BookingStatus::Completed);

        for bound in [from, to].into_iter().flatten() {
            query = query.bind(bound);
        }

        // SUM over zero rows is NULL
        let total: Option<f64> = query.fetch_one(&self.pool).await?;

        Ok(total.unwrap_or(0.0))
    }

    async fn count_rooms_with(&self, status: RoomStatus) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE status = ?1")
            .bind(status)
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
    use harmony_core::RoomType;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_on_empty_database() {
        let db = test_db().await;
        let stats = db.stats().dashboard_on(d(2024, 3, 1)).await.unwrap();
        assert_eq!(stats.free, 0);
        assert_eq!(stats.occupied, 0);
        assert_eq!(stats.check_ins_today, 0);
        assert_eq!(stats.check_outs_today, 0);
    }

    #[tokio::test]
    async fn test_dashboard_room_counters() {
        let db = test_db().await;
        let r1 = db.rooms().add("101", RoomType::Single, 2000.0).await.unwrap().unwrap();
        let r2 = db.rooms().add("102", RoomType::Double, 3000.0).await.unwrap().unwrap();
        db.rooms().add("103", RoomType::Suite, 8000.0).await.unwrap().unwrap();

        db.rooms().set_status(&r1.id, RoomStatus::Occupied).await.unwrap();
        // Rooms in Cleaning count as neither free nor occupied
        db.rooms().set_status(&r2.id, RoomStatus::Cleaning).await.unwrap();

        let stats = db.stats().dashboard_on(d(2024, 3, 1)).await.unwrap();
        assert_eq!(stats.free, 1);
        assert_eq!(stats.occupied, 1);
    }

    #[tokio::test]
    async fn test_dashboard_counts_todays_movements() {
        let db = test_db().await;
        let room = db.rooms().add("101", RoomType::Single, 2000.0).await.unwrap().unwrap();
        let other = db.rooms().add("102", RoomType::Double, 3000.0).await.unwrap().unwrap();
        let guest = db.guests().add("Petrov P.P.", "+79991234567", "").await.unwrap();

        // Arrives today
        db.bookings()
            .create(&room.id, &guest.id, d(2024, 3, 1), d(2024, 3, 4), 6000.0)
            .await
            .unwrap()
            .unwrap();
        // Leaves today
        db.bookings()
            .create(&other.id, &guest.id, d(2024, 2, 27), d(2024, 3, 1), 9000.0)
            .await
            .unwrap()
            .unwrap();

        let stats = db.stats().dashboard_on(d(2024, 3, 1)).await.unwrap();
        assert_eq!(stats.check_ins_today, 1);
        assert_eq!(stats.check_outs_today, 1);

        // Neither stay touches the day before
        let stats = db.stats().dashboard_on(d(2024, 2, 29)).await.unwrap();
        assert_eq!(stats.check_ins_today, 0);
        assert_eq!(stats.check_outs_today, 0);
    }

    #[tokio::test]
    async fn test_cancelled_bookings_do_not_count_as_movements() {
        let db = test_db().await;
        let room = db.rooms().add("101", RoomType::Single, 2000.0).await.unwrap().unwrap();
        let guest = db.guests().add("Petrov P.P.", "+79991234567", "").await.unwrap();

        let booking = db
            .bookings()
            .create(&room.id, &guest.id, d(2024, 3, 1), d(2024, 3, 4), 6000.0)
            .await
            .unwrap()
            .unwrap();
        db.bookings().cancel(&booking.id).await.unwrap();

        let stats = db.stats().dashboard_on(d(2024, 3, 1)).await.unwrap();
        assert_eq!(stats.check_ins_today, 0);
    }

    #[tokio::test]
    async fn test_revenue_over_empty_period_is_zero() {
        let db = test_db().await;
        let total = db.stats().revenue(None, None).await.unwrap();
        assert_eq!(total, 0.0);
    }

    #[tokio::test]
    async fn test_revenue_counts_active_and_completed_but_not_cancelled() {
        let db = test_db().await;
        let room = db.rooms().add("101", RoomType::Single, 2000.0).await.unwrap().unwrap();
        let other = db.rooms().add("102", RoomType::Double, 3000.0).await.unwrap().unwrap();
        let third = db.rooms().add("103", RoomType::Suite, 8000.0).await.unwrap().unwrap();
        let guest = db.guests().add("Petrov P.P.", "+79991234567", "").await.unwrap();

        // Active: 6000
        db.bookings()
            .create(&room.id, &guest.id, d(2024, 3, 1), d(2024, 3, 4), 6000.0)
            .await
            .unwrap()
            .unwrap();
        // Completed: 9000
        let completed = db
            .bookings()
            .create(&other.id, &guest.id, d(2024, 3, 5), d(2024, 3, 8), 9000.0)
            .await
            .unwrap()
            .unwrap();
        db.bookings().complete(&completed.id).await.unwrap();
        // Cancelled: excluded
        let cancelled = db
            .bookings()
            .create(&third.id, &guest.id, d(2024, 3, 1), d(2024, 3, 2), 8000.0)
            .await
            .unwrap()
            .unwrap();
        db.bookings().cancel(&cancelled.id).await.unwrap();

        let total = db.stats().revenue(None, None).await.unwrap();
        assert_eq!(total, 15000.0);
    }

    #[tokio::test]
    async fn test_revenue_bounds_are_inclusive_on_check_in() {
        let db = test_db().await;
        let room = db.rooms().add("101", RoomType::Single, 2000.0).await.unwrap().unwrap();
        let other = db.rooms().add("102", RoomType::Double, 3000.0).await.unwrap().unwrap();
        let guest = db.guests().add("Petrov P.P.", "+79991234567", "").await.unwrap();

        // Checks in Mar 1, checks out inside a later period; belongs to March 1
        db.bookings()
            .create(&room.id, &guest.id, d(2024, 3, 1), d(2024, 3, 10), 18000.0)
            .await
            .unwrap()
            .unwrap();
        db.bookings()
            .create(&other.id, &guest.id, d(2024, 3, 15), d(2024, 3, 18), 9000.0)
            .await
            .unwrap()
            .unwrap();

        // Both bounds inclusive
        let total = db
            .stats()
            .revenue(Some(d(2024, 3, 1)), Some(d(2024, 3, 15)))
            .await
            .unwrap();
        assert_eq!(total, 27000.0);

        // Day after the first check-in excludes it
        let total = db
            .stats()
            .revenue(Some(d(2024, 3, 2)), None)
            .await
            .unwrap();
        assert_eq!(total, 9000.0);

        // Open start, bounded end
        let total = db
            .stats()
            .revenue(None, Some(d(2024, 3, 14)))
            .await
            .unwrap();
        assert_eq!(total, 18000.0);
    }
}
