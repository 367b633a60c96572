//! # Domain Types
//!
//! Core domain types used throughout Hotel Harmony.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Room       │   │      Guest      │   │     Booking     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  number (biz)   │   │  full_name      │   │  room_id (FK)   │       │
//! │  │  room_type      │   │  phone          │   │  guest_id (FK)  │       │
//! │  │  price_per_night│   │  email          │   │  check_in/out   │       │
//! │  │  status         │   └─────────────────┘   │  total_price    │       │
//! │  └─────────────────┘                         │  status         │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   RoomStatus    │   │  BookingStatus  │   │    RoomType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Free           │   │  Active         │   │  Single         │       │
//! │  │  Occupied       │   │  Completed      │   │  Double         │       │
//! │  │  Cleaning       │   │  Cancelled      │   │  DoubleDeluxe   │       │
//! │  │  Repair         │   └─────────────────┘   │  Suite          │       │
//! │  └─────────────────┘                         │  Presidential   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business key: room `number`, guest `(full_name, phone)` - human-readable
//!
//! ## Status State Machines
//! Room and booking statuses change only through the transitions encoded on
//! the enums below. The store consults `can_transition_to` so that lifecycle
//! rules stay auditable and testable without any I/O.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::daterange::DateRange;
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Room Status
// =============================================================================

/// The housekeeping status of a room.
///
/// ## Lifecycle
/// ```text
///            create booking           complete booking
///   Free ──────────────────► Occupied ──────────────► Cleaning
///    ▲  ◄──────────────────     │                        │
///    │     cancel booking       └── cancel ──► Free      │
///    │                                                   │
///    └──────────────── finish cleaning ──────────────────┘
///
///   Free ⇄ Repair, Cleaning ⇄ Repair   (maintenance, manual override)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Room is ready to be booked.
    Free,
    /// Room is held by an active booking.
    Occupied,
    /// Guest has checked out; housekeeping has not released the room yet.
    Cleaning,
    /// Room is out of service for maintenance.
    Repair,
}

impl RoomStatus {
    /// Whether the room lifecycle allows moving from `self` to `to`.
    ///
    /// Booking events drive Free ⇄ Occupied → Cleaning → Free; maintenance
    /// moves Free/Cleaning ⇄ Repair. Everything else is forbidden.
    pub fn can_transition_to(&self, to: RoomStatus) -> bool {
        use RoomStatus::*;
        matches!(
            (self, to),
            (Free, Occupied) | (Free, Repair)
                | (Occupied, Free)
                | (Occupied, Cleaning)
                | (Cleaning, Free)
                | (Cleaning, Repair)
                | (Repair, Free)
        )
    }

    /// Validates a transition, returning an error with both endpoints.
    pub fn transition_to(&self, to: RoomStatus) -> CoreResult<RoomStatus> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(CoreError::InvalidStatusTransition {
                from: self.to_string(),
                to: to.to_string(),
            })
        }
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Free
    }
}

impl fmt::Display for RoomStatus {
    /// Russian labels shown in the interface and on reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoomStatus::Free => "Свободен",
            RoomStatus::Occupied => "Занят",
            RoomStatus::Cleaning => "На уборке",
            RoomStatus::Repair => "Ремонт",
        };
        write!(f, "{label}")
    }
}

impl FromStr for RoomStatus {
    type Err = CoreError;

    /// Parses either the storage token or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free" | "Свободен" => Ok(RoomStatus::Free),
            "occupied" | "Занят" => Ok(RoomStatus::Occupied),
            "cleaning" | "На уборке" => Ok(RoomStatus::Cleaning),
            "repair" | "Ремонт" => Ok(RoomStatus::Repair),
            other => Err(CoreError::UnknownStatus {
                kind: "room".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Booking Status
// =============================================================================

/// The lifecycle status of a booking.
///
/// Active is the only non-terminal state: a booking either completes
/// (guest checked out) or is cancelled, and never leaves those states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booking currently holds its room.
    Active,
    /// Guest checked out; the stay is finished.
    Completed,
    /// Booking was called off before completion.
    Cancelled,
}

impl BookingStatus {
    /// Completed and Cancelled are terminal.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Active)
    }

    /// Whether the booking lifecycle allows moving from `self` to `to`.
    pub fn can_transition_to(&self, to: BookingStatus) -> bool {
        matches!(
            (self, to),
            (BookingStatus::Active, BookingStatus::Completed)
                | (BookingStatus::Active, BookingStatus::Cancelled)
        )
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Active
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStatus::Active => "Активно",
            BookingStatus::Completed => "Завершено",
            BookingStatus::Cancelled => "Отменено",
        };
        write!(f, "{label}")
    }
}

impl FromStr for BookingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" | "Активно" => Ok(BookingStatus::Active),
            "completed" | "Завершено" => Ok(BookingStatus::Completed),
            "cancelled" | "Отменено" => Ok(BookingStatus::Cancelled),
            other => Err(CoreError::UnknownStatus {
                kind: "booking".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Room Type
// =============================================================================

/// The fixed set of room categories the hotel sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    DoubleDeluxe,
    Suite,
    PresidentialSuite,
}

impl RoomType {
    /// All room types, in the order they appear in selection lists.
    pub const ALL: [RoomType; 5] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::DoubleDeluxe,
        RoomType::Suite,
        RoomType::PresidentialSuite,
    ];
}

impl fmt::Display for RoomType {
    /// Russian labels, matching the categories the hotel advertises.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoomType::Single => "Одноместный",
            RoomType::Double => "Двухместный",
            RoomType::DoubleDeluxe => "Двухместный Делюкс",
            RoomType::Suite => "Люкс",
            RoomType::PresidentialSuite => "Президентский Люкс",
        };
        write!(f, "{label}")
    }
}

impl FromStr for RoomType {
    type Err = CoreError;

    /// Parses either the storage token or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" | "Одноместный" => Ok(RoomType::Single),
            "double" | "Двухместный" => Ok(RoomType::Double),
            "double_deluxe" | "Двухместный Делюкс" => Ok(RoomType::DoubleDeluxe),
            "suite" | "Люкс" => Ok(RoomType::Suite),
            "presidential_suite" | "Президентский Люкс" => {
                Ok(RoomType::PresidentialSuite)
            }
            other => Err(CoreError::UnknownRoomType(other.to_string())),
        }
    }
}

// =============================================================================
// Room
// =============================================================================

/// A hotel room available for booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Room {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Door number - business identifier, unique per hotel.
    pub number: String,

    /// Room category.
    pub room_type: RoomType,

    /// Nightly price. Always positive.
    pub price_per_night: f64,

    /// Housekeeping status.
    pub status: RoomStatus,

    /// When the room was created.
    pub created_at: DateTime<Utc>,

    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Total price for a stay covering `range` at this room's nightly rate.
    #[inline]
    pub fn price_for(&self, range: &DateRange) -> f64 {
        crate::pricing::booking_total(self.price_per_night, range)
    }
}

// =============================================================================
// Guest
// =============================================================================

/// A registered guest.
///
/// Phone and email are optional: the empty string means "not provided".
/// They are kept as plain strings (not `Option`) because `(full_name,
/// phone)` is the dedup key in storage and two missing phones must compare
/// equal there.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Guest {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full name, required.
    pub full_name: String,

    /// Contact phone, empty when not provided.
    pub phone: String,

    /// Contact email, empty when not provided.
    pub email: String,

    /// When the guest was first registered.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Booking
// =============================================================================

/// A reservation of one room for one guest over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Booking {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Room being held.
    pub room_id: String,

    /// Guest holding it.
    pub guest_id: String,

    /// First night of the stay.
    pub check_in_date: NaiveDate,

    /// Day of departure (exclusive: not a night of the stay).
    pub check_out_date: NaiveDate,

    /// Total price of the stay. Non-negative.
    pub total_price: f64,

    /// Lifecycle status.
    pub status: BookingStatus,

    /// When the booking was made.
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The stay as a half-open [`DateRange`].
    ///
    /// The storage layer never persists `check_out <= check_in`, so this
    /// only fails on rows produced outside the engine.
    pub fn stay(&self) -> CoreResult<DateRange> {
        DateRange::new(self.check_in_date, self.check_out_date)
    }

    /// Number of nights booked.
    pub fn nights(&self) -> CoreResult<i64> {
        Ok(self.stay()?.nights())
    }
}

// =============================================================================
// Booking Summary
// =============================================================================

/// A booking joined with its room number and guest name.
///
/// This is the row shape the presentation layer lists: the raw foreign keys
/// are useless on screen, the door number and guest name are what a
/// receptionist scans for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BookingSummary {
    pub id: String,
    pub room_number: String,
    pub guest_name: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatus,
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// The four derived counts shown on the dashboard.
///
/// Computed fresh from committed state on every call; never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Rooms with status Free.
    pub free: i64,
    /// Rooms with status Occupied.
    pub occupied: i64,
    /// Active bookings whose check-in date is today.
    pub check_ins_today: i64,
    /// Active bookings whose check-out date is today.
    pub check_outs_today: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_status_booking_driven_transitions() {
        assert!(RoomStatus::Free.can_transition_to(RoomStatus::Occupied));
        assert!(RoomStatus::Occupied.can_transition_to(RoomStatus::Free));
        assert!(RoomStatus::Occupied.can_transition_to(RoomStatus::Cleaning));
        assert!(RoomStatus::Cleaning.can_transition_to(RoomStatus::Free));
    }

    #[test]
    fn test_room_status_maintenance_transitions() {
        assert!(RoomStatus::Free.can_transition_to(RoomStatus::Repair));
        assert!(RoomStatus::Cleaning.can_transition_to(RoomStatus::Repair));
        assert!(RoomStatus::Repair.can_transition_to(RoomStatus::Free));
    }

    #[test]
    fn test_room_status_forbidden_transitions() {
        // A room under repair cannot jump straight into a booking
        assert!(!RoomStatus::Repair.can_transition_to(RoomStatus::Occupied));
        // Cleaning must end before the room is sold again
        assert!(!RoomStatus::Cleaning.can_transition_to(RoomStatus::Occupied));
        // Occupied rooms are not sent to repair while a guest is inside
        assert!(!RoomStatus::Occupied.can_transition_to(RoomStatus::Repair));
        // No self-loops
        assert!(!RoomStatus::Free.can_transition_to(RoomStatus::Free));
    }

    #[test]
    fn test_room_status_transition_to_error() {
        let err = RoomStatus::Repair
            .transition_to(RoomStatus::Occupied)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_booking_status_is_terminal() {
        assert!(!BookingStatus::Active.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_booking_status_transitions() {
        assert!(BookingStatus::Active.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Active.can_transition_to(BookingStatus::Cancelled));

        // Terminal states never leave
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Active));
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Active));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn test_status_parsing_accepts_tokens_and_labels() {
        assert_eq!("free".parse::<RoomStatus>().unwrap(), RoomStatus::Free);
        assert_eq!("Занят".parse::<RoomStatus>().unwrap(), RoomStatus::Occupied);
        assert_eq!(
            "active".parse::<BookingStatus>().unwrap(),
            BookingStatus::Active
        );
        assert_eq!(
            "Отменено".parse::<BookingStatus>().unwrap(),
            BookingStatus::Cancelled
        );
        assert!("retired".parse::<RoomStatus>().is_err());
    }

    #[test]
    fn test_room_type_parsing() {
        assert_eq!(
            "Одноместный".parse::<RoomType>().unwrap(),
            RoomType::Single
        );
        assert_eq!(
            "presidential_suite".parse::<RoomType>().unwrap(),
            RoomType::PresidentialSuite
        );
        assert!("Карцер".parse::<RoomType>().is_err());
    }

    #[test]
    fn test_room_type_labels_round_trip() {
        for room_type in RoomType::ALL {
            let label = room_type.to_string();
            assert_eq!(label.parse::<RoomType>().unwrap(), room_type);
        }
    }

    #[test]
    fn test_booking_stay_and_nights() {
        let booking = Booking {
            id: "b-1".to_string(),
            room_id: "r-1".to_string(),
            guest_id: "g-1".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            total_price: 6000.0,
            status: BookingStatus::Active,
            created_at: Utc::now(),
        };

        assert_eq!(booking.nights().unwrap(), 3);
        assert!(booking
            .stay()
            .unwrap()
            .contains(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()));
    }
}
