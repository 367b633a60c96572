//! # harmony-core: Pure Business Logic for Hotel Harmony
//!
//! This crate is the **heart** of the booking engine. It contains all business
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Hotel Harmony Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation Layer (excluded)                  │   │
//! │  │    Dashboard ──► Rooms UI ──► Guests UI ──► Bookings UI        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ harmony-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ daterange │  │ validation│  │  pricing  │  │   │
//! │  │   │   Room    │  │ DateRange │  │   phone   │  │  totals   │  │   │
//! │  │   │  Booking  │  │  overlap  │  │   email   │  │ discounts │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  harmony-db (Database Layer)                    │   │
//! │  │          SQLite queries, migrations, repositories               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Room, Guest, Booking) and status state machines
//! - [`daterange`] - Half-open calendar date intervals with overlap predicates
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation (phone, email, room number, price, dates)
//! - [`pricing`] - Booking totals and long-stay discounts
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **No Clock**: "today" is always an explicit argument, never read here
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use harmony_core::daterange::DateRange;
//! use harmony_core::pricing::booking_total;
//!
//! let stay = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
//! )
//! .unwrap();
//!
//! // 3 nights at 2000.0 per night
//! assert_eq!(stay.nights(), 3);
//! assert_eq!(booking_total(2000.0, &stay), 6000.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod daterange;
pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use harmony_core::DateRange` instead of
// `use harmony_core::daterange::DateRange`

pub use daterange::DateRange;
pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum booking length in nights.
///
/// ## Business Reason
/// Prevents open-ended reservations from blocking a room forever.
/// A stay longer than a year goes through a long-term rental contract,
/// not the booking engine.
pub const MAX_BOOKING_NIGHTS: i64 = 365;

/// Minimum booking length in nights.
///
/// ## Business Reason
/// Check-out is an exclusive boundary, so a zero-night stay would hold
/// no room at all. One night is the smallest sellable unit.
pub const MIN_BOOKING_NIGHTS: i64 = 1;

/// Maximum nightly price accepted by validation.
///
/// ## Business Reason
/// Guards against fat-finger input (e.g. a missing decimal separator
/// turning 2000.00 into 200000000).
pub const MAX_NIGHTLY_PRICE: f64 = 1_000_000.0;

/// Maximum length of a room number.
pub const MAX_ROOM_NUMBER_LEN: usize = 10;
