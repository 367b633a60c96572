//! # harmony-db: Database Layer for Hotel Harmony
//!
//! This crate provides database access for the Hotel Harmony front-desk
//! system. It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Hotel Harmony Data Flow                             │
//! │                                                                         │
//! │  Front-desk caller (create_booking)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    harmony-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (booking.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ RoomRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ GuestRepo     │    │ ...          │  │   │
//! │  │   │ Management    │    │ BookingRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                      ./hotel.db (WAL)                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (room, guest, booking, stats)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use harmony_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/hotel.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let rooms = db.rooms().list().await?;
//! let booking = db.bookings().create(&room.id, &guest.id, check_in, check_out, total).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::booking::BookingRepository;
pub use repository::guest::GuestRepository;
pub use repository::room::RoomRepository;
pub use repository::stats::StatsRepository;
