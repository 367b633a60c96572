//! # Repository Module
//!
//! Database repository implementations for Hotel Harmony.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │                                                                 │
//! │       │  db.bookings().create(room_id, guest_id, dates, price)         │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  BookingRepository                                                     │
//! │  ├── is_room_available(&self, room_id, range)                          │
//! │  ├── create(&self, ...)     ← one transaction, full rollback           │
//! │  ├── cancel(&self, id)                                                 │
//! │  └── complete(&self, id)                                               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Cross-entity invariants live in one place                           │
//! │  • Easy to test against an in-memory instance                          │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`room::RoomRepository`] - Room CRUD, status overrides, deletion guard
//! - [`guest::GuestRepository`] - Guest registration, dedup, search
//! - [`booking::BookingRepository`] - Availability check and booking lifecycle
//! - [`stats::StatsRepository`] - Dashboard counts and revenue sums

pub mod booking;
pub mod guest;
pub mod room;
pub mod stats;
