//! # Seed Data Generator
//!
//! Populates the database with rooms and a few guests for development.
//!
//! ## Usage
//! ```bash
//! # Seed 3 floors of 10 rooms each (default)
//! cargo run -p harmony-db --bin seed
//!
//! # Custom building shape
//! cargo run -p harmony-db --bin seed -- --floors 5 --per-floor 20
//!
//! # Specify database path
//! cargo run -p harmony-db --bin seed -- --db ./data/hotel.db
//! ```
//!
//! ## Generated Data
//! Room numbers follow the `{floor}{index:02}` convention (101, 102, ...,
//! 201, ...). Room types rotate through the category list with suites at
//! the end of each floor, and the nightly rate grows with both category
//! and floor. A handful of guests is added so bookings can be exercised
//! immediately.

use std::env;

use harmony_core::RoomType;
use harmony_db::{Database, DbConfig};

/// Base nightly rates per category, in order of [`RoomType::ALL`].
const BASE_RATES: &[f64] = &[2000.0, 3500.0, 5000.0, 8000.0, 15000.0];

/// Sample guests for a freshly seeded database.
const GUESTS: &[(&str, &str, &str)] = &[
    ("Иванов Иван Иванович", "+79161234567", "ivanov@example.com"),
    ("Петрова Анна Сергеевна", "+79037654321", "a.petrova@example.com"),
    ("Сидоров Павел Олегович", "+79995550011", ""),
    ("Кузнецова Мария Викторовна", "+79261112233", "m.kuznetsova@example.com"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut floors: u32 = 3;
    let mut per_floor: u32 = 10;
    let mut db_path = String::from("./hotel_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--floors" | "-f" => {
                if i + 1 < args.len() {
                    floors = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--per-floor" | "-p" => {
                if i + 1 < args.len() {
                    per_floor = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Hotel Harmony Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --floors <N>     Number of floors (default: 3)");
                println!("  -p, --per-floor <N>  Rooms per floor (default: 10)");
                println!("  -d, --db <PATH>      Database file path (default: ./hotel_dev.db)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🏨 Hotel Harmony Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!("Rooms:    {} floors x {} rooms", floors, per_floor);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing rooms
    let existing = db.rooms().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} rooms", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating rooms...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    for floor in 1..=floors {
        for index in 1..=per_floor {
            let number = format!("{}{:02}", floor, index);
            let (room_type, rate) = room_for_position(floor, index, per_floor);

            match db.rooms().add(&number, room_type, rate).await {
                Ok(Some(_)) => generated += 1,
                Ok(None) => eprintln!("Room {} already exists, skipped", number),
                Err(e) => {
                    eprintln!("Failed to insert room {}: {}", number, e);
                    continue;
                }
            }
        }
        println!("  Floor {} done ({} rooms so far)", floor, generated);
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} rooms in {:?}", generated, elapsed);

    // Sample guests so bookings can be created right away
    println!();
    println!("Adding sample guests...");
    for (name, phone, email) in GUESTS {
        let guest = db.guests().add(name, phone, email).await?;
        println!("  {} ({})", guest.full_name, guest.phone);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Picks a room type and nightly rate for a position in the building.
///
/// The last two rooms of each floor are suites; the rest rotate through
/// the standard categories. Higher floors cost a little more.
fn room_for_position(floor: u32, index: u32, per_floor: u32) -> (RoomType, f64) {
    let room_type = if per_floor >= 4 && index > per_floor - 2 {
        if index == per_floor {
            RoomType::PresidentialSuite
        } else {
            RoomType::Suite
        }
    } else {
        match index % 3 {
            0 => RoomType::DoubleDeluxe,
            1 => RoomType::Single,
            _ => RoomType::Double,
        }
    };

    let type_idx = RoomType::ALL
        .iter()
        .position(|t| *t == room_type)
        .unwrap_or(0);
    let rate = BASE_RATES[type_idx] + f64::from(floor - 1) * 250.0;

    (room_type, rate)
}
