//! # Validation Module
//!
//! Input validation utilities for Hotel Harmony.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input (presentation layer)                              │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure business rules)                            │
//! │  ├── Phone / email shape                                               │
//! │  ├── Room number syntax, price bounds                                  │
//! │  └── Booking date legality                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: a validation failure here is reported to the        │
//! │  caller BEFORE any store mutation is attempted.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use harmony_core::validation::{validate_phone, validate_room_number, parse_price};
//!
//! validate_phone("+7 (999) 123-45-67").unwrap();
//! validate_room_number("101-A").unwrap();
//! assert_eq!(parse_price("2000,50").unwrap(), 2000.5);
//! ```

use chrono::NaiveDate;

use crate::daterange::DateRange;
use crate::error::ValidationError;
use crate::{MAX_BOOKING_NIGHTS, MAX_NIGHTLY_PRICE, MAX_ROOM_NUMBER_LEN, MIN_BOOKING_NIGHTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Phone
// =============================================================================

/// Validates a contact phone number.
///
/// ## Rules
/// - Optional: empty input is valid
/// - After stripping everything but digits and `+`, must be one of:
///   `+7` + 10 digits, `8` + 10 digits, `7` + 10 digits
///
/// ## Example
/// ```rust
/// use harmony_core::validation::validate_phone;
///
/// assert!(validate_phone("").is_ok());
/// assert!(validate_phone("+7 (999) 123-45-67").is_ok());
/// assert!(validate_phone("89991234567").is_ok());
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.trim().is_empty() {
        return Ok(());
    }

    // Punctuation and spacing carry no meaning: "+7 (999) 123-45-67"
    // and "+79991234567" are the same number
    let cleaned: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let valid = match cleaned.strip_prefix("+7") {
        Some(rest) => is_digits(rest, 10),
        None => {
            (cleaned.starts_with('8') || cleaned.starts_with('7')) && is_digits(&cleaned[1..], 10)
        }
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "expected +7, 8 or 7 followed by 10 digits".to_string(),
        })
    }
}

/// Formats a phone number as `+7 (XXX) XXX-XX-XX`.
///
/// Inputs that are not an 11-digit Russian number are returned unchanged;
/// this is a display helper, not a validator.
pub fn format_phone(phone: &str) -> String {
    let mut digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // 8XXXXXXXXXX and 7XXXXXXXXXX are the same number
    if digits.starts_with('8') {
        digits.replace_range(0..1, "7");
    }

    if digits.len() == 11 && digits.starts_with('7') {
        format!(
            "+7 ({}) {}-{}-{}",
            &digits[1..4],
            &digits[4..7],
            &digits[7..9],
            &digits[9..11]
        )
    } else {
        phone.to_string()
    }
}

fn is_digits(s: &str, expected_len: usize) -> bool {
    s.len() == expected_len && s.chars().all(|c| c.is_ascii_digit())
}

// =============================================================================
// Email
// =============================================================================

/// Validates a contact email address.
///
/// ## Rules
/// - Optional: empty input is valid
/// - Otherwise must have a `local@domain.tld` shape with an alphabetic
///   top-level segment of at least 2 characters
///
/// ## Example
/// ```rust
/// use harmony_core::validation::validate_email;
///
/// assert!(validate_email("").is_ok());
/// assert!(validate_email("ivanov@example.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// assert!(validate_email("x@y.z").is_err()); // 1-char TLD
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "expected local@domain.tld".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return Err(invalid());
    }

    // Domain: dot-separated non-empty labels, alphabetic TLD of >= 2 chars
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    if !labels[..labels.len() - 1]
        .iter()
        .all(|l| l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
    {
        return Err(invalid());
    }

    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Room Number
// =============================================================================

/// Validates a room number.
///
/// ## Rules
/// - Required (must not be empty)
/// - At most 10 characters
/// - ASCII letters, digits and hyphens only
///
/// ## Example
/// ```rust
/// use harmony_core::validation::validate_room_number;
///
/// assert!(validate_room_number("101").is_ok());
/// assert!(validate_room_number("101-A").is_ok());
/// assert!(validate_room_number("").is_err());
/// assert!(validate_room_number("room 101").is_err());
/// ```
pub fn validate_room_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "room number".to_string(),
        });
    }

    if number.chars().count() > MAX_ROOM_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "room number".to_string(),
            max: MAX_ROOM_NUMBER_LEN,
        });
    }

    if !number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "room number".to_string(),
            reason: "must contain only letters, digits and hyphens".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Guest Name
// =============================================================================

/// Validates a guest's full name.
///
/// ## Rules
/// - Required (must not be blank)
/// - At most 200 characters
pub fn validate_guest_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "full_name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "full_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Price
// =============================================================================

/// Parses and validates a nightly price entered as text.
///
/// ## Rules
/// - Required (must not be empty)
/// - Comma is accepted as decimal separator ("2000,50" == "2000.50")
/// - Must be strictly positive
/// - Must not exceed 1,000,000
///
/// ## Returns
/// The parsed price on success.
///
/// ## Example
/// ```rust
/// use harmony_core::validation::parse_price;
///
/// assert_eq!(parse_price("2000").unwrap(), 2000.0);
/// assert_eq!(parse_price("2000,50").unwrap(), 2000.5);
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("9999999").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<f64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    let normalized = input.replace(',', ".");
    let price: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "not a number".to_string(),
        })?;

    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_NIGHTLY_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_NIGHTLY_PRICE as i64,
        });
    }

    Ok(price)
}

// =============================================================================
// Booking Dates
// =============================================================================

/// Validates a booking's date pair against the calendar.
///
/// ## Rules
/// - Check-in must not be before `today`
/// - Check-out must be after check-in
/// - Stay length must be between 1 and 365 nights inclusive
///
/// `today` is an explicit argument so this function stays pure; the caller
/// reads the clock.
///
/// ## Returns
/// The validated stay as a [`DateRange`].
pub fn validate_booking_dates(
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> ValidationResult<DateRange> {
    if check_in < today {
        return Err(ValidationError::DateInPast {
            field: "check-in date".to_string(),
            today,
        });
    }

    let range =
        DateRange::new(check_in, check_out).map_err(|_| ValidationError::DateNotAfter {
            field: "check-out date".to_string(),
            other: "check-in date".to_string(),
        })?;

    let nights = range.nights();
    if !(MIN_BOOKING_NIGHTS..=MAX_BOOKING_NIGHTS).contains(&nights) {
        return Err(ValidationError::OutOfRange {
            field: "stay length (nights)".to_string(),
            min: MIN_BOOKING_NIGHTS,
            max: MAX_BOOKING_NIGHTS,
        });
    }

    Ok(range)
}

// =============================================================================
// Unit Tests
// =============================================================================
