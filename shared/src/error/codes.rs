//! Unified error codes for the Concierge platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant errors
//! - 4xxx: Reservation errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog errors (rooms, tables, services, menu)
//! - 7xxx: Staff and schedule errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the GraphQL `code`
/// extension and the HTTP error body carry the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Too many requests from one client
    TooManyRequests = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session is missing or could not be opened
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Tenant ====================
    /// Booking kind does not match the business type
    BookingKindMismatch = 3004,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Date range is empty or inverted
    InvalidDateRange = 4002,

    // ==================== 5xxx: Payment ====================
    /// Payment gateway call failed
    PaymentFailed = 5001,
    /// Amount to charge is zero or negative
    InvalidPaymentAmount = 5002,
    /// Webhook signature could not be verified
    WebhookSignatureInvalid = 5004,
    /// Invoice not found
    InvoiceNotFound = 5005,

    // ==================== 6xxx: Catalog ====================
    /// Room not found
    RoomNotFound = 6001,

    // ==================== 7xxx: Staff ====================
    /// Shift not found
    ShiftNotFound = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Auth
            ErrorCode::NotAuthenticated => "Access Forbidden",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Not authenticated",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",

            // Tenant
            ErrorCode::BookingKindMismatch => "Booking kind does not match business type",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InvalidDateRange => "Invalid date range",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::InvalidPaymentAmount => "Invalid reservation amount",
            ErrorCode::WebhookSignatureInvalid => "Webhook signature is invalid",
            ErrorCode::InvoiceNotFound => "Invoice not found",

            // Catalog
            ErrorCode::RoomNotFound => "Room not found",

            // Staff
            ErrorCode::ShiftNotFound => "Shift not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            9 => Ok(ErrorCode::TooManyRequests),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),

            // Tenant
            3004 => Ok(ErrorCode::BookingKindMismatch),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::InvalidDateRange),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::InvalidPaymentAmount),
            5004 => Ok(ErrorCode::WebhookSignatureInvalid),
            5005 => Ok(ErrorCode::InvoiceNotFound),

            // Catalog
            6001 => Ok(ErrorCode::RoomNotFound),

            // Staff
            7002 => Ok(ErrorCode::ShiftNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::TooManyRequests.code(), 9);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::BookingKindMismatch.code(), 3004);
        assert_eq!(ErrorCode::ReservationNotFound.code(), 4001);
        assert_eq!(ErrorCode::InvalidPaymentAmount.code(), 5002);
        assert_eq!(ErrorCode::RoomNotFound.code(), 6001);
        assert_eq!(ErrorCode::ShiftNotFound.code(), 7002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_round_trips_every_known_code() {
        for value in 0u16..10_000 {
            if let Ok(code) = ErrorCode::try_from(value) {
                assert_eq!(code.code(), value);
            }
        }
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
    }

    #[test]
    fn test_guard_message() {
        assert_eq!(ErrorCode::NotAuthenticated.message(), "Access Forbidden");
        assert_eq!(
            ErrorCode::InvalidCredentials.message(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::PaymentFailed).unwrap();
        assert_eq!(json, "5001");
        let code: ErrorCode = serde_json::from_str("6001").unwrap();
        assert_eq!(code, ErrorCode::RoomNotFound);
        assert!(serde_json::from_str::<ErrorCode>("8001").is_err());
    }
}
