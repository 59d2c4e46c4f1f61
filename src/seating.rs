//! Pure seat arithmetic for an airplane cabin.
//!
//! A flight's seat universe is `{1..rows} x {1..seats_in_row}` of its
//! airplane. Every ticket write in the crate goes through [`CheckedSeat`],
//! so there is no code path that can persist out-of-bounds coordinates.

use crate::error::{AppError, FieldErrors};

/// Total seat count of an airplane.
pub fn capacity(rows: i32, seats_in_row: i32) -> i32 {
    rows * seats_in_row
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatError {
    OutOfRange {
        field: &'static str,
        value: i32,
        max: i32,
    },
}

impl SeatError {
    pub fn field(&self) -> &'static str {
        match self {
            SeatError::OutOfRange { field, .. } => field,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SeatError::OutOfRange { field, max, .. } => {
                format!("{field} number must be in available range: (1, {max})")
            }
        }
    }
}

impl From<SeatError> for AppError {
    fn from(err: SeatError) -> Self {
        AppError::Validation(FieldErrors::single(err.field(), err.message()))
    }
}

/// Seat coordinates proven to lie inside an airplane's bounds.
///
/// The fields are private; the only way to obtain a value is through
/// [`CheckedSeat::new`], which makes bounds validation a precondition of
/// the persistence layer rather than an opt-in step at request parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedSeat {
    row: i32,
    seat: i32,
}

impl CheckedSeat {
    pub fn new(row: i32, seat: i32, rows: i32, seats_in_row: i32) -> Result<Self, SeatError> {
        for (value, field, max) in [(row, "row", rows), (seat, "seat", seats_in_row)] {
            if !(1..=max).contains(&value) {
                return Err(SeatError::OutOfRange { field, value, max });
            }
        }
        Ok(Self { row, seat })
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn seat(&self) -> i32 {
        self.seat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_rows_times_seats() {
        assert_eq!(capacity(10, 8), 80);
        assert_eq!(capacity(1, 1), 1);
    }

    #[test]
    fn accepts_corners_of_the_seat_universe() {
        assert!(CheckedSeat::new(1, 1, 10, 8).is_ok());
        assert!(CheckedSeat::new(10, 8, 10, 8).is_ok());
    }

    #[test]
    fn rejects_row_out_of_range() {
        let err = CheckedSeat::new(11, 1, 10, 8).unwrap_err();
        assert_eq!(err.field(), "row");
        assert_eq!(
            err.message(),
            "row number must be in available range: (1, 10)"
        );

        let err = CheckedSeat::new(0, 1, 10, 8).unwrap_err();
        assert_eq!(err.field(), "row");
    }

    #[test]
    fn rejects_seat_out_of_range() {
        let err = CheckedSeat::new(1, 9, 10, 8).unwrap_err();
        assert_eq!(err.field(), "seat");
        assert_eq!(
            err.message(),
            "seat number must be in available range: (1, 8)"
        );

        let err = CheckedSeat::new(1, 0, 10, 8).unwrap_err();
        assert_eq!(err.field(), "seat");
    }

    #[test]
    fn row_is_checked_before_seat() {
        // Both coordinates invalid: the row error wins, matching the
        // field the client should fix first.
        let err = CheckedSeat::new(0, 0, 10, 8).unwrap_err();
        assert_eq!(err.field(), "row");
    }
}
