//! Domain Value Objects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LodgingError, LodgingResult};

/// Check-in / check-out pair; check-out is strictly after check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> LodgingResult<Self> {
        if check_out <= check_in {
            return Err(LodgingError::invalid("Check-out must be after check-in"));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_stay() {
        let stay = StayDates::new(date(2025, 3, 1), date(2025, 3, 4)).unwrap();
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn test_same_day_rejected() {
        assert!(StayDates::new(date(2025, 3, 1), date(2025, 3, 1)).is_err());
    }

    #[test]
    fn test_reversed_rejected() {
        assert!(StayDates::new(date(2025, 3, 4), date(2025, 3, 1)).is_err());
    }
}
