//! Title Year Value Object

use chrono::{Datelike, Utc};

use crate::error::{CatalogError, CatalogResult};

/// Release year of a title, `0 ..= current year`.
///
/// Titles cannot be reviewed before they exist, so future years are
/// rejected against the clock at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TitleYear(i32);

impl TitleYear {
    pub fn new(value: i32) -> CatalogResult<Self> {
        let current = Utc::now().year();
        if value < 0 || value > current {
            return Err(CatalogError::Validation(format!(
                "Year must be between 0 and {current}, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Reconstruct from storage.
    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<TitleYear> for i32 {
    fn from(year: TitleYear) -> Self {
        year.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_year_allowed() {
        let current = Utc::now().year();
        assert!(TitleYear::new(current).is_ok());
        assert!(TitleYear::new(1994).is_ok());
        assert!(TitleYear::new(0).is_ok());
    }

    #[test]
    fn test_future_and_negative_rejected() {
        let current = Utc::now().year();
        assert!(TitleYear::new(current + 1).is_err());
        assert!(TitleYear::new(-1).is_err());
    }
}
