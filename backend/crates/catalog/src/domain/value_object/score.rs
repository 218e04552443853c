//! Score Value Object

use crate::error::{CatalogError, CatalogResult};

pub const SCORE_MIN: i16 = 1;
pub const SCORE_MAX: i16 = 10;

/// A review score in `[1, 10]`. Raw integers are validated in the
/// handlers so out-of-range input surfaces as a 400, not an extractor
/// rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(i16);

impl Score {
    pub fn new(value: i16) -> CatalogResult<Self> {
        if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(CatalogError::Validation(format!(
                "Score must be between {SCORE_MIN} and {SCORE_MAX}, got {value}"
            )));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn value(&self) -> i16 {
        self.0
    }
}

impl From<Score> for i16 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert!(Score::new(1).is_ok());
        assert!(Score::new(10).is_ok());
        assert!(Score::new(0).is_err());
        assert!(Score::new(11).is_err());
        assert!(Score::new(-5).is_err());
    }
}
