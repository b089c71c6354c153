//! Feedback model and rating aggregation

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::utils::errors::{Result, VolunteerHubError};
use crate::utils::helpers::round_to_tenth;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub event_id: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFeedbackRequest {
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

/// Reject ratings outside 1..=5
pub fn validate_rating(rating: i32) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(VolunteerHubError::Validation(format!(
            "Rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(())
}

/// Mean rating rounded to one decimal; `0.0` when there is no feedback
pub fn average_rating(ratings: &[i32]) -> f64 {
    RatingAggregate {
        sum: ratings.iter().map(|r| i64::from(*r)).sum(),
        count: ratings.len() as i64,
    }
    .average()
}

/// Sum and count of ratings as produced by an aggregate query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingAggregate {
    pub sum: i64,
    pub count: i64,
}

impl RatingAggregate {
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        round_to_tenth(self.sum as f64 / self.count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[5, 3, 4]), 4.0);
        assert_eq!(average_rating(&[5, 4]), 4.5);
        assert_eq!(average_rating(&[5, 5, 4]), 4.7);
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    proptest! {
        #[test]
        fn average_stays_within_rating_bounds(ratings in prop::collection::vec(1i32..=5, 1..50)) {
            let avg = average_rating(&ratings);
            prop_assert!(avg >= 1.0 && avg <= 5.0);
        }
    }
}
