//! Badges derived from completed, confirmed volunteering

use std::fmt;
use serde::{Serialize, Serializer};

/// Achievement earned from the number of completed events a volunteer was confirmed for.
///
/// Badges are never stored; they are recomputed from the count on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Badge {
    FirstStep,
    HelpingHand,
    SuperStar,
}

impl Badge {
    /// All badges in ascending threshold order
    pub const ALL: [Badge; 3] = [Badge::FirstStep, Badge::HelpingHand, Badge::SuperStar];

    pub fn threshold(&self) -> i64 {
        match self {
            Badge::FirstStep => 1,
            Badge::HelpingHand => 3,
            Badge::SuperStar => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Badge::FirstStep => "First Step",
            Badge::HelpingHand => "Helping Hand",
            Badge::SuperStar => "Super Star",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Badge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Every badge whose threshold `completed_confirmed` meets, ascending
pub fn compute_badges(completed_confirmed: i64) -> Vec<Badge> {
    Badge::ALL
        .into_iter()
        .filter(|badge| completed_confirmed >= badge.threshold())
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeSummary {
    pub user_id: String,
    pub completed_events: i64,
    pub badges: Vec<Badge>,
}
