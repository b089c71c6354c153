//! Event model

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::models::registration::OccupancyEffect;
use crate::utils::errors::{Result, VolunteerHubError};

/// Lifecycle of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = VolunteerHubError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upcoming" => Ok(EventStatus::Upcoming),
            "completed" => Ok(EventStatus::Completed),
            other => Err(VolunteerHubError::Validation(format!("Unknown event status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub category: String,
    pub max_volunteers: i32,
    pub current_volunteers: i32,
    pub description: String,
    pub organizer_id: String,
    pub organizer_name: String,
    pub image_url: Option<String>,
    pub tasks: String,
    pub status: EventStatus,
}

impl Event {
    /// Occupancy counter paired with the capacity
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            current: self.current_volunteers,
            max: self.max_volunteers,
        }
    }

    pub fn is_organized_by(&self, user_id: &str) -> bool {
        self.organizer_id == user_id
    }
}

/// Database row for `events`
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub category: String,
    pub max_volunteers: i32,
    pub current_volunteers: i32,
    pub description: String,
    pub organizer_id: String,
    pub organizer_name: String,
    pub image_url: Option<String>,
    pub tasks: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = VolunteerHubError;

    fn try_from(row: EventRow) -> Result<Self> {
        Ok(Event {
            status: row.status.parse()?,
            id: row.id,
            title: row.title,
            date: row.date,
            location: row.location,
            category: row.category,
            max_volunteers: row.max_volunteers,
            current_volunteers: row.current_volunteers,
            description: row.description,
            organizer_id: row.organizer_id,
            organizer_name: row.organizer_name,
            image_url: row.image_url,
            tasks: row.tasks,
        })
    }
}

/// Occupancy counter of an event together with its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub current: i32,
    pub max: i32,
}

impl Occupancy {
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Apply the counter effect of a status transition.
    ///
    /// Admission fails with `CapacityExceeded` when no slot is left; release is
    /// floored at zero.
    pub fn apply(self, effect: OccupancyEffect, event_id: &str) -> Result<Occupancy> {
        match effect {
            OccupancyEffect::Admit => {
                if self.is_full() {
                    return Err(VolunteerHubError::CapacityExceeded {
                        event_id: event_id.to_string(),
                        max_volunteers: self.max,
                    });
                }
                Ok(Occupancy { current: self.current + 1, ..self })
            }
            OccupancyEffect::Release => Ok(Occupancy {
                current: (self.current - 1).max(0),
                ..self
            }),
            OccupancyEffect::Neutral => Ok(self),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub category: String,
    pub max_volunteers: i32,
    pub description: String,
    pub organizer_name: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tasks: String,
}

/// Detail edits; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub max_volunteers: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub tasks: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventStatusRequest {
    pub status: EventStatus,
}

/// Event joined with its feedback statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithStats {
    #[serde(flatten)]
    pub event: Event,
    pub avg_rating: f64,
    pub feedback_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_admit_until_full() {
        let occupancy = Occupancy { current: 1, max: 2 };
        let next = occupancy.apply(OccupancyEffect::Admit, "e1").unwrap();
        assert_eq!(next, Occupancy { current: 2, max: 2 });
        assert_matches!(
            next.apply(OccupancyEffect::Admit, "e1"),
            Err(VolunteerHubError::CapacityExceeded { max_volunteers: 2, .. })
        );
    }

    #[test]
    fn test_release_is_floored_at_zero() {
        let occupancy = Occupancy { current: 0, max: 3 };
        assert_eq!(occupancy.apply(OccupancyEffect::Release, "e1").unwrap().current, 0);
        let occupancy = Occupancy { current: 2, max: 3 };
        assert_eq!(occupancy.apply(OccupancyEffect::Release, "e1").unwrap().current, 1);
    }

    #[test]
    fn test_neutral_leaves_counter() {
        let occupancy = Occupancy { current: 3, max: 3 };
        assert_eq!(occupancy.apply(OccupancyEffect::Neutral, "e1").unwrap(), occupancy);
    }

    #[test]
    fn test_event_status_round_trip() {
        assert_eq!("completed".parse::<EventStatus>().unwrap(), EventStatus::Completed);
        assert_matches!("done".parse::<EventStatus>(), Err(VolunteerHubError::Validation(_)));
        assert_eq!(serde_json::to_string(&EventStatus::Upcoming).unwrap(), "\"upcoming\"");
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let event = Event {
            id: "e1".to_string(),
            title: "Beach clean-up".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            location: "Santa Monica".to_string(),
            category: "Environment".to_string(),
            max_volunteers: 10,
            current_volunteers: 0,
            description: "Bring gloves".to_string(),
            organizer_id: "org_1".to_string(),
            organizer_name: "Green Org".to_string(),
            image_url: None,
            tasks: String::new(),
            status: EventStatus::Upcoming,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["maxVolunteers"], 10);
        assert_eq!(json["currentVolunteers"], 0);
        assert_eq!(json["organizerId"], "org_1");
        assert_eq!(json["date"], "2024-06-01");
        assert_eq!(json["status"], "upcoming");
    }
}
