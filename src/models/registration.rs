//! Registration model and its status transition table

use std::fmt;
use std::str::FromStr;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::utils::errors::{Result, VolunteerHubError};
use crate::utils::helpers::{default_volunteer_name, generate_uuid, non_blank, today};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl RegistrationStatus {
    pub const ALL: [RegistrationStatus; 3] = [
        RegistrationStatus::Pending,
        RegistrationStatus::Confirmed,
        RegistrationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = VolunteerHubError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(RegistrationStatus::Pending),
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "rejected" => Ok(RegistrationStatus::Rejected),
            other => Err(VolunteerHubError::Validation(format!("Unknown registration status: {}", other))),
        }
    }
}

/// What a status transition does to the event's occupancy counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyEffect {
    /// Into CONFIRMED: takes a slot, subject to capacity
    Admit,
    /// Out of CONFIRMED: frees a slot
    Release,
    /// Neither side CONFIRMED
    Neutral,
}

impl OccupancyEffect {
    /// Every pair of statuses is a legal move; this only decides what it does to the counter.
    pub fn between(from: RegistrationStatus, to: RegistrationStatus) -> Self {
        use RegistrationStatus::*;
        match (from, to) {
            (Pending, Confirmed) | (Rejected, Confirmed) => OccupancyEffect::Admit,
            (Confirmed, Pending) | (Confirmed, Rejected) => OccupancyEffect::Release,
            (Confirmed, Confirmed) => OccupancyEffect::Neutral,
            (Pending, Pending) | (Pending, Rejected) | (Rejected, Pending) | (Rejected, Rejected) => {
                OccupancyEffect::Neutral
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: RegistrationStatus,
    pub joined_at: NaiveDate,
    pub user_name: String,
    pub user_avatar: String,
}

impl Registration {
    /// A fresh registration. New registrations always start out pending.
    pub fn new_pending(event_id: &str, user_id: &str, user_name: Option<String>, user_avatar: Option<String>) -> Self {
        Self {
            id: generate_uuid(),
            event_id: event_id.to_string(),
            user_id: user_id.to_string(),
            status: RegistrationStatus::Pending,
            joined_at: today(),
            user_name: non_blank(user_name).unwrap_or_else(|| default_volunteer_name(user_id)),
            user_avatar: user_avatar.unwrap_or_default(),
        }
    }
}

/// Database row for `registrations`
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationRow {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: String,
    pub joined_at: NaiveDate,
    pub user_name: String,
    pub user_avatar: String,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = VolunteerHubError;

    fn try_from(row: RegistrationRow) -> Result<Self> {
        Ok(Registration {
            status: row.status.parse()?,
            id: row.id,
            event_id: row.event_id,
            user_id: row.user_id,
            joined_at: row.joined_at,
            user_name: row.user_name,
            user_avatar: row.user_avatar,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub user_id: String,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRegistrationStatusRequest {
    pub status: RegistrationStatus,
}
