//! Test data and identities
//!
//! Fixed bearer tokens mapped to known identities, plus request builders.

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::NaiveDate;
use volunteer_hub::models::{CreateEventRequest, JoinRequest};
use volunteer_hub::services::{Identity, IdentityVerifier};
use volunteer_hub::VolunteerHubError;

pub const ORGANIZER_TOKEN: &str = "organizer-token";
pub const OTHER_ORGANIZER_TOKEN: &str = "other-organizer-token";
pub const VOLUNTEER_TOKEN: &str = "volunteer-token";
pub const SECOND_VOLUNTEER_TOKEN: &str = "second-volunteer-token";

pub const ORGANIZER_ID: &str = "user_org_0001";
pub const OTHER_ORGANIZER_ID: &str = "user_org_0002";
pub const VOLUNTEER_ID: &str = "user_vol_1111";
pub const SECOND_VOLUNTEER_ID: &str = "user_vol_2222";

pub fn organizer() -> Identity {
    Identity::new(ORGANIZER_ID, true)
}

pub fn other_organizer() -> Identity {
    Identity::new(OTHER_ORGANIZER_ID, true)
}

pub fn volunteer(user_id: &str) -> Identity {
    Identity::new(user_id, false)
}

/// Verifier that accepts only the fixed test tokens
pub struct StaticVerifier {
    identities: HashMap<&'static str, Identity>,
}

impl StaticVerifier {
    pub fn new() -> Self {
        let identities = HashMap::from([
            (ORGANIZER_TOKEN, organizer()),
            (OTHER_ORGANIZER_TOKEN, other_organizer()),
            (VOLUNTEER_TOKEN, volunteer(VOLUNTEER_ID)),
            (SECOND_VOLUNTEER_TOKEN, volunteer(SECOND_VOLUNTEER_ID)),
        ]);
        Self { identities }
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> volunteer_hub::Result<Identity> {
        self.identities
            .get(token)
            .cloned()
            .ok_or_else(|| VolunteerHubError::Unauthorized("Unknown test token".to_string()))
    }
}

pub fn event_request(title: &str, max_volunteers: i32) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
        location: "Harbor Park".to_string(),
        category: "Environment".to_string(),
        max_volunteers,
        description: "Collect litter along the shore".to_string(),
        organizer_name: Some("Harbor Friends".to_string()),
        image_url: None,
        tasks: "Bring gloves\nSort recyclables".to_string(),
    }
}

pub fn join_request(user_id: &str) -> JoinRequest {
    JoinRequest {
        user_id: user_id.to_string(),
        user_name: None,
        user_avatar: None,
    }
}
