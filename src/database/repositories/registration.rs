//! Registration repository implementation
//!
//! Holds the Postgres side of the admission controller: the event row is locked with
//! `SELECT ... FOR UPDATE` for the read-check-write of the occupancy counter.

use std::time::Instant;
use sqlx::PgPool;
use crate::database::store::CommittedTransition;
use crate::models::event::{EventStatus, Occupancy};
use crate::models::registration::{OccupancyEffect, Registration, RegistrationRow, RegistrationStatus};
use crate::utils::errors::{Result, VolunteerHubError};
use crate::utils::logging::log_database_operation;

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, status, joined_at, user_name, user_avatar";

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new registration; the unique index turns duplicates into `Conflict`
    pub async fn create(&self, registration: &Registration) -> Result<Registration> {
        let result = sqlx::query_as::<_, RegistrationRow>(&format!(
            r#"
            INSERT INTO registrations (id, event_id, user_id, status, joined_at, user_name, user_avatar)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(&registration.id)
        .bind(&registration.event_id)
        .bind(&registration.user_id)
        .bind(registration.status.as_str())
        .bind(registration.joined_at)
        .bind(&registration.user_name)
        .bind(&registration.user_avatar)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row.try_into(),
            Err(sqlx::Error::Database(db_error)) if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(VolunteerHubError::Conflict("Already joined".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find registration by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Registration::try_from).transpose()
    }

    /// Find the registration of a user for an event
    pub async fn find_for_user(&self, event_id: &str, user_id: &str) -> Result<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Registration::try_from).transpose()
    }

    /// Registrations of an event in join order
    pub async fn list_for_event(&self, event_id: &str) -> Result<Vec<Registration>> {
        let rows = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 ORDER BY joined_at ASC, user_name ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    /// Conditional status write for transitions that leave the counter alone
    pub async fn compare_and_set_status(
        &self,
        id: &str,
        expected: RegistrationStatus,
        next: RegistrationStatus,
    ) -> Result<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "UPDATE registrations SET status = $3 WHERE id = $1 AND status = $2 RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(id)
        .bind(expected.as_str())
        .bind(next.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Registration::try_from).transpose()
    }

    /// Change status and occupancy in one transaction under the event row lock.
    ///
    /// Any early return drops the transaction, which rolls it back.
    pub async fn transition_locked(&self, id: &str, next: RegistrationStatus) -> Result<CommittedTransition> {
        let started = Instant::now();

        let event_id: Option<(String,)> = sqlx::query_as("SELECT event_id FROM registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let (event_id,) = event_id.ok_or_else(|| VolunteerHubError::RegistrationNotFound {
            registration_id: id.to_string(),
        })?;

        let mut tx = self.pool.begin().await?;

        let counters: Option<(i32, i32)> = sqlx::query_as(
            "SELECT current_volunteers, max_volunteers FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(&event_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (current, max) = counters.ok_or_else(|| VolunteerHubError::EventNotFound {
            event_id: event_id.clone(),
        })?;
        let occupancy = Occupancy { current, max };

        let (status,): (String,) = sqlx::query_as("SELECT status FROM registrations WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let previous_status: RegistrationStatus = status.parse()?;

        let effect = OccupancyEffect::between(previous_status, next);
        let updated = occupancy.apply(effect, &event_id)?;

        let current_volunteers = if effect == OccupancyEffect::Neutral {
            None
        } else {
            sqlx::query("UPDATE events SET current_volunteers = $2 WHERE id = $1")
                .bind(&event_id)
                .bind(updated.current)
                .execute(&mut *tx)
                .await?;
            Some(updated.current)
        };

        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "UPDATE registrations SET status = $2 WHERE id = $1 RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(id)
        .bind(next.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        log_database_operation("transition_locked", "registrations", started.elapsed().as_millis() as u64);

        Ok(CommittedTransition {
            registration: row.try_into()?,
            previous_status,
            current_volunteers,
        })
    }

    /// Confirmed registrations of a user on completed events
    pub async fn count_completed_confirmed(&self, user_id: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM registrations r
            INNER JOIN events e ON e.id = r.event_id
            WHERE r.user_id = $1 AND r.status = $2 AND e.status = $3
            "#,
        )
        .bind(user_id)
        .bind(RegistrationStatus::Confirmed.as_str())
        .bind(EventStatus::Completed.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
