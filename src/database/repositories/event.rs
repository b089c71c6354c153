//! Event repository implementation

use sqlx::{FromRow, PgPool};
use crate::models::event::{CreateEventRequest, Event, EventRow, EventStatus, EventWithStats, UpdateEventRequest};
use crate::models::feedback::RatingAggregate;
use crate::utils::errors::{Result, VolunteerHubError};
use crate::utils::helpers::generate_uuid;

const EVENT_COLUMNS: &str = "id, title, date, location, category, max_volunteers, current_volunteers, description, organizer_id, organizer_name, image_url, tasks, status, created_at";

/// Event joined with aggregated feedback
#[derive(Debug, FromRow)]
struct EventStatsRow {
    #[sqlx(flatten)]
    event: EventRow,
    rating_sum: Option<i64>,
    feedback_count: i64,
}

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event owned by `organizer_id`
    pub async fn create(&self, organizer_id: &str, organizer_name: &str, request: CreateEventRequest) -> Result<Event> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            INSERT INTO events (id, title, date, location, category, max_volunteers, current_volunteers, description, organizer_id, organizer_name, image_url, tasks, status)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9, $10, $11, $12)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(generate_uuid())
        .bind(request.title)
        .bind(request.date)
        .bind(request.location)
        .bind(request.category)
        .bind(request.max_volunteers)
        .bind(request.description)
        .bind(organizer_id)
        .bind(organizer_name)
        .bind(request.image_url)
        .bind(request.tasks)
        .bind(EventStatus::Upcoming.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Event::try_from).transpose()
    }

    /// List all events ordered by date
    pub async fn list(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date ASC, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Event::try_from).collect()
    }

    /// Apply detail edits.
    ///
    /// The capacity guard runs inside the UPDATE so a concurrent admission cannot slip
    /// between the check and the write. Returns `None` when the event does not exist.
    pub async fn update_details(&self, id: &str, request: UpdateEventRequest) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                date = COALESCE($3, date),
                location = COALESCE($4, location),
                category = COALESCE($5, category),
                max_volunteers = COALESCE($6, max_volunteers),
                description = COALESCE($7, description),
                image_url = COALESCE($8, image_url),
                tasks = COALESCE($9, tasks)
            WHERE id = $1 AND COALESCE($6, max_volunteers) >= current_volunteers
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.date)
        .bind(request.location)
        .bind(request.category)
        .bind(request.max_volunteers)
        .bind(request.description)
        .bind(request.image_url)
        .bind(request.tasks)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(Some(row.try_into()?));
        }

        match self.find_by_id(id).await? {
            Some(event) => Err(VolunteerHubError::Validation(format!(
                "maxVolunteers cannot be lower than the {} volunteers already confirmed",
                event.current_volunteers
            ))),
            None => Ok(None),
        }
    }

    /// Update event status. Returns `None` when the event does not exist.
    pub async fn update_status(&self, id: &str, status: EventStatus) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "UPDATE events SET status = $2 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }

    /// Events of an organizer with feedback statistics; events without feedback are included
    pub async fn list_with_stats_for_organizer(&self, organizer_id: &str) -> Result<Vec<EventWithStats>> {
        let rows = sqlx::query_as::<_, EventStatsRow>(
            r#"
            SELECT e.id, e.title, e.date, e.location, e.category, e.max_volunteers, e.current_volunteers,
                   e.description, e.organizer_id, e.organizer_name, e.image_url, e.tasks, e.status, e.created_at,
                   SUM(f.rating)::BIGINT AS rating_sum,
                   COUNT(f.id) AS feedback_count
            FROM events e
            LEFT OUTER JOIN feedbacks f ON f.event_id = e.id
            WHERE e.organizer_id = $1
            GROUP BY e.id
            ORDER BY e.date ASC, e.created_at ASC
            "#,
        )
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<EventWithStats> {
                let aggregate = RatingAggregate {
                    sum: row.rating_sum.unwrap_or(0),
                    count: row.feedback_count,
                };
                Ok(EventWithStats {
                    event: row.event.try_into()?,
                    avg_rating: aggregate.average(),
                    feedback_count: aggregate.count,
                })
            })
            .collect()
    }

    /// Events bookmarked by a user
    pub async fn list_bookmarked_by(&self, user_id: &str) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT e.id, e.title, e.date, e.location, e.category, e.max_volunteers, e.current_volunteers,
                   e.description, e.organizer_id, e.organizer_name, e.image_url, e.tasks, e.status, e.created_at
            FROM events e
            INNER JOIN bookmarks b ON b.event_id = e.id
            WHERE b.user_id = $1
            ORDER BY e.date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Event::try_from).collect()
    }
}
