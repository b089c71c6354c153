//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod registration;
pub mod feedback;
pub mod bookmark;
pub mod badge;

// Re-export commonly used models
pub use event::{Event, EventRow, EventStatus, EventWithStats, Occupancy, CreateEventRequest, UpdateEventRequest, UpdateEventStatusRequest};
pub use registration::{Registration, RegistrationRow, RegistrationStatus, OccupancyEffect, JoinRequest, UpdateRegistrationStatusRequest};
pub use feedback::{Feedback, CreateFeedbackRequest, UpdateFeedbackRequest, RatingAggregate, average_rating, validate_rating};
pub use bookmark::{Bookmark, BookmarkRequest, BookmarkToggle};
pub use badge::{Badge, BadgeSummary, compute_badges};
