//! State management module
//!
//! Shared application state handed to every request handler

use std::sync::Arc;
use crate::services::{IdentityVerifier, ServiceFactory};

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(services: ServiceFactory, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            services: Arc::new(services),
            verifier,
        }
    }
}
