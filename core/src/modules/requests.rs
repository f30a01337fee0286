//! Requests for titles missing from the catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dispatcher::Dispatcher;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::types::Ack;

pub const MAKE: Endpoint = Endpoint::post("make_request", "make_request.json");

pub const ENDPOINTS: &[Endpoint] = &[MAKE];

#[derive(Debug, Clone)]
pub struct RequestModule {
    pub(crate) dispatcher: Arc<Dispatcher>,
}

impl RequestModule {
    pub fn make(&self, request: &MovieRequest) -> Result<Ack> {
        self.dispatcher.call(&MAKE, request)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRequest {
    pub user_key: String,
    pub movie_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_message: Option<String>,
}
