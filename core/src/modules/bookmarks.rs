//! Per-user movie bookmarks.

use std::sync::Arc;

use serde::Serialize;

use crate::dispatcher::Dispatcher;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::types::{Ack, ApiResponse, MovieList};

pub const LIST: Endpoint = Endpoint::get("get_movie_bookmarks", "get_movie_bookmarks.json");
pub const ADD: Endpoint = Endpoint::post("add_movie_bookmark", "add_movie_bookmark.json");
pub const DELETE: Endpoint = Endpoint::post("delete_movie_bookmark", "delete_movie_bookmark.json");

pub const ENDPOINTS: &[Endpoint] = &[LIST, ADD, DELETE];

#[derive(Debug, Clone)]
pub struct BookmarkModule {
    pub(crate) dispatcher: Arc<Dispatcher>,
}

impl BookmarkModule {
    pub fn list(&self, user_key: &str) -> Result<ApiResponse<MovieList>> {
        self.dispatcher.call(&LIST, &UserKey { user_key })
    }

    pub fn add(&self, user_key: &str, movie_id: u64) -> Result<Ack> {
        self.dispatcher.call(&ADD, &Bookmark { user_key, movie_id })
    }

    pub fn delete(&self, user_key: &str, movie_id: u64) -> Result<Ack> {
        self.dispatcher.call(&DELETE, &Bookmark { user_key, movie_id })
    }
}

#[derive(Serialize)]
struct UserKey<'a> {
    user_key: &'a str,
}

#[derive(Serialize)]
struct Bookmark<'a> {
    user_key: &'a str,
    movie_id: u64,
}
