//! Movie comments: listing, posting and moderation.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dispatcher::Dispatcher;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::types::{Ack, ApiResponse};

pub const LIST: Endpoint = Endpoint::get("movie_comments", "movie_comments.json");
pub const MAKE: Endpoint = Endpoint::post("make_comment", "make_comment.json");
pub const LIKE: Endpoint = Endpoint::post("like_comment", "like_comment.json");
pub const REPORT: Endpoint = Endpoint::post("report_comment", "report_comment.json");
pub const DELETE: Endpoint = Endpoint::post("delete_comment", "delete_comment.json");

pub const ENDPOINTS: &[Endpoint] = &[LIST, MAKE, LIKE, REPORT, DELETE];

#[derive(Debug, Clone)]
pub struct CommentModule {
    pub(crate) dispatcher: Arc<Dispatcher>,
}

impl CommentModule {
    pub fn list(&self, movie_id: u64) -> Result<ApiResponse<CommentList>> {
        self.dispatcher.call(&LIST, &MovieId { movie_id })
    }

    pub fn make(&self, comment: &NewComment) -> Result<ApiResponse<CommentReceipt>> {
        self.dispatcher.call(&MAKE, comment)
    }

    pub fn like(&self, user_key: &str, comment_id: u64) -> Result<Ack> {
        self.dispatcher.call(&LIKE, &CommentAction { user_key, comment_id })
    }

    pub fn report(&self, user_key: &str, comment_id: u64) -> Result<Ack> {
        self.dispatcher.call(&REPORT, &CommentAction { user_key, comment_id })
    }

    pub fn delete(&self, user_key: &str, comment_id: u64) -> Result<Ack> {
        self.dispatcher.call(&DELETE, &CommentAction { user_key, comment_id })
    }
}

#[derive(Serialize)]
struct MovieId {
    movie_id: u64,
}

#[derive(Serialize)]
struct CommentAction<'a> {
    user_key: &'a str,
    comment_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub user_key: String,
    pub movie_id: u64,
    pub comment_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub comment_id: u64,
    pub user_id: u64,
    pub username: String,
    #[serde(default)]
    pub user_group: String,
    #[serde(default)]
    pub medium_user_avatar_image: String,
    #[serde(default)]
    pub like_count: u32,
    pub comment_text: String,
    #[serde(default, with = "crate::date::option")]
    pub date_added: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_added_unix: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentList {
    pub comment_count: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentReceipt {
    pub comment_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comment_list_decodes() {
        let list: CommentList = serde_json::from_value(json!({
            "comment_count": 1,
            "comments": [{
                "comment_id": 88,
                "user_id": 4,
                "username": "reel",
                "like_count": 2,
                "comment_text": "Great rip",
                "date_added": "2015-02-14 20:01:02",
                "date_added_unix": 1423944062
            }]
        }))
        .unwrap();
        assert_eq!(list.comments[0].comment_id, 88);
        assert!(list.comments[0].date_added.is_some());
    }

    #[test]
    fn comment_action_carries_key_and_id() {
        let value = serde_json::to_value(CommentAction {
            user_key: "k",
            comment_id: 3,
        })
        .unwrap();
        assert_eq!(value, json!({"user_key": "k", "comment_id": 3}));
    }
}
