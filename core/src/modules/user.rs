//! Accounts: keys, profiles, registration and password recovery.
//!
//! Most calls authenticate with a `user_key` obtained from [`UserModule::key`].

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dispatcher::Dispatcher;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::types::{Ack, ApiResponse, Movie};

pub const DETAILS: Endpoint = Endpoint::get("user_details", "user_details.json");
pub const KEY: Endpoint = Endpoint::post("user_get_key", "user_get_key.json");
pub const PROFILE: Endpoint = Endpoint::get("user_profile", "user_profile.json");
pub const EDIT_SETTINGS: Endpoint = Endpoint::post("user_edit_settings", "user_edit_settings.json");
pub const REGISTER: Endpoint = Endpoint::post("user_register", "user_register.json");
pub const FORGOT_PASSWORD: Endpoint =
    Endpoint::post("user_forgot_password", "user_forgot_password.json");
pub const RESET_PASSWORD: Endpoint =
    Endpoint::post("user_reset_password", "user_reset_password.json");

pub const ENDPOINTS: &[Endpoint] = &[
    DETAILS,
    KEY,
    PROFILE,
    EDIT_SETTINGS,
    REGISTER,
    FORGOT_PASSWORD,
    RESET_PASSWORD,
];

#[derive(Debug, Clone)]
pub struct UserModule {
    pub(crate) dispatcher: Arc<Dispatcher>,
}

impl UserModule {
    /// Public details of any user.
    pub fn details(
        &self,
        user_id: u64,
        with_recently_downloaded: bool,
    ) -> Result<ApiResponse<UserDetails>> {
        self.dispatcher.call(
            &DETAILS,
            &DetailsQuery {
                user_id,
                with_recently_downloaded,
            },
        )
    }

    /// Exchange credentials for a user key.
    pub fn key(&self, credentials: &Credentials) -> Result<ApiResponse<UserKey>> {
        self.dispatcher.call(&KEY, credentials)
    }

    /// Private profile of the key's owner.
    pub fn profile(&self, user_key: &str) -> Result<ApiResponse<UserProfile>> {
        self.dispatcher.call(&PROFILE, &KeyOnly { user_key })
    }

    pub fn edit_settings(&self, settings: &EditSettings) -> Result<ApiResponse<UserProfile>> {
        self.dispatcher.call(&EDIT_SETTINGS, settings)
    }

    pub fn register(&self, registration: &Registration) -> Result<ApiResponse<UserKey>> {
        self.dispatcher.call(&REGISTER, registration)
    }

    pub fn forgot_password(&self, email: &str) -> Result<Ack> {
        self.dispatcher.call(&FORGOT_PASSWORD, &ForgotPassword { email })
    }

    pub fn reset_password(&self, reset_code: &str, new_password: &str) -> Result<Ack> {
        self.dispatcher.call(
            &RESET_PASSWORD,
            &ResetPassword {
                reset_code,
                new_password,
            },
        )
    }
}

#[derive(Serialize)]
struct DetailsQuery {
    user_id: u64,
    with_recently_downloaded: bool,
}

#[derive(Serialize)]
struct KeyOnly<'a> {
    user_key: &'a str,
}

#[derive(Serialize)]
struct ForgotPassword<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPassword<'a> {
    reset_code: &'a str,
    new_password: &'a str,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            application_key: None,
        }
    }
}

// Keep passwords out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("application_key", &self.application_key)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditSettings {
    pub user_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserKey {
    pub user_key: String,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDetails {
    pub user_id: u64,
    pub username: String,
    #[serde(default)]
    pub user_group: String,
    #[serde(default)]
    pub about_text: String,
    #[serde(default)]
    pub medium_user_avatar_image: String,
    #[serde(default, with = "crate::date::option")]
    pub date_joined: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_joined_unix: i64,
    #[serde(default, with = "crate::date::option")]
    pub date_last_seen: Option<NaiveDateTime>,
    #[serde(default)]
    pub recently_downloaded: Vec<Movie>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_group: String,
    #[serde(default)]
    pub about_text: String,
    #[serde(default)]
    pub downloads_count: u32,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default, with = "crate::date::option")]
    pub date_joined: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_joined_unix: i64,
}
