//! Error type shared by the builder, the dispatcher and every endpoint group.
//!
//! # Design
//! Non-2xx responses are not folded into "not found" and friends. `Api`
//! keeps the raw status and body so callers can inspect what the server
//! actually said; `is_not_found` covers the common check.

use thiserror::Error;

use crate::modules::ModuleSlot;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid builder or dispatcher input.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An accessor was called for a module the client was not built with.
    #[error("{} module not loaded, call YtsClient::builder().{}()", .slot, .slot.enabling_call())]
    ModuleNotLoaded { slot: ModuleSlot },

    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// Request parameters could not be encoded.
    #[error("encoding request failed: {0}")]
    Serialization(String),

    /// The server answered 2xx but flagged the query as failed in the
    /// response envelope.
    #[error("request rejected: {message}")]
    Rejected { message: String },
}

impl Error {
    /// HTTP status carried by an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
