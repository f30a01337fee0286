//! Client for the YTS v2 movie catalog API.
//!
//! # Overview
//! [`YtsClient::builder`] collects a base URL, a log level and the set of
//! endpoint groups to load (bookmarks, comments, movies, requests, user;
//! all five unless some are named explicitly). `build` asks the
//! [`Dispatcher`] for one proxy per selected group. Each proxy method is a
//! single HTTP call whose JSON answer is decoded into typed values.
//!
//! ```no_run
//! use yts_client::{ListMovies, YtsClient};
//!
//! # fn main() -> yts_client::Result<()> {
//! let client = YtsClient::builder().with_movies().build();
//! let page = client.movies()?.list(&ListMovies::default())?.into_data()?;
//! println!("{} movies", page.movie_count);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`/`HttpResponse`);
//!   the network sits behind the [`Transport`] trait, ureq by default.
//! - The dispatcher is immutable after configuration and shared through an
//!   `Arc`, so a built client can be used from many threads.
//! - Calls are blocking. Timeouts, retries and cancellation are left to the
//!   transport or the caller.

pub mod client;
pub mod config;
pub mod date;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod modules;
pub mod transport;
pub mod types;

pub use client::{Builder, Selection, YtsClient};
pub use config::ClientConfig;
pub use date::DATE_FORMAT;
pub use dispatcher::{Dispatcher, LogLevel, DEFAULT_BASE_URL};
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use modules::bookmarks::BookmarkModule;
pub use modules::comments::{Comment, CommentList, CommentModule, CommentReceipt, NewComment};
pub use modules::movies::{
    ListMovies, MovieDetails, MovieDetailsQuery, MovieModule, Order, Quality, SortBy,
};
pub use modules::requests::{MovieRequest, RequestModule};
pub use modules::user::{Credentials, EditSettings, Registration, UserModule};
pub use modules::{Module, ModuleSlot, Proxy};
pub use transport::{Transport, UreqTransport};
pub use types::{Ack, ApiResponse, Meta, Movie, MovieList, Torrent};
