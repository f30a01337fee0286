//! DTOs shared across endpoint groups.
//!
//! Group-specific parameter and payload types live next to their group in
//! `modules/`. Fields the API does not always send default instead of
//! failing the decode.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Envelope wrapping every response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub status_message: String,
    pub data: Option<T>,
    #[serde(rename = "@meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }

    /// Unwrap the payload, turning an `"error"` envelope into
    /// [`Error::Rejected`].
    pub fn into_data(self) -> Result<T> {
        if !self.is_ok() {
            return Err(Error::Rejected {
                message: self.status_message,
            });
        }
        self.data.ok_or_else(|| Error::Decode("response envelope has no data".to_string()))
    }
}

/// Server bookkeeping attached to each response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    #[serde(default)]
    pub server_time: i64,
    #[serde(default)]
    pub server_timezone: String,
    #[serde(default)]
    pub api_version: u32,
    #[serde(default)]
    pub execution_time: String,
}

/// Write operations answer with an envelope whose payload is not worth
/// typing.
pub type Ack = ApiResponse<serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub imdb_code: String,
    pub title: String,
    #[serde(default)]
    pub title_long: String,
    #[serde(default)]
    pub year: u16,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub mpa_rating: String,
    #[serde(default)]
    pub small_cover_image: String,
    #[serde(default)]
    pub medium_cover_image: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub torrents: Vec<Torrent>,
    #[serde(default, with = "crate::date::option")]
    pub date_uploaded: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_uploaded_unix: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Torrent {
    pub url: String,
    pub hash: String,
    pub quality: String,
    #[serde(default)]
    pub seeds: u32,
    #[serde(default)]
    pub peers: u32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default, with = "crate::date::option")]
    pub date_uploaded: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_uploaded_unix: i64,
}

/// A page of movies as returned by listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieList {
    pub movie_count: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE: &str = r#"{
        "id": 2,
        "url": "https://yts.re/movie/up-2009",
        "imdb_code": "tt1049413",
        "title": "Up",
        "title_long": "Up (2009)",
        "year": 2009,
        "rating": 8.3,
        "runtime": 96,
        "genres": ["Animation", "Adventure"],
        "language": "English",
        "mpa_rating": "PG",
        "state": "ok",
        "torrents": [{
            "url": "https://yts.re/torrent/download/ABC",
            "hash": "ABC",
            "quality": "720p",
            "seeds": 10,
            "peers": 2,
            "size": "700 MB",
            "size_bytes": 734003200,
            "date_uploaded": "2015-01-10 08:30:00",
            "date_uploaded_unix": 1420878600
        }],
        "date_uploaded": "2015-01-10 08:30:00",
        "date_uploaded_unix": 1420878600
    }"#;

    #[test]
    fn movie_decodes_with_dates() {
        let movie: Movie = serde_json::from_str(MOVIE).unwrap();
        assert_eq!(movie.title, "Up");
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.torrents[0].quality, "720p");
        let uploaded = movie.date_uploaded.unwrap();
        assert_eq!(uploaded.format("%Y-%m-%d %H:%M:%S").to_string(), "2015-01-10 08:30:00");
    }

    #[test]
    fn movie_tolerates_missing_optional_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 9, "title": "Sparse"}"#).unwrap();
        assert!(movie.torrents.is_empty());
        assert!(movie.date_uploaded.is_none());
    }

    #[test]
    fn envelope_reads_meta() {
        let body = r#"{
            "status": "ok",
            "status_message": "Query was successful",
            "data": {"movie_count": 0, "movies": []},
            "@meta": {"server_time": 1, "server_timezone": "EST5EDT", "api_version": 2, "execution_time": "0 ms"}
        }"#;
        let response: ApiResponse<MovieList> = serde_json::from_str(body).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.meta.as_ref().unwrap().api_version, 2);
        assert_eq!(response.into_data().unwrap().movie_count, 0);
    }

    #[test]
    fn error_envelope_is_rejected() {
        let body = r#"{"status": "error", "status_message": "Invalid user key"}"#;
        let response: ApiResponse<MovieList> = serde_json::from_str(body).unwrap();
        let err = response.into_data().unwrap_err();
        assert!(matches!(err, Error::Rejected { message } if message == "Invalid user key"));
    }

    #[test]
    fn ok_envelope_without_data_is_a_decode_error() {
        let response: ApiResponse<MovieList> = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(matches!(response.into_data(), Err(Error::Decode(_))));
    }
}
