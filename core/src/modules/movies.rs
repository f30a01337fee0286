//! Catalog browsing: listings, details, suggestions, reviews.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dispatcher::Dispatcher;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::types::{Ack, ApiResponse, Movie, MovieList};

pub const LIST: Endpoint = Endpoint::get("list_movies", "list_movies.json");
pub const DETAILS: Endpoint = Endpoint::get("movie_details", "movie_details.json");
pub const SUGGESTIONS: Endpoint = Endpoint::get("movie_suggestions", "movie_suggestions.json");
pub const REVIEWS: Endpoint = Endpoint::get("movie_reviews", "movie_reviews.json");
pub const PARENTAL_GUIDES: Endpoint =
    Endpoint::get("movie_parental_guides", "movie_parental_guides.json");
pub const UPCOMING: Endpoint = Endpoint::get("list_upcoming", "list_upcoming.json");
pub const LIKE: Endpoint = Endpoint::post("like_movie", "like_movie.json");

pub const ENDPOINTS: &[Endpoint] = &[
    LIST,
    DETAILS,
    SUGGESTIONS,
    REVIEWS,
    PARENTAL_GUIDES,
    UPCOMING,
    LIKE,
];

#[derive(Debug, Clone)]
pub struct MovieModule {
    pub(crate) dispatcher: Arc<Dispatcher>,
}

impl MovieModule {
    pub fn list(&self, query: &ListMovies) -> Result<ApiResponse<MovieList>> {
        self.dispatcher.call(&LIST, query)
    }

    pub fn details(&self, query: &MovieDetailsQuery) -> Result<ApiResponse<MovieDetails>> {
        self.dispatcher.call(&DETAILS, query)
    }

    pub fn suggestions(&self, movie_id: u64) -> Result<ApiResponse<Suggestions>> {
        self.dispatcher.call(&SUGGESTIONS, &MovieId { movie_id })
    }

    pub fn reviews(&self, movie_id: u64) -> Result<ApiResponse<ReviewList>> {
        self.dispatcher.call(&REVIEWS, &MovieId { movie_id })
    }

    pub fn parental_guides(&self, movie_id: u64) -> Result<ApiResponse<ParentalGuideList>> {
        self.dispatcher.call(&PARENTAL_GUIDES, &MovieId { movie_id })
    }

    pub fn upcoming(&self) -> Result<ApiResponse<UpcomingList>> {
        self.dispatcher.call(&UPCOMING, &())
    }

    pub fn like(&self, user_key: &str, movie_id: u64) -> Result<Ack> {
        self.dispatcher.call(&LIKE, &LikeMovie { user_key, movie_id })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "3D")]
    ThreeD,
    #[serde(rename = "all")]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Title,
    Year,
    Rating,
    Peers,
    Seeds,
    DownloadCount,
    LikeCount,
    DateAdded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

/// Filters for `list_movies`. Unset fields are left to the server default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMovies {
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub quality: Option<Quality>,
    pub minimum_rating: Option<u8>,
    pub query_term: Option<String>,
    pub genre: Option<String>,
    pub sort_by: Option<SortBy>,
    pub order_by: Option<Order>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDetailsQuery {
    pub movie_id: u64,
    #[serde(default)]
    pub with_images: bool,
    #[serde(default)]
    pub with_cast: bool,
}

#[derive(Serialize)]
struct MovieId {
    movie_id: u64,
}

#[derive(Serialize)]
struct LikeMovie<'a> {
    user_key: &'a str,
    movie_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub description_full: String,
    #[serde(default)]
    pub yt_trailer_code: String,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character_name: String,
    #[serde(default)]
    pub imdb_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestions {
    #[serde(alias = "movie_count")]
    pub movie_suggestions_count: u32,
    #[serde(alias = "movies", default)]
    pub movie_suggestions: Vec<Movie>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub user_id: u64,
    pub username: String,
    #[serde(default)]
    pub user_location: String,
    #[serde(default)]
    pub review_summary: String,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub review_rating: f32,
    #[serde(default, with = "crate::date::option")]
    pub date_written: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_written_unix: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewList {
    pub review_count: u32,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParentalGuide {
    #[serde(rename = "type")]
    pub kind: String,
    pub parental_guide_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParentalGuideList {
    pub parental_guide_count: u32,
    #[serde(default)]
    pub parental_guides: Vec<ParentalGuide>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingMovie {
    pub movie_title: String,
    #[serde(default)]
    pub movie_year: u16,
    #[serde(default)]
    pub imdb_code: String,
    #[serde(default)]
    pub medium_cover_image: String,
    #[serde(default, with = "crate::date::option")]
    pub date_added: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_added_unix: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingList {
    pub upcoming_movies_count: u32,
    #[serde(default)]
    pub upcoming_movies: Vec<UpcomingMovie>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_filters_serialize_to_api_names() {
        let query = ListMovies {
            quality: Some(Quality::P1080),
            sort_by: Some(SortBy::DateAdded),
            order_by: Some(Order::Asc),
            ..Default::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["quality"], "1080p");
        assert_eq!(value["sort_by"], "date_added");
        assert_eq!(value["order_by"], "asc");
        assert!(value["limit"].is_null());
    }

    #[test]
    fn details_flatten_the_movie() {
        let details: MovieDetails = serde_json::from_value(json!({
            "id": 7,
            "title": "Heat",
            "year": 1995,
            "description_full": "A group of professional bank robbers...",
            "like_count": 12,
            "cast": [{"name": "Al Pacino", "character_name": "Vincent Hanna"}],
            "date_uploaded": "2015-03-01 10:00:00"
        }))
        .unwrap();
        assert_eq!(details.movie.title, "Heat");
        assert_eq!(details.like_count, 12);
        assert_eq!(details.cast[0].name, "Al Pacino");
        assert!(details.movie.date_uploaded.is_some());
    }

    #[test]
    fn suggestions_accept_both_field_spellings() {
        let old: Suggestions = serde_json::from_value(json!({
            "movie_suggestions_count": 0,
            "movie_suggestions": []
        }))
        .unwrap();
        let new: Suggestions =
            serde_json::from_value(json!({"movie_count": 0, "movies": []})).unwrap();
        assert_eq!(old, new);
    }

    #[test]
    fn parental_guide_reads_type_field() {
        let guide: ParentalGuide = serde_json::from_value(json!({
            "type": "Violence & Gore",
            "parental_guide_text": "Some shootouts."
        }))
        .unwrap();
        assert_eq!(guide.kind, "Violence & Gore");
    }
}
