//! In-memory stand-in for the YTS v2 API.
//!
//! Speaks the same envelope format as the real service
//! (`{"status", "status_message", "data", "@meta"}`) for the subset of
//! endpoints the client integration tests exercise. State lives for the
//! lifetime of the router.

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const API_PREFIX: &str = "/api/v2";
pub const DEMO_USERNAME: &str = "reel";
pub const DEMO_PASSWORD: &str = "popcorn";
pub const DEMO_USER_KEY: &str = "5b4c1e0f7a";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub year: u16,
    pub rating: f32,
    pub genres: Vec<String>,
    pub date_uploaded: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: u64,
    pub movie_id: u64,
    pub user_id: u64,
    pub username: String,
    pub like_count: u32,
    pub comment_text: String,
    pub date_added: String,
}

#[derive(Clone, Debug)]
struct User {
    id: u64,
    username: String,
    password: String,
    user_key: String,
    email: String,
}

#[derive(Debug)]
pub struct Store {
    movies: Vec<Movie>,
    users: Vec<User>,
    comments: Vec<Comment>,
    next_comment_id: u64,
    bookmarks: HashMap<String, BTreeSet<u64>>,
    requests: Vec<(String, String)>,
}

impl Store {
    fn seeded() -> Self {
        let movie = |id, title: &str, year, rating, genres: &[&str]| Movie {
            id,
            title: title.to_string(),
            year,
            rating,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            date_uploaded: "2015-01-10 08:30:00".to_string(),
        };
        Self {
            movies: vec![
                movie(1, "Heat", 1995, 8.2, &["Action", "Crime"]),
                movie(2, "Up", 2009, 8.3, &["Animation", "Adventure"]),
                movie(3, "Alien", 1979, 8.5, &["Horror", "Sci-Fi"]),
            ],
            users: vec![User {
                id: 1,
                username: DEMO_USERNAME.to_string(),
                password: DEMO_PASSWORD.to_string(),
                user_key: DEMO_USER_KEY.to_string(),
                email: "reel@example.com".to_string(),
            }],
            comments: Vec::new(),
            next_comment_id: 1,
            bookmarks: HashMap::new(),
            requests: Vec::new(),
        }
    }

    fn user_by_key(&self, key: &str) -> Option<&User> {
        self.users.iter().find(|u| u.user_key == key)
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult = Result<Json<Value>, (StatusCode, String)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    let api = Router::new()
        .route("/list_movies.json", get(list_movies))
        .route("/movie_details.json", get(movie_details))
        .route("/movie_suggestions.json", get(movie_suggestions))
        .route("/list_upcoming.json", get(list_upcoming))
        .route("/movie_comments.json", get(movie_comments))
        .route("/make_comment.json", post(make_comment))
        .route("/like_comment.json", post(like_comment))
        .route("/delete_comment.json", post(delete_comment))
        .route("/get_movie_bookmarks.json", get(list_bookmarks))
        .route("/add_movie_bookmark.json", post(add_bookmark))
        .route("/delete_movie_bookmark.json", post(delete_bookmark))
        .route("/make_request.json", post(make_request))
        .route("/user_get_key.json", post(user_get_key))
        .route("/user_profile.json", get(user_profile))
        .with_state(db);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "status_message": "Query was successful",
        "data": data,
        "@meta": {
            "server_time": 1_420_878_600,
            "server_timezone": "EST5EDT",
            "api_version": 2,
            "execution_time": "0 ms"
        }
    }))
}

fn rejected(message: &str) -> Json<Value> {
    Json(json!({"status": "error", "status_message": message}))
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub page: Option<usize>,
    pub query_term: Option<String>,
    pub genre: Option<String>,
    pub minimum_rating: Option<f32>,
}

async fn list_movies(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Value> {
    let store = db.read().await;
    let limit = params.limit.unwrap_or(20).clamp(1, 50);
    let page = params.page.unwrap_or(1).max(1);
    let matching: Vec<&Movie> = store
        .movies
        .iter()
        .filter(|m| match &params.query_term {
            Some(term) => m.title.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        })
        .filter(|m| match &params.genre {
            Some(genre) => m.genres.iter().any(|g| g.eq_ignore_ascii_case(genre)),
            None => true,
        })
        .filter(|m| m.rating >= params.minimum_rating.unwrap_or(0.0))
        .collect();
    let movies: Vec<&Movie> = matching
        .iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .copied()
        .collect();
    ok(json!({
        "movie_count": matching.len(),
        "limit": limit,
        "page_number": page,
        "movies": movies,
    }))
}

#[derive(Deserialize)]
pub struct MovieIdParams {
    pub movie_id: u64,
}

async fn movie_details(State(db): State<Db>, Query(params): Query<MovieIdParams>) -> ApiResult {
    let store = db.read().await;
    let movie = store
        .movies
        .iter()
        .find(|m| m.id == params.movie_id)
        .ok_or((StatusCode::NOT_FOUND, format!("no movie with id {}", params.movie_id)))?;
    let mut data = serde_json::to_value(movie).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    data["like_count"] = json!(0);
    data["description_full"] = json!(format!("{} ({})", movie.title, movie.year));
    Ok(ok(data))
}

async fn movie_suggestions(State(db): State<Db>, Query(params): Query<MovieIdParams>) -> Json<Value> {
    let store = db.read().await;
    let suggestions: Vec<&Movie> = store
        .movies
        .iter()
        .filter(|m| m.id != params.movie_id)
        .take(4)
        .collect();
    ok(json!({
        "movie_suggestions_count": suggestions.len(),
        "movie_suggestions": suggestions,
    }))
}

async fn list_upcoming() -> Json<Value> {
    ok(json!({
        "upcoming_movies_count": 1,
        "upcoming_movies": [{
            "movie_title": "Interstellar",
            "movie_year": 2014,
            "imdb_code": "tt0816692",
            "date_added": "2015-02-01 00:00:00",
            "date_added_unix": 1_422_748_800
        }]
    }))
}

async fn movie_comments(State(db): State<Db>, Query(params): Query<MovieIdParams>) -> Json<Value> {
    let store = db.read().await;
    let comments: Vec<&Comment> = store
        .comments
        .iter()
        .filter(|c| c.movie_id == params.movie_id)
        .collect();
    ok(json!({"comment_count": comments.len(), "comments": comments}))
}

#[derive(Deserialize)]
pub struct NewComment {
    pub user_key: String,
    pub movie_id: u64,
    pub comment_text: String,
}

async fn make_comment(State(db): State<Db>, Json(input): Json<NewComment>) -> Json<Value> {
    let mut store = db.write().await;
    let Some(user) = store.user_by_key(&input.user_key).cloned() else {
        return rejected("Invalid user key");
    };
    if !store.movies.iter().any(|m| m.id == input.movie_id) {
        return rejected("Invalid movie ID");
    }
    let comment_id = store.next_comment_id;
    store.next_comment_id += 1;
    store.comments.push(Comment {
        comment_id,
        movie_id: input.movie_id,
        user_id: user.id,
        username: user.username,
        like_count: 0,
        comment_text: input.comment_text,
        date_added: "2015-02-14 20:01:02".to_string(),
    });
    ok(json!({"comment_id": comment_id}))
}

#[derive(Deserialize)]
pub struct CommentAction {
    pub user_key: String,
    pub comment_id: u64,
}

async fn like_comment(State(db): State<Db>, Json(input): Json<CommentAction>) -> Json<Value> {
    let mut store = db.write().await;
    if store.user_by_key(&input.user_key).is_none() {
        return rejected("Invalid user key");
    }
    match store.comments.iter_mut().find(|c| c.comment_id == input.comment_id) {
        Some(comment) => {
            comment.like_count += 1;
            ok(json!({}))
        }
        None => rejected("Invalid comment ID"),
    }
}

async fn delete_comment(State(db): State<Db>, Json(input): Json<CommentAction>) -> Json<Value> {
    let mut store = db.write().await;
    let Some(user_id) = store.user_by_key(&input.user_key).map(|u| u.id) else {
        return rejected("Invalid user key");
    };
    let before = store.comments.len();
    store
        .comments
        .retain(|c| !(c.comment_id == input.comment_id && c.user_id == user_id));
    if store.comments.len() == before {
        return rejected("Invalid comment ID");
    }
    ok(json!({}))
}

#[derive(Deserialize)]
pub struct UserKeyParams {
    pub user_key: String,
}

async fn list_bookmarks(State(db): State<Db>, Query(params): Query<UserKeyParams>) -> Json<Value> {
    let store = db.read().await;
    if store.user_by_key(&params.user_key).is_none() {
        return rejected("Invalid user key");
    }
    let ids = store.bookmarks.get(&params.user_key).cloned().unwrap_or_default();
    let movies: Vec<&Movie> = store.movies.iter().filter(|m| ids.contains(&m.id)).collect();
    ok(json!({"movie_count": movies.len(), "movies": movies}))
}

#[derive(Deserialize)]
pub struct BookmarkInput {
    pub user_key: String,
    pub movie_id: u64,
}

async fn add_bookmark(State(db): State<Db>, Json(input): Json<BookmarkInput>) -> Json<Value> {
    let mut store = db.write().await;
    if store.user_by_key(&input.user_key).is_none() {
        return rejected("Invalid user key");
    }
    store
        .bookmarks
        .entry(input.user_key)
        .or_default()
        .insert(input.movie_id);
    ok(json!({}))
}

async fn delete_bookmark(State(db): State<Db>, Json(input): Json<BookmarkInput>) -> Json<Value> {
    let mut store = db.write().await;
    if store.user_by_key(&input.user_key).is_none() {
        return rejected("Invalid user key");
    }
    if let Some(ids) = store.bookmarks.get_mut(&input.user_key) {
        ids.remove(&input.movie_id);
    }
    ok(json!({}))
}

#[derive(Deserialize)]
pub struct RequestInput {
    pub user_key: String,
    pub movie_title: String,
}

async fn make_request(State(db): State<Db>, Json(input): Json<RequestInput>) -> Json<Value> {
    let mut store = db.write().await;
    if store.user_by_key(&input.user_key).is_none() {
        return rejected("Invalid user key");
    }
    store.requests.push((input.user_key, input.movie_title));
    ok(json!({"request_count": store.requests.len()}))
}

#[derive(Deserialize)]
pub struct KeyInput {
    pub username: String,
    pub password: String,
}

async fn user_get_key(State(db): State<Db>, Json(input): Json<KeyInput>) -> Json<Value> {
    let store = db.read().await;
    match store
        .users
        .iter()
        .find(|u| u.username == input.username && u.password == input.password)
    {
        Some(user) => ok(json!({
            "user_key": user.user_key,
            "user_id": user.id,
            "username": user.username,
        })),
        None => rejected("Invalid username or password"),
    }
}

async fn user_profile(State(db): State<Db>, Query(params): Query<UserKeyParams>) -> Json<Value> {
    let store = db.read().await;
    match store.user_by_key(&params.user_key) {
        Some(user) => ok(json!({
            "user_id": user.id,
            "username": user.username,
            "email": user.email,
            "user_group": "user",
            "date_joined": "2014-11-02 09:00:00",
            "date_joined_unix": 1_414_918_800,
        })),
        None => rejected("Invalid user key"),
    }
}
