//! End-to-end run against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port in a background tokio runtime,
//! then drives every loaded module through the default ureq transport.
//! Validates that request building, the wire format and response decoding
//! agree with an actual HTTP server.

use mock_server::{API_PREFIX, DEMO_PASSWORD, DEMO_USERNAME, DEMO_USER_KEY};
use yts_client::{
    Credentials, Error, ListMovies, LogLevel, MovieDetailsQuery, MovieRequest, NewComment,
    YtsClient,
};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}{API_PREFIX}")
}

#[test]
fn full_session() {
    let base_url = start_server();
    let client = YtsClient::builder()
        .base_url(&base_url)
        .unwrap()
        .log_level(LogLevel::Basic)
        .build();

    // Step 1: list the catalog.
    let page = client
        .movies()
        .unwrap()
        .list(&ListMovies::default())
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(page.movie_count, 3);
    assert!(page.movies.iter().all(|m| m.date_uploaded.is_some()));

    // Step 2: search.
    let found = client
        .movies()
        .unwrap()
        .list(&ListMovies {
            query_term: Some("alien".to_string()),
            ..Default::default()
        })
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(found.movie_count, 1);
    let alien = &found.movies[0];
    assert_eq!(alien.title, "Alien");

    // Step 3: details and suggestions.
    let details = client
        .movies()
        .unwrap()
        .details(&MovieDetailsQuery {
            movie_id: alien.id,
            ..Default::default()
        })
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(details.movie.year, 1979);
    let suggestions = client
        .movies()
        .unwrap()
        .suggestions(alien.id)
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(suggestions.movie_suggestions_count, 2);

    // Step 4: log in.
    let key = client
        .user()
        .unwrap()
        .key(&Credentials::new(DEMO_USERNAME, DEMO_PASSWORD))
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(key.user_key, DEMO_USER_KEY);
    let profile = client
        .user()
        .unwrap()
        .profile(&key.user_key)
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(profile.username, DEMO_USERNAME);
    assert!(profile.date_joined.is_some());

    // Step 5: comment, then read it back.
    let receipt = client
        .comments()
        .unwrap()
        .make(&NewComment {
            user_key: key.user_key.clone(),
            movie_id: alien.id,
            comment_text: "In space no one can hear you seed".to_string(),
        })
        .unwrap()
        .into_data()
        .unwrap();
    client
        .comments()
        .unwrap()
        .like(&key.user_key, receipt.comment_id)
        .unwrap()
        .into_data()
        .unwrap();
    let comments = client
        .comments()
        .unwrap()
        .list(alien.id)
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(comments.comment_count, 1);
    assert_eq!(comments.comments[0].like_count, 1);

    // Step 6: bookmark round trip.
    let bookmarks = client.bookmarks().unwrap();
    bookmarks.add(&key.user_key, alien.id).unwrap().into_data().unwrap();
    let listed = bookmarks.list(&key.user_key).unwrap().into_data().unwrap();
    assert_eq!(listed.movies.len(), 1);
    bookmarks.delete(&key.user_key, alien.id).unwrap().into_data().unwrap();
    let listed = bookmarks.list(&key.user_key).unwrap().into_data().unwrap();
    assert!(listed.movies.is_empty());

    // Step 7: request a missing title.
    client
        .requests()
        .unwrap()
        .make(&MovieRequest {
            user_key: key.user_key.clone(),
            movie_title: "Brazil".to_string(),
            request_message: None,
        })
        .unwrap()
        .into_data()
        .unwrap();

    // Step 8: delete the comment.
    client
        .comments()
        .unwrap()
        .delete(&key.user_key, receipt.comment_id)
        .unwrap()
        .into_data()
        .unwrap();
    let comments = client
        .comments()
        .unwrap()
        .list(alien.id)
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(comments.comment_count, 0);
}

#[test]
fn unknown_movie_is_a_404_api_error() {
    let base_url = start_server();
    let client = YtsClient::builder()
        .base_url(&base_url)
        .unwrap()
        .with_movies()
        .build();

    let err = client
        .movies()
        .unwrap()
        .details(&MovieDetailsQuery {
            movie_id: 4242,
            ..Default::default()
        })
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
    assert!(matches!(err, Error::Api { body, .. } if body == "no movie with id 4242"));
}

#[test]
fn wrong_password_is_rejected_in_the_envelope() {
    let base_url = start_server();
    let client = YtsClient::builder()
        .base_url(&base_url)
        .unwrap()
        .with_user()
        .build();

    let response = client
        .user()
        .unwrap()
        .key(&Credentials::new(DEMO_USERNAME, "wrong"))
        .unwrap();
    assert!(!response.is_ok());
    assert!(matches!(response.into_data(), Err(Error::Rejected { .. })));
}

#[test]
fn upcoming_decodes_dates() {
    let base_url = start_server();
    let client = YtsClient::builder()
        .base_url(&base_url)
        .unwrap()
        .with_movies()
        .build();

    let upcoming = client
        .movies()
        .unwrap()
        .upcoming()
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(upcoming.upcoming_movies_count, 1);
    assert!(upcoming.upcoming_movies[0].date_added.is_some());
}
