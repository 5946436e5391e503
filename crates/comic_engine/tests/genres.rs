use std::time::Duration;

use comic_engine::{
    fetch_genres, FailureKind, FetchSettings, Genre, GenreClient, GenreFetch, ReqwestGenreClient,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn genre_server(response: ResponseTemplate) -> MockServer {
    comic_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/genres/"))
        .and(query_param("limit", "unlimited"))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> ReqwestGenreClient {
    ReqwestGenreClient::new(FetchSettings::new(server.uri()))
}

#[tokio::test]
async fn single_genre_is_returned_as_served() {
    let server =
        genre_server(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Action"}])))
            .await;

    let result = client_for(&server).fetch_genres().await;

    assert_eq!(result, GenreFetch::Loaded(vec![Genre::new(1, "Action")]));
    let round_trip = serde_json::to_value(result.genres()).unwrap();
    assert_eq!(round_trip, json!([{"id": 1, "name": "Action"}]));
}

#[tokio::test]
async fn order_and_extra_fields_are_preserved() {
    let body = json!([
        {"id": 4, "name": "Slice of life", "slug": "slice-of-life"},
        {"id": 2, "name": "Hành động", "description": null},
    ]);
    let server = genre_server(ResponseTemplate::new(200).set_body_json(body.clone())).await;

    let genres = client_for(&server).request_genres().await.unwrap();

    let names: Vec<_> = genres.iter().map(|genre| genre.name.as_str()).collect();
    assert_eq!(names, vec!["Slice of life", "Hành động"]);
    assert_eq!(serde_json::to_value(&genres).unwrap(), body);
}

#[tokio::test]
async fn server_error_resolves_to_empty_list() {
    let server = genre_server(ResponseTemplate::new(500)).await;

    let result = client_for(&server).fetch_genres().await;

    assert!(result.is_failure());
    assert_eq!(result.error().unwrap().kind, FailureKind::HttpStatus(500));
    assert!(result.genres().is_empty());
    assert_eq!(result.into_genres(), Vec::<Genre>::new());
}

#[tokio::test]
async fn null_body_resolves_to_empty_list() {
    let server = genre_server(
        ResponseTemplate::new(200).set_body_raw("null", "application/json"),
    )
    .await;

    let result = client_for(&server).fetch_genres().await;

    assert_eq!(result, GenreFetch::Loaded(Vec::new()));
}

#[tokio::test]
async fn falsy_json_bodies_resolve_to_empty_list() {
    for body in ["false", "0", "\"\""] {
        let server = genre_server(
            ResponseTemplate::new(200).set_body_raw(body, "application/json"),
        )
        .await;

        let result = client_for(&server).fetch_genres().await;

        assert_eq!(result, GenreFetch::Loaded(Vec::new()), "body {body}");
    }
}

#[tokio::test]
async fn absent_body_resolves_to_empty_list() {
    let server = genre_server(ResponseTemplate::new(200)).await;

    let result = client_for(&server).fetch_genres().await;

    assert!(!result.is_failure());
    assert!(result.genres().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_tagged_failure() {
    let server = genre_server(
        ResponseTemplate::new(200).set_body_raw("[{\"id\": \"x\"", "application/json"),
    )
    .await;

    let result = client_for(&server).fetch_genres().await;

    assert_eq!(result.error().unwrap().kind, FailureKind::Decode);
    assert!(result.genres().is_empty());
}

#[tokio::test]
async fn slow_server_times_out_when_configured() {
    let server = genre_server(
        ResponseTemplate::new(200)
            .set_delay(Duration::from_millis(250))
            .set_body_json(json!([])),
    )
    .await;

    let settings = FetchSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..FetchSettings::new(server.uri())
    };
    let result = ReqwestGenreClient::new(settings).fetch_genres().await;

    assert_eq!(result.error().unwrap().kind, FailureKind::Timeout);
}

#[tokio::test]
async fn trailing_slash_on_base_url_hits_same_endpoint() {
    let server = genre_server(ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let client = ReqwestGenreClient::new(FetchSettings::new(format!("{}/", server.uri())));
    let result = fetch_genres(&client).await;

    assert_eq!(result, GenreFetch::Loaded(Vec::new()));
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    comic_logging::initialize_for_tests();
    // Port 9 (discard) on loopback is not expected to accept HTTP.
    let client = ReqwestGenreClient::new(FetchSettings::new("http://127.0.0.1:9"));

    let result = client.fetch_genres().await;

    assert!(result.is_failure());
    assert!(result.genres().is_empty());
}

#[tokio::test]
async fn invalid_base_url_never_reaches_network() {
    comic_logging::initialize_for_tests();
    let client = ReqwestGenreClient::new(FetchSettings::new("localhost without scheme"));

    let result = client.fetch_genres().await;

    assert_eq!(result.error().unwrap().kind, FailureKind::InvalidUrl);
}
