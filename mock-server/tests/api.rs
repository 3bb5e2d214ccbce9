use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Game, STARTING_LIVES};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string())
        .unwrap()
}

// --- start ---

#[tokio::test]
async fn start_game_returns_fresh_game() {
    let resp = app().oneshot(get("/api/game")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let game: Game = body_json(resp).await;
    assert_eq!(game.lives, STARTING_LIVES);
    assert_eq!(game.turn, 0);
    assert!(!game.game_id.is_empty());
}

// --- get ---

#[tokio::test]
async fn get_unknown_game_returns_error_body() {
    let resp = app().oneshot(get("/api/game/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["message"], "not found");
}

#[tokio::test]
async fn hit_unknown_game_returns_404() {
    let resp = app()
        .oneshot(form_request("/api/game/nope/hit", "damage=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn broken_route_returns_plain_text_500() {
    let resp = app().oneshot(get("/api/broken")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(&body_bytes(resp).await[..], b"internal error");
}

// --- full game lifecycle ---

#[tokio::test]
async fn game_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // start
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/game"))
        .await
        .unwrap();
    let started: Game = body_json(resp).await;
    let id = started.game_id.clone();

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/game/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Game = body_json(resp).await;
    assert_eq!(fetched, started);

    // moved: redirect status carrying the game
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/game/{id}/moved")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert!(resp.headers().contains_key(http::header::LOCATION));
    let moved: Game = body_json(resp).await;
    assert_eq!(moved.game_id, id);

    // hit until no lives are left
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(&format!("/api/game/{id}/hit"), "damage=2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let hit: Game = body_json(resp).await;
    assert_eq!(hit.lives, STARTING_LIVES - 2);
    assert_eq!(hit.turn, 1);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(&format!("/api/game/{id}/hit"), "damage=5"))
        .await
        .unwrap();
    let hit: Game = body_json(resp).await;
    assert_eq!(hit.lives, 0);

    // no lives left: 409
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(&format!("/api/game/{id}/hit"), "damage=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["message"], "game over");
}
