use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;

use depth_chart_app::{app::AppBus, config::Config, test_utils::tests::MockUnitOfWorkProvider};
use depth_chart_core::test_utils::qb_key;
use depth_chart_web::{
    AppState, WebRouter,
    handlers::{EntryResponse, PlayerResponse},
};

struct TestApp {
    base: String,
    client: Client,
    provider: MockUnitOfWorkProvider,
}

impl TestApp {
    async fn add(&self, number: u32, position: &str, depth: Option<u32>) -> reqwest::Response {
        let url = match depth {
            Some(depth) => format!("{}/add?position_depth={depth}", self.base),
            None => format!("{}/add", self.base),
        };
        self.client
            .post(url)
            .json(&json!({ "name": format!("Player {number}"), "number": number, "position": position }))
            .send()
            .await
            .unwrap()
    }

    async fn remove(&self, number: u32, position: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/remove", self.base))
            .json(&json!({ "number": number, "position": position }))
            .send()
            .await
            .unwrap()
    }

    async fn backups(&self, number: u32, position: &str) -> Vec<u32> {
        let res = self
            .client
            .get(format!("{}/backups", self.base))
            .query(&[("position", position.to_string()), ("number", number.to_string())])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let players: Vec<PlayerResponse> = res.json().await.unwrap();
        players.into_iter().map(|p| p.number).collect()
    }
}

async fn spawn_app() -> TestApp {
    let provider = MockUnitOfWorkProvider::new();
    let config = Arc::new(Config::default());
    let app_bus = Arc::new(AppBus::new(config, Arc::new(provider.clone())));
    let router = WebRouter::router(AppState::new(app_bus));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base: format!("http://{addr}/sport/nfl/team/tampa-bay/depthchart"),
        client: Client::new(),
        provider,
    }
}

#[tokio::test]
async fn test_add_remove_and_read_back() {
    let app = spawn_app().await;

    for number in 1..=3 {
        assert_eq!(app.add(number, "QB", None).await.status(), StatusCode::CREATED);
    }
    assert_eq!(app.add(4, "qb", Some(1)).await.status(), StatusCode::CREATED);
    assert_eq!(
        app.provider.depth_charts.ordering(&qb_key()),
        vec![(1, 4), (2, 1), (3, 2), (4, 3)]
    );

    let res = app.remove(1, "QB").await;
    assert_eq!(res.status(), StatusCode::OK);
    let removed: EntryResponse = res.json().await.unwrap();
    assert_eq!(removed.rank, 2);
    assert_eq!(removed.position, "QB");
    assert_eq!(removed.player.number, 1);
    assert_eq!(removed.player.name, "Player 1");

    assert_eq!(app.backups(4, "QB").await, vec![2, 3]);
    assert!(app.backups(3, "QB").await.is_empty());
}

#[tokio::test]
async fn test_full_depth_chart_is_keyed_by_position() {
    let app = spawn_app().await;
    app.add(1, "QB", None).await;
    app.add(2, "QB", None).await;
    app.add(90, "DT", None).await;

    let res = app
        .client
        .get(format!("{}/full", app.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    let numbers = |position: &str| -> Vec<u64> {
        body[position]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["number"].as_u64().unwrap())
            .collect()
    };
    assert_eq!(numbers("QB"), vec![1, 2]);
    assert_eq!(numbers("DT"), vec![90]);
}

#[tokio::test]
async fn test_remove_unknown_player_answers_null() {
    let app = spawn_app().await;
    app.add(1, "QB", None).await;

    let res = app.remove(42, "QB").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_error_statuses() {
    let app = spawn_app().await;
    assert_eq!(app.add(1, "QB", None).await.status(), StatusCode::CREATED);

    let res = app.add(2, "QB", Some(0)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.add(2, "QB", Some(3)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.add(2, "Q-B", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.add(1, "QB", Some(1)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("Unique constraint violation:"), "{body}");

    assert_eq!(app.provider.depth_charts.ordering(&qb_key()), vec![(1, 1)]);
}

#[tokio::test]
async fn test_numbers_beyond_the_store_range_are_bad_requests() {
    let app = spawn_app().await;
    let number = 3_000_000_000u32;

    assert_eq!(app.add(number, "QB", None).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.remove(number, "QB").await.status(), StatusCode::BAD_REQUEST);

    let res = app
        .client
        .get(format!("{}/backups", app.base))
        .query(&[("position", "QB".to_string()), ("number", number.to_string())])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(app.provider.depth_charts.ordering(&qb_key()).is_empty());
}
