
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use depth_chart_app::locks::LockPolicy;
use depth_chart_types::errors::ApplicationError;
use depth_chart_web::{AppState, WebRouter};

use crate::test_utils::tests::{app_bus, chart_key, ordering, setup_provider, unique_scope};

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_depth_chart_over_http() -> Result<(), ApplicationError> {
    let provider = setup_provider().await?;
    let app = app_bus(provider.clone(), LockPolicy::PerNamespace);
    let router = WebRouter::router(AppState::new(app));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
    let addr = listener
        .local_addr()
        .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let scope = unique_scope();
    let base = format!(
        "http://{addr}/sport/{}/team/{}/depthchart",
        scope.sport, scope.team
    );
    let client = Client::new();

    for (number, name, depth) in [(12, "Tom Brady", None), (11, "Blaine Gabbert", None), (2, "Kyle Trask", Some(2))] {
        let mut url = format!("{base}/add");
        if let Some(depth) = depth {
            url = format!("{url}?position_depth={depth}");
        }
        let res = client
            .post(url)
            .json(&json!({ "name": name, "number": number, "position": "QB" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }
    assert_eq!(
        ordering(&provider, &chart_key(&scope, "QB")).await?,
        vec![(1, 12), (2, 2), (3, 11)]
    );

    let res = client
        .post(format!("{base}/add"))
        .json(&json!({ "name": "Tom Brady", "number": 12, "position": "QB" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .get(format!("{base}/backups?position=QB&number=12"))
        .send()
        .await
        .unwrap();
    let backups: Value = res.json().await.unwrap();
    let names: Vec<&str> = backups
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Kyle Trask", "Blaine Gabbert"]);

    let res = client
        .delete(format!("{base}/remove"))
        .json(&json!({ "number": 2, "position": "QB" }))
        .send()
        .await
        .unwrap();
    let removed: Value = res.json().await.unwrap();
    assert_eq!(removed["rank"], 2);

    let res = client.get(format!("{base}/full")).send().await.unwrap();
    let full: Value = res.json().await.unwrap();
    let numbers: Vec<u64> = full["QB"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, vec![12, 11]);

    Ok(())
}
