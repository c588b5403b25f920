use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use stockroom_api::app::{build_app, services::AppServices};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over an in-memory collection, bound to an ephemeral port.
        let app = build_app(Arc::new(AppServices::in_memory()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn ok_json(res: reqwest::Response) -> Value {
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

fn listing(body: &Value) -> Vec<(String, i64)> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| {
            (
                i["name"].as_str().unwrap().to_string(),
                i["quantity"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn add_add_then_zero_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = ok_json(client.get(srv.url("/inventory")).send().await.unwrap()).await;
    assert_eq!(body["mode"], "unfiltered");
    assert_eq!(body["count"], 0);

    let add = || {
        client
            .post(srv.url("/inventory/items"))
            .json(&json!({ "name": "apple" }))
            .send()
    };

    let body = ok_json(add().await.unwrap()).await;
    assert_eq!(listing(&body), vec![("apple".to_string(), 1)]);
    assert_eq!(body["items"][0]["display_name"], "Apple");

    let body = ok_json(add().await.unwrap()).await;
    assert_eq!(listing(&body), vec![("apple".to_string(), 2)]);

    let body = ok_json(
        client
            .put(srv.url("/inventory/items/apple"))
            .json(&json!({ "quantity": "0" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert!(listing(&body).is_empty());
}

#[tokio::test]
async fn search_filters_case_insensitively() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for name in ["Banana", "apple"] {
        client
            .post(srv.url("/inventory/items"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
    }

    let body = ok_json(client.get(srv.url("/inventory?search=ban")).send().await.unwrap()).await;
    assert_eq!(body["mode"], "filtered");
    assert_eq!(listing(&body), vec![("Banana".to_string(), 1)]);

    let body = ok_json(client.get(srv.url("/inventory?search=xyz")).send().await.unwrap()).await;
    assert!(listing(&body).is_empty());

    let body = ok_json(client.get(srv.url("/inventory?search=")).send().await.unwrap()).await;
    assert_eq!(body["mode"], "unfiltered");
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn update_and_remove() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(srv.url("/inventory/items"))
        .json(&json!({ "name": "hammer" }))
        .send()
        .await
        .unwrap();

    let body = ok_json(
        client
            .put(srv.url("/inventory/items/hammer"))
            .json(&json!({ "quantity": 14 }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listing(&body), vec![("hammer".to_string(), 14)]);

    let body = ok_json(
        client
            .delete(srv.url("/inventory/items/hammer"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert!(listing(&body).is_empty());
}

#[tokio::test]
async fn failures_are_silent_and_still_return_the_listing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(srv.url("/inventory/items"))
        .json(&json!({ "name": "saw" }))
        .send()
        .await
        .unwrap();

    // Missing record.
    let body = ok_json(
        client
            .put(srv.url("/inventory/items/ghost"))
            .json(&json!({ "quantity": "3" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listing(&body), vec![("saw".to_string(), 1)]);

    // Non-numeric quantity.
    let body = ok_json(
        client
            .put(srv.url("/inventory/items/saw"))
            .json(&json!({ "quantity": "plenty" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listing(&body), vec![("saw".to_string(), 1)]);

    // Removing something that is not there creates nothing.
    let body = ok_json(
        client
            .delete(srv.url("/inventory/items/ghost"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listing(&body), vec![("saw".to_string(), 1)]);
}

#[tokio::test]
async fn overflowing_add_leaves_the_service_working() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let add = |name: &'static str| {
        client
            .post(srv.url("/inventory/items"))
            .json(&json!({ "name": name }))
            .send()
    };

    add("bolt").await.unwrap();
    client
        .put(srv.url("/inventory/items/bolt"))
        .json(&json!({ "quantity": "9223372036854775807" }))
        .send()
        .await
        .unwrap();

    let body = ok_json(add("bolt").await.unwrap()).await;
    assert_eq!(listing(&body), vec![("bolt".to_string(), i64::MAX)]);

    let body = ok_json(add("nut").await.unwrap()).await;
    assert_eq!(
        listing(&body),
        vec![("bolt".to_string(), i64::MAX), ("nut".to_string(), 1)]
    );
}

#[tokio::test]
async fn quantity_text_keeps_its_leading_integer() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(srv.url("/inventory/items"))
        .json(&json!({ "name": "clamp" }))
        .send()
        .await
        .unwrap();

    for (raw, expected) in [("1.5", 1), ("12abc", 12), ("3 units", 3)] {
        let body = ok_json(
            client
                .put(srv.url("/inventory/items/clamp"))
                .json(&json!({ "quantity": raw }))
                .send()
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(listing(&body), vec![("clamp".to_string(), expected)]);
    }
}

#[tokio::test]
async fn names_with_spaces_round_trip_through_the_path() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(srv.url("/inventory/items"))
        .json(&json!({ "name": "wood glue" }))
        .send()
        .await
        .unwrap();

    let body = ok_json(
        client
            .put(srv.url("/inventory/items/wood%20glue"))
            .json(&json!({ "quantity": "5" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listing(&body), vec![("wood glue".to_string(), 5)]);
}

#[tokio::test]
async fn unknown_routes_get_a_json_404() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}
