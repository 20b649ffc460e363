//! Exact request/response behavior of `PostService` against a wiremock server.

use posts_service::{ApiError, PostService, ReqwestTransport, ServiceConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> PostService {
    PostService::new(ServiceConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn list_parses_created_at_and_keeps_every_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "2", "text": "later", "createdAt": "2024-03-01T12:00:00.000Z", "__v": 0 },
            { "_id": "1", "text": "earlier", "createdAt": 1704164645678i64, "author": { "name": "kim" } },
            { "_id": "3", "createdAt": "2024-03-02" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let posts = service(&server).list().await.unwrap();

    assert_eq!(posts.len(), 3);
    let ids: Vec<String> = posts.iter().filter_map(|p| p.id()).collect();
    assert_eq!(ids, ["2", "1", "3"]);

    assert_eq!(posts[0].created_at.timestamp_millis(), 1_709_294_400_000);
    assert_eq!(posts[0].field("__v"), Some(&json!(0)));
    assert_eq!(posts[1].created_at.timestamp_millis(), 1_704_164_645_678);
    assert_eq!(posts[1].field("author"), Some(&json!({ "name": "kim" })));
    assert!(posts[2].text().is_none());

    let out = serde_json::to_value(&posts[1]).unwrap();
    assert_eq!(
        out,
        json!({ "_id": "1", "text": "earlier", "createdAt": "2024-01-02T03:04:05.678Z", "author": { "name": "kim" } })
    );
}

#[tokio::test]
async fn list_server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = service(&server).list().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::HttpError {
            status: 500,
            body: "db down".to_string()
        }
    );
}

#[tokio::test]
async fn list_with_unparseable_timestamp_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "text": "fine", "createdAt": "2024-03-01T12:00:00Z" },
            { "text": "broken", "createdAt": "not-a-date" }
        ])))
        .mount(&server)
        .await;

    let err = service(&server).list().await.unwrap_err();
    assert!(matches!(err, ApiError::DeserializationError(_)), "{err:?}");
}

#[tokio::test]
async fn create_sends_exactly_one_post_with_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": "hello" })))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-post-id", "99")
                .set_body_string("created"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = service(&server).create("hello").await.unwrap();
    assert_eq!(resp.status, 201);
    assert_eq!(resp.body, "created");
    assert_eq!(resp.header("x-post-id"), Some("99"));
}

#[tokio::test]
async fn create_transport_error_is_surfaced() {
    // Bind then release a port so nothing is listening on it.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    let service = PostService::new(ServiceConfig::new(format!("http://{addr}"))).unwrap();
    let err = service.create("hello").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn remove_numeric_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let resp = service(&server).remove(42).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json::<serde_json::Value>().unwrap(), json!({}));
}

#[tokio::test]
async fn remove_string_id_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let resp = service(&server).remove("abc").await.unwrap();
    assert_eq!(resp.status, 204);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn remove_missing_post_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such post"))
        .mount(&server)
        .await;

    let err = service(&server).remove("nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/posts/"))
        .and(body_json(json!({ "text": "parallel" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(&server);
    let (listed, created, removed) =
        tokio::join!(service.list(), service.create("parallel"), service.remove(7));

    assert!(listed.unwrap().is_empty());
    assert_eq!(created.unwrap().status, 201);
    assert_eq!(removed.unwrap().status, 200);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
}

#[tokio::test]
async fn caller_supplied_client_keeps_its_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert("x-api-key", reqwest::header::HeaderValue::from_static("secret"));
    let client = reqwest::Client::builder().default_headers(headers).build().unwrap();
    let service = PostService::with_transport(&server.uri(), ReqwestTransport::from_client(client));

    assert!(service.list().await.unwrap().is_empty());
}
