//! In-process API tests: the full router driven through `tower::ServiceExt`.

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use label_server::{Config, ServerState, api};
use serde_json::{Value, json};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceExt;

const SEED: &str = r#"{"K1":{"P1":{"part_number":"P1","description":"Widget"},"P2":{"part_number":"P2","description":"Gadget"}},"K0":{"Z9":{"part_number":"Z9","description":"Last"}}}"#;

struct TestApp {
    _dir: tempfile::TempDir,
    app: Router,
    state: ServerState,
}

fn test_app(printer_port: u16) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("label_data.json"), SEED).unwrap();

    let vars: HashMap<&str, String> = HashMap::from([
        ("WORK_DIR", dir.path().display().to_string()),
        ("PRINTER_MODE", "tcp".to_string()),
        ("PRINTER_HOST", "127.0.0.1".to_string()),
        ("PRINTER_PORT", printer_port.to_string()),
        ("PRINT_TIMEOUT_MS", "2000".to_string()),
        ("JWT_SECRET", "integration-test-secret-at-least-32-chars".to_string()),
    ]);
    let config = Config::from_lookup(|key| vars.get(key).cloned());

    let state = ServerState::initialize(&config).unwrap();
    let app = api::build_app().with_state(state.clone());

    TestApp {
        _dir: dir,
        app,
        state,
    }
}

/// Local port with nothing listening on it
async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// Fake raw printer; forwards every non-empty job it receives
async fn fake_printer() -> (u16, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                if socket.read_to_end(&mut buf).await.is_ok() && !buf.is_empty() {
                    let _ = tx.send(String::from_utf8_lossy(&buf).to_string());
                }
            });
        }
    });

    (port, rx)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({"username": "admin", "password": "admin"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let t = test_app(closed_port().await);
    let (status, body) = send(&t.app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let t = test_app(closed_port().await);
    let response = t.app.clone().oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_printer_status_offline() {
    let t = test_app(closed_port().await);
    let (status, body) = send(&t.app, get("/api/printer/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["online"], false);
    assert_eq!(body["data"]["indicator"], "red");
}

#[tokio::test]
async fn test_list_kits_keeps_order() {
    let t = test_app(closed_port().await);
    let response = t.app.clone().oneshot(get("/api/kits")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    // serde_json::Value sorts keys, so check positions in the raw body
    let k1 = text.find(r#""K1""#).unwrap();
    let k0 = text.find(r#""K0""#).unwrap();
    let p1 = text.find(r#""P1""#).unwrap();
    let p2 = text.find(r#""P2""#).unwrap();
    assert!(k1 < k0);
    assert!(p1 < p2);
    assert!(text.contains(r#""code":"E0000""#));
}

#[tokio::test]
async fn test_get_kit_summaries() {
    let t = test_app(closed_port().await);
    let (status, body) = send(&t.app, get("/api/kits/K1")).await;
    assert_eq!(status, StatusCode::OK);
    let parts = body["data"]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["id"], "P1");
    assert_eq!(parts[0]["label"], "P1 - Widget");
}

#[tokio::test]
async fn test_get_missing_kit() {
    let t = test_app(closed_port().await);
    let (status, body) = send(&t.app, get("/api/kits/K9")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
    assert_eq!(body["message"], "Kit K9 not found.");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let t = test_app(closed_port().await);
    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({"username": "admin", "password": "nope"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid Credentials. Please try again.");
}

#[tokio::test]
async fn test_me_with_token() {
    let t = test_app(closed_port().await);
    let token = login(&t.app).await;

    let req = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_admin_requires_token() {
    let t = test_app(closed_port().await);
    let add = json!({"kit_number": "K2", "part_number": "X1", "description": "New"});

    let (status, body) = send(&t.app, json_request("POST", "/api/admin/parts", add.clone(), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/admin/parts", add, Some("not-a-token")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");

    assert!(!t.state.store.load().unwrap().contains_kit("K2"));
}

#[tokio::test]
async fn test_token_without_admin_role_forbidden() {
    let t = test_app(closed_port().await);
    let token = t.state.jwt_service.generate_token("operator", "viewer").unwrap();

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/admin/kits/K1/parts/P1")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");
    assert!(t.state.store.load().unwrap().contains_kit("K1"));
}

#[tokio::test]
async fn test_add_missing_field() {
    let t = test_app(closed_port().await);
    let token = login(&t.app).await;
    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/admin/parts",
            json!({"kit_number": "K2", "part_number": "X1"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn test_delete_part() {
    let t = test_app(closed_port().await);
    let token = login(&t.app).await;

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/admin/kits/K1/parts/P1")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["part_number"], "P1");

    let order: Vec<String> = t
        .state
        .store
        .kit("K1")
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(order, vec!["P2"]);
}

#[tokio::test]
async fn test_move_at_boundary_is_noop() {
    let t = test_app(closed_port().await);
    let token = login(&t.app).await;
    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/admin/kits/K1/parts/P1/move",
            json!({"direction": "up"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["moved"], false);
    assert_eq!(body["data"]["order"], json!(["P1", "P2"]));
}

#[tokio::test]
async fn test_print_empty_selection() {
    let t = test_app(closed_port().await);
    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/print",
            json!({"kit_number": "K1", "part_numbers": []}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please select at least one part.");
}

#[tokio::test]
async fn test_print_unknown_kit() {
    let t = test_app(closed_port().await);
    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/print", json!({"kit_number": "K9"}), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Kit K9 not found.");
}

#[tokio::test]
async fn test_print_unreachable_printer() {
    let t = test_app(closed_port().await);
    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/print", json!({"kit_number": "K1"}), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "E7001");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to print kit. Error:")
    );
}

#[tokio::test]
async fn test_add_move_print_flow() {
    let (port, mut jobs) = fake_printer().await;
    let t = test_app(port);
    let token = login(&t.app).await;

    let (status, _) = send(
        &t.app,
        json_request(
            "POST",
            "/api/admin/parts",
            json!({"kit_number": "K1", "part_number": "P3", "description": "Gizmo"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/admin/kits/K1/parts/P3/move",
            json!({"direction": "up"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["moved"], true);
    assert_eq!(body["data"]["order"], json!(["P1", "P3", "P2"]));

    let (_, body) = send(&t.app, get("/api/kits/K1")).await;
    let ids: Vec<&str> = body["data"]["parts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["P1", "P3", "P2"]);

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/print",
            json!({"kit_number": "K1", "part_numbers": ["P2", "P3"]}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Selected parts from kit K1 printed successfully!"
    );
    assert_eq!(body["data"]["labels"], 2);

    let job = jobs.recv().await.unwrap();
    assert_eq!(job.matches("^XA").count(), 2);
    let p3 = job.find("^FDP3^FS").unwrap();
    let p2 = job.find("^FDP2^FS").unwrap();
    assert!(p3 < p2);
    assert!(!job.contains("^FDP1^FS"));
}

#[tokio::test]
async fn test_padded_text_stored_and_printed_verbatim() {
    let (port, mut jobs) = fake_printer().await;
    let t = test_app(port);
    let token = login(&t.app).await;

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/admin/parts",
            json!({"kit_number": " K2 ", "part_number": " A-1 ", "description": "  centered text  "}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], " A-1 ");

    let file = std::fs::read_to_string(t.state.store.path()).unwrap();
    assert!(file.ends_with(
        r#"" K2 ":{" A-1 ":{"part_number":" A-1 ","description":"  centered text  "}}}"#
    ));

    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/print", json!({"kit_number": " K2 "}), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Kit  K2  printed successfully!");

    let job = jobs.recv().await.unwrap();
    assert!(job.contains("^FD A-1 ^FS"));
    assert!(job.contains("^FD  centered text  ^FS"));
}
