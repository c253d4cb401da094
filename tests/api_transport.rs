use apiquery::api::{schema, ApiQueryRequest, ApiQueryResponse, HttpMethod, JsonSchema, Typed};
use apiquery::config::ClientConfig;
use apiquery::cookies;
use apiquery::error::ApiError;
use apiquery::http::ApiClient;
use serde::Deserialize;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[derive(Debug, Deserialize, PartialEq)]
struct Team {
    id: u32,
    name: String,
}

fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig {
        base_url: Some(format!("{}/api", server.uri())),
        ..ClientConfig::default()
    };
    ApiClient::new(config).expect("client should build")
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_success_is_narrowed_to_type() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": "Blue" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiQueryRequest::<Vec<Team>>::get("teams", Typed::new());
    let response = client_for(&server).send(&request).await;

    assert_eq!(
        response,
        ApiQueryResponse::success(vec![Team {
            id: 1,
            name: "Blue".to_string()
        }])
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_post_sends_json_body() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "email": "a@b.fr", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiQueryRequest::<bool>::new("/auth/login", HttpMethod::Post, Typed::new())
        .with_json_body(json!({ "email": "a@b.fr", "password": "pw" }))
        .expect("POST accepts a body");
    let response = client_for(&server).send(&request).await;

    assert_eq!(response.data(), Some(&true));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_every_method_reaches_server() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    for verb in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        Mock::given(method(verb))
            .and(path("/api/resource"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    for verb in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        let method: HttpMethod = verb.parse().expect("method");
        let request = ApiQueryRequest::<Value>::new("resource", method, Typed::new());
        let response = client.send(&request).await;
        assert_eq!(response, ApiQueryResponse::success(Value::Null), "{verb}");
    }
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_non_success_status_becomes_error_variant() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Team not found" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiQueryRequest::<Team>::get("teams/9", Typed::new());
    let client = client_for(&server);
    let response = client.send(&request).await;
    assert_eq!(
        response,
        ApiQueryResponse::error("HTTP 404: Team not found")
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_try_send_keeps_structured_error() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = ApiQueryRequest::<Value>::get("broken", Typed::new());
    let err = client_for(&server)
        .try_send(&request)
        .await
        .expect_err("500 is a failure");
    match err {
        ApiError::Status { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_invalid_json_becomes_error_variant() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let request = ApiQueryRequest::<Value>::get("html", Typed::new());
    let response = client_for(&server).send(&request).await;
    let message = response.error_message().expect("error variant");
    assert!(message.starts_with("Invalid response body"), "{message}");
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_schema_violation_becomes_error_variant() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .mount(&server)
        .await;

    let team_schema = JsonSchema::<Team>::new(&json!({
        "type": "object",
        "required": ["id", "name"]
    }))
    .expect("schema");
    let request = ApiQueryRequest::get("teams/1", team_schema);
    let response = client_for(&server).send(&request).await;

    assert!(response.is_error());
    let message = response.error_message().expect("error variant");
    assert!(message.starts_with("Response schema mismatch"), "{message}");
    assert!(message.contains("name"), "{message}");
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_closure_schema_narrows_response() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 12 })))
        .mount(&server)
        .await;

    let count = schema::from_fn(|value: Value| {
        value["count"]
            .as_u64()
            .ok_or_else(|| schema::SchemaError::Deserialize("missing count".to_string()))
    });
    let request = ApiQueryRequest::get("count", count);
    let response = client_for(&server).send(&request).await;
    assert_eq!(response, ApiQueryResponse::success(12));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_auth_and_cookie_headers_are_sent() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("authorization", "Bearer jwt-token"))
        .and(header("cookie", "sid=abc; lang=fr"))
        .and(header("x-project", "2"))
        .and(header("x-request", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("me")))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        base_url: Some(format!("{}/api", server.uri())),
        headers: vec![("X-Project".to_string(), "2".to_string())],
        bearer_token: Some("jwt-token".to_string()),
        cookies: Some(cookies::parse("sid=abc; lang=fr")),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(config).expect("client should build");
    let request =
        ApiQueryRequest::<String>::get("me", Typed::new()).with_header("X-Request", "yes");
    let response = client.send(&request).await;
    assert_eq!(response.data().map(String::as_str), Some("me"));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_basic_auth_header_is_sent() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        auth_username: Some("user".to_string()),
        auth_password: Some("pass".to_string()),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(config).expect("client should build");
    let request = ApiQueryRequest::<u8>::get(format!("{}/private", server.uri()), Typed::new());
    assert_eq!(client.send(&request).await, ApiQueryResponse::success(1));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_relative_route_without_base_url_is_error_variant() {
    let client = ApiClient::new(ClientConfig::default()).expect("client should build");
    let request = ApiQueryRequest::<Value>::get("teams", Typed::new());
    let response = client.send(&request).await;
    let message = response.error_message().expect("error variant");
    assert!(message.starts_with("Invalid URL"), "{message}");
}
