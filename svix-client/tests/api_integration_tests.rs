//! Integration tests for svix-client API operations.
//!
//! These tests use wiremock to simulate server responses and verify
//! that the reqwest transport and the facades handle them correctly.

use serde_json::{json, Value};
use svix_client::{
    collect_all, ApplicationIn, ClientError, Cursor, EndpointHeadersIn, EndpointIn,
    EndpointMessageListOptions, EventTypeListOptions, ListOptions, MessageAttemptListOptions, MessageIn, MessageListOptions,
    MessageStatus, PostOptions, Svix, SvixOptions,
};
use wiremock::matchers::{
    body_json, header, header_exists, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "testsk_integration";

fn client(server: &MockServer) -> Svix {
    let options = SvixOptions::default().with_server_url(server.uri());
    Svix::new(TOKEN, Some(options)).unwrap()
}

fn application(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

fn event_type(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} happened", name),
        "archived": false,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_create_application_sends_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/app"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(header_exists("svix-req-id"))
        .and(header_exists("user-agent"))
        .and(body_json(json!({"name": "Acme"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(application("app_1", "Acme")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let app = svix
        .applications()
        .create(&ApplicationIn {
            name: "Acme".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(app.id, "app_1");
    assert_eq!(app.name, "Acme");
}

#[tokio::test]
async fn test_create_with_idempotency_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/app"))
        .and(header("idempotency-key", "create-acme-1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(application("app_1", "Acme")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let result = svix
        .applications()
        .create_with_options(
            &ApplicationIn {
                name: "Acme".to_string(),
                ..Default::default()
            },
            PostOptions::idempotent("create-acme-1"),
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_get_or_create_application() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/app"))
        .and(query_param("get_if_exists", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(application("app_1", "Acme")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let app = svix
        .applications()
        .get_or_create(
            &ApplicationIn {
                name: "Acme".to_string(),
                uid: Some("acme".to_string()),
                ..Default::default()
            },
            PostOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(app.id, "app_1");
}

#[tokio::test]
async fn test_create_application_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/app"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "conflict",
            "detail": "An application with this uid already exists"
        })))
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let result = svix
        .applications()
        .create(&ApplicationIn {
            name: "Acme".to_string(),
            uid: Some("acme".to_string()),
            ..Default::default()
        })
        .await;

    match result {
        Err(ClientError::Api(err)) => {
            assert_eq!(err.status(), 409);
            assert_eq!(err.code(), Some("conflict"));
            assert_eq!(err.message(), "An application with this uid already exists");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/app/app_1/endpoint"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{
                "loc": ["body", "url"],
                "msg": "invalid or missing URL scheme",
                "type": "value_error.url.scheme"
            }]
        })))
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let result = svix
        .endpoints()
        .create(
            "app_1",
            &EndpointIn {
                url: "example.com".to_string(),
                ..Default::default()
            },
        )
        .await;

    let err = match result {
        Err(ClientError::Api(err)) => err,
        other => panic!("Expected API error, got {:?}", other),
    };
    assert_eq!(err.status(), 422);
    assert!(err.is_validation());
    assert!(err.message().contains("invalid or missing URL scheme"));
    assert_eq!(err.validation_errors().len(), 1);
    assert_eq!(err.validation_errors()[0].field_path(), "body.url");
}

#[tokio::test]
async fn test_server_error_without_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/app/app_1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let result = svix.applications().get("app_1").await;

    match result {
        Err(ClientError::Api(err)) => {
            assert_eq!(err.status(), 502);
            assert_eq!(err.code(), None);
            assert_eq!(err.message(), "HTTP 502 Bad Gateway");
            assert_eq!(err.body_text(), "<html>Bad Gateway</html>");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/app/app_1/endpoint/ep_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let result = svix.endpoints().delete("app_1", "ep_1").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_list_applications_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/app"))
        .and(query_param("limit", "2"))
        .and(query_param_is_missing("iterator"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [application("app_1", "One"), application("app_2", "Two")],
            "iterator": "iter_2",
            "prevIterator": null,
            "done": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let page = svix
        .applications()
        .list(ListOptions::default().with_limit(2))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, "app_1");
    assert_eq!(page.next_cursor, Some(Cursor::from_token("iter_2")));
    assert!(!page.done);
}

#[tokio::test]
async fn test_list_omits_absent_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/app"))
        .and(query_param_is_missing("limit"))
        .and(query_param_is_missing("iterator"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "iterator": null,
            "done": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let page = svix.applications().list(ListOptions::default()).await.unwrap();
    assert!(page.items.is_empty());
    assert!(page.done);
}

#[tokio::test]
async fn test_drain_event_types() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/event-type"))
        .and(query_param_is_missing("iterator"))
        .and(query_param("include_archived", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [event_type("user.created"), event_type("user.deleted")],
            "iterator": "et_page_2",
            "done": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/event-type"))
        .and(query_param("iterator", "et_page_2"))
        .and(query_param("include_archived", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [event_type("user.updated")],
            "iterator": null,
            "done": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let all = collect_all(ListOptions::default().with_limit(2), |page| {
        svix.event_types().list(EventTypeListOptions {
            page,
            include_archived: Some(true),
            with_content: None,
        })
    })
    .await
    .unwrap();

    let names: Vec<_> = all.iter().map(|et| et.name.as_str()).collect();
    assert_eq!(names, vec!["user.created", "user.deleted", "user.updated"]);
}

#[tokio::test]
async fn test_list_messages_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/app/app_1/msg"))
        .and(query_param("channel", "project_1"))
        .and(query_param("with_content", "false"))
        .and(query_param("event_types", "invoice.paid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "msg_1",
                "eventType": "invoice.paid",
                "timestamp": "2024-01-01T00:00:00Z"
            }],
            "iterator": null,
            "done": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let page = svix
        .messages()
        .list(
            "app_1",
            MessageListOptions {
                event_types: Some(vec!["invoice.paid".to_string()]),
                channel: Some("project_1".to_string()),
                with_content: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].payload, None);
}

#[tokio::test]
async fn test_create_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/app/app_1/msg"))
        .and(body_json(json!({
            "eventType": "invoice.paid",
            "payload": {"invoice": "in_1"}
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "msg_1",
            "eventType": "invoice.paid",
            "payload": {"invoice": "in_1"},
            "timestamp": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let msg = svix
        .messages()
        .create(
            "app_1",
            &MessageIn {
                event_type: "invoice.paid".to_string(),
                payload: json!({"invoice": "in_1"}),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(msg.id, "msg_1");
    assert_eq!(msg.payload, Some(json!({"invoice": "in_1"})));
}

#[tokio::test]
async fn test_list_attempts_by_msg() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/app/app_1/attempt/msg/msg_1"))
        .and(query_param("status", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "atmpt_1",
                "msgId": "msg_1",
                "endpointId": "ep_1",
                "response": "boom",
                "responseStatusCode": 500,
                "status": 2,
                "triggerType": 0,
                "timestamp": "2024-01-01T00:00:00Z"
            }],
            "iterator": null,
            "done": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let page = svix
        .message_attempts()
        .list_by_msg(
            "app_1",
            "msg_1",
            MessageAttemptListOptions {
                status: Some(MessageStatus::Fail),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.items[0].status, MessageStatus::Fail);
    assert_eq!(page.items[0].response_status_code, 500);
}

#[tokio::test]
async fn test_list_attempted_messages_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/app/app_1/endpoint/ep_1/msg"))
        .and(query_param("status", "1"))
        .and(query_param("with_content", "false"))
        .and(query_param("channel", "project_1"))
        .and(query_param_is_missing("status_code_class"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "msg_1",
                "eventType": "invoice.paid",
                "timestamp": "2024-01-01T00:00:00Z",
                "status": 1,
                "nextAttempt": "2024-01-01T00:05:00Z"
            }],
            "iterator": null,
            "done": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let page = svix
        .message_attempts()
        .list_attempted_messages(
            "app_1",
            "ep_1",
            EndpointMessageListOptions {
                status: Some(MessageStatus::Pending),
                channel: Some("project_1".to_string()),
                with_content: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.items[0].message.id, "msg_1");
    assert_eq!(page.items[0].message.payload, None);
    assert_eq!(page.items[0].status, MessageStatus::Pending);
}

#[tokio::test]
async fn test_resend_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/app/app_1/msg/msg_1/endpoint/ep_1/resend"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/app/app_1/endpoint/ep_1/headers"))
        .and(body_json(json!({"headers": {"x-tenant": "acme"}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    svix.message_attempts()
        .resend("app_1", "msg_1", "ep_1")
        .await
        .unwrap();

    let headers = EndpointHeadersIn {
        headers: [("x-tenant".to_string(), "acme".to_string())]
            .into_iter()
            .collect(),
    };
    svix.endpoints()
        .patch_headers("app_1", "ep_1", &headers)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dashboard_access() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/dashboard-access/app_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://app.svix.com/login#key=abc",
            "token": "dashboard_abc"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let access = svix.authentication().dashboard_access("app_1").await.unwrap();
    assert_eq!(access.token, "dashboard_abc");
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/event-type/user.created"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let svix = client(&mock_server);
    let result = svix.event_types().get("user.created").await;

    assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_connection_refused() {
    let options = SvixOptions::default().with_server_url("http://127.0.0.1:1");
    let svix = Svix::new(TOKEN, Some(options)).unwrap();

    let result = svix.applications().get("app_1").await;
    assert!(matches!(result, Err(ClientError::Transport(_))));
}
