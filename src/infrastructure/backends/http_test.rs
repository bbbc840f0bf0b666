use std::net::TcpListener;
use std::time::Duration;
use std::time::Instant;

use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::pdf_fixture;
use tokio::time;

use super::HttpBackend;
use crate::domain::models::Backend;
use crate::domain::models::ChatRequest;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Source;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadReceipt;

impl HttpBackend {
    fn with_url(url: String) -> HttpBackend {
        return HttpBackend::with_timeout(url, "5");
    }

    fn with_timeout(url: String, timeout: &str) -> HttpBackend {
        return HttpBackend {
            url,
            timeout: timeout.to_string(),
        };
    }
}

/// Accepts connections through the kernel backlog but never answers.
fn silent_backend() -> Result<(TcpListener, String)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}", listener.local_addr()?);

    return Ok((listener, url));
}

fn report_pdf() -> UploadFile {
    return UploadFile {
        filename: "report.pdf".to_string(),
        bytes: pdf_fixture().to_vec(),
    };
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/health").with_status(500).create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_when_unreachable() {
    let backend = HttpBackend::with_url("http://127.0.0.1:1".to_string());
    let res = backend.health_check().await;

    assert_eq!(res.unwrap_err().to_string(), "Backend is not reachable");
}

#[tokio::test]
async fn it_creates_sessions() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/session/create")
        .with_status(200)
        .with_body(r#"{"session_id":"abc123","message":"Session created"}"#)
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend.create_session().await?;

    assert_eq!(res, "abc123");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_trims_trailing_slashes_from_the_url() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/session/create")
        .with_status(200)
        .with_body(r#"{"session_id":"abc123"}"#)
        .create();

    let backend = HttpBackend::with_url(format!("{}/", server.url()));
    backend.create_session().await?;

    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_reports_the_detail_of_failed_requests() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/session/create")
        .with_status(500)
        .with_body(r#"{"detail":"Vector store unavailable"}"#)
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend.create_session().await;

    assert_eq!(res.unwrap_err().to_string(), "Vector store unavailable");
    mock.assert();
}

#[tokio::test]
async fn it_serializes_structured_details() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/s1")
        .with_status(422)
        .with_body(r#"{"detail":[{"msg":"field required"}]}"#)
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend
        .chat(
            "s1",
            ChatRequest {
                session_id: "s1".to_string(),
                question: "Hi".to_string(),
                chat_history: vec![],
            },
        )
        .await;

    assert_eq!(
        res.unwrap_err().to_string(),
        r#"[{"msg":"field required"}]"#
    );
    mock.assert();
}

#[tokio::test]
async fn it_falls_back_to_the_status_code() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/session/create")
        .with_status(502)
        .with_body("Bad Gateway")
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend.create_session().await;

    assert_eq!(
        res.unwrap_err().to_string(),
        "Request failed with status 502"
    );
    mock.assert();
}

#[tokio::test]
async fn it_uploads_documents_as_multipart() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/upload/s1")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="report.pdf""#.to_string()),
            Matcher::Regex("Content-Type: application/pdf".to_string()),
            Matcher::Regex("%PDF-1.4".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"doc_id":"d1","chunks":12,"message":"ok","session_id":"s1"}"#)
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend.upload_document("s1", report_pdf()).await?;

    assert_eq!(
        res,
        UploadReceipt {
            doc_id: "d1".to_string(),
            chunks: 12,
        }
    );
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_reports_rejected_uploads() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/upload/s1")
        .with_status(400)
        .with_body(r#"{"detail":"Only PDF files supported"}"#)
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend.upload_document("s1", report_pdf()).await;

    assert_eq!(res.unwrap_err().to_string(), "Only PDF files supported");
    mock.assert();
}

#[tokio::test]
async fn it_sends_chat_history() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/s1")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "session_id": "s1",
                "question": "What is the revenue?",
            })),
            Matcher::Regex(r#""role":"assistant","content":"Hello!""#.to_string()),
            Matcher::Regex(r#""role":"user","content":"What is the revenue\?""#.to_string()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"answer":"$5M","sources":[{"filename":"report.pdf","content":"Revenue was $5M","doc_id":"d1"}]}"#,
        )
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend
        .chat(
            "s1",
            ChatRequest {
                session_id: "s1".to_string(),
                question: "What is the revenue?".to_string(),
                chat_history: vec![
                    Message::new(Role::Assistant, "Hello!"),
                    Message::new(Role::User, "What is the revenue?"),
                ],
            },
        )
        .await?;

    assert_eq!(res.answer, "$5M");
    assert_eq!(
        res.sources,
        vec![Source {
            filename: "report.pdf".to_string(),
            content: "Revenue was $5M".to_string(),
            doc_id: Some("d1".to_string()),
        }]
    );
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_accepts_answers_without_sources() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/s1")
        .with_status(200)
        .with_body(r#"{"answer":"I don't know."}"#)
        .create();

    let backend = HttpBackend::with_url(server.url());
    let res = backend
        .chat(
            "s1",
            ChatRequest {
                session_id: "s1".to_string(),
                question: "Hi".to_string(),
                chat_history: vec![],
            },
        )
        .await?;

    assert_eq!(res.answer, "I don't know.");
    assert!(res.sources.is_empty());
    mock.assert();

    return Ok(());
}

#[test]
fn it_applies_the_request_timeout() -> Result<()> {
    let backend = HttpBackend::with_timeout("http://localhost:8000".to_string(), "1");
    let req = backend
        .request(reqwest::Method::POST, "/api/session/create")?
        .build()?;

    assert_eq!(req.timeout(), Some(&Duration::from_secs(1)));

    return Ok(());
}

#[test]
fn it_disables_the_request_timeout_with_zero() -> Result<()> {
    let backend = HttpBackend::with_timeout("http://localhost:8000".to_string(), "0");
    let req = backend
        .request(reqwest::Method::POST, "/api/session/create")?
        .build()?;

    assert_eq!(req.timeout(), None);

    return Ok(());
}

#[test]
fn it_rejects_invalid_timeouts() {
    let backend = HttpBackend::with_timeout("http://localhost:8000".to_string(), "soon");
    let res = backend.request(reqwest::Method::POST, "/api/session/create");

    assert!(res.is_err());
}

#[tokio::test]
async fn it_times_out_when_the_backend_never_answers() -> Result<()> {
    let (_listener, url) = silent_backend()?;
    let backend = HttpBackend::with_timeout(url, "1");

    let started = Instant::now();
    let res = backend.create_session().await;

    assert!(res.is_err());
    assert!(started.elapsed() >= Duration::from_millis(900));
    assert!(started.elapsed() < Duration::from_secs(10));

    return Ok(());
}

#[tokio::test]
async fn it_keeps_waiting_when_the_timeout_is_disabled() -> Result<()> {
    let (_listener, url) = silent_backend()?;
    let backend = HttpBackend::with_timeout(url, "0");

    let res = time::timeout(Duration::from_millis(1500), backend.create_session()).await;

    assert!(res.is_err());

    return Ok(());
}
