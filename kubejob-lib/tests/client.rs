//! End-to-end client tests against an in-process scaler stub.

use std::convert::Infallible;
use std::net::SocketAddr;

use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use kubejob_lib::ScalerClient;
use kubejob_lib::api::DEFAULT_AUDIT_LIMIT;
use kubejob_lib::auth::Credential;
use kubejob_lib::error::LoginError;
use kubejob_lib::model::JobStatus;

/// `admin:admin`
const VALID_HEADER: &str = "Basic YWRtaW46YWRtaW4=";

const STATS_BODY: &str = r#"{
    "metrics": {
        "queue_depth": 6200,
        "unacked": 12,
        "active_jobs": 2,
        "max_jobs": 40,
        "total_consumed": 981,
        "cpu_percent": 42.5,
        "memory_percent": 81.0,
        "avg_latency": 120.4,
        "throughput": 33,
        "status_msg": "Scaling"
    },
    "jobs": [
        {"name": "worker-a", "type": "spend-analysis", "status": "Running", "start_time": "2024-05-01 10:00:00", "processed": 10},
        {"name": "worker-b", "status": "Succeeded", "processed": 4}
    ]
}"#;

const AUDIT_BODY: &str = r#"[
    {"id": 7, "message_id": "0f1e2d3c4b5a", "job_type": "spend-analysis", "worker_pod": "worker-a",
     "queued_at": "2024-05-01T10:00:00.250", "picked_at": null, "processed_at": "2024-05-01T10:00:01.500",
     "duration_ms": 1250, "status": "COMPLETED", "log_file": "/logs/spend analysis/7.log"},
    {"id": 8, "message_id": "aa", "job_type": "generic", "worker_pod": "worker-b",
     "duration_ms": 5, "status": "COMPLETED", "log_file": ""}
]"#;

const CLUSTER_BODY: &str = r#"{
    "nodes": [{"name": "node-1", "status": "Ready", "cpu": "4", "memory": "16Gi", "os": "linux", "kernel": "6.1"}],
    "pods": [{"name": "worker-a", "status": "Running", "ip": "10.0.0.4", "node": "node-1", "restarts": 2}],
    "events": [{"type": "Warning", "reason": "BackOff", "message": "restarting", "object": "Pod/worker-a", "time": "10:00"}]
}"#;

async fn route(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let authorized = req
        .headers()
        .get(hyper::header::AUTHORIZATION)
        .is_some_and(|value| value == VALID_HEADER);

    if !authorized {
        return Ok(respond(StatusCode::UNAUTHORIZED, ""));
    }

    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or_default().to_string();

    let response = match path.as_str() {
        "/stats" => respond(StatusCode::OK, STATS_BODY),
        "/audit" if query == "limit=100" => respond(StatusCode::OK, AUDIT_BODY),
        "/audit/log" => respond(StatusCode::OK, &format!("log for {}", query)),
        "/cluster-info" => respond(StatusCode::OK, CLUSTER_BODY),
        p if p.starts_with("/logs/") => respond(
            StatusCode::OK,
            &format!("{}\n{}", p.trim_start_matches("/logs/"), query),
        ),
        _ => respond(StatusCode::NOT_FOUND, "no such route"),
    };
    Ok(response)
}

fn respond(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

async fn spawn_scaler() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service_fn(route))
                    .await;
            });
        }
    });

    addr
}

async fn anonymous_client() -> ScalerClient {
    let addr = spawn_scaler().await;
    ScalerClient::builder()
        .url(format!("http://{}", addr))
        .build()
        .unwrap()
}

async fn authed_client() -> ScalerClient {
    anonymous_client()
        .await
        .with_credential(Credential::from_login("admin", "admin"))
}

#[tokio::test]
async fn test_login_success_returns_authed_client_and_stats() {
    let client = anonymous_client().await;

    let (authed, stats) = client.login("admin", "admin").await.unwrap();

    assert!(authed.is_authenticated());
    assert!(!client.is_authenticated());
    assert_eq!(authed.credential().unwrap().token(), "YWRtaW46YWRtaW4=");
    assert_eq!(stats.metrics.queue_depth, 6200);
    assert_eq!(stats.metrics.max_jobs, 40);
    assert_eq!(stats.jobs.len(), 2);
    assert_eq!(stats.jobs[1].job_type, "generic");
    assert_eq!(stats.jobs[0].status_kind(), JobStatus::Running);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let client = anonymous_client().await;

    let err = client.login("admin", "nope").await.unwrap_err();

    assert!(matches!(err, LoginError::Rejected(_)));
    assert_eq!(err.to_string(), "Invalid credentials / API unavailable");
}

#[tokio::test]
async fn test_login_with_empty_fields_never_hits_network() {
    // Port 9 (discard) is never served here; a request would fail as Unavailable.
    let client = ScalerClient::builder()
        .url("http://127.0.0.1:9")
        .build()
        .unwrap();

    let err = client.login("", "secret").await.unwrap_err();
    assert!(matches!(err, LoginError::MissingFields));
    assert_eq!(err.to_string(), "Please enter both username and password");

    let err = client.login("admin", "").await.unwrap_err();
    assert!(matches!(err, LoginError::MissingFields));
}

#[tokio::test]
async fn test_login_against_unreachable_scaler_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ScalerClient::builder()
        .url(format!("http://{}", addr))
        .build()
        .unwrap();

    let err = client.login("admin", "admin").await.unwrap_err();
    assert!(matches!(err, LoginError::Unavailable(_)));
}

#[tokio::test]
async fn test_unauthenticated_fetch_is_unauthorized() {
    let client = anonymous_client().await;

    let err = client.stats().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_audit_records() {
    let client = authed_client().await;

    let records = client.audit(DEFAULT_AUDIT_LIMIT).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 7);
    assert_eq!(records[0].duration_ms, 1250);
    assert_eq!(records[0].log_file(), Some("/logs/spend analysis/7.log"));
    assert_eq!(records[1].log_file(), None);
    assert_eq!(records[0].picked_at, None);
}

#[tokio::test]
async fn test_audit_log_encodes_path() {
    let client = authed_client().await;

    let text = client.audit_log("/logs/spend analysis/7.log").await.unwrap();

    assert_eq!(text, "log for file_path=%2Flogs%2Fspend%20analysis%2F7.log");
}

#[tokio::test]
async fn test_cluster_info() {
    let client = authed_client().await;

    let info = client.cluster_info().await.unwrap();

    assert!(info.error.is_none());
    assert!(info.nodes[0].is_ready());
    assert_eq!(info.pods[0].restarts, 2);
    assert!(info.events[0].is_warning());
}

#[tokio::test]
async fn test_job_logs_forwards_since_minutes() {
    let client = authed_client().await;

    let text = client.job_logs("worker-a", 15).await.unwrap();
    assert_eq!(text, "worker-a\nsince_minutes=15");

    let text = client.job_logs("worker-a", 0).await.unwrap();
    assert_eq!(text, "worker-a\nsince_minutes=0");
}

#[tokio::test]
async fn test_job_name_is_path_encoded() {
    let client = authed_client().await;

    let text = client.job_logs("batch job", 5).await.unwrap();

    assert_eq!(text, "batch%20job\nsince_minutes=5");
}
