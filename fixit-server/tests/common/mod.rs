//! Integration test harness
//!
//! Builds the full router against an in-memory SQLite database, with a
//! deterministic field-encryption key and a seeded admin account.

// Each test binary uses a subset of these helpers
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use fixit_server::auth::{JwtConfig, JwtService, hash_password};
use fixit_server::core::{Config, ServerState, server::build_router};
use fixit_server::db::DbService;
use fixit_server::db::repository::{ClientRepository, JobRepository, WorkerRepository};
use fixit_server::utils::FieldCipher;
use http_body_util::BodyExt;
use shared::models::{Client, Job, JobStatus, VerificationStatus, Worker, WorkerStatus};
use shared::util::{now_millis, object_id};
use tower::ServiceExt;

pub const TEST_KEY: [u8; 16] = *b"0123456789abcdef";

pub struct TestApp {
    pub state: ServerState,
    pub router: Router,
    pub admin_token: String,
}

fn test_config() -> Config {
    Config {
        work_dir: "./target/test-data".into(),
        port: 0,
        environment: "test".into(),
        frontend_origin: "http://localhost:3000".into(),
        database_path: ":memory:".into(),
        jwt: test_jwt_config(),
        admin_username: "admin".into(),
        admin_password: None,
        request_timeout_ms: 5000,
    }
}

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-key-0123456789".into(),
        expiration_minutes: 60,
        issuer: "fixit-server".into(),
        audience: "fixit-admin".into(),
    }
}

pub async fn spawn_app() -> TestApp {
    let db = DbService::in_memory().await.expect("in-memory db");
    let jwt_service = JwtService::with_config(test_jwt_config());
    let cipher = FieldCipher::with_key(TEST_KEY).expect("test cipher");

    let state = ServerState::with_services(test_config(), db, jwt_service, cipher);

    // Seed the admin the auth gate will look up
    let admin_id = object_id();
    let hash = hash_password("test-admin-password").expect("hash");
    sqlx::query(
        "INSERT INTO admin (id, username, password_hash, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&admin_id)
    .bind("admin")
    .bind(&hash)
    .bind(now_millis())
    .bind(now_millis())
    .execute(&state.db.pool)
    .await
    .expect("seed admin");

    let admin_token = state
        .jwt_service
        .generate_token(&admin_id, "admin")
        .expect("token");

    let router = build_router(state.clone());
    TestApp {
        state,
        router,
        admin_token,
    }
}

impl TestApp {
    pub fn cipher(&self) -> FieldCipher {
        FieldCipher::with_key(TEST_KEY).expect("test cipher")
    }

    pub fn jobs(&self) -> JobRepository {
        self.state.jobs()
    }

    pub fn clients(&self) -> ClientRepository {
        self.state.clients()
    }

    /// Seed a client with encrypted names; returns the client id
    pub async fn seed_client(&self, first: &str, last: &str) -> String {
        let cipher = self.cipher();
        let id = object_id();
        let client = Client {
            id: id.clone(),
            credential_id: object_id(),
            email: format!("{}@example.com", first.to_lowercase()),
            first_name: cipher.encrypt(first).expect("encrypt"),
            last_name: cipher.encrypt(last).expect("encrypt"),
            profile_picture_url: None,
            is_verified: false,
            blocked: false,
            verification_status: VerificationStatus::NotSubmitted,
            verification_submitted_at: None,
            verification_approved_at: None,
            verification_rejected_at: None,
            verification_notes: String::new(),
            resubmission_count: 0,
            max_resubmission_attempts: 3,
            created_at: now_millis(),
            updated_at: now_millis(),
        };
        self.clients().create(&client).await.expect("seed client");
        id
    }

    pub fn workers(&self) -> WorkerRepository {
        self.state.workers()
    }

    /// Seed a client awaiting review; returns the client id
    pub async fn seed_pending_client(&self, first: &str, last: &str) -> String {
        let id = self.seed_client(first, last).await;
        sqlx::query(
            "UPDATE client SET verification_status = 'pending', \
             verification_submitted_at = ? WHERE id = ?",
        )
        .bind(now_millis())
        .bind(&id)
        .execute(&self.state.db.pool)
        .await
        .expect("mark pending");
        id
    }

    /// Seed a worker; returns the worker id
    pub async fn seed_worker(
        &self,
        first: &str,
        last: &str,
        verification_status: VerificationStatus,
        resubmission_count: i64,
    ) -> String {
        let id = object_id();
        let worker = Worker {
            id: id.clone(),
            credential_id: object_id(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            profile_picture_url: None,
            status: WorkerStatus::Available,
            blocked: false,
            verification_status,
            verification_submitted_at: Some(now_millis()),
            verification_approved_at: None,
            verification_rejected_at: None,
            verification_notes: String::new(),
            resubmission_count,
            max_resubmission_attempts: 3,
            created_at: now_millis(),
            updated_at: now_millis(),
        };
        self.workers().create(&worker).await.expect("seed worker");
        id
    }

    /// Seed a job; returns the job id
    pub async fn seed_job(
        &self,
        client_id: &str,
        status: JobStatus,
        archived: bool,
    ) -> String {
        let id = object_id();
        let job = Job {
            id: id.clone(),
            client_id: client_id.to_string(),
            category_id: None,
            hired_worker_id: None,
            description: format!("job {id}"),
            price: 100.0,
            location: "Valletta".into(),
            status,
            is_deleted: archived,
            created_at: now_millis(),
            updated_at: now_millis(),
        };
        self.jobs().create(&job).await.expect("seed job");
        id
    }

    /// Authenticated GET; returns (status, parsed body)
    pub async fn get(&self, uri: &str) -> (http::StatusCode, serde_json::Value) {
        let request = http::Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {}", self.admin_token))
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    /// Authenticated PATCH with an optional JSON body
    pub async fn patch(
        &self,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (http::StatusCode, serde_json::Value) {
        let mut builder = http::Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("authorization", format!("Bearer {}", self.admin_token));
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request");
        self.send(request).await
    }

    /// Unauthenticated request
    pub async fn get_anon(&self, uri: &str) -> (http::StatusCode, serde_json::Value) {
        let request = http::Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    pub async fn send(
        &self,
        request: http::Request<Body>,
    ) -> (http::StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    /// Raw response for header assertions
    pub async fn get_raw(&self, uri: &str) -> http::Response<Body> {
        let request = http::Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {}", self.admin_token))
            .body(Body::empty())
            .expect("request");
        self.router.clone().oneshot(request).await.expect("response")
    }
}
