//! Admin surface tests: login, active job listing and archiving,
//! verification review flow, and client moderation.

mod common;

use axum::body::Body;
use common::spawn_app;
use serde_json::json;
use shared::models::{JobStatus, VerificationStatus};

#[tokio::test]
async fn login_sets_cookie_and_returns_token() {
    let app = spawn_app().await;

    let request = http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"username": "admin", "password": "test-admin-password"}).to_string(),
        ))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);

    let cookie = response.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(cookie.starts_with("adminToken="));
    assert!(cookie.contains("HttpOnly"));

    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "ADMIN_LOGIN_SUCCESS");
    assert_eq!(body["data"]["admin"]["username"], "admin");
    assert!(body["data"]["token"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = spawn_app().await;

    let request = http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"username": "admin", "password": "wrong"}).to_string(),
        ))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, http::StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn healthz_is_public() {
    let app = spawn_app().await;

    let (status, body) = app.get_anon("/healthz").await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn active_listing_excludes_archived_rows() {
    let app = spawn_app().await;
    let client_id = app.seed_client("Karl", "Micallef").await;
    app.seed_job(&client_id, JobStatus::Open, false).await;
    app.seed_job(&client_id, JobStatus::Open, true).await;

    let (status, body) = app.get("/api/jobs").await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["code"], "JOBS_RETRIEVED");
    assert_eq!(body["data"]["jobs"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["jobs"][0]["isDeleted"], false);
}

#[tokio::test]
async fn archive_then_restore_moves_between_views() {
    let app = spawn_app().await;
    let client_id = app.seed_client("Emma", "Cauchi").await;
    let job_id = app.seed_job(&client_id, JobStatus::Open, false).await;

    let (status, body) = app
        .patch(&format!("/api/jobs/{job_id}/archive"), None)
        .await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["code"], "JOB_ARCHIVED");
    assert_eq!(body["data"]["isDeleted"], true);

    // Archiving twice misses the state guard
    let (status, body) = app
        .patch(&format!("/api/jobs/{job_id}/archive"), None)
        .await;
    assert_eq!(status, http::StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "JOB_NOT_FOUND");

    let (status, body) = app.get("/api/archived").await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["data"]["jobs"][0]["id"], job_id.as_str());
}

#[tokio::test]
async fn pending_queue_lists_both_roles_with_names() {
    let app = spawn_app().await;
    app.seed_pending_client("Maria", "Borg").await;
    app.seed_worker("Joe", "Zammit", VerificationStatus::Pending, 0)
        .await;

    let (status, body) = app.get("/api/verification/pending").await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["code"], "PENDING_VERIFICATIONS_RETRIEVED");

    let rows = body["data"]["verifications"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let names: Vec<&str> = rows
        .iter()
        .map(|r| r["fullName"].as_str().unwrap())
        .collect();
    // Client names come back decrypted
    assert!(names.contains(&"Maria Borg"));
    assert!(names.contains(&"Joe Zammit"));

    // Role filter narrows the queue to one table
    let (status, body) = app.get("/api/verification/pending?role=worker").await;
    assert_eq!(status, http::StatusCode::OK);
    let rows = body["data"]["verifications"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["role"], "worker");
}

#[tokio::test]
async fn approve_marks_client_verified() {
    let app = spawn_app().await;
    let client_id = app.seed_pending_client("Sara", "Attard").await;

    let (status, body) = app
        .patch(
            &format!("/api/verification/client/{client_id}/approve"),
            Some(json!({"notes": "documents ok"})),
        )
        .await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["code"], "VERIFICATION_APPROVED");

    let client = app.clients().find_by_id(&client_id).await.unwrap().unwrap();
    assert!(client.is_verified);
    assert_eq!(client.verification_status, VerificationStatus::Approved);
    assert_eq!(client.verification_notes, "documents ok");

    // Approved profiles are no longer reviewable
    let (status, body) = app
        .patch(
            &format!("/api/verification/client/{client_id}/approve"),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, http::StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn reject_with_resubmission_counts_and_caps() {
    let app = spawn_app().await;
    // Already at the cap of 3
    let worker_id = app
        .seed_worker("Nina", "Galea", VerificationStatus::RequiresResubmission, 3)
        .await;

    let (status, body) = app
        .patch(
            &format!("/api/verification/worker/{worker_id}/reject"),
            Some(json!({"notes": "blurry photo"})),
        )
        .await;
    assert_eq!(status, http::StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESUBMISSION_LIMIT_REACHED");

    // A final rejection still goes through
    let (status, body) = app
        .patch(
            &format!("/api/verification/worker/{worker_id}/reject"),
            Some(json!({"notes": "blurry photo", "requireResubmission": false})),
        )
        .await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["code"], "VERIFICATION_REJECTED");
    assert_eq!(body["data"]["status"], "rejected");
}

#[tokio::test]
async fn reject_increments_resubmission_count() {
    let app = spawn_app().await;
    let worker_id = app
        .seed_worker("Tom", "Spiteri", VerificationStatus::Pending, 1)
        .await;

    let (status, body) = app
        .patch(
            &format!("/api/verification/worker/{worker_id}/reject"),
            Some(json!({"notes": "id expired"})),
        )
        .await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["data"]["status"], "requires_resubmission");

    let worker = app.workers().find_by_id(&worker_id).await.unwrap().unwrap();
    assert_eq!(worker.resubmission_count, 2);
    assert_eq!(
        worker.verification_status,
        VerificationStatus::RequiresResubmission
    );
}

#[tokio::test]
async fn statistics_counts_by_status() {
    let app = spawn_app().await;
    app.seed_pending_client("Ivan", "Bugeja").await;
    app.seed_worker("Amy", "Scerri", VerificationStatus::Approved, 0)
        .await;
    app.seed_worker("Ben", "Cassar", VerificationStatus::Pending, 0)
        .await;

    let (status, body) = app.get("/api/verification/statistics").await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["code"], "VERIFICATION_STATISTICS_RETRIEVED");
    assert_eq!(body["data"]["counts"]["pending"], 2);
    assert_eq!(body["data"]["counts"]["approved"], 1);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["totalPending"], 2);
    let rate = body["data"]["approvalRate"].as_f64().unwrap();
    assert!((rate - 1.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn block_unblock_client_with_state_guard() {
    let app = spawn_app().await;
    let client_id = app.seed_client("Lara", "Fenech").await;

    let (status, body) = app
        .patch(&format!("/api/clients/{client_id}/block"), None)
        .await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["code"], "CLIENT_BLOCKED");
    assert_eq!(body["data"]["blocked"], true);

    // Blocking an already-blocked client misses the guard
    let (status, body) = app
        .patch(&format!("/api/clients/{client_id}/block"), None)
        .await;
    assert_eq!(status, http::StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CLIENT_NOT_FOUND");

    let (status, body) = app
        .patch(&format!("/api/clients/{client_id}/unblock"), None)
        .await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["code"], "CLIENT_UNBLOCKED");
    assert_eq!(body["data"]["blocked"], false);
}
