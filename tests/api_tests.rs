//! API integration tests
//!
//! These run against a live server with a migrated database.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:5000/api/v1";

const STATUS_WORKING: i64 = 1;
const STATUS_UNDER_REPAIR: i64 = 2;
const OUTCOME_RESOLVED: i64 = 1;
const OUTCOME_MONITORING: i64 = 2;
const OUTCOME_PENDING: i64 = 3;

/// Unique suffix so test users do not collide across runs
fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis()
}

/// Helper to get an authenticated admin token
async fn get_admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create an equipment with the given status, returning its id
async fn create_equipment(client: &Client, token: &str, name: &str, status_id: i64) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": name,
            "description": "integration test asset",
            "type_id": 1,
            "status_id": status_id
        }))
        .send()
        .await
        .expect("Failed to create equipment");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No equipment ID")
}

/// Helper to read an equipment's current status id
async fn equipment_status(client: &Client, token: &str, id: i64) -> i64 {
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch equipment");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    body["equipment"]["status_id"].as_i64().expect("No status_id")
}

/// Helper to create a user with the given role, returning its id
async fn create_user(client: &Client, token: &str, username: &str, role: &str) -> i64 {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "username": username,
            "password": "testpass",
            "first_name": "Test",
            "last_name": "User",
            "role": role
        }))
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No user ID")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_me_without_token_is_ok_and_unauthenticated() {
    let client = Client::new();

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    // Being unauthenticated is a valid state here, not an error
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
#[ignore]
async fn test_me_with_token_returns_profile() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_access_is_denied() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_technician_cannot_list_users() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let username = format!("tech{}", unique_suffix());
    let user_id = create_user(&client, &token, &username, "technician").await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "testpass" }))
        .send()
        .await
        .expect("Failed to login technician");
    let body: Value = response.json().await.unwrap();
    let tech_token = body["token"].as_str().unwrap().to_string();

    let response = client
        .get(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", tech_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Admin-only dashboard variant is forbidden too
    let response = client
        .get(format!("{}/home/summary", BASE_URL))
        .header("Authorization", format!("Bearer {}", tech_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Cleanup
    let _ = client
        .delete(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_resolved_outcome_sets_equipment_working() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let equipment_id = create_equipment(&client, &token, "sync-resolved", STATUS_UNDER_REPAIR).await;

    let response = client
        .post(format!("{}/interventions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "description": "replaced power supply",
            "equipment_id": equipment_id,
            "outcome_id": OUTCOME_RESOLVED
        }))
        .send()
        .await
        .expect("Failed to create intervention");
    assert_eq!(response.status(), 201);

    assert_eq!(
        equipment_status(&client, &token, equipment_id).await,
        STATUS_WORKING
    );

    // Idempotence: applying the same outcome again yields the same status
    let response = client
        .post(format!("{}/interventions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "description": "verified fix",
            "equipment_id": equipment_id,
            "outcome_id": OUTCOME_RESOLVED
        }))
        .send()
        .await
        .expect("Failed to create intervention");
    assert_eq!(response.status(), 201);

    assert_eq!(
        equipment_status(&client, &token, equipment_id).await,
        STATUS_WORKING
    );

    // Cleanup
    let _ = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_pending_and_monitoring_set_equipment_under_repair() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    for outcome in [OUTCOME_PENDING, OUTCOME_MONITORING] {
        let equipment_id =
            create_equipment(&client, &token, "sync-repair", STATUS_WORKING).await;

        let response = client
            .post(format!("{}/interventions", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "description": "waiting for parts",
                "equipment_id": equipment_id,
                "outcome_id": outcome
            }))
            .send()
            .await
            .expect("Failed to create intervention");
        assert_eq!(response.status(), 201);

        assert_eq!(
            equipment_status(&client, &token, equipment_id).await,
            STATUS_UNDER_REPAIR
        );

        let _ = client
            .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_moving_intervention_carries_stored_outcome() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let first = create_equipment(&client, &token, "carry-src", STATUS_WORKING).await;
    let second = create_equipment(&client, &token, "carry-dst", STATUS_WORKING).await;

    let response = client
        .post(format!("{}/interventions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "description": "ordered replacement disk",
            "equipment_id": first,
            "outcome_id": OUTCOME_PENDING
        }))
        .send()
        .await
        .expect("Failed to create intervention");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let intervention_id = body["id"].as_i64().unwrap();

    // Update only the equipment reference; the stored PENDING outcome must
    // be re-applied to the new equipment.
    let response = client
        .put(format!("{}/interventions/{}", BASE_URL, intervention_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "equipment_id": second }))
        .send()
        .await
        .expect("Failed to update intervention");
    assert_eq!(response.status(), 200);

    assert_eq!(
        equipment_status(&client, &token, second).await,
        STATUS_UNDER_REPAIR
    );

    // Cleanup (cascades the intervention with its equipment)
    for id in [second, first] {
        let _ = client
            .delete(format!("{}/equipment/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_equipment_delete_cascades_interventions() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let equipment_id = create_equipment(&client, &token, "cascade", STATUS_WORKING).await;

    let mut intervention_ids = Vec::new();
    for i in 0..3 {
        let response = client
            .post(format!("{}/interventions", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "description": format!("maintenance pass {}", i),
                "equipment_id": equipment_id
            }))
            .send()
            .await
            .expect("Failed to create intervention");
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.unwrap();
        intervention_ids.push(body["id"].as_i64().unwrap());
    }

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete equipment");
    assert_eq!(response.status(), 204);

    // No orphaned interventions remain
    for id in intervention_ids {
        let response = client
            .get(format!("{}/interventions/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to fetch intervention");
        assert_eq!(response.status(), 404);
    }
}

#[tokio::test]
#[ignore]
async fn test_last_admin_cannot_be_demoted_or_deleted() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    // Find the admin's own id
    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let admin_id = body["user"]["id"].as_i64().unwrap();

    // A technician alongside must not change the admin count
    let username = format!("bystander{}", unique_suffix());
    let tech_id = create_user(&client, &token, &username, "technician").await;

    // Demotion rejected
    let response = client
        .put(format!("{}/users/{}", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "role": "technician" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Still an admin
    let response = client
        .get(format!("{}/users/{}", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["role"], "admin");

    // Deletion rejected
    let response = client
        .delete(format!("{}/users/{}", BASE_URL, admin_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Deleting the technician succeeds
    let response = client
        .delete(format!("{}/users/{}", BASE_URL, tech_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_technician_promotion_is_forbidden() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let username = format!("promote{}", unique_suffix());
    let tech_id = create_user(&client, &token, &username, "technician").await;

    let response = client
        .put(format!("{}/users/{}", BASE_URL, tech_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Cleanup
    let _ = client
        .delete(format!("{}/users/{}", BASE_URL, tech_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_concurrent_demotions_leave_one_admin() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    // Second administrator through the dedicated creation path
    let username = format!("admin2x{}", unique_suffix());
    let second_admin = create_user(&client, &token, &username, "admin").await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let first_admin = body["user"]["id"].as_i64().unwrap();

    // Fire concurrent demotions against both admins. Exactly one must
    // succeed; the other must fail the last-administrator invariant.
    let mut requests = Vec::new();
    for target in [first_admin, second_admin] {
        let client = client.clone();
        let token = token.clone();
        requests.push(async move {
            client
                .put(format!("{}/users/{}", BASE_URL, target))
                .header("Authorization", format!("Bearer {}", token))
                .json(&json!({ "role": "technician" }))
                .send()
                .await
                .expect("Failed to send request")
                .status()
                .as_u16()
        });
    }

    let statuses = futures::future::join_all(requests).await;
    let successes = statuses.iter().filter(|&&s| s == 200).count();
    let violations = statuses.iter().filter(|&&s| s == 422).count();

    assert_eq!(successes, 1, "exactly one demotion must win: {:?}", statuses);
    assert_eq!(violations, statuses.len() - 1);

    // Exactly one administrator remains
    let response = client
        .get(format!("{}/users?role=admin", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total"].as_i64().unwrap(), 1);

    // Cleanup: remove whichever account was demoted
    for id in [first_admin, second_admin] {
        let response = client
            .get(format!("{}/users/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .unwrap();
        let body: Value = response.json().await.unwrap();
        if body["role"] == "technician" {
            let _ = client
                .delete(format!("{}/users/{}", BASE_URL, id))
                .header("Authorization", format!("Bearer {}", token))
                .send()
                .await;
        }
    }
}

#[tokio::test]
#[ignore]
async fn test_export_equipment_returns_csv() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .get(format!("{}/equipment/export", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let text = response.text().await.expect("Failed to read body");
    assert!(text.starts_with("ID,Name,Description,Type,Location,Status"));
}
