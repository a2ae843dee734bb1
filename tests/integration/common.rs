//! Shared helpers for integration tests

use reqwest::Client;
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Log in as the bootstrap admin and return a bearer token
pub async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin123!"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Unique suffix so repeated test runs do not collide on unique columns
pub fn unique_suffix() -> String {
    format!("{}", chrono::Utc::now().timestamp_micros())
}

/// Create a team + equipment pair and return their ids
pub async fn setup_team_and_equipment(client: &Client, token: &str) -> (i64, i64) {
    let suffix = unique_suffix();

    let response = client
        .post(format!("{}/teams", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": format!("Test Team {}", suffix) }))
        .send()
        .await
        .expect("Failed to create team");
    assert_eq!(response.status(), 201);
    let team: Value = response.json().await.expect("Failed to parse team");
    let team_id = team["id"].as_i64().expect("No team id");

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": format!("Test Pump {}", suffix),
            "category": "pump",
            "assigned_team_id": team_id
        }))
        .send()
        .await
        .expect("Failed to create equipment");
    assert_eq!(response.status(), 201);
    let equipment: Value = response.json().await.expect("Failed to parse equipment");
    let equipment_id = equipment["id"].as_i64().expect("No equipment id");

    (team_id, equipment_id)
}

/// Create a technician user and add them to the given team
pub async fn setup_technician(client: &Client, token: &str, team_id: i64) -> i64 {
    let suffix = unique_suffix();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "username": format!("tech_{}", suffix),
            "email": format!("tech_{}@example.com", suffix),
            "password": "techpass123",
            "role": "technician"
        }))
        .send()
        .await
        .expect("Failed to create technician");
    assert_eq!(response.status(), 201);
    let user: Value = response.json().await.expect("Failed to parse user");
    let user_id = user["id"].as_i64().expect("No user id");

    let response = client
        .post(format!("{}/teams/{}/members", BASE_URL, team_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to add team member");
    assert!(response.status().is_success());

    user_id
}
