use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

/// Create a tournament through the admin API and return its id.
pub async fn create_tournament(app_address: &str, admin_token: &str, name: &str) -> Uuid {
    let client = Client::new();
    let response = client
        .post(format!("{}/admin/tournaments", app_address))
        .bearer_auth(admin_token)
        .json(&json!({
            "name": name,
            "description": "Test tournament",
            "start_date": "2025-06-01T00:00:00Z",
            "end_date": "2025-06-30T00:00:00Z",
            "status": "active"
        }))
        .send()
        .await
        .expect("Failed to create tournament.");
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.expect("Invalid tournament response");
    Uuid::parse_str(body["data"]["id"].as_str().expect("No tournament id")).unwrap()
}

/// Register a team for a tournament and return its id.
pub async fn create_team(
    app_address: &str,
    token: &str,
    tournament_id: Uuid,
    name: &str,
) -> Uuid {
    let client = Client::new();
    let response = client
        .post(format!("{}/teams", app_address))
        .bearer_auth(token)
        .json(&json!({
            "name": name,
            "tournament_id": tournament_id
        }))
        .send()
        .await
        .expect("Failed to create team.");
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.expect("Invalid team response");
    Uuid::parse_str(body["data"]["id"].as_str().expect("No team id")).unwrap()
}

/// Schedule a match between two teams and return its id.
pub async fn create_match(
    app_address: &str,
    admin_token: &str,
    tournament_id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
) -> Uuid {
    let client = Client::new();
    let response = client
        .post(format!("{}/admin/matches", app_address))
        .bearer_auth(admin_token)
        .json(&json!({
            "tournament_id": tournament_id,
            "home_team_id": home_team_id,
            "away_team_id": away_team_id,
            "match_date": "2025-06-07T15:00:00Z",
            "round": "1",
            "venue": "Estadio Central"
        }))
        .send()
        .await
        .expect("Failed to create match.");
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.expect("Invalid match response");
    Uuid::parse_str(body["data"]["id"].as_str().expect("No match id")).unwrap()
}

/// Record a final score and mark the match completed.
pub async fn complete_match(
    app_address: &str,
    admin_token: &str,
    match_id: Uuid,
    home_score: i32,
    away_score: i32,
) {
    let client = Client::new();
    let response = client
        .put(format!("{}/admin/matches/{}", app_address, match_id))
        .bearer_auth(admin_token)
        .json(&json!({
            "home_score": home_score,
            "away_score": away_score,
            "status": "completed"
        }))
        .send()
        .await
        .expect("Failed to complete match.");
    assert!(response.status().is_success());
}

/// Read a tournament's standings rows through the API.
pub async fn get_standings(
    app_address: &str,
    token: &str,
    tournament_id: Uuid,
) -> Vec<serde_json::Value> {
    let client = Client::new();
    let response = client
        .get(format!(
            "{}/tournaments/{}/standings",
            app_address, tournament_id
        ))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to fetch standings.");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Invalid standings response");
    body["data"].as_array().expect("No standings array").clone()
}

/// Trigger a manual recompute through the admin API and return the rows.
pub async fn recompute_standings(
    app_address: &str,
    admin_token: &str,
    tournament_id: Uuid,
) -> Vec<serde_json::Value> {
    let client = Client::new();
    let response = client
        .post(format!(
            "{}/admin/tournaments/{}/standings/recompute",
            app_address, tournament_id
        ))
        .bearer_auth(admin_token)
        .send()
        .await
        .expect("Failed to recompute standings.");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Invalid standings response");
    body["data"].as_array().expect("No standings array").clone()
}
