use axum::http::StatusCode;
use axum_test::TestServer;
use cookie::Cookie;
use serde_json::{json, Value};
use taskboard::{create_router, state::AppState, test_utils};

async fn setup_server() -> TestServer {
    let state = test_utils::create_test_state().await;
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[allow(dead_code)]
async fn setup_server_with_state() -> (TestServer, AppState) {
    let state = test_utils::create_test_state().await;
    let app = create_router(state.clone());
    (TestServer::new(app).unwrap(), state)
}

/// Registers a fresh user and returns (user id, session token).
async fn register_and_login(server: &TestServer, username: &str) -> (String, String) {
    let register = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "testpassword123"
        }))
        .await;
    register.assert_status_ok();
    let user_id = register.json::<Value>()["user"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let login_response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": username,
            "password": "testpassword123"
        }))
        .await;
    login_response.assert_status_ok();

    (user_id, login_response.cookie("session").value().to_string())
}

fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("session", token.to_string())
}

async fn create_board(server: &TestServer, token: &str, name: &str) -> String {
    let response = server
        .post("/api/boards")
        .add_cookie(session_cookie(token))
        .json(&json!({ "name": name }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

async fn create_list(server: &TestServer, token: &str, board_id: &str, name: &str) -> String {
    let response = server
        .post(&format!("/api/boards/{}/lists", board_id))
        .add_cookie(session_cookie(token))
        .json(&json!({ "name": name }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

async fn create_card(
    server: &TestServer,
    token: &str,
    board_id: &str,
    list_id: &str,
    title: &str,
) -> Value {
    let response = server
        .post(&format!("/api/boards/{}/lists/{}/cards", board_id, list_id))
        .add_cookie(session_cookie(token))
        .json(&json!({ "title": title }))
        .await;
    response.assert_status_ok();
    response.json()
}

// ============================================================================
// Auth Tests
// ============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_success() {
        let server = setup_server().await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "newuser",
                "email": "newuser@example.com",
                "password": "securepassword123"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["user"]["id"].is_string());
        assert_eq!(body["user"]["username"], "newuser");
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let server = setup_server().await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "shorty",
                "email": "shorty@example.com",
                "password": "1234567"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let server = setup_server().await;
        register_and_login(&server, "taken").await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "username": "taken",
                "email": "other@example.com",
                "password": "testpassword123"
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let server = setup_server().await;
        register_and_login(&server, "alice").await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "username": "alice",
                "password": "wrongpassword"
            }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_bearer_token_accepted() {
        let server = setup_server().await;
        let (_, token) = register_and_login(&server, "alice").await;

        let response = server
            .get("/api/boards")
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let server = setup_server().await;
        let (_, token) = register_and_login(&server, "alice").await;

        server
            .post("/api/auth/logout")
            .add_cookie(session_cookie(&token))
            .await
            .assert_status_ok();

        server
            .get("/api/boards")
            .add_cookie(session_cookie(&token))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_unauthenticated_request_rejected() {
        let server = setup_server().await;
        server.get("/api/boards").await.assert_status_unauthorized();
    }
}

// ============================================================================
// User Tests
// ============================================================================

mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_profile_is_private() {
        let server = setup_server().await;
        let (alice_id, alice) = register_and_login(&server, "alice").await;
        let (_, bob) = register_and_login(&server, "bob").await;

        server
            .get(&format!("/api/users/{}", alice_id))
            .add_cookie(session_cookie(&alice))
            .await
            .assert_status_ok();

        let response = server
            .get(&format!("/api/users/{}", alice_id))
            .add_cookie(session_cookie(&bob))
            .await;
        response.assert_status_forbidden();
        assert_eq!(response.json::<Value>()["reason"], "not_owner");
    }

    #[tokio::test]
    async fn test_update_password_requires_current() {
        let server = setup_server().await;
        let (alice_id, alice) = register_and_login(&server, "alice").await;

        server
            .put(&format!("/api/users/{}/password", alice_id))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "current_password": "nope", "password": "brandnewpass" }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        server
            .put(&format!("/api/users/{}/password", alice_id))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "current_password": "testpassword123", "password": "brandnewpass" }))
            .await
            .assert_status_ok();

        server
            .post("/api/auth/login")
            .json(&json!({ "username": "alice", "password": "brandnewpass" }))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_update_username_conflict() {
        let server = setup_server().await;
        let (alice_id, alice) = register_and_login(&server, "alice").await;
        register_and_login(&server, "bob").await;

        server
            .put(&format!("/api/users/{}/username", alice_id))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "username": "bob" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_list_users() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        register_and_login(&server, "bob").await;

        let response = server
            .get("/api/users")
            .add_cookie(session_cookie(&alice))
            .await;
        response.assert_status_ok();
        let users: Vec<Value> = response.json();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.get("email").is_none()));
    }
}

// ============================================================================
// Board Tests
// ============================================================================

mod board_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list_boards() {
        let server = setup_server().await;
        let (alice_id, alice) = register_and_login(&server, "alice").await;

        create_board(&server, &alice, "Roadmap").await;

        let response = server
            .get(&format!("/api/users/{}/boards", alice_id))
            .add_cookie(session_cookie(&alice))
            .await;
        response.assert_status_ok();
        let boards: Vec<Value> = response.json();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0]["name"], "Roadmap");
        assert_eq!(boards[0]["role"], "owner");
    }

    #[tokio::test]
    async fn test_create_board_requires_name() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;

        server
            .post("/api/boards")
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "name": "   " }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_outsider_cannot_read_board() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let (_, carol) = register_and_login(&server, "carol").await;
        let board_id = create_board(&server, &alice, "Private").await;

        let response = server
            .get(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&carol))
            .await;
        response.assert_status_forbidden();
        assert_eq!(response.json::<Value>()["reason"], "not_member");
    }

    #[tokio::test]
    async fn test_member_sees_shared_board() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let (bob_id, bob) = register_and_login(&server, "bob").await;
        let board_id = create_board(&server, &alice, "Shared").await;

        server
            .post(&format!("/api/boards/{}/members", board_id))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "user_id": bob_id }))
            .await
            .assert_status_ok();

        let response = server
            .get(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&bob))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["role"], "member");
        assert_eq!(body["members"].as_array().unwrap().len(), 1);

        let boards: Vec<Value> = server
            .get(&format!("/api/users/{}/boards", bob_id))
            .add_cookie(session_cookie(&bob))
            .await
            .json();
        assert_eq!(boards.len(), 1);
    }

    #[tokio::test]
    async fn test_member_cannot_delete_board() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let (bob_id, bob) = register_and_login(&server, "bob").await;
        let board_id = create_board(&server, &alice, "Shared").await;

        server
            .post(&format!("/api/boards/{}/members", board_id))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "user_id": bob_id }))
            .await
            .assert_status_ok();

        let response = server
            .delete(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&bob))
            .await;
        response.assert_status_forbidden();
        assert_eq!(response.json::<Value>()["reason"], "not_owner");

        server
            .delete(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&alice))
            .await
            .assert_status_ok();

        server
            .get(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&alice))
            .await
            .assert_status_not_found();
    }
}

// ============================================================================
// List and Card Tests
// ============================================================================

mod card_tests {
    use super::*;

    #[tokio::test]
    async fn test_positions_are_appended() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let board_id = create_board(&server, &alice, "Board").await;
        let list_id = create_list(&server, &alice, &board_id, "Todo").await;

        for (i, title) in ["One", "Two", "Three"].iter().enumerate() {
            let card = create_card(&server, &alice, &board_id, &list_id, title).await;
            assert_eq!(card["position"], i as i64);
        }

        let list = server
            .get(&format!("/api/boards/{}/lists/{}", board_id, list_id))
            .add_cookie(session_cookie(&alice))
            .await;
        list.assert_status_ok();
        let cards = list.json::<Value>()["cards"].as_array().unwrap().clone();
        let titles: Vec<&str> = cards.iter().map(|c| c["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn test_update_position_zero_moves_to_front() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let board_id = create_board(&server, &alice, "Board").await;
        let list_id = create_list(&server, &alice, &board_id, "Todo").await;
        create_card(&server, &alice, &board_id, &list_id, "First").await;
        let second = create_card(&server, &alice, &board_id, &list_id, "Second").await;

        let response = server
            .put(&format!(
                "/api/boards/{}/lists/{}/cards/{}",
                board_id,
                list_id,
                second["id"].as_str().unwrap()
            ))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "position": 0 }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["position"], 0);
    }

    #[tokio::test]
    async fn test_card_under_wrong_list_is_rejected() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let board_id = create_board(&server, &alice, "Board").await;
        let todo = create_list(&server, &alice, &board_id, "Todo").await;
        let done = create_list(&server, &alice, &board_id, "Done").await;
        let card = create_card(&server, &alice, &board_id, &todo, "Card").await;

        server
            .get(&format!(
                "/api/boards/{}/lists/{}/cards/{}",
                board_id,
                done,
                card["id"].as_str().unwrap()
            ))
            .add_cookie(session_cookie(&alice))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_move_card_appends_to_destination() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let board_id = create_board(&server, &alice, "Board").await;
        let todo = create_list(&server, &alice, &board_id, "Todo").await;
        let done = create_list(&server, &alice, &board_id, "Done").await;
        create_card(&server, &alice, &board_id, &done, "Already done").await;
        let card = create_card(&server, &alice, &board_id, &todo, "Ship it").await;

        let response = server
            .patch(&format!(
                "/api/boards/{}/lists/{}/cards/{}/move",
                board_id,
                todo,
                card["id"].as_str().unwrap()
            ))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "list_id": done }))
            .await;
        response.assert_status_ok();
        let moved: Value = response.json();
        assert_eq!(moved["list_id"], done);
        assert_eq!(moved["position"], 1);
    }

    #[tokio::test]
    async fn test_due_date_before_start_rejected() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let board_id = create_board(&server, &alice, "Board").await;
        let list_id = create_list(&server, &alice, &board_id, "Todo").await;
        let card = create_card(&server, &alice, &board_id, &list_id, "Dated").await;

        server
            .put(&format!(
                "/api/boards/{}/lists/{}/cards/{}/dates",
                board_id,
                list_id,
                card["id"].as_str().unwrap()
            ))
            .add_cookie(session_cookie(&alice))
            .json(&json!({
                "start_date": "2026-03-10T00:00:00Z",
                "due_date": "2026-03-01T00:00:00Z"
            }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_tasks_on_card() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let board_id = create_board(&server, &alice, "Board").await;
        let list_id = create_list(&server, &alice, &board_id, "Todo").await;
        let card = create_card(&server, &alice, &board_id, &list_id, "Card").await;
        let base = format!(
            "/api/boards/{}/lists/{}/cards/{}/tasks",
            board_id,
            list_id,
            card["id"].as_str().unwrap()
        );

        let task: Value = server
            .post(&base)
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "description": "Write tests" }))
            .await
            .json();
        assert_eq!(task["completed"], false);

        let updated = server
            .put(&format!("{}/{}", base, task["id"].as_str().unwrap()))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "completed": true }))
            .await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>()["completed"], true);
        assert_eq!(updated.json::<Value>()["description"], "Write tests");
    }
}

// ============================================================================
// Label Tests
// ============================================================================

mod label_tests {
    use super::*;

    #[tokio::test]
    async fn test_attach_copies_global_label() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let board_id = create_board(&server, &alice, "Board").await;
        let list_id = create_list(&server, &alice, &board_id, "Todo").await;
        let card = create_card(&server, &alice, &board_id, &list_id, "Card").await;

        let template: Value = server
            .post("/api/labels/global")
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "name": "Bug", "color": "#FF0000" }))
            .await
            .json();

        let response = server
            .post(&format!(
                "/api/boards/{}/lists/{}/cards/{}/labels",
                board_id,
                list_id,
                card["id"].as_str().unwrap()
            ))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "global_label_id": template["id"] }))
            .await;
        response.assert_status_ok();
        let copy: Value = response.json();
        assert_ne!(copy["id"], template["id"]);
        assert_eq!(copy["name"], "Bug");
        assert_eq!(copy["global"], false);
        assert_eq!(copy["card_id"], card["id"]);

        let globals: Vec<Value> = server
            .get("/api/labels/global")
            .add_cookie(session_cookie(&alice))
            .await
            .json();
        assert_eq!(globals.len(), 1);
        assert!(globals[0]["card_id"].is_null());
    }

    #[tokio::test]
    async fn test_invalid_color_rejected() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;

        server
            .post("/api/labels/global")
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "name": "Bug", "color": "red" }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_only_creator_deletes_global_label() {
        let server = setup_server().await;
        let (_, alice) = register_and_login(&server, "alice").await;
        let (_, bob) = register_and_login(&server, "bob").await;

        let template: Value = server
            .post("/api/labels/global")
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "name": "Urgent", "color": "#f80" }))
            .await
            .json();
        let url = format!("/api/labels/global/{}", template["id"].as_str().unwrap());

        server
            .delete(&url)
            .add_cookie(session_cookie(&bob))
            .await
            .assert_status_forbidden();

        server
            .delete(&url)
            .add_cookie(session_cookie(&alice))
            .await
            .assert_status_ok();
    }
}
