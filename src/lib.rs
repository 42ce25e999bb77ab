pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod labels;
pub mod models;
pub mod position;
pub mod repo;
pub mod state;
pub mod workspace;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Auth routes
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        // User routes
        .route("/users", get(handlers::users::list_users))
        .route("/users/{user_id}", get(handlers::users::get_profile))
        .route(
            "/users/{user_id}/username",
            put(handlers::users::update_username),
        )
        .route("/users/{user_id}/email", put(handlers::users::update_email))
        .route(
            "/users/{user_id}/password",
            put(handlers::users::update_password),
        )
        .route(
            "/users/{user_id}/boards",
            get(handlers::users::list_user_boards),
        )
        // Board routes
        .route(
            "/boards",
            post(handlers::boards::create_board).get(handlers::boards::list_boards),
        )
        .route(
            "/boards/{board_id}",
            get(handlers::boards::get_board)
                .put(handlers::boards::update_board)
                .delete(handlers::boards::delete_board),
        )
        .route(
            "/boards/{board_id}/members",
            get(handlers::boards::list_members).post(handlers::boards::add_member),
        )
        .route(
            "/boards/{board_id}/members/{user_id}",
            delete(handlers::boards::remove_member),
        )
        // List routes
        .route(
            "/boards/{board_id}/lists",
            post(handlers::lists::create_list).get(handlers::lists::list_lists),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}",
            get(handlers::lists::get_list)
                .put(handlers::lists::update_list)
                .delete(handlers::lists::delete_list),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/members",
            get(handlers::lists::list_members).post(handlers::lists::add_member),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/members/{user_id}",
            delete(handlers::lists::remove_member),
        )
        // Card routes
        .route(
            "/boards/{board_id}/lists/{list_id}/cards",
            post(handlers::cards::create_card).get(handlers::cards::list_cards),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}",
            get(handlers::cards::get_card)
                .put(handlers::cards::update_card)
                .delete(handlers::cards::delete_card),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/move",
            patch(handlers::cards::move_card),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/dates",
            put(handlers::cards::set_dates),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/members",
            get(handlers::cards::list_members).post(handlers::cards::add_member),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/members/{user_id}",
            delete(handlers::cards::remove_member),
        )
        // Card label routes
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/labels",
            post(handlers::labels::attach_label).get(handlers::labels::list_card_labels),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/labels/{label_id}",
            delete(handlers::labels::detach_label),
        )
        // Task routes
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/tasks",
            post(handlers::tasks::create_task).get(handlers::tasks::list_tasks),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/tasks/{task_id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/tasks/{task_id}/members",
            get(handlers::tasks::list_members).post(handlers::tasks::add_member),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/{card_id}/tasks/{task_id}/members/{user_id}",
            delete(handlers::tasks::remove_member),
        )
        // Global label routes
        .route(
            "/labels/global",
            post(handlers::labels::create_global_label).get(handlers::labels::list_global_labels),
        )
        .route(
            "/labels/global/{label_id}",
            delete(handlers::labels::delete_global_label),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub mod test_utils {
    use crate::auth::{generate_token, hash_password, hash_token};
    use crate::state::AppState;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use uuid::Uuid;

    pub const TEST_PASSWORD: &str = "testpassword123";

    pub async fn create_test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    pub async fn create_test_state() -> AppState {
        let pool = create_test_pool().await;
        AppState::new(pool)
    }

    pub async fn create_test_user(state: &AppState, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        let password_hash = hash_password(TEST_PASSWORD).unwrap();
        state
            .users
            .create(id, username, &format!("{}@example.com", username), &password_hash)
            .await
            .unwrap();
        id
    }

    /// Returns the raw token; only its hash is stored.
    pub async fn create_test_session(state: &AppState, user_id: Uuid) -> String {
        let token = generate_token();
        state
            .sessions
            .create(user_id, &hash_token(&token))
            .await
            .unwrap();
        token
    }
}
