use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
}

pub type Db = Arc<Vec<User>>;

/// Records with missing fields and a string id.
pub const MALFORMED_USERS_BODY: &str = r#"[{"id":"1","invalidName":"missing real name"}]"#;

pub const GARBAGE_BODY: &str = "invalid json";

pub fn seed_users() -> Vec<User> {
    [
        (1, "Leanne Graham", "Bret", "Sincere@april.biz"),
        (2, "Ervin Howell", "Antonette", "Shanna@melissa.tv"),
        (3, "Clementine Bauch", "Samantha", "Nathan@yesenia.net"),
    ]
    .into_iter()
    .map(|(id, name, username, email)| User {
        id,
        name: name.to_string(),
        username: username.to_string(),
        email: email.to_string(),
    })
    .collect()
}

pub fn app() -> Router {
    app_with_users(seed_users())
}

pub fn app_with_users(users: Vec<User>) -> Router {
    let db: Db = Arc::new(users);
    Router::new()
        .route("/users", get(list_users))
        .route("/users/malformed", get(malformed_users))
        .route("/users/garbage", get(garbage))
        .route("/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_users(listener, seed_users()).await
}

pub async fn run_with_users(listener: TcpListener, users: Vec<User>) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, users = users.len(), "serving users");
    }
    axum::serve(listener, app_with_users(users)).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    debug!(count = db.len(), "listing users");
    Json(db.as_ref().clone())
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    db.iter()
        .find(|user| user.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn malformed_users() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], MALFORMED_USERS_BODY)
}

async fn garbage() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], GARBAGE_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_to_json() {
        let user = User {
            id: 1,
            name: "Test".to_string(),
            username: "tester".to_string(),
            email: "test@example.com".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Test");
        assert_eq!(json["username"], "tester");
        assert_eq!(json["email"], "test@example.com");
    }

    #[test]
    fn seed_users_have_unique_ids() {
        let users = seed_users();
        let mut ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), users.len());
    }

    #[test]
    fn malformed_body_is_json_but_not_users() {
        assert!(serde_json::from_str::<serde_json::Value>(MALFORMED_USERS_BODY).is_ok());
        assert!(serde_json::from_str::<Vec<User>>(MALFORMED_USERS_BODY).is_err());
    }

    #[test]
    fn garbage_body_is_not_json() {
        assert!(serde_json::from_str::<serde_json::Value>(GARBAGE_BODY).is_err());
    }
}
