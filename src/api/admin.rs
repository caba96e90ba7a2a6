//! Admin-only endpoints. All calls carry the bearer token; the backend
//! answers 403 for non-admin accounts.

use gloo::net::http::Method;

use super::types::{
    AdminLobby, AdminMap, AdminUser, AnnouncementDraft, DropzoneTemplate, NewDropzoneTemplate,
    NewGame, NewLobby, NewMap, ResultEntry,
};
use super::{ApiClient, ApiError};

pub async fn users(client: &ApiClient) -> Result<Vec<AdminUser>, ApiError> {
    client.get_auth("/admin/users").await
}

pub async fn toggle_admin(client: &ApiClient, user_id: i64) -> Result<(), ApiError> {
    client
        .send_empty(Method::POST, &format!("/admin/users/{user_id}/toggle-admin"))
        .await
}

pub async fn lobbies(client: &ApiClient) -> Result<Vec<AdminLobby>, ApiError> {
    client.get_auth("/admin/lobbies").await
}

pub async fn create_lobby(client: &ApiClient, name: &str) -> Result<(), ApiError> {
    let body = NewLobby { name: name.trim().to_string() };
    client.send(Method::POST, "/admin/lobbies", &body).await
}

pub async fn delete_lobby(client: &ApiClient, lobby_id: i64) -> Result<(), ApiError> {
    client
        .send_empty(Method::DELETE, &format!("/admin/lobbies/{lobby_id}/delete"))
        .await
}

pub async fn create_game(client: &ApiClient, lobby_id: i64, game: &NewGame) -> Result<(), ApiError> {
    client
        .send(Method::POST, &format!("/admin/lobbies/{lobby_id}/games"), game)
        .await
}

pub async fn delete_game(client: &ApiClient, game_id: i64) -> Result<(), ApiError> {
    client
        .send_empty(Method::DELETE, &format!("/admin/games/{game_id}"))
        .await
}

/// Creates the result when the team has none yet, otherwise patches it.
pub async fn save_result(
    client: &ApiClient,
    game_id: i64,
    team_id: i64,
    existing: bool,
    place: i64,
    kills: i64,
    points: i64,
) -> Result<(), ApiError> {
    if existing {
        let body = ResultEntry { team_id: None, place, kills, points };
        client
            .send(Method::PATCH, &format!("/admin/games/{game_id}/results/{team_id}"), &body)
            .await
    } else {
        let body = ResultEntry { team_id: Some(team_id), place, kills, points };
        client
            .send(Method::POST, &format!("/admin/games/{game_id}/results"), &body)
            .await
    }
}

pub async fn maps(client: &ApiClient) -> Result<Vec<AdminMap>, ApiError> {
    client.get_auth("/admin/maps").await
}

pub async fn create_map(client: &ApiClient, map: &NewMap) -> Result<(), ApiError> {
    client.send(Method::POST, "/maps", map).await
}

pub async fn delete_map(client: &ApiClient, map_id: i64) -> Result<(), ApiError> {
    client
        .send_empty(Method::DELETE, &format!("/admin/maps/{map_id}/delete"))
        .await
}

pub async fn map_dropzones(client: &ApiClient, map_id: i64) -> Result<Vec<DropzoneTemplate>, ApiError> {
    client.get(&format!("/maps/{map_id}/dropzones")).await
}

pub async fn create_map_dropzone(
    client: &ApiClient,
    map_id: i64,
    zone: &NewDropzoneTemplate,
) -> Result<(), ApiError> {
    client
        .send(Method::POST, &format!("/maps/{map_id}/dropzones"), zone)
        .await
}

pub async fn delete_map_dropzone(client: &ApiClient, template_id: i64) -> Result<(), ApiError> {
    client
        .send_empty(Method::DELETE, &format!("/dropzones/{template_id}"))
        .await
}

pub async fn create_announcement(client: &ApiClient, draft: &AnnouncementDraft) -> Result<(), ApiError> {
    client.send(Method::POST, "/announcements", draft).await
}

pub async fn update_announcement(
    client: &ApiClient,
    announcement_id: i64,
    draft: &AnnouncementDraft,
) -> Result<(), ApiError> {
    client
        .send(Method::PUT, &format!("/announcements/{announcement_id}"), draft)
        .await
}

pub async fn delete_announcement(client: &ApiClient, announcement_id: i64) -> Result<(), ApiError> {
    client
        .send_empty(Method::DELETE, &format!("/announcements/{announcement_id}"))
        .await
}
