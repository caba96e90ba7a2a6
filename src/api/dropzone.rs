//! Dropzone occupancy for a game: snapshot loading and claim/release calls.

use gloo::net::http::Method;

use super::types::{DropzoneRow, DropzoneRows};
use super::{ApiClient, ApiError};
use crate::model::{DropzoneView, normalize_snapshot};
use crate::util::cwarn;

pub fn for_game_path(game_id: i64) -> String {
    format!("/dropzones/for-game/{game_id}")
}

pub fn claim_path(game_id: i64, zone_id: i64) -> String {
    format!("/games/{game_id}/dropzones/assign-by-template/{zone_id}")
}

pub fn release_path(game_id: i64, assignment_id: i64) -> String {
    format!("/games/{game_id}/dropzones/{assignment_id}/remove")
}

pub async fn fetch_rows(client: &ApiClient, game_id: i64) -> Result<Vec<DropzoneRow>, ApiError> {
    let rows: DropzoneRows = client.get(&for_game_path(game_id)).await?;
    Ok(rows.0)
}

/// Fresh, deduplicated snapshot for a game. Fetch errors yield an empty
/// board; malformed rows are skipped individually.
pub async fn load_snapshot(client: &ApiClient, game_id: i64) -> Vec<DropzoneView> {
    match fetch_rows(client, game_id).await {
        Ok(rows) => normalize_snapshot(rows),
        Err(e) => {
            cwarn(&format!("dropzones for game {game_id}: {e}"));
            Vec::new()
        }
    }
}

pub async fn claim(client: &ApiClient, game_id: i64, zone_id: i64) -> Result<(), ApiError> {
    client
        .send_empty(Method::POST, &claim_path(game_id, zone_id))
        .await
}

pub async fn release(client: &ApiClient, game_id: i64, assignment_id: i64) -> Result<(), ApiError> {
    client
        .send_empty(Method::DELETE, &release_path(game_id, assignment_id))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropzone_paths() {
        assert_eq!(for_game_path(8), "/dropzones/for-game/8");
        assert_eq!(claim_path(8, 31), "/games/8/dropzones/assign-by-template/31");
        assert_eq!(release_path(8, 402), "/games/8/dropzones/402/remove");
    }
}
