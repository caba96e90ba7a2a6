//! Public lobby, game and team endpoints.

use gloo::net::http::Method;

use super::types::{
    Announcement, Game, GameResult, LobbyDetails, LobbyListItem, SummaryRow, Team, TeamRegistration,
};
use super::{ApiClient, ApiError};

pub fn details_path(lobby_id: i64) -> String {
    format!("/lobbies/{lobby_id}/details")
}

pub fn summary_path(lobby_id: i64) -> String {
    format!("/lobbies/{lobby_id}/results/summary")
}

pub fn games_path(lobby_id: i64) -> String {
    format!("/lobbies/{lobby_id}/games")
}

pub fn game_results_path(game_id: i64) -> String {
    format!("/games/{game_id}/results")
}

pub fn teams_path(lobby_id: i64) -> String {
    format!("/lobbies/{lobby_id}/teams")
}

pub fn by_code_path(code: &str) -> String {
    format!("/lobbies/by-code/{}", crate::util::normalize_code(code))
}

pub async fn list(client: &ApiClient) -> Result<Vec<LobbyListItem>, ApiError> {
    client.get("/lobbies/").await
}

pub async fn details(client: &ApiClient, lobby_id: i64) -> Result<LobbyDetails, ApiError> {
    client.get(&details_path(lobby_id)).await
}

pub async fn by_code(client: &ApiClient, code: &str) -> Result<LobbyDetails, ApiError> {
    client.get(&by_code_path(code)).await
}

pub async fn summary(client: &ApiClient, lobby_id: i64) -> Result<Vec<SummaryRow>, ApiError> {
    client.get(&summary_path(lobby_id)).await
}

/// Games of a lobby, ordered by game number.
pub async fn games(client: &ApiClient, lobby_id: i64) -> Result<Vec<Game>, ApiError> {
    let mut games: Vec<Game> = client.get(&games_path(lobby_id)).await?;
    sort_games(&mut games);
    Ok(games)
}

pub fn sort_games(games: &mut [Game]) {
    games.sort_by_key(|g| (g.number, g.id));
}

pub async fn game_results(client: &ApiClient, game_id: i64) -> Result<Vec<GameResult>, ApiError> {
    client.get(&game_results_path(game_id)).await
}

pub async fn teams(client: &ApiClient, lobby_id: i64) -> Result<Vec<Team>, ApiError> {
    client.get(&teams_path(lobby_id)).await
}

pub async fn register_team(
    client: &ApiClient,
    lobby_id: i64,
    body: &TeamRegistration,
) -> Result<(), ApiError> {
    client
        .send(Method::POST, &format!("/lobbies/{lobby_id}/teams/register"), body)
        .await
}

pub async fn announcements(client: &ApiClient) -> Result<Vec<Announcement>, ApiError> {
    client.get("/announcements").await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: i64, number: i64) -> Game {
        Game { id, number, lobby_id: Some(1), map: None }
    }

    #[test]
    fn paths_match_backend_routes() {
        assert_eq!(details_path(3), "/lobbies/3/details");
        assert_eq!(summary_path(3), "/lobbies/3/results/summary");
        assert_eq!(games_path(3), "/lobbies/3/games");
        assert_eq!(game_results_path(12), "/games/12/results");
        assert_eq!(teams_path(3), "/lobbies/3/teams");
    }

    #[test]
    fn by_code_path_normalizes_code() {
        assert_eq!(by_code_path(" xk42qp "), "/lobbies/by-code/XK42QP");
    }

    #[test]
    fn games_sort_by_number() {
        let mut gs = vec![game(10, 3), game(11, 1), game(12, 2)];
        sort_games(&mut gs);
        let numbers: Vec<i64> = gs.iter().map(|g| g.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
