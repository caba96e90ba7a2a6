//! Wire types for the scrims backend.
//!
//! Response types implement [`Validate`]; request bodies are plain
//! `Serialize` structs.

use serde::{Deserialize, Serialize};

/// Post-parse checks for values coming off the wire.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), String> {
        self.iter()
            .enumerate()
            .try_for_each(|(i, item)| item.validate().map_err(|e| format!("item {i}: {e}")))
    }
}

/// Bodies nobody reads beyond "it parsed" (`{"message": ...}`).
impl Validate for serde_json::Value {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("`{field}` is empty"))
    } else {
        Ok(())
    }
}

fn percent(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("`{field}` out of range: {value}"))
    }
}

// ---------------- Lobbies -----------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LobbyListItem {
    pub id: i64,
    pub name: String,
}

impl Validate for LobbyListItem {
    fn validate(&self) -> Result<(), String> {
        require("name", &self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LobbyDetails {
    pub id: i64,
    pub name: String,
    pub code: String,
}

impl Validate for LobbyDetails {
    fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        require("code", &self.code)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SummaryRow {
    pub team_id: i64,
    pub team_name: String,
    #[serde(default)]
    pub kills_total: i64,
    #[serde(default)]
    pub points_total: i64,
}

impl Validate for SummaryRow {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MapRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Game {
    pub id: i64,
    pub number: i64,
    #[serde(default)]
    pub lobby_id: Option<i64>,
    #[serde(default)]
    pub map: Option<MapRef>,
}

impl Game {
    pub fn image_url(&self) -> Option<&str> {
        self.map
            .as_ref()
            .and_then(|m| m.image_url.as_deref())
            .filter(|u| !u.trim().is_empty())
    }

    pub fn label(&self) -> String {
        match &self.map {
            Some(m) => format!("Game {} • {}", self.number, m.name),
            None => format!("Game {}", self.number),
        }
    }
}

impl Validate for Game {
    fn validate(&self) -> Result<(), String> {
        if self.number < 0 {
            return Err(format!("negative game number {}", self.number));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GameResult {
    #[serde(default)]
    pub id: Option<i64>,
    pub team_id: i64,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub place: Option<i64>,
    #[serde(default)]
    pub kills: Option<i64>,
    #[serde(default)]
    pub points: Option<i64>,
}

impl Validate for GameResult {
    fn validate(&self) -> Result<(), String> {
        match self.place {
            Some(p) if p < 1 => Err(format!("place must be >= 1, got {p}")),
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub players: Vec<String>,
}

impl Validate for Team {
    fn validate(&self) -> Result<(), String> {
        require("name", &self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamRegistration {
    pub name: String,
    pub player1: String,
    pub player2: String,
    pub player3: String,
}

// ---------------- Dropzones -----------------

/// One occupancy entry as the server nests it under a zone row.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OccupantRow {
    pub assignment_id: i64,
    pub team_id: i64,
    #[serde(default)]
    pub team_name: Option<String>,
}

/// A row of `GET /dropzones/for-game/{id}`.
///
/// Two shapes are in circulation: the zone id under `dropzone_id` with the
/// assignment flattened into the row, or under `id` with a nested occupant
/// list. Both deserialize into this struct.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DropzoneRow {
    #[serde(default)]
    pub dropzone_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub x_percent: f64,
    pub y_percent: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub current_teams: Option<u32>,
    #[serde(default)]
    pub assignment_id: Option<i64>,
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default, alias = "occupants")]
    pub teams: Vec<OccupantRow>,
}

fn default_radius() -> f64 {
    5.0
}

fn default_capacity() -> u32 {
    1
}

impl DropzoneRow {
    pub fn zone_id(&self) -> Option<i64> {
        self.dropzone_id.or(self.id)
    }
}

/// Dropzone rows as fetched. Rows are checked one at a time when the
/// snapshot is built, so a single bad row cannot blank the board.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DropzoneRows(pub Vec<DropzoneRow>);

impl Validate for DropzoneRows {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Validate for DropzoneRow {
    fn validate(&self) -> Result<(), String> {
        if self.zone_id().is_none() {
            return Err(format!("dropzone `{}` has no id", self.name));
        }
        percent("x_percent", self.x_percent)?;
        percent("y_percent", self.y_percent)?;
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(format!("bad radius {}", self.radius));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DropzoneTemplate {
    pub id: i64,
    pub name: String,
    pub x_percent: f64,
    pub y_percent: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

impl Validate for DropzoneTemplate {
    fn validate(&self) -> Result<(), String> {
        percent("x_percent", self.x_percent)?;
        percent("y_percent", self.y_percent)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewDropzoneTemplate {
    pub name: String,
    pub x_percent: f64,
    pub y_percent: f64,
    pub radius: f64,
    pub capacity: u32,
}

// ---------------- Auth -----------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Validate for Account {
    fn validate(&self) -> Result<(), String> {
        require("username", &self.username)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

impl Validate for LoginResponse {
    fn validate(&self) -> Result<(), String> {
        require("access_token", &self.access_token)
    }
}

/// Partial account update; unset fields are left alone by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AccountPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.discord.is_none() && self.password.is_none()
    }
}

// ---------------- Announcements -----------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub prize: String,
}

impl Validate for Announcement {
    fn validate(&self) -> Result<(), String> {
        require("title", &self.title)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AnnouncementDraft {
    pub title: String,
    pub time: String,
    pub prize: String,
}

// ---------------- Admin -----------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Validate for AdminUser {
    fn validate(&self) -> Result<(), String> {
        require("username", &self.username)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminGame {
    pub id: i64,
    pub number: i64,
    #[serde(default)]
    pub map_name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminLobby {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub games: Vec<AdminGame>,
}

impl Validate for AdminLobby {
    fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        self.teams.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminMap {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub dropzones_count: i64,
}

impl Validate for AdminMap {
    fn validate(&self) -> Result<(), String> {
        require("name", &self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewLobby {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewGame {
    pub number: i64,
    pub map_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewMap {
    pub name: String,
    pub image_url: String,
}

/// Result row as entered on the admin page. `team_id` is only sent when
/// creating; updates address the team in the path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    pub place: i64,
    pub kills: i64,
    pub points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_without_map_is_accepted() {
        let g: Game = serde_json::from_str(r#"{"id":4,"number":2,"lobby_id":1,"map":null}"#).unwrap();
        assert!(g.validate().is_ok());
        assert_eq!(g.image_url(), None);
        assert_eq!(g.label(), "Game 2");
    }

    #[test]
    fn game_label_includes_map_name() {
        let g: Game = serde_json::from_str(
            r#"{"id":4,"number":3,"map":{"id":1,"name":"World's Edge","image_url":"/static/maps/we.png"}}"#,
        )
        .unwrap();
        assert_eq!(g.label(), "Game 3 • World's Edge");
        assert_eq!(g.image_url(), Some("/static/maps/we.png"));
    }

    #[test]
    fn dropzone_row_flat_shape() {
        let row: DropzoneRow = serde_json::from_str(
            r#"{"dropzone_id":7,"assignment_id":70,"name":"Fragment","x_percent":40.5,
                "y_percent":22,"radius":12,"capacity":2,"team_id":3,"team_name":"Wraiths"}"#,
        )
        .unwrap();
        assert_eq!(row.zone_id(), Some(7));
        assert_eq!(row.team_id, Some(3));
        assert!(row.teams.is_empty());
        assert!(row.validate().is_ok());
    }

    #[test]
    fn dropzone_row_nested_shape_with_defaults() {
        let row: DropzoneRow = serde_json::from_str(
            r#"{"id":9,"name":"Lava Siphon","x_percent":70,"y_percent":80,
                "occupants":[{"assignment_id":91,"team_id":5,"team_name":"Pathfinders"}]}"#,
        )
        .unwrap();
        assert_eq!(row.zone_id(), Some(9));
        assert_eq!(row.radius, 5.0);
        assert_eq!(row.capacity, 1);
        assert_eq!(row.teams.len(), 1);
    }

    #[test]
    fn dropzone_row_rejects_out_of_range_coordinates() {
        let row: DropzoneRow =
            serde_json::from_str(r#"{"id":1,"name":"Off map","x_percent":140,"y_percent":10}"#).unwrap();
        assert!(row.validate().is_err());
        let row: DropzoneRow =
            serde_json::from_str(r#"{"name":"Anon","x_percent":10,"y_percent":10}"#).unwrap();
        assert!(row.validate().is_err());
    }

    #[test]
    fn vec_validation_reports_index() {
        let teams = vec![
            Team { id: 1, name: "A".into(), players: vec![] },
            Team { id: 2, name: " ".into(), players: vec![] },
        ];
        let err = teams.validate().unwrap_err();
        assert!(err.starts_with("item 1:"), "{err}");
    }

    #[test]
    fn account_patch_skips_unset_fields() {
        let patch = AccountPatch { discord: Some("wraith#0001".into()), ..Default::default() };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"discord":"wraith#0001"}"#);
        assert!(AccountPatch::default().is_empty());
    }

    #[test]
    fn result_entry_omits_team_on_update() {
        let e = ResultEntry { team_id: None, place: 1, kills: 8, points: 20 };
        assert_eq!(serde_json::to_string(&e).unwrap(), r#"{"place":1,"kills":8,"points":20}"#);
    }
}
