//! Dropzone board model.
//!
//! Everything here is derived from the latest server snapshot: the board never
//! edits occupancy locally, it only replaces the snapshot and answers
//! questions about it (what colour is a zone, may this team claim it).

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;
use yew::Reducible;

use crate::api::types::{DropzoneRow, Team, Validate};
use crate::util::{cwarn, team_label};

/// Stored radii above this are pixels, at or below it percent of map width.
pub const RADIUS_PX_THRESHOLD: f64 = 20.0;
pub const MIN_MARKER_PX: f64 = 4.0;
/// Map frame max width; used until the container has been measured.
pub const FALLBACK_MAP_WIDTH_PX: f64 = 900.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Occupant {
    pub assignment_id: i64,
    pub team_id: i64,
    pub team_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropzoneView {
    pub id: i64,
    pub name: String,
    pub x_percent: f64,
    pub y_percent: f64,
    /// Raw stored radius; see [`marker_diameter_px`] for the unit rule.
    pub radius: f64,
    pub capacity: u32,
    pub current_team_count: u32,
    pub occupants: Vec<Occupant>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneFill {
    Empty,
    PartiallyOccupied,
    Full,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneStatus {
    pub fill: ZoneFill,
    /// The viewer's team is among the occupants.
    pub mine: bool,
}

impl ZoneStatus {
    /// (background, border) for the marker.
    pub fn colors(&self) -> (&'static str, &'static str) {
        if self.mine {
            return ("rgba(46,160,67,0.80)", "#2ea043");
        }
        match self.fill {
            ZoneFill::Empty => ("rgba(255,255,255,0.70)", "rgba(0,0,0,0.25)"),
            ZoneFill::PartiallyOccupied => ("rgba(240,136,62,0.75)", "#f0883e"),
            ZoneFill::Full => ("rgba(248,81,73,0.75)", "#b62324"),
        }
    }
}

impl DropzoneView {
    fn from_row(row: &DropzoneRow, id: i64) -> Self {
        let mut zone = Self {
            id,
            name: row.name.clone(),
            x_percent: row.x_percent,
            y_percent: row.y_percent,
            radius: row.radius,
            capacity: row.capacity,
            current_team_count: 0,
            occupants: Vec::new(),
        };
        for o in &row.teams {
            zone.push_occupant(Occupant {
                assignment_id: o.assignment_id,
                team_id: o.team_id,
                team_name: team_label(o.team_name.as_deref(), o.team_id),
            });
        }
        zone.absorb_flat_occupant(row);
        zone.current_team_count = row.current_teams.unwrap_or(0);
        zone
    }

    fn absorb_flat_occupant(&mut self, row: &DropzoneRow) {
        if let (Some(assignment_id), Some(team_id)) = (row.assignment_id, row.team_id) {
            self.push_occupant(Occupant {
                assignment_id,
                team_id,
                team_name: team_label(row.team_name.as_deref(), team_id),
            });
        }
    }

    fn push_occupant(&mut self, occupant: Occupant) {
        if !self.occupants.iter().any(|o| o.assignment_id == occupant.assignment_id) {
            self.occupants.push(occupant);
        }
    }

    pub fn team_count(&self) -> u32 {
        self.current_team_count.max(self.occupants.len() as u32)
    }

    pub fn is_full(&self) -> bool {
        self.team_count() >= self.capacity
    }

    pub fn fill(&self) -> ZoneFill {
        let n = self.team_count();
        if n == 0 {
            ZoneFill::Empty
        } else if n >= self.capacity {
            ZoneFill::Full
        } else {
            ZoneFill::PartiallyOccupied
        }
    }

    pub fn occupied_by(&self, team_id: i64) -> bool {
        self.occupants.iter().any(|o| o.team_id == team_id)
    }

    pub fn status(&self, team_id: Option<i64>) -> ZoneStatus {
        ZoneStatus {
            fill: self.fill(),
            mine: team_id.is_some_and(|t| self.occupied_by(t)),
        }
    }

    pub fn marker_diameter_px(&self, container_width_px: f64) -> f64 {
        marker_diameter_px(self.radius, container_width_px)
    }
}

/// Stored radius → rendered diameter in px.
///
/// Two data shapes exist: large values are already pixels, small ones are a
/// percentage of the rendered map width.
pub fn marker_diameter_px(radius: f64, container_width_px: f64) -> f64 {
    let px = if radius > RADIUS_PX_THRESHOLD {
        radius
    } else {
        let width = if container_width_px > 0.0 {
            container_width_px
        } else {
            FALLBACK_MAP_WIDTH_PX
        };
        radius / 100.0 * width
    };
    px.max(MIN_MARKER_PX)
}

/// Server rows → board snapshot, unique by zone id.
///
/// The first row for an id defines the zone; repeated rows only contribute a
/// flattened occupant the zone doesn't list yet. Rows that fail validation
/// (no id, position off the map, bad radius) are logged and dropped.
pub fn normalize_snapshot(rows: Vec<DropzoneRow>) -> Vec<DropzoneView> {
    let mut zones: Vec<DropzoneView> = Vec::with_capacity(rows.len());
    let mut index: HashMap<i64, usize> = HashMap::new();
    for row in &rows {
        if let Err(e) = row.validate() {
            cwarn(&format!("skipping dropzone row: {e}"));
            continue;
        }
        let Some(id) = row.zone_id() else { continue };
        match index.get(&id) {
            Some(&i) => zones[i].absorb_flat_occupant(row),
            None => {
                index.insert(id, zones.len());
                zones.push(DropzoneView::from_row(row, id));
            }
        }
    }
    zones
}

// ---------------- Viewer team -----------------

#[derive(Clone, Debug, PartialEq)]
pub struct UserTeam {
    pub id: i64,
    pub name: String,
    pub players: Vec<String>,
}

impl UserTeam {
    /// The lobby team listing `username` as a player.
    pub fn find(teams: &[Team], username: &str) -> Option<Self> {
        teams
            .iter()
            .find(|t| t.players.iter().any(|p| p.eq_ignore_ascii_case(username)))
            .map(|t| UserTeam {
                id: t.id,
                name: t.name.clone(),
                players: t.players.clone(),
            })
    }
}

// ---------------- Claim rules -----------------

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClaimRejection {
    #[error("you are not in a team in this lobby")]
    NoTeam,
    #[error("your team already holds {0}")]
    AlreadyClaimed(String),
    #[error("that zone is no longer on the map")]
    UnknownZone,
    #[error("{0} is full")]
    ZoneFull(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReleaseRejection {
    #[error("you are not in a team in this lobby")]
    NoTeam,
    #[error("that assignment no longer exists")]
    UnknownAssignment,
    #[error("that zone belongs to another team")]
    NotYourTeam,
}

/// Snapshot of one game's dropzones as last seen from the server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    pub game_id: Option<i64>,
    pub zones: Vec<DropzoneView>,
    /// Bumped on every applied snapshot.
    pub version: u64,
}

impl Board {
    pub fn zone(&self, zone_id: i64) -> Option<&DropzoneView> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    /// The zone the team holds in this game, if any.
    pub fn team_zone(&self, team_id: i64) -> Option<&DropzoneView> {
        self.zones.iter().find(|z| z.occupied_by(team_id))
    }

    pub fn check_claim(&self, team: Option<&UserTeam>, zone_id: i64) -> Result<(), ClaimRejection> {
        let team = team.ok_or(ClaimRejection::NoTeam)?;
        if let Some(held) = self.team_zone(team.id) {
            return Err(ClaimRejection::AlreadyClaimed(held.name.clone()));
        }
        let zone = self.zone(zone_id).ok_or(ClaimRejection::UnknownZone)?;
        if zone.is_full() {
            return Err(ClaimRejection::ZoneFull(zone.name.clone()));
        }
        Ok(())
    }

    pub fn can_claim(&self, team: Option<&UserTeam>, zone_id: i64) -> bool {
        self.check_claim(team, zone_id).is_ok()
    }

    pub fn check_release(&self, team: Option<&UserTeam>, assignment_id: i64) -> Result<(), ReleaseRejection> {
        let team = team.ok_or(ReleaseRejection::NoTeam)?;
        let occupant = self
            .zones
            .iter()
            .flat_map(|z| z.occupants.iter())
            .find(|o| o.assignment_id == assignment_id)
            .ok_or(ReleaseRejection::UnknownAssignment)?;
        if occupant.team_id != team.id {
            return Err(ReleaseRejection::NotYourTeam);
        }
        Ok(())
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum BoardAction {
    /// New game selected: forget the previous snapshot.
    Select(Option<i64>),
    /// Fresh rows for `game_id`; replaces the snapshot wholesale.
    Snapshot { game_id: i64, zones: Vec<DropzoneView> },
}

impl Reducible for Board {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use BoardAction::*;
        match action {
            Select(game_id) => {
                if self.game_id == game_id {
                    return self;
                }
                Rc::new(Board { game_id, zones: Vec::new(), version: self.version + 1 })
            }
            Snapshot { game_id, zones } => {
                // Late answer for a game that is no longer on screen.
                if self.game_id != Some(game_id) {
                    return self;
                }
                Rc::new(Board { game_id: Some(game_id), zones, version: self.version + 1 })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::OccupantRow;

    fn row(id: i64, name: &str, capacity: u32) -> DropzoneRow {
        DropzoneRow {
            dropzone_id: Some(id),
            id: None,
            name: name.to_string(),
            x_percent: 50.0,
            y_percent: 50.0,
            radius: 5.0,
            capacity,
            current_teams: None,
            assignment_id: None,
            team_id: None,
            team_name: None,
            teams: Vec::new(),
        }
    }

    fn with_team(mut r: DropzoneRow, assignment_id: i64, team_id: i64, name: &str) -> DropzoneRow {
        r.assignment_id = Some(assignment_id);
        r.team_id = Some(team_id);
        r.team_name = Some(name.to_string());
        r
    }

    fn team(id: i64) -> UserTeam {
        UserTeam { id, name: format!("Team {id}"), players: vec![] }
    }

    fn board(zones: Vec<DropzoneView>) -> Board {
        let b = Rc::new(Board::default()).reduce(BoardAction::Select(Some(1)));
        (*b.reduce(BoardAction::Snapshot { game_id: 1, zones })).clone()
    }

    #[test]
    fn normalize_keeps_first_occurrence_per_id() {
        let mut dup = row(1, "Renamed", 9);
        dup.x_percent = 10.0;
        let zones = normalize_snapshot(vec![row(1, "Skyhook", 2), row(2, "Epicenter", 1), dup]);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name, "Skyhook");
        assert_eq!(zones[0].capacity, 2);
        assert_eq!(zones[0].x_percent, 50.0);
        let mut ids: Vec<i64> = zones.iter().map(|z| z.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn normalize_never_yields_duplicate_ids() {
        let rows: Vec<DropzoneRow> = (0..40).map(|i| row(i % 7, "z", 2)).collect();
        let zones = normalize_snapshot(rows);
        let mut ids: Vec<i64> = zones.iter().map(|z| z.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), zones.len());
        assert_eq!(zones.len(), 7);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let body = r#"[
            {"id": 1, "name": "Skyhook", "x_percent": 40, "y_percent": 20},
            {"id": 2, "name": "Edge", "x_percent": 100.5, "y_percent": 20},
            {"name": "Nameless", "x_percent": 10, "y_percent": 10}
        ]"#;
        let rows: crate::api::types::DropzoneRows = crate::api::decode(body).unwrap();
        assert_eq!(rows.0.len(), 3);
        let zones = normalize_snapshot(rows.0);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].id, 1);
        assert_eq!(zones[0].name, "Skyhook");
    }

    #[test]
    fn bad_radius_row_does_not_hide_neighbours() {
        let mut bad = row(2, "Broken", 1);
        bad.radius = -3.0;
        let zones = normalize_snapshot(vec![row(1, "Skyhook", 1), bad, row(3, "Dome", 2)]);
        let ids: Vec<i64> = zones.iter().map(|z| z.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn normalize_merges_flat_occupants_of_repeated_rows() {
        let zones = normalize_snapshot(vec![
            with_team(row(4, "Fragment", 2), 40, 1, "Wraiths"),
            with_team(row(4, "Fragment", 2), 41, 2, "Bangalores"),
            with_team(row(4, "Fragment", 2), 41, 2, "Bangalores"),
        ]);
        assert_eq!(zones.len(), 1);
        let teams: Vec<i64> = zones[0].occupants.iter().map(|o| o.team_id).collect();
        assert_eq!(teams, vec![1, 2]);
        assert_eq!(zones[0].fill(), ZoneFill::Full);
    }

    #[test]
    fn normalize_reads_nested_occupants_and_falls_back_to_id_name() {
        let mut r = row(3, "Thermal", 3);
        r.dropzone_id = None;
        r.id = Some(3);
        r.teams = vec![OccupantRow { assignment_id: 30, team_id: 8, team_name: None }];
        r.current_teams = Some(2);
        let zones = normalize_snapshot(vec![r]);
        assert_eq!(zones[0].occupants[0].team_name, "#8");
        assert_eq!(zones[0].team_count(), 2);
        assert_eq!(zones[0].fill(), ZoneFill::PartiallyOccupied);
    }

    #[test]
    fn radius_at_or_below_threshold_is_percent_of_width() {
        assert_eq!(marker_diameter_px(12.0, 1000.0), 120.0);
        assert_eq!(marker_diameter_px(20.0, 500.0), 100.0);
    }

    #[test]
    fn radius_above_threshold_is_pixels() {
        assert_eq!(marker_diameter_px(130.0, 1000.0), 130.0);
        assert_eq!(marker_diameter_px(130.0, 320.0), 130.0);
        assert_eq!(marker_diameter_px(21.0, 5000.0), 21.0);
    }

    #[test]
    fn tiny_or_unmeasured_markers() {
        assert_eq!(marker_diameter_px(0.1, 1000.0), MIN_MARKER_PX);
        assert_eq!(marker_diameter_px(10.0, 0.0), 90.0);
    }

    #[test]
    fn capacity_one_claim_scenario() {
        let a = team(1);
        let b = team(2);
        let before = board(normalize_snapshot(vec![row(5, "Harvester", 1)]));
        assert_eq!(before.zones[0].status(Some(a.id)), ZoneStatus { fill: ZoneFill::Empty, mine: false });
        assert!(before.can_claim(Some(&a), 5));

        // Server confirms A's claim on the next poll.
        let after = board(normalize_snapshot(vec![with_team(row(5, "Harvester", 1), 50, a.id, "A")]));
        let z = &after.zones[0];
        assert_eq!(z.status(Some(a.id)), ZoneStatus { fill: ZoneFill::Full, mine: true });
        assert_eq!(z.status(Some(b.id)), ZoneStatus { fill: ZoneFill::Full, mine: false });
        assert_eq!(after.check_claim(Some(&b), 5), Err(ClaimRejection::ZoneFull("Harvester".into())));
    }

    #[test]
    fn team_holding_a_zone_cannot_claim_another() {
        let a = team(1);
        let b = board(normalize_snapshot(vec![
            with_team(row(1, "Skyhook", 2), 10, a.id, "A"),
            row(2, "Epicenter", 2),
            row(3, "Overlook", 2),
        ]));
        for z in &b.zones {
            assert!(!b.can_claim(Some(&a), z.id));
        }
        assert_eq!(b.check_claim(Some(&a), 2), Err(ClaimRejection::AlreadyClaimed("Skyhook".into())));
        // Another team still sees the non-full zones as claimable.
        let other = team(2);
        assert!(b.can_claim(Some(&other), 1));
        assert!(b.can_claim(Some(&other), 2));
    }

    #[test]
    fn free_team_is_offered_every_non_full_zone() {
        let a = team(7);
        let b = board(normalize_snapshot(vec![
            row(1, "One", 1),
            with_team(row(2, "Two", 1), 20, 3, "X"),
            with_team(row(3, "Three", 2), 30, 3, "X"),
        ]));
        let offered: Vec<i64> = b.zones.iter().filter(|z| b.can_claim(Some(&a), z.id)).map(|z| z.id).collect();
        assert_eq!(offered, vec![1, 3]);
    }

    #[test]
    fn claim_without_team_or_unknown_zone() {
        let b = board(normalize_snapshot(vec![row(1, "One", 1)]));
        assert_eq!(b.check_claim(None, 1), Err(ClaimRejection::NoTeam));
        assert_eq!(b.check_claim(Some(&team(1)), 99), Err(ClaimRejection::UnknownZone));
    }

    #[test]
    fn release_only_own_assignment() {
        let b = board(normalize_snapshot(vec![
            with_team(row(1, "One", 2), 10, 1, "A"),
            with_team(row(1, "One", 2), 11, 2, "B"),
        ]));
        assert_eq!(b.check_release(Some(&team(1)), 10), Ok(()));
        assert_eq!(b.check_release(Some(&team(1)), 11), Err(ReleaseRejection::NotYourTeam));
        assert_eq!(b.check_release(Some(&team(1)), 12), Err(ReleaseRejection::UnknownAssignment));
        assert_eq!(b.check_release(None, 10), Err(ReleaseRejection::NoTeam));
    }

    #[test]
    fn snapshot_replaces_rather_than_merges() {
        let b = board(normalize_snapshot(vec![row(1, "One", 1), row(2, "Two", 1)]));
        let b = Rc::new(b).reduce(BoardAction::Snapshot {
            game_id: 1,
            zones: normalize_snapshot(vec![row(2, "Two", 1)]),
        });
        assert_eq!(b.zones.len(), 1);
        assert_eq!(b.zones[0].id, 2);
    }

    #[test]
    fn released_zone_is_no_longer_mine() {
        let a = team(7);
        let held = board(normalize_snapshot(vec![
            with_team(row(1, "Skyhook", 1), 70, a.id, "A"),
            row(2, "Epicenter", 2),
            with_team(row(3, "Dome", 1), 71, 8, "B"),
        ]));
        assert!(held.zones[0].status(Some(a.id)).mine);
        assert!(!held.can_claim(Some(&a), 2));

        let released = Rc::new(held).reduce(BoardAction::Snapshot {
            game_id: 1,
            zones: normalize_snapshot(vec![
                row(1, "Skyhook", 1),
                row(2, "Epicenter", 2),
                with_team(row(3, "Dome", 1), 71, 8, "B"),
            ]),
        });
        assert!(!released.zones[0].status(Some(a.id)).mine);
        assert!(released.team_zone(a.id).is_none());
        for z in released.zones.iter().filter(|z| !z.is_full()) {
            assert!(released.can_claim(Some(&a), z.id), "zone {} should be claimable", z.name);
        }
        assert!(!released.can_claim(Some(&a), 3));
    }

    #[test]
    fn stale_snapshot_for_previous_game_is_dropped() {
        let b = Rc::new(Board::default()).reduce(BoardAction::Select(Some(1)));
        let b = b.reduce(BoardAction::Select(Some(2)));
        assert!(b.zones.is_empty());
        let v = b.version;
        let b = b.reduce(BoardAction::Snapshot { game_id: 1, zones: normalize_snapshot(vec![row(1, "Old", 1)]) });
        assert_eq!(b.game_id, Some(2));
        assert!(b.zones.is_empty());
        assert_eq!(b.version, v);
    }

    #[test]
    fn user_team_lookup_by_player_name() {
        let teams = vec![
            Team { id: 1, name: "Wraiths".into(), players: vec!["void".into(), "rift".into(), "echo".into()] },
            Team { id: 2, name: "Lifelines".into(), players: vec!["Medic".into()] },
        ];
        assert_eq!(UserTeam::find(&teams, "medic").map(|t| t.id), Some(2));
        assert_eq!(UserTeam::find(&teams, "rift").map(|t| t.name), Some("Wraiths".to_string()));
        assert!(UserTeam::find(&teams, "nobody").is_none());
    }

    #[test]
    fn mine_color_overrides_fill() {
        let s = ZoneStatus { fill: ZoneFill::Full, mine: true };
        assert_eq!(s.colors().1, "#2ea043");
        let s = ZoneStatus { fill: ZoneFill::Empty, mine: false };
        assert_ne!(s.colors().1, "#2ea043");
    }
}
