pub mod admin_lobbies;
pub mod admin_maps;
pub mod admin_view;
pub mod app;
pub mod dropzone_board;
pub mod field;
pub mod game_results_table;
pub mod home_view;
pub mod join_view;
pub mod legend;
pub mod lobby_view;
pub mod login_view;
pub mod nav_bar;
pub mod profile_view;
pub mod register_view;
pub mod summary_table;
pub mod team_register_form;

/// Progress of a read that the view reports on (loading spinner, error line).
#[derive(Clone, Debug, PartialEq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

pub const PANEL_STYLE: &str =
    "background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:12px 16px;";
pub const ERROR_STYLE: &str = "color:#f85149; font-size:13px;";
pub const OK_STYLE: &str = "color:#3fb950; font-size:13px;";
