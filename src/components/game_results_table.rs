use yew::prelude::*;

use super::summary_table::{CELL_STYLE, TABLE_STYLE};
use crate::api::types::GameResult;
use crate::util::{or_dash, team_label};

#[derive(Properties, PartialEq, Clone)]
pub struct GameResultsTableProps {
    pub results: Vec<GameResult>,
}

/// Team, place, kills, points as displayed.
pub fn result_cells(r: &GameResult) -> [String; 4] {
    [
        team_label(r.team_name.as_deref(), r.team_id),
        or_dash(r.place),
        r.kills.unwrap_or(0).to_string(),
        r.points.unwrap_or(0).to_string(),
    ]
}

#[function_component(GameResultsTable)]
pub fn game_results_table(props: &GameResultsTableProps) -> Html {
    if props.results.is_empty() {
        return html! { <div style="opacity:0.7; font-size:13px;">{"Results not available yet."}</div> };
    }
    html! {
        <table style={TABLE_STYLE}>
            <thead><tr>
                { for ["Team", "Place", "Kills", "Points"].iter().map(|h| html! { <th style={CELL_STYLE}>{ *h }</th> }) }
            </tr></thead>
            <tbody>
                { for props.results.iter().map(|r| html! {
                    <tr key={r.team_id}>
                        { for result_cells(r).into_iter().map(|c| html! { <td style={CELL_STYLE}>{ c }</td> }) }
                    </tr>
                }) }
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back() {
        let r = GameResult { id: None, team_id: 9, team_name: None, place: None, kills: None, points: None };
        assert_eq!(result_cells(&r), ["#9".to_string(), "-".into(), "0".into(), "0".into()]);
    }

    #[test]
    fn present_fields_render_as_is() {
        let r = GameResult {
            id: Some(1),
            team_id: 9,
            team_name: Some("Octane Gang".into()),
            place: Some(2),
            kills: Some(7),
            points: Some(19),
        };
        assert_eq!(result_cells(&r), ["Octane Gang".to_string(), "2".into(), "7".into(), "19".into()]);
    }
}
