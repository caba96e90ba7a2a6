use yew::prelude::*;

use crate::api::types::SummaryRow;

pub const TABLE_STYLE: &str = "width:100%; border-collapse:collapse; font-size:13px;";
pub const CELL_STYLE: &str = "padding:4px 8px; border-bottom:1px solid #30363d; text-align:left;";

#[derive(Properties, PartialEq, Clone)]
pub struct SummaryTableProps {
    pub rows: Vec<SummaryRow>,
}

/// Lobby standings, in the order the server ranked them.
#[function_component(SummaryTable)]
pub fn summary_table(props: &SummaryTableProps) -> Html {
    if props.rows.is_empty() {
        return html! { <div style="opacity:0.7; font-size:13px;">{"No results yet."}</div> };
    }
    html! {
        <table style={TABLE_STYLE}>
            <thead><tr>
                <th style={CELL_STYLE}>{"#"}</th>
                <th style={CELL_STYLE}>{"Team"}</th>
                <th style={CELL_STYLE}>{"Kills"}</th>
                <th style={CELL_STYLE}>{"Points"}</th>
            </tr></thead>
            <tbody>
                { for props.rows.iter().enumerate().map(|(i, r)| html! {
                    <tr key={r.team_id}>
                        <td style={CELL_STYLE}>{ i + 1 }</td>
                        <td style={CELL_STYLE}>{ &r.team_name }</td>
                        <td style={CELL_STYLE}>{ r.kills_total }</td>
                        <td style={CELL_STYLE}>{ r.points_total }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
