use yew::prelude::*;

use crate::model::{ZoneFill, ZoneStatus};

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub fill: &'static str,
    pub border: &'static str,
    pub label: &'static str,
}

#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    html! { <div style="display:flex; align-items:center; gap:6px;"> <span style={format!("display:inline-block; width:12px; height:12px; background:{}; border:2px solid {}; border-radius:999px;", props.fill, props.border)}></span> <span>{ props.label }</span> </div> }
}

/// Colour key for the dropzone markers.
#[function_component(ZoneLegend)]
pub fn zone_legend() -> Html {
    let rows = [
        (ZoneStatus { fill: ZoneFill::Empty, mine: false }, "Free"),
        (ZoneStatus { fill: ZoneFill::PartiallyOccupied, mine: false }, "Partly taken"),
        (ZoneStatus { fill: ZoneFill::Full, mine: false }, "Full"),
        (ZoneStatus { fill: ZoneFill::Full, mine: true }, "Your team"),
    ];
    html! {
        <div style="display:flex; gap:14px; flex-wrap:wrap; font-size:12px; margin-top:8px; opacity:0.9;">
            { for rows.iter().map(|(status, label)| {
                let (fill, border) = status.colors();
                html! { <LegendRow fill={fill} border={border} label={*label} /> }
            }) }
        </div>
    }
}
