// Map with claimable dropzone markers for one game.
use std::fmt::Display;
use std::future::Future;

use gloo::dialogs::alert;
use gloo::events::EventListener;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use super::legend::ZoneLegend;
use crate::api::types::Game;
use crate::api::{dropzone, ApiClient, ApiError};
use crate::model::{Board, BoardAction, DropzoneView, UserTeam, FALLBACK_MAP_WIDTH_PX};
use crate::state::{use_poll, use_session};
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct DropzoneBoardProps {
    pub game: Game,
    /// Viewer's team in this lobby, if any.
    pub team: Option<UserTeam>,
}

/// Fetches the game's zones and hands them to the board reducer.
fn reload(client: ApiClient, board: UseReducerDispatcher<Board>, game_id: i64) {
    spawn_local(async move {
        let zones = dropzone::load_snapshot(&client, game_id).await;
        clog(&format!("dropzones for game {game_id}: {} zones", zones.len()));
        board.dispatch(BoardAction::Snapshot { game_id, zones });
    });
}

pub fn action_failure(verb: &str, err: &ApiError) -> String {
    format!("Could not {verb}: {err}")
}

/// Claim/release flow. A locally rejected action is alerted and never sent;
/// otherwise the call runs, a server failure is alerted, and the board
/// resyncs either way.
fn run_board_action<R, C, F>(
    guard: Result<(), R>,
    verb: &'static str,
    call: C,
    client: ApiClient,
    board: UseReducerDispatcher<Board>,
    game_id: i64,
) where
    R: Display,
    C: FnOnce(ApiClient) -> F,
    F: Future<Output = Result<(), ApiError>> + 'static,
{
    if let Err(why) = guard {
        alert(&why.to_string());
        return;
    }
    let pending = call(client.clone());
    spawn_local(async move {
        if let Err(e) = pending.await {
            alert(&action_failure(verb, &e));
        }
        reload(client, board, game_id);
    });
}

fn measure(node: &NodeRef) -> f64 {
    node.cast::<Element>()
        .map(|el| el.client_width() as f64)
        .filter(|w| *w > 0.0)
        .unwrap_or(FALLBACK_MAP_WIDTH_PX)
}

#[function_component(DropzoneBoard)]
pub fn dropzone_board(props: &DropzoneBoardProps) -> Html {
    let ctx = use_session();
    let board = use_reducer(Board::default);
    let frame = use_node_ref();
    let width = use_state_eq(|| FALLBACK_MAP_WIDTH_PX);
    let game_id = props.game.id;

    {
        let board = board.dispatcher();
        use_effect_with(game_id, move |id| {
            board.dispatch(BoardAction::Select(Some(*id)));
            || ()
        });
    }

    let tick = {
        let client = ctx.client();
        let board = board.dispatcher();
        Callback::from(move |id: i64| reload(client.clone(), board.clone(), id))
    };
    use_poll(Some(game_id), ctx.config.dropzone_poll_ms, tick);

    // Re-measure after every render; use_state_eq keeps this from looping.
    {
        let frame = frame.clone();
        let width = width.clone();
        use_effect(move || {
            width.set(measure(&frame));
            || ()
        });
    }
    {
        let frame = frame.clone();
        let width = width.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|win| {
                EventListener::new(&win, "resize", move |_| width.set(measure(&frame)))
            });
            move || drop(listener)
        });
    }

    let team = props.team.clone();
    let on_claim = {
        let board = board.clone();
        let client = ctx.client();
        let team = team.clone();
        Callback::from(move |zone_id: i64| {
            run_board_action(
                board.check_claim(team.as_ref(), zone_id),
                "claim",
                move |c| async move { dropzone::claim(&c, game_id, zone_id).await },
                client.clone(),
                board.dispatcher(),
                game_id,
            );
        })
    };
    let on_release = {
        let board = board.clone();
        let client = ctx.client();
        let team = team.clone();
        Callback::from(move |assignment_id: i64| {
            run_board_action(
                board.check_release(team.as_ref(), assignment_id),
                "release",
                move |c| async move { dropzone::release(&c, game_id, assignment_id).await },
                client.clone(),
                board.dispatcher(),
                game_id,
            );
        })
    };

    let team_id = team.as_ref().map(|t| t.id);
    let markers = board.zones.iter().map(|zone| {
        html! {
            <ZoneMarker
                key={zone.id}
                zone={zone.clone()}
                diameter={zone.marker_diameter_px(*width)}
                team_id={team_id}
                can_claim={board.can_claim(team.as_ref(), zone.id)}
                on_claim={on_claim.clone()}
                on_release={on_release.clone()}
            />
        }
    });

    let backdrop = match props.game.image_url() {
        Some(url) => html! {
            <img src={url.to_string()} alt={props.game.label()} style="display:block; width:100%; height:auto; user-select:none;" draggable="false" />
        },
        None => {
            let label = props
                .game
                .map
                .as_ref()
                .map(|m| m.name.clone())
                .unwrap_or_else(|| "No map assigned".to_string());
            html! {
                <div style="width:100%; aspect-ratio:16 / 9; display:flex; align-items:center; justify-content:center; background:#0d1117; color:#8b949e;">{ label }</div>
            }
        }
    };

    let hint = match &team {
        None => "Register a team in this lobby to claim a dropzone.",
        Some(t) if board.team_zone(t.id).is_some() => "Your team has a dropzone. Release it to pick another.",
        Some(_) => "Pick a free dropzone for your team.",
    };

    html! {
        <div>
            <div ref={frame} style="position:relative; max-width:900px; width:100%; border:1px solid #30363d; border-radius:6px; overflow:hidden;">
                { backdrop }
                { for markers }
            </div>
            if board.zones.is_empty() {
                <div style="opacity:0.7; font-size:13px; margin-top:8px;">{"No dropzones for this map yet."}</div>
            }
            <ZoneLegend />
            <div style="font-size:12px; opacity:0.75; margin-top:6px;">{ hint }</div>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct ZoneMarkerProps {
    zone: DropzoneView,
    diameter: f64,
    team_id: Option<i64>,
    can_claim: bool,
    on_claim: Callback<i64>,
    on_release: Callback<i64>,
}

#[function_component(ZoneMarker)]
fn zone_marker(props: &ZoneMarkerProps) -> Html {
    let zone = &props.zone;
    let (fill, border) = zone.status(props.team_id).colors();
    let d = props.diameter;
    let anchor = format!(
        "position:absolute; left:{}%; top:{}%; transform:translate(-50%, -50%); display:flex; flex-direction:column; align-items:center; pointer-events:none;",
        zone.x_percent, zone.y_percent
    );
    let circle = format!(
        "width:{d}px; height:{d}px; border-radius:50%; background:{fill}; border:2px solid {border}; box-sizing:border-box;"
    );
    let claim = props.can_claim.then(|| {
        let cb = props.on_claim.clone();
        let id = zone.id;
        let onclick = Callback::from(move |_: MouseEvent| cb.emit(id));
        html! { <button {onclick} style="pointer-events:auto; font-size:11px; padding:1px 6px; background:#2ea043; color:#fff; border:none; border-radius:4px; cursor:pointer;">{"Claim"}</button> }
    });
    html! {
        <div style={anchor}>
            <div style={circle}></div>
            <div style="margin-top:2px; padding:2px 6px; background:rgba(13,17,23,0.85); border-radius:4px; font-size:11px; text-align:center; white-space:nowrap; pointer-events:auto;">
                <div style="font-weight:600;">{ format!("{} ({}/{})", zone.name, zone.team_count(), zone.capacity) }</div>
                { for zone.occupants.iter().map(|o| {
                    let mine = props.team_id == Some(o.team_id);
                    let release = mine.then(|| {
                        let cb = props.on_release.clone();
                        let assignment_id = o.assignment_id;
                        let onclick = Callback::from(move |_: MouseEvent| cb.emit(assignment_id));
                        html! { <button {onclick} style="margin-left:4px; font-size:10px; padding:0 4px; background:#f85149; color:#fff; border:none; border-radius:3px; cursor:pointer;">{"Release"}</button> }
                    });
                    html! { <div key={o.assignment_id}>{ &o.team_name }{ for release }</div> }
                }) }
                { for claim }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_alert_carries_backend_text() {
        let err = ApiError::from_status(409, r#"{"error":"Drop zone full"}"#);
        assert_eq!(action_failure("claim", &err), "Could not claim: Drop zone full");
        assert_eq!(action_failure("release", &ApiError::Unauthenticated), "Could not release: sign in required");
    }
}
