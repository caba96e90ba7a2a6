use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use yew::prelude::*;

use super::dropzone_board::DropzoneBoard;
use super::game_results_table::GameResultsTable;
use super::summary_table::SummaryTable;
use super::team_register_form::TeamRegisterForm;
use super::PANEL_STYLE;
use crate::api::lobby;
use crate::api::types::{Game, GameResult, LobbyDetails, SummaryRow, Team};
use crate::api::ApiClient;
use crate::model::UserTeam;
use crate::state::{use_poll, use_session};
use crate::util::{clog, cwarn};

const COPIED_MS: u32 = 1_200;

#[derive(Properties, PartialEq, Clone)]
pub struct LobbyViewProps {
    pub lobby_id: i64,
}

pub fn lobby_title(details: Option<&LobbyDetails>, lobby_id: i64) -> String {
    match details {
        Some(d) => format!("Lobby «{}»", d.name),
        None => format!("Lobby #{lobby_id}"),
    }
}

/// Keeps the current game if it is still listed, otherwise picks the first.
pub fn pick_game(current: Option<i64>, games: &[Game]) -> Option<i64> {
    current
        .filter(|id| games.iter().any(|g| g.id == *id))
        .or_else(|| games.first().map(|g| g.id))
}

// ---------------- Game selection -----------------

/// Selected game of the lobby page. A reducer so that a fresh game list is
/// reconciled against the selection current at dispatch time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamePick {
    pub selected: Option<i64>,
}

pub enum GamePickAction {
    /// Game list (re)loaded.
    Listed(Vec<Game>),
    Choose(i64),
}

impl Reducible for GamePick {
    type Action = GamePickAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GamePickAction::*;
        let selected = match action {
            Listed(games) => pick_game(self.selected, &games),
            Choose(id) => Some(id),
        };
        if selected == self.selected {
            return self;
        }
        Rc::new(GamePick { selected })
    }
}

fn load_teams(client: ApiClient, lobby_id: i64, teams: UseStateHandle<Vec<Team>>) {
    spawn_local(async move {
        match lobby::teams(&client, lobby_id).await {
            Ok(list) => teams.set(list),
            Err(e) => {
                cwarn(&format!("teams for lobby {lobby_id}: {e}"));
                teams.set(Vec::new());
            }
        }
    });
}

fn load_summary(client: ApiClient, lobby_id: i64, summary: UseStateHandle<Vec<SummaryRow>>) {
    spawn_local(async move {
        match lobby::summary(&client, lobby_id).await {
            Ok(rows) => summary.set(rows),
            Err(e) => {
                cwarn(&format!("summary for lobby {lobby_id}: {e}"));
                summary.set(Vec::new());
            }
        }
    });
}

#[function_component(LobbyView)]
pub fn lobby_view(props: &LobbyViewProps) -> Html {
    let ctx = use_session();
    let lobby_id = props.lobby_id;
    let details = use_state(|| None::<LobbyDetails>);
    let games = use_state(Vec::<Game>::new);
    let pick = use_reducer(GamePick::default);
    let selected = pick.selected;
    let summary = use_state(Vec::<SummaryRow>::new);
    let results = use_state(Vec::<GameResult>::new);
    let teams = use_state(Vec::<Team>::new);
    let copied = use_state(|| false);
    let copy_timer = use_mut_ref(|| None::<Timeout>);

    // Details, games and teams once per lobby
    {
        let client = ctx.client();
        let (details, games, pick, teams) =
            (details.clone(), games.clone(), pick.dispatcher(), teams.clone());
        use_effect_with(lobby_id, move |&lobby_id| {
            {
                let client = client.clone();
                spawn_local(async move {
                    match lobby::details(&client, lobby_id).await {
                        Ok(d) => details.set(Some(d)),
                        Err(e) => cwarn(&format!("lobby {lobby_id}: {e}")),
                    }
                    let list = lobby::games(&client, lobby_id).await.unwrap_or_else(|e| {
                        cwarn(&format!("games for lobby {lobby_id}: {e}"));
                        Vec::new()
                    });
                    pick.dispatch(GamePickAction::Listed(list.clone()));
                    games.set(list);
                });
            }
            load_teams(client, lobby_id, teams);
            || ()
        });
    }

    // Summary and the selected game's results, every 30 s
    let tick = {
        let client = ctx.client();
        let (summary, results) = (summary.clone(), results.clone());
        Callback::from(move |(lobby_id, game_id): (i64, Option<i64>)| {
            clog(&format!("refreshing results for lobby {lobby_id}"));
            load_summary(client.clone(), lobby_id, summary.clone());
            let Some(game_id) = game_id else {
                results.set(Vec::new());
                return;
            };
            let client = client.clone();
            let results = results.clone();
            spawn_local(async move {
                match lobby::game_results(&client, game_id).await {
                    Ok(rows) => results.set(rows),
                    Err(e) => {
                        cwarn(&format!("results for game {game_id}: {e}"));
                        results.set(Vec::new());
                    }
                }
            });
        })
    };
    use_poll(Some((lobby_id, selected)), ctx.config.summary_poll_ms, tick);

    let on_copy = {
        let details = details.clone();
        let copied = copied.clone();
        let copy_timer = copy_timer.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(code) = details.as_ref().map(|d| d.code.clone()) else { return };
            let Some(win) = web_sys::window() else { return };
            let promise: js_sys::Promise = win.navigator().clipboard().write_text(&code);
            let copied = copied.clone();
            let copy_timer = copy_timer.clone();
            spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    cwarn(&format!("clipboard: {e:?}"));
                    return;
                }
                copied.set(true);
                let reset = copied.clone();
                *copy_timer.borrow_mut() = Some(Timeout::new(COPIED_MS, move || reset.set(false)));
            });
        })
    };

    let on_registered = {
        let client = ctx.client();
        let (teams, summary) = (teams.clone(), summary.clone());
        Callback::from(move |_| {
            load_teams(client.clone(), lobby_id, teams.clone());
            load_summary(client.clone(), lobby_id, summary.clone());
        })
    };

    let user_team = ctx
        .session
        .username()
        .and_then(|name| UserTeam::find(&teams, name));
    let current_game = selected.and_then(|id| games.iter().find(|g| g.id == id).cloned());

    let game_buttons = games.iter().map(|g| {
        let active = selected == Some(g.id);
        let pick = pick.dispatcher();
        let id = g.id;
        let onclick = Callback::from(move |_: MouseEvent| pick.dispatch(GamePickAction::Choose(id)));
        let style = if active {
            "padding:4px 10px; border-radius:6px; border:1px solid #58a6ff; background:#1f6feb; color:#fff; cursor:pointer;"
        } else {
            "padding:4px 10px; border-radius:6px; border:1px solid #30363d; background:#0d1117; color:#e6edf3; cursor:pointer;"
        };
        html! { <button key={g.id} {onclick} {style}>{ g.label() }</button> }
    });

    html! {
        <>
            <section style={PANEL_STYLE}>
                <h2 style="margin:0 0 6px 0;">{ lobby_title(details.as_ref(), lobby_id) }</h2>
                if let Some(d) = &*details {
                    <div style="display:flex; gap:8px; align-items:center; font-size:13px;">
                        <span>{"Code: "}<code style="font-size:14px;">{ &d.code }</code></span>
                        <button onclick={on_copy}>{ if *copied { "Copied!" } else { "Copy" } }</button>
                    </div>
                }
                if let Some(t) = &user_team {
                    <div style="font-size:13px; margin-top:6px; color:#2ea043;">{ format!("Your team: {}", t.name) }</div>
                }
            </section>
            <section style={PANEL_STYLE}>
                <h3 style="margin-top:0;">{"Standings"}</h3>
                <SummaryTable rows={(*summary).clone()} />
            </section>
            <section style={PANEL_STYLE}>
                <h3 style="margin-top:0;">{"Games"}</h3>
                if games.is_empty() {
                    <div style="opacity:0.7; font-size:13px;">{"No games scheduled yet."}</div>
                } else {
                    <div style="display:flex; flex-wrap:wrap; gap:6px; margin-bottom:12px;">{ for game_buttons }</div>
                }
                if let Some(game) = current_game {
                    <GameResultsTable results={(*results).clone()} />
                    <h3>{"Dropzones"}</h3>
                    <DropzoneBoard game={game} team={user_team.clone()} />
                }
            </section>
            if ctx.session.is_signed_in() {
                <section style={PANEL_STYLE}>
                    <TeamRegisterForm lobby_id={lobby_id} on_registered={on_registered} />
                </section>
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: i64, number: i64) -> Game {
        Game { id, number, lobby_id: Some(1), map: None }
    }

    #[test]
    fn title_falls_back_to_id() {
        assert_eq!(lobby_title(None, 4), "Lobby #4");
        let d = LobbyDetails { id: 4, name: "Friday".into(), code: "ABC123".into() };
        assert_eq!(lobby_title(Some(&d), 4), "Lobby «Friday»");
    }

    #[test]
    fn first_game_is_auto_selected() {
        let games = vec![game(10, 1), game(11, 2)];
        assert_eq!(pick_game(None, &games), Some(10));
        assert_eq!(pick_game(None, &[]), None);
    }

    #[test]
    fn existing_selection_is_kept() {
        let games = vec![game(10, 1), game(11, 2)];
        assert_eq!(pick_game(Some(11), &games), Some(11));
        assert_eq!(pick_game(Some(99), &games), Some(10));
    }

    #[test]
    fn reloaded_list_reconciles_with_current_choice() {
        let s = Rc::new(GamePick::default()).reduce(GamePickAction::Listed(vec![game(10, 1), game(11, 2)]));
        assert_eq!(s.selected, Some(10));
        let s = s.reduce(GamePickAction::Choose(11));
        let s = s.reduce(GamePickAction::Listed(vec![game(10, 1), game(11, 2), game(12, 3)]));
        assert_eq!(s.selected, Some(11));
        let s = s.reduce(GamePickAction::Listed(vec![game(12, 3)]));
        assert_eq!(s.selected, Some(12));
    }
}
