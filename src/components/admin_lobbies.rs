use gloo::dialogs::confirm;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::admin_view::{error_line, mutate, ROW_STYLE};
use super::field::{bind, TextField};
use crate::api::types::{AdminGame, AdminLobby, AdminMap, GameResult, NewGame, Team};
use crate::api::{admin, lobby, ApiError};
use crate::state::use_session;
use crate::util::{cwarn, team_label};

/// Editable result line for one team of a game.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultDraft {
    pub team_id: i64,
    pub team_name: String,
    /// The server already has a result for this team.
    pub existing: bool,
    pub place: String,
    pub kills: String,
    pub points: String,
}

impl ResultDraft {
    pub fn for_teams(teams: &[Team], results: &[GameResult]) -> Vec<Self> {
        teams
            .iter()
            .map(|t| {
                let found = results.iter().find(|r| r.team_id == t.id);
                let cell = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
                ResultDraft {
                    team_id: t.id,
                    team_name: team_label(Some(&t.name), t.id),
                    existing: found.is_some(),
                    place: cell(found.and_then(|r| r.place)),
                    kills: cell(found.and_then(|r| r.kills)),
                    points: cell(found.and_then(|r| r.points)),
                }
            })
            .collect()
    }

    /// (place, kills, points); `None` when no place was entered.
    pub fn parse(&self) -> Option<(i64, i64, i64)> {
        let place = self.place.trim().parse().ok()?;
        let num = |s: &str| s.trim().parse().unwrap_or(0);
        Some((place, num(&self.kills), num(&self.points)))
    }
}

pub fn next_game_number(games: &[AdminGame]) -> i64 {
    games.iter().map(|g| g.number).max().unwrap_or(0) + 1
}

#[function_component(AdminLobbies)]
pub fn admin_lobbies() -> Html {
    let ctx = use_session();
    let lobbies = use_state(Vec::<AdminLobby>::new);
    let maps = use_state(Vec::<AdminMap>::new);
    let error = use_state(|| None::<String>);
    let epoch = use_state(|| 0u32);
    let new_name = use_state(String::new);

    {
        let client = ctx.client();
        let (lobbies, maps, error) = (lobbies.clone(), maps.clone(), error.clone());
        use_effect_with(*epoch, move |_| {
            spawn_local(async move {
                match admin::lobbies(&client).await {
                    Ok(list) => lobbies.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
                match admin::maps(&client).await {
                    Ok(list) => maps.set(list),
                    Err(e) => cwarn(&format!("admin maps: {e}")),
                }
            });
            || ()
        });
    }

    let on_create = {
        let client = ctx.client();
        let (error, epoch, new_name) = (error.clone(), epoch.clone(), new_name.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = new_name.trim().to_string();
            if name.is_empty() {
                error.set(Some("Lobby name is required.".into()));
                return;
            }
            new_name.set(String::new());
            let client = client.clone();
            mutate(async move { admin::create_lobby(&client, &name).await }, error.clone(), epoch.clone());
        })
    };

    let on_changed = {
        let epoch = epoch.clone();
        Callback::from(move |_| epoch.set(epoch.wrapping_add(1)))
    };
    let on_error = {
        let error = error.clone();
        Callback::from(move |msg: String| error.set(Some(msg)))
    };

    html! {
        <div>
            <form onsubmit={on_create} style="display:flex; gap:8px; margin-bottom:12px;">
                <TextField value={(*new_name).clone()} placeholder="New lobby name" on_change={bind(&new_name)} />
                <button type="submit">{"Create lobby"}</button>
            </form>
            { error_line(&error) }
            { for lobbies.iter().map(|l| html! {
                <LobbyCard key={l.id} lobby={l.clone()} maps={(*maps).clone()} on_changed={on_changed.clone()} on_error={on_error.clone()} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct LobbyCardProps {
    lobby: AdminLobby,
    maps: Vec<AdminMap>,
    on_changed: Callback<()>,
    on_error: Callback<String>,
}

/// Reports the outcome of a card-level mutation to the parent tab.
fn settle(res: Result<(), ApiError>, on_changed: &Callback<()>, on_error: &Callback<String>) {
    match res {
        Ok(()) => on_changed.emit(()),
        Err(e) => on_error.emit(e.to_string()),
    }
}

#[function_component(LobbyCard)]
fn lobby_card(props: &LobbyCardProps) -> Html {
    let ctx = use_session();
    let number = use_state(|| next_game_number(&props.lobby.games).to_string());
    let map_id = use_state(|| props.maps.first().map(|m| m.id));
    let results_for = use_state(|| None::<i64>);
    let lobby = &props.lobby;

    let on_delete = {
        let client = ctx.client();
        let (on_changed, on_error) = (props.on_changed.clone(), props.on_error.clone());
        let (id, name) = (lobby.id, lobby.name.clone());
        Callback::from(move |_: MouseEvent| {
            if !confirm(&format!("Delete lobby «{name}» with all its games?")) {
                return;
            }
            let client = client.clone();
            let (on_changed, on_error) = (on_changed.clone(), on_error.clone());
            spawn_local(async move {
                settle(admin::delete_lobby(&client, id).await, &on_changed, &on_error);
            });
        })
    };

    let on_add_game = {
        let client = ctx.client();
        let (on_changed, on_error) = (props.on_changed.clone(), props.on_error.clone());
        let (number, map_id) = (number.clone(), map_id.clone());
        let lobby_id = lobby.id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Ok(n) = number.trim().parse::<i64>() else {
                on_error.emit("Game number must be a whole number.".into());
                return;
            };
            let Some(map) = *map_id else {
                on_error.emit("Create a map first.".into());
                return;
            };
            let client = client.clone();
            let (on_changed, on_error) = (on_changed.clone(), on_error.clone());
            spawn_local(async move {
                let body = NewGame { number: n, map_id: map };
                settle(admin::create_game(&client, lobby_id, &body).await, &on_changed, &on_error);
            });
        })
    };

    let on_number = {
        let number = number.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            number.set(input.value());
        })
    };
    let on_map = {
        let map_id = map_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            map_id.set(select.value().parse().ok());
        })
    };

    let games = lobby.games.iter().map(|g| {
        let on_delete_game = {
            let client = ctx.client();
            let (on_changed, on_error) = (props.on_changed.clone(), props.on_error.clone());
            let id = g.id;
            Callback::from(move |_: MouseEvent| {
                if !confirm("Delete this game?") {
                    return;
                }
                let client = client.clone();
                let (on_changed, on_error) = (on_changed.clone(), on_error.clone());
                spawn_local(async move {
                    settle(admin::delete_game(&client, id).await, &on_changed, &on_error);
                });
            })
        };
        let toggle_results = {
            let results_for = results_for.clone();
            let id = g.id;
            Callback::from(move |_: MouseEvent| {
                results_for.set(if *results_for == Some(id) { None } else { Some(id) });
            })
        };
        html! {
            <div key={g.id}>
                <div style={ROW_STYLE}>
                    <span style="flex:1;">{ format!("Game {} • {}", g.number, g.map_name) }</span>
                    <button onclick={toggle_results}>{"Results"}</button>
                    <button onclick={on_delete_game}>{"Delete"}</button>
                </div>
                if *results_for == Some(g.id) {
                    <ResultsEditor game_id={g.id} teams={lobby.teams.clone()} on_error={props.on_error.clone()} />
                }
            </div>
        }
    });

    html! {
        <div style="border:1px solid #30363d; border-radius:6px; padding:8px 12px; margin-bottom:10px;">
            <div style="display:flex; align-items:center; gap:8px;">
                <strong style="flex:1;">{ format!("{} ({})", lobby.name, lobby.code) }</strong>
                <span style="font-size:12px; opacity:0.7;">{ format!("{} teams", lobby.teams.len()) }</span>
                <button onclick={on_delete}>{"Delete lobby"}</button>
            </div>
            { for games }
            <form onsubmit={on_add_game} style="display:flex; gap:6px; margin-top:6px; font-size:13px;">
                <input type="number" value={(*number).clone()} oninput={on_number} style="width:70px;" />
                <select onchange={on_map}>
                    { for props.maps.iter().map(|m| html! {
                        <option value={m.id.to_string()} selected={*map_id == Some(m.id)}>{ &m.name }</option>
                    }) }
                </select>
                <button type="submit">{"Add game"}</button>
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct ResultsEditorProps {
    game_id: i64,
    teams: Vec<Team>,
    on_error: Callback<String>,
}

#[function_component(ResultsEditor)]
fn results_editor(props: &ResultsEditorProps) -> Html {
    let ctx = use_session();
    let drafts = use_state(Vec::<ResultDraft>::new);
    let saved = use_state(|| false);
    let epoch = use_state(|| 0u32);

    {
        let client = ctx.client();
        let drafts = drafts.clone();
        let teams = props.teams.clone();
        use_effect_with((props.game_id, *epoch), move |&(game_id, _)| {
            spawn_local(async move {
                let results = lobby::game_results(&client, game_id).await.unwrap_or_else(|e| {
                    cwarn(&format!("results for game {game_id}: {e}"));
                    Vec::new()
                });
                drafts.set(ResultDraft::for_teams(&teams, &results));
            });
            || ()
        });
    }

    let edit = |idx: usize, field: fn(&mut ResultDraft) -> &mut String| {
        let drafts = drafts.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*drafts).clone();
            if let Some(d) = next.get_mut(idx) {
                *field(d) = input.value();
            }
            drafts.set(next);
        })
    };

    let on_save = {
        let client = ctx.client();
        let drafts = drafts.clone();
        let (saved, epoch) = (saved.clone(), epoch.clone());
        let on_error = props.on_error.clone();
        let game_id = props.game_id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            saved.set(false);
            let rows: Vec<_> = drafts.iter().filter_map(|d| d.parse().map(|p| (d.team_id, d.existing, p))).collect();
            let client = client.clone();
            let on_error = on_error.clone();
            let (saved, epoch) = (saved.clone(), epoch.clone());
            spawn_local(async move {
                for (team_id, existing, (place, kills, points)) in rows {
                    if let Err(e) = admin::save_result(&client, game_id, team_id, existing, place, kills, points).await {
                        on_error.emit(e.to_string());
                        return;
                    }
                }
                saved.set(true);
                epoch.set(epoch.wrapping_add(1));
            });
        })
    };

    html! {
        <form onsubmit={on_save} style="margin:4px 0 8px 16px; font-size:13px;">
            <div style="display:grid; grid-template-columns:2fr 1fr 1fr 1fr; gap:4px; align-items:center;">
                <span style="opacity:0.7;">{"Team"}</span>
                <span style="opacity:0.7;">{"Place"}</span>
                <span style="opacity:0.7;">{"Kills"}</span>
                <span style="opacity:0.7;">{"Points"}</span>
                { for drafts.iter().enumerate().map(|(i, d)| html! { <>
                    <span>{ &d.team_name }</span>
                    <input type="number" value={d.place.clone()} oninput={edit(i, |d| &mut d.place)} />
                    <input type="number" value={d.kills.clone()} oninput={edit(i, |d| &mut d.kills)} />
                    <input type="number" value={d.points.clone()} oninput={edit(i, |d| &mut d.points)} />
                </> }) }
            </div>
            if props.teams.is_empty() {
                <div style="opacity:0.7;">{"No teams registered."}</div>
            }
            <button type="submit" style="margin-top:6px;">{"Save results"}</button>
            if *saved { <span style="margin-left:8px; color:#3fb950;">{"Saved."}</span> }
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, name: &str) -> Team {
        Team { id, name: name.into(), players: vec![] }
    }

    #[test]
    fn drafts_mark_existing_results() {
        let results = vec![GameResult {
            id: Some(1),
            team_id: 2,
            team_name: None,
            place: Some(1),
            kills: Some(8),
            points: None,
        }];
        let drafts = ResultDraft::for_teams(&[team(1, "A"), team(2, "B")], &results);
        assert!(!drafts[0].existing);
        assert_eq!(drafts[0].place, "");
        assert!(drafts[1].existing);
        assert_eq!((drafts[1].place.as_str(), drafts[1].kills.as_str(), drafts[1].points.as_str()), ("1", "8", ""));
    }

    #[test]
    fn rows_without_place_are_skipped() {
        let mut d = ResultDraft::for_teams(&[team(1, "A")], &[]).remove(0);
        assert_eq!(d.parse(), None);
        d.place = "3".into();
        assert_eq!(d.parse(), Some((3, 0, 0)));
        d.kills = " 5 ".into();
        assert_eq!(d.parse(), Some((3, 5, 0)));
    }

    #[test]
    fn next_number_follows_highest() {
        let games = vec![
            AdminGame { id: 1, number: 1, map_name: "Olympus".into() },
            AdminGame { id: 2, number: 4, map_name: "Storm Point".into() },
        ];
        assert_eq!(next_game_number(&games), 5);
        assert_eq!(next_game_number(&[]), 1);
    }
}
