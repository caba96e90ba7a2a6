use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::field::{bind, TextField};
use super::{FetchStatus, ERROR_STYLE, OK_STYLE};
use crate::api::lobby;
use crate::api::types::TeamRegistration;
use crate::state::use_session;

#[derive(Properties, PartialEq, Clone)]
pub struct TeamRegisterFormProps {
    pub lobby_id: i64,
    /// Fired after the server accepted the team.
    pub on_registered: Callback<()>,
}

pub fn team_registration(name: &str, players: [&str; 3]) -> Result<TeamRegistration, &'static str> {
    let name = name.trim();
    let [p1, p2, p3] = players.map(str::trim);
    if name.is_empty() {
        return Err("Team name is required.");
    }
    if p1.is_empty() || p2.is_empty() || p3.is_empty() {
        return Err("All three players are required.");
    }
    Ok(TeamRegistration {
        name: name.to_string(),
        player1: p1.to_string(),
        player2: p2.to_string(),
        player3: p3.to_string(),
    })
}

#[function_component(TeamRegisterForm)]
pub fn team_register_form(props: &TeamRegisterFormProps) -> Html {
    let ctx = use_session();
    let name = use_state(String::new);
    let p1 = use_state(String::new);
    let p2 = use_state(String::new);
    let p3 = use_state(String::new);
    let status = use_state(|| FetchStatus::Idle);
    let done = use_state(|| false);

    let onsubmit = {
        let client = ctx.client();
        let (name, p1, p2, p3) = (name.clone(), p1.clone(), p2.clone(), p3.clone());
        let (status, done) = (status.clone(), done.clone());
        let lobby_id = props.lobby_id;
        let on_registered = props.on_registered.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            done.set(false);
            let body = match team_registration(&name, [p1.as_str(), p2.as_str(), p3.as_str()]) {
                Ok(b) => b,
                Err(msg) => {
                    status.set(FetchStatus::Error(msg.into()));
                    return;
                }
            };
            status.set(FetchStatus::Loading);
            let client = client.clone();
            let (name, p1, p2, p3) = (name.clone(), p1.clone(), p2.clone(), p3.clone());
            let (status, done) = (status.clone(), done.clone());
            let on_registered = on_registered.clone();
            spawn_local(async move {
                match lobby::register_team(&client, lobby_id, &body).await {
                    Ok(()) => {
                        for field in [&name, &p1, &p2, &p3] {
                            field.set(String::new());
                        }
                        status.set(FetchStatus::Idle);
                        done.set(true);
                        on_registered.emit(());
                    }
                    Err(e) => status.set(FetchStatus::Error(e.to_string())),
                }
            });
        })
    };

    html! {
        <div>
            <h3 style="margin:0 0 8px 0;">{"Register a team"}</h3>
            <form {onsubmit} style="display:flex; flex-wrap:wrap; gap:8px;">
                <TextField value={(*name).clone()} placeholder="Team name" on_change={bind(&name)} />
                <TextField value={(*p1).clone()} placeholder="Player 1" on_change={bind(&p1)} />
                <TextField value={(*p2).clone()} placeholder="Player 2" on_change={bind(&p2)} />
                <TextField value={(*p3).clone()} placeholder="Player 3" on_change={bind(&p3)} />
                <button type="submit" disabled={*status == FetchStatus::Loading}>{"Register"}</button>
            </form>
            if *done { <div style={OK_STYLE}>{"Team registered."}</div> }
            if let FetchStatus::Error(msg) = &*status {
                <div style={ERROR_STYLE}>{ msg }</div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_trimmed() {
        let r = team_registration(" Kings ", [" a ", "b", "c "]).unwrap();
        assert_eq!(r.name, "Kings");
        assert_eq!((r.player1.as_str(), r.player3.as_str()), ("a", "c"));
    }

    #[test]
    fn missing_player_is_rejected() {
        assert!(team_registration("Kings", ["a", " ", "c"]).is_err());
        assert!(team_registration("", ["a", "b", "c"]).is_err());
    }
}
