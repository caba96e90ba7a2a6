use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::app::View;
use super::field::{bind, TextField};
use super::{FetchStatus, ERROR_STYLE, PANEL_STYLE};
use crate::api::lobby;
use crate::state::use_session;
use crate::util::normalize_code;

#[derive(Properties, PartialEq, Clone)]
pub struct JoinViewProps {
    pub navigate: Callback<View>,
}

#[function_component(JoinView)]
pub fn join_view(props: &JoinViewProps) -> Html {
    let ctx = use_session();
    let code = use_state(String::new);
    let status = use_state(|| FetchStatus::Idle);

    let onsubmit = {
        let code = code.clone();
        let status = status.clone();
        let navigate = props.navigate.clone();
        let client = ctx.client();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let normalized = normalize_code(&code);
            if normalized.is_empty() {
                status.set(FetchStatus::Error("Enter a lobby code.".into()));
                return;
            }
            status.set(FetchStatus::Loading);
            let status = status.clone();
            let navigate = navigate.clone();
            let client = client.clone();
            spawn_local(async move {
                match lobby::by_code(&client, &normalized).await {
                    Ok(details) => {
                        status.set(FetchStatus::Idle);
                        navigate.emit(View::Lobby(details.id));
                    }
                    Err(e) => status.set(FetchStatus::Error(e.to_string())),
                }
            });
        })
    };

    html! {
        <section style={PANEL_STYLE}>
            <h2 style="margin-top:0;">{"Join a lobby"}</h2>
            <form {onsubmit} style="display:flex; gap:8px; align-items:center;">
                <TextField value={(*code).clone()} placeholder="Lobby code" on_change={bind(&code)} required=true />
                <button type="submit" disabled={*status == FetchStatus::Loading}>{"Join"}</button>
            </form>
            if let FetchStatus::Error(msg) = &*status {
                <div style={ERROR_STYLE}>{ msg }</div>
            }
        </section>
    }
}
