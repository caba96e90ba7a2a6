use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::app::View;
use super::PANEL_STYLE;
use crate::api::lobby;
use crate::api::types::{Announcement, LobbyListItem};
use crate::state::use_session;
use crate::util::cwarn;

#[derive(Properties, PartialEq, Clone)]
pub struct HomeViewProps {
    pub navigate: Callback<View>,
}

#[function_component(HomeView)]
pub fn home_view(props: &HomeViewProps) -> Html {
    let ctx = use_session();
    let lobbies = use_state(|| None::<Vec<LobbyListItem>>);
    let announcements = use_state(Vec::<Announcement>::new);

    {
        let client = ctx.client();
        let lobbies = lobbies.clone();
        let announcements = announcements.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match lobby::list(&client).await {
                    Ok(list) => lobbies.set(Some(list)),
                    Err(e) => {
                        cwarn(&format!("lobby list: {e}"));
                        lobbies.set(Some(Vec::new()));
                    }
                }
                match lobby::announcements(&client).await {
                    Ok(list) => announcements.set(list),
                    Err(e) => cwarn(&format!("announcements: {e}")),
                }
            });
            || ()
        });
    }

    let lobby_list = match &*lobbies {
        None => html! { <div style="opacity:0.7;">{"Loading lobbies…"}</div> },
        Some(list) if list.is_empty() => html! { <div style="opacity:0.7;">{"No lobbies yet."}</div> },
        Some(list) => html! {
            <ul style="list-style:none; margin:0; padding:0; display:flex; flex-direction:column; gap:6px;">
                { for list.iter().map(|l| {
                    let navigate = props.navigate.clone();
                    let id = l.id;
                    let onclick = Callback::from(move |_: MouseEvent| navigate.emit(View::Lobby(id)));
                    html! { <li key={l.id}>
                        <button {onclick} style="width:100%; text-align:left; padding:8px 10px; background:#0d1117; color:#e6edf3; border:1px solid #30363d; border-radius:6px; cursor:pointer;">{ &l.name }</button>
                    </li> }
                }) }
            </ul>
        },
    };

    html! {
        <>
            <section style={PANEL_STYLE}>
                <h2 style="margin-top:0;">{"Lobbies"}</h2>
                { lobby_list }
            </section>
            if !announcements.is_empty() {
                <section style={PANEL_STYLE}>
                    <h2 style="margin-top:0;">{"Announcements"}</h2>
                    { for announcements.iter().map(|a| html! {
                        <div key={a.id} style="padding:6px 0; border-bottom:1px solid #30363d;">
                            <div style="font-weight:600;">{ &a.title }</div>
                            <div style="font-size:12px; opacity:0.8;">{ format!("{} • Prize: {}", a.time, a.prize) }</div>
                        </div>
                    }) }
                </section>
            }
        </>
    }
}
