// Admin page: tab shell plus the users and announcements tabs.
use std::future::Future;

use gloo::dialogs::confirm;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::admin_lobbies::AdminLobbies;
use super::admin_maps::AdminMaps;
use super::field::{bind, TextField};
use super::{ERROR_STYLE, PANEL_STYLE};
use crate::api::types::{AdminUser, Announcement, AnnouncementDraft};
use crate::api::{admin, lobby, ApiError};
use crate::state::use_session;
use crate::util::cwarn;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Tab {
    Users,
    Lobbies,
    Maps,
    Announcements,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Users, Tab::Lobbies, Tab::Maps, Tab::Announcements];

    fn label(self) -> &'static str {
        match self {
            Tab::Users => "Users",
            Tab::Lobbies => "Lobbies",
            Tab::Maps => "Maps",
            Tab::Announcements => "Announcements",
        }
    }
}

/// Runs an admin mutation: success bumps `epoch` so the tab reloads,
/// failure lands in `error` as inline text.
pub fn mutate<F>(fut: F, error: UseStateHandle<Option<String>>, epoch: UseStateHandle<u32>)
where
    F: Future<Output = Result<(), ApiError>> + 'static,
{
    spawn_local(async move {
        match fut.await {
            Ok(()) => {
                error.set(None);
                epoch.set(epoch.wrapping_add(1));
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    });
}

pub fn error_line(error: &Option<String>) -> Html {
    match error {
        Some(msg) => html! { <div style={ERROR_STYLE}>{ msg }</div> },
        None => html! {},
    }
}

pub const ROW_STYLE: &str =
    "display:flex; gap:8px; align-items:center; padding:6px 0; border-bottom:1px solid #30363d; font-size:13px;";

#[function_component(AdminView)]
pub fn admin_view() -> Html {
    let ctx = use_session();
    let tab = use_state(|| Tab::Lobbies);

    if ctx.session.account.is_none() && ctx.session.is_signed_in() {
        return html! { <section style={PANEL_STYLE}>{"Loading account…"}</section> };
    }
    if !ctx.session.is_admin() {
        return html! { <section style={PANEL_STYLE}>{"Access denied."}</section> };
    }

    let tabs = Tab::ALL.iter().map(|t| {
        let t = *t;
        let tab_h = tab.clone();
        let active = *tab == t;
        let onclick = Callback::from(move |_: MouseEvent| tab_h.set(t));
        let style = if active {
            "padding:6px 12px; background:#1f6feb; color:#fff; border:1px solid #58a6ff; border-radius:6px; cursor:pointer;"
        } else {
            "padding:6px 12px; background:#0d1117; color:#e6edf3; border:1px solid #30363d; border-radius:6px; cursor:pointer;"
        };
        html! { <button {onclick} {style}>{ t.label() }</button> }
    });

    let body = match *tab {
        Tab::Users => html! { <AdminUsers /> },
        Tab::Lobbies => html! { <AdminLobbies /> },
        Tab::Maps => html! { <AdminMaps /> },
        Tab::Announcements => html! { <AdminAnnouncements /> },
    };

    html! {
        <section style={PANEL_STYLE}>
            <h2 style="margin-top:0;">{"Admin"}</h2>
            <div style="display:flex; gap:6px; margin-bottom:12px;">{ for tabs }</div>
            { body }
        </section>
    }
}

// ---------------- Users -----------------

#[function_component(AdminUsers)]
fn admin_users() -> Html {
    let ctx = use_session();
    let users = use_state(Vec::<AdminUser>::new);
    let error = use_state(|| None::<String>);
    let epoch = use_state(|| 0u32);

    {
        let client = ctx.client();
        let (users, error) = (users.clone(), error.clone());
        use_effect_with(*epoch, move |_| {
            spawn_local(async move {
                match admin::users(&client).await {
                    Ok(list) => users.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
            || ()
        });
    }

    let rows = users.iter().map(|u| {
        let client = ctx.client();
        let (error, epoch) = (error.clone(), epoch.clone());
        let id = u.id;
        let onclick = Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            mutate(async move { admin::toggle_admin(&client, id).await }, error.clone(), epoch.clone());
        });
        html! {
            <div key={u.id} style={ROW_STYLE}>
                <span style="flex:1;">{ &u.username }</span>
                <span style="flex:1; opacity:0.7;">{ &u.email }</span>
                <span style="flex:1; opacity:0.7;">{ u.discord.clone().unwrap_or_default() }</span>
                <button {onclick}>{ if u.is_admin { "Revoke admin" } else { "Make admin" } }</button>
            </div>
        }
    });

    html! {
        <div>
            { error_line(&error) }
            { for rows }
        </div>
    }
}

// ---------------- Announcements -----------------

#[function_component(AdminAnnouncements)]
fn admin_announcements() -> Html {
    let ctx = use_session();
    let items = use_state(Vec::<Announcement>::new);
    let error = use_state(|| None::<String>);
    let epoch = use_state(|| 0u32);
    let editing = use_state(|| None::<i64>);
    let title = use_state(String::new);
    let time = use_state(String::new);
    let prize = use_state(String::new);

    {
        let client = ctx.client();
        let items = items.clone();
        let (editing, title, time, prize) = (editing.clone(), title.clone(), time.clone(), prize.clone());
        use_effect_with(*epoch, move |_| {
            editing.set(None);
            for f in [&title, &time, &prize] {
                f.set(String::new());
            }
            spawn_local(async move {
                match lobby::announcements(&client).await {
                    Ok(list) => items.set(list),
                    Err(e) => cwarn(&format!("announcements: {e}")),
                }
            });
            || ()
        });
    }

    let onsubmit = {
        let client = ctx.client();
        let (error, epoch, editing) = (error.clone(), epoch.clone(), editing.clone());
        let (title, time, prize) = (title.clone(), time.clone(), prize.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let draft = AnnouncementDraft {
                title: title.trim().to_string(),
                time: time.trim().to_string(),
                prize: prize.trim().to_string(),
            };
            if draft.title.is_empty() {
                error.set(Some("Title is required.".into()));
                return;
            }
            let client = client.clone();
            let id = *editing;
            mutate(
                async move {
                    match id {
                        Some(id) => admin::update_announcement(&client, id, &draft).await,
                        None => admin::create_announcement(&client, &draft).await,
                    }
                },
                error.clone(),
                epoch.clone(),
            );
        })
    };

    let rows = items.iter().map(|a| {
        let on_edit = {
            let a = a.clone();
            let (editing, title, time, prize) = (editing.clone(), title.clone(), time.clone(), prize.clone());
            Callback::from(move |_: MouseEvent| {
                editing.set(Some(a.id));
                title.set(a.title.clone());
                time.set(a.time.clone());
                prize.set(a.prize.clone());
            })
        };
        let on_delete = {
            let client = ctx.client();
            let (error, epoch) = (error.clone(), epoch.clone());
            let id = a.id;
            Callback::from(move |_: MouseEvent| {
                if !confirm("Delete this announcement?") {
                    return;
                }
                let client = client.clone();
                mutate(async move { admin::delete_announcement(&client, id).await }, error.clone(), epoch.clone());
            })
        };
        html! {
            <div key={a.id} style={ROW_STYLE}>
                <span style="flex:2; font-weight:600;">{ &a.title }</span>
                <span style="flex:1;">{ &a.time }</span>
                <span style="flex:1;">{ &a.prize }</span>
                <button onclick={on_edit}>{"Edit"}</button>
                <button onclick={on_delete}>{"Delete"}</button>
            </div>
        }
    });

    let on_cancel = {
        let epoch = epoch.clone();
        Callback::from(move |_: MouseEvent| epoch.set(epoch.wrapping_add(1)))
    };

    html! {
        <div>
            <form {onsubmit} style="display:flex; flex-wrap:wrap; gap:8px; margin-bottom:12px;">
                <TextField value={(*title).clone()} placeholder="Title" on_change={bind(&title)} />
                <TextField value={(*time).clone()} placeholder="Time" on_change={bind(&time)} />
                <TextField value={(*prize).clone()} placeholder="Prize" on_change={bind(&prize)} />
                <button type="submit">{ if editing.is_some() { "Save" } else { "Add" } }</button>
                if editing.is_some() {
                    <button type="button" onclick={on_cancel}>{"Cancel"}</button>
                }
            </form>
            { error_line(&error) }
            { for rows }
        </div>
    }
}
