use gloo::dialogs::confirm;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::admin_view::{error_line, mutate, ROW_STYLE};
use super::field::{bind, TextField};
use crate::api::admin;
use crate::api::types::{AdminMap, DropzoneTemplate, NewDropzoneTemplate, NewMap};
use crate::state::use_session;

pub const DEFAULT_TEMPLATE_RADIUS: f64 = 5.0;
pub const DEFAULT_TEMPLATE_CAPACITY: u32 = 1;

/// Validates the template form; blank radius/capacity take the defaults.
pub fn parse_template(
    name: &str,
    x: &str,
    y: &str,
    radius: &str,
    capacity: &str,
) -> Result<NewDropzoneTemplate, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required.".into());
    }
    let percent = |label: &str, raw: &str| -> Result<f64, String> {
        let v: f64 = raw.trim().parse().map_err(|_| format!("{label} must be a number."))?;
        if !(0.0..=100.0).contains(&v) {
            return Err(format!("{label} must be between 0 and 100."));
        }
        Ok(v)
    };
    let x_percent = percent("X", x)?;
    let y_percent = percent("Y", y)?;
    let radius = match radius.trim() {
        "" => DEFAULT_TEMPLATE_RADIUS,
        r => r.parse::<f64>().ok().filter(|r| *r > 0.0).ok_or("Radius must be positive.")?,
    };
    let capacity = match capacity.trim() {
        "" => DEFAULT_TEMPLATE_CAPACITY,
        c => c.parse::<u32>().ok().filter(|c| *c >= 1).ok_or("Capacity must be at least 1.")?,
    };
    Ok(NewDropzoneTemplate { name: name.to_string(), x_percent, y_percent, radius, capacity })
}

#[function_component(AdminMaps)]
pub fn admin_maps() -> Html {
    let ctx = use_session();
    let maps = use_state(Vec::<AdminMap>::new);
    let error = use_state(|| None::<String>);
    let epoch = use_state(|| 0u32);
    let name = use_state(String::new);
    let image = use_state(String::new);
    let open = use_state(|| None::<i64>);

    {
        let client = ctx.client();
        let (maps, error) = (maps.clone(), error.clone());
        use_effect_with(*epoch, move |_| {
            spawn_local(async move {
                match admin::maps(&client).await {
                    Ok(list) => maps.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
            || ()
        });
    }

    let on_create = {
        let client = ctx.client();
        let (error, epoch, name, image) = (error.clone(), epoch.clone(), name.clone(), image.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let body = NewMap { name: name.trim().to_string(), image_url: image.trim().to_string() };
            if body.name.is_empty() {
                error.set(Some("Map name is required.".into()));
                return;
            }
            name.set(String::new());
            image.set(String::new());
            let client = client.clone();
            mutate(async move { admin::create_map(&client, &body).await }, error.clone(), epoch.clone());
        })
    };

    let rows = maps.iter().map(|m| {
        let on_delete = {
            let client = ctx.client();
            let (error, epoch) = (error.clone(), epoch.clone());
            let (id, map_name) = (m.id, m.name.clone());
            Callback::from(move |_: MouseEvent| {
                if !confirm(&format!("Delete map «{map_name}»?")) {
                    return;
                }
                let client = client.clone();
                mutate(async move { admin::delete_map(&client, id).await }, error.clone(), epoch.clone());
            })
        };
        let toggle = {
            let open = open.clone();
            let id = m.id;
            Callback::from(move |_: MouseEvent| open.set(if *open == Some(id) { None } else { Some(id) }))
        };
        let on_changed = {
            let epoch = epoch.clone();
            Callback::from(move |_| epoch.set(epoch.wrapping_add(1)))
        };
        html! {
            <div key={m.id}>
                <div style={ROW_STYLE}>
                    <span style="flex:1; font-weight:600;">{ &m.name }</span>
                    <span style="flex:1; opacity:0.7;">{ m.image_filename.clone().unwrap_or_else(|| "no image".into()) }</span>
                    <span style="opacity:0.7;">{ format!("{} zones", m.dropzones_count) }</span>
                    <button onclick={toggle}>{"Dropzones"}</button>
                    <button onclick={on_delete}>{"Delete"}</button>
                </div>
                if *open == Some(m.id) {
                    <TemplateEditor map_id={m.id} {on_changed} />
                }
            </div>
        }
    });

    html! {
        <div>
            <form onsubmit={on_create} style="display:flex; gap:8px; margin-bottom:12px;">
                <TextField value={(*name).clone()} placeholder="Map name" on_change={bind(&name)} />
                <TextField value={(*image).clone()} placeholder="Image URL" on_change={bind(&image)} />
                <button type="submit">{"Add map"}</button>
            </form>
            { error_line(&error) }
            { for rows }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct TemplateEditorProps {
    map_id: i64,
    /// Zone count on the map row changed.
    on_changed: Callback<()>,
}

#[function_component(TemplateEditor)]
fn template_editor(props: &TemplateEditorProps) -> Html {
    let ctx = use_session();
    let zones = use_state(Vec::<DropzoneTemplate>::new);
    let error = use_state(|| None::<String>);
    let epoch = use_state(|| 0u32);
    let name = use_state(String::new);
    let x = use_state(String::new);
    let y = use_state(String::new);
    let radius = use_state(String::new);
    let capacity = use_state(String::new);

    {
        let client = ctx.client();
        let (zones, error) = (zones.clone(), error.clone());
        let on_changed = props.on_changed.clone();
        use_effect_with((props.map_id, *epoch), move |&(map_id, epoch)| {
            if epoch > 0 {
                on_changed.emit(());
            }
            spawn_local(async move {
                match admin::map_dropzones(&client, map_id).await {
                    Ok(list) => zones.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
            || ()
        });
    }

    let on_add = {
        let client = ctx.client();
        let (error, epoch) = (error.clone(), epoch.clone());
        let fields = (name.clone(), x.clone(), y.clone(), radius.clone(), capacity.clone());
        let map_id = props.map_id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (name, x, y, radius, capacity) = &fields;
            let body = match parse_template(name, x, y, radius, capacity) {
                Ok(b) => b,
                Err(msg) => {
                    error.set(Some(msg));
                    return;
                }
            };
            for f in [name, x, y, radius, capacity] {
                f.set(String::new());
            }
            let client = client.clone();
            mutate(async move { admin::create_map_dropzone(&client, map_id, &body).await }, error.clone(), epoch.clone());
        })
    };

    let rows = zones.iter().map(|z| {
        let client = ctx.client();
        let (error, epoch) = (error.clone(), epoch.clone());
        let id = z.id;
        let onclick = Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            mutate(async move { admin::delete_map_dropzone(&client, id).await }, error.clone(), epoch.clone());
        });
        html! {
            <div key={z.id} style={ROW_STYLE}>
                <span style="flex:1;">{ &z.name }</span>
                <span style="flex:1; opacity:0.7;">{ format!("x {:.1}% • y {:.1}% • r {} • cap {}", z.x_percent, z.y_percent, z.radius, z.capacity) }</span>
                <button {onclick}>{"Remove"}</button>
            </div>
        }
    });

    html! {
        <div style="margin:4px 0 8px 16px;">
            { for rows }
            <form onsubmit={on_add} style="display:flex; flex-wrap:wrap; gap:6px; margin-top:6px;">
                <TextField value={(*name).clone()} placeholder="Zone name" on_change={bind(&name)} />
                <TextField value={(*x).clone()} placeholder="X %" input_type="number" on_change={bind(&x)} />
                <TextField value={(*y).clone()} placeholder="Y %" input_type="number" on_change={bind(&y)} />
                <TextField value={(*radius).clone()} placeholder="Radius (5)" input_type="number" on_change={bind(&radius)} />
                <TextField value={(*capacity).clone()} placeholder="Capacity (1)" input_type="number" on_change={bind(&capacity)} />
                <button type="submit">{"Add zone"}</button>
            </form>
            { error_line(&error) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_radius_and_capacity_take_defaults() {
        let t = parse_template("Skyhook", "40", "62.5", "", " ").unwrap();
        assert_eq!(t.radius, DEFAULT_TEMPLATE_RADIUS);
        assert_eq!(t.capacity, DEFAULT_TEMPLATE_CAPACITY);
        assert_eq!((t.x_percent, t.y_percent), (40.0, 62.5));
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        assert!(parse_template("Skyhook", "140", "10", "", "").is_err());
        assert!(parse_template("Skyhook", "abc", "10", "", "").is_err());
        assert!(parse_template("  ", "10", "10", "", "").is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(parse_template("Skyhook", "10", "10", "60", "0").is_err());
        assert_eq!(parse_template("Skyhook", "10", "10", "60", "3").unwrap().capacity, 3);
    }
}
