// Console logging and small display helpers shared by the views.
use std::cell::Cell;
use wasm_bindgen::JsValue;

thread_local! {
    static DEBUG: Cell<bool> = const { Cell::new(false) };
}

pub fn set_debug(on: bool) {
    DEBUG.with(|d| d.set(on));
}

/// Debug log; silent unless `as_debug` is set.
pub fn clog(msg: &str) {
    if DEBUG.with(|d| d.get()) {
        if cfg!(target_arch = "wasm32") {
            web_sys::console::log_1(&JsValue::from_str(msg));
        } else {
            eprintln!("{msg}");
        }
    }
}

/// Off wasm (native test runs) the browser console is not there; use stderr.
pub fn cwarn(msg: &str) {
    if cfg!(target_arch = "wasm32") {
        web_sys::console::warn_1(&JsValue::from_str(msg));
    } else {
        eprintln!("warning: {msg}");
    }
}

pub fn team_label(name: Option<&str>, team_id: i64) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n.to_string(),
        _ => format!("#{team_id}"),
    }
}

pub fn or_dash(v: Option<i64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Join codes are case-insensitive on the server but stored upper case.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_label_falls_back_to_id() {
        assert_eq!(team_label(Some("Wraiths"), 4), "Wraiths");
        assert_eq!(team_label(Some(""), 4), "#4");
        assert_eq!(team_label(None, 17), "#17");
    }

    #[test]
    fn dash_for_missing_place() {
        assert_eq!(or_dash(Some(3)), "3");
        assert_eq!(or_dash(None), "-");
    }

    #[test]
    fn join_code_is_trimmed_and_upper_cased() {
        assert_eq!(normalize_code("  abc123 \n"), "ABC123");
    }
}
