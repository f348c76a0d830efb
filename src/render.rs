//! Text and HTML renderings of a [`ViewState`].

use std::fmt::Write;

use crate::view::ViewState;

pub const HEADING: &str = "Baseball Players";
pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No players found.";

pub fn render_text(state: &ViewState) -> String {
    match state {
        ViewState::Loading => format!("{}\n", LOADING_TEXT),
        ViewState::Error(message) => format!("{}\n", message),
        ViewState::Loaded(players) => {
            let mut out = format!("{}\n\n", HEADING);
            if players.is_empty() {
                out.push_str(EMPTY_TEXT);
                out.push('\n');
            } else {
                for player in players {
                    let _ = writeln!(out, "- {}", player.name);
                }
            }
            out
        }
    }
}

/// The view's markup, without a surrounding document.
pub fn render_html(state: &ViewState) -> String {
    match state {
        ViewState::Loading => format!(r#"<div class="container">{}</div>"#, LOADING_TEXT),
        ViewState::Error(message) => {
            format!(r#"<div class="container error">{}</div>"#, escape_html(message))
        }
        ViewState::Loaded(players) => {
            let mut out = format!(r#"<div class="container"><h1>{}</h1>"#, HEADING);
            if players.is_empty() {
                let _ = write!(out, "<p>{}</p>", EMPTY_TEXT);
            } else {
                out.push_str(r#"<ul class="players-list">"#);
                for player in players {
                    let _ = write!(
                        out,
                        r#"<li class="player-item">{}</li>"#,
                        escape_html(&player.name)
                    );
                }
                out.push_str("</ul>");
            }
            out.push_str("</div>");
            out
        }
    }
}

/// Full HTML document for serve mode. While loading, the page refreshes
/// itself every second to pick up the settled state.
pub fn render_page(state: &ViewState) -> String {
    let refresh = if state.is_loading() {
        r#"<meta http-equiv="refresh" content="1">"#
    } else {
        ""
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n{}<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        refresh,
        HEADING,
        render_html(state)
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
