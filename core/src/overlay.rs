//! Overlay panel for the selected day.
//!
//! Built only from a DayRecord; knows nothing about picking. The
//! presenter's only state is whether a panel is showing and which.

use crate::{color::Rgb, journey::DayRecord};
use serde::Serialize;

pub const POST_LINK_LABEL: &str = "View Post on 𝕏";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemEntry {
    /// Problem name followed by its emojis.
    pub label: String,
    pub link: String,
    pub post_link: String,
    pub post_label: &'static str,
    pub badge_class: &'static str,
    pub badge_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayPanel {
    pub title: String,
    pub day: i64,
    pub accent: Rgb,
    pub entries: Vec<ProblemEntry>,
}

impl OverlayPanel {
    pub fn from_day(record: &DayRecord) -> Self {
        let entries = record
            .problems
            .iter()
            .map(|p| {
                let label = if p.emojis.is_empty() {
                    p.name.clone()
                } else {
                    format!("{} {}", p.name, p.emojis.join(" "))
                };
                ProblemEntry {
                    label,
                    link: p.link.clone(),
                    post_link: p.twitter_post_link.clone(),
                    post_label: POST_LINK_LABEL,
                    badge_class: p.difficulty.css_class(),
                    badge_label: p.difficulty.label(),
                }
            })
            .collect();

        Self {
            title: format!("Day {}", record.day),
            day: record.day,
            accent: record.color,
            entries,
        }
    }

    /// HTML fragment for the overlay surface. All record text is escaped.
    pub fn to_html(&self) -> String {
        let mut html = format!("<h3>{}</h3>\n<ul>\n", escape_html(&self.title));
        for entry in &self.entries {
            html.push_str(&format!(
                concat!(
                    "  <li>\n",
                    "    <div class=\"problem-details\">\n",
                    "      <a href=\"{link}\" class=\"gfg-link\" target=\"_blank\">{label}</a>\n",
                    "      <a href=\"{post}\" class=\"twitter-link\" target=\"_blank\">{post_label}</a>\n",
                    "    </div>\n",
                    "    <span class=\"difficulty {class}\">{badge}</span>\n",
                    "  </li>\n",
                ),
                link = escape_html(&entry.link),
                label = escape_html(&entry.label),
                post = escape_html(&entry.post_link),
                post_label = entry.post_label,
                class = entry.badge_class,
                badge = entry.badge_label,
            ));
        }
        html.push_str("</ul>\n");
        html
    }

    /// Plain-text rendering for terminals and logs.
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n", self.title);
        for entry in &self.entries {
            text.push_str(&format!(
                "  [{}] {}\n      {}\n      {}\n",
                entry.badge_label, entry.label, entry.link, entry.post_link
            ));
        }
        text
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Default)]
pub struct OverlayPresenter {
    panel: Option<OverlayPanel>,
}

impl OverlayPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, record: &DayRecord) -> &OverlayPanel {
        self.panel.insert(OverlayPanel::from_day(record))
    }

    pub fn hide(&mut self) {
        self.panel = None;
    }

    pub fn is_visible(&self) -> bool {
        self.panel.is_some()
    }

    pub fn panel(&self) -> Option<&OverlayPanel> {
        self.panel.as_ref()
    }
}
