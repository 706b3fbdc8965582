//! Text rendering of posts and list states
//!
//! Labels follow the site's language (Brazilian Portuguese) except for the
//! list messages, which the site shows in English.

use crate::detail::DetailState;
use crate::pagination::{DisplaySurface, ListStatus, PageControl};
use crate::types::{BlogPost, Timestamp};
use chrono::{Datelike, FixedOffset};
use serde::Serialize;
use std::fmt::Write as _;

/// Shown for posts without any date
pub const NO_DATE: &str = "Sem data";
/// Shown when a listing has no posts
pub const NO_POSTS: &str = "No blog posts found.";
/// Shown when a single post does not exist
pub const POST_NOT_FOUND: &str = "Post não encontrado";
/// Link back to the listing from a post page
pub const BACK_LINK: &str = "/#articles";
/// Label of the back link
pub const BACK_LABEL: &str = "Voltar para Home";

/// Offset of Brasília time (UTC-3, no daylight saving) in seconds west of UTC
pub const SITE_UTC_OFFSET_WEST: i32 = 3 * 3600;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Long-form date such as `5 de março de 2024`, taken on the calendar of
/// Brasília time rather than UTC
pub fn format_date(date: Option<Timestamp>) -> String {
    let Some(date) = date else {
        return NO_DATE.to_string();
    };
    let local = match FixedOffset::west_opt(SITE_UTC_OFFSET_WEST) {
        Some(offset) => date.with_timezone(&offset).date_naive(),
        None => date.date_naive(),
    };
    format!(
        "{} de {} de {}",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year()
    )
}

/// Publication badge
pub fn status_label(published: bool) -> &'static str {
    if published {
        "Publicado"
    } else {
        "Rascunho"
    }
}

/// Card shown for a post in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub status: &'static str,
    pub image_url: Option<String>,
}

impl From<&BlogPost> for PostCard {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            date: format_date(Some(post.display_date())),
            status: status_label(post.published),
            image_url: post.image_url.clone(),
        }
    }
}

/// Plain-text rendering of a listing
pub fn render_listing(surface: &DisplaySurface<'_>) -> String {
    let mut out = String::new();
    match &surface.status {
        ListStatus::Idle => {}
        ListStatus::Loading => out.push_str("Loading...\n"),
        ListStatus::Error(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        ListStatus::Empty => {
            let _ = writeln!(out, "{NO_POSTS}");
        }
        ListStatus::Ready => {
            for card in surface.posts.iter().map(PostCard::from) {
                let _ = writeln!(out, "{}  [{}]  {}", card.date, card.status, card.title);
                if !card.description.is_empty() {
                    let _ = writeln!(out, "    {}", card.description);
                }
                let _ = writeln!(out, "    id: {}", card.id);
            }
        }
    }

    if let Some(control) = &surface.page_control {
        let _ = writeln!(out, "{}", render_page_control(control));
    } else if surface.has_more && surface.status == ListStatus::Ready {
        let _ = writeln!(
            out,
            "Load More ({} of {})",
            surface.posts.len(),
            surface.total_count
        );
    }
    out
}

/// `< 1 [2] 3 >` with disabled arrows shown as `.`
pub fn render_page_control(control: &PageControl) -> String {
    let mut parts = Vec::with_capacity(control.buttons.len() + 2);
    parts.push(if control.previous_enabled { "<" } else { "." }.to_string());
    for button in &control.buttons {
        if button.current {
            parts.push(format!("[{}]", button.number));
        } else {
            parts.push(button.number.to_string());
        }
    }
    parts.push(if control.next_enabled { ">" } else { "." }.to_string());
    parts.join(" ")
}

/// Plain-text rendering of a single post page
pub fn render_detail(state: &DetailState) -> String {
    match state {
        DetailState::Idle => String::new(),
        DetailState::Loading => "Loading...\n".to_string(),
        DetailState::NotFound { .. } => {
            format!("{POST_NOT_FOUND}\n{BACK_LABEL}: {BACK_LINK}\n")
        }
        DetailState::Failed { message } => format!("{message}\n{BACK_LABEL}: {BACK_LINK}\n"),
        DetailState::Loaded { post } => {
            let mut out = String::new();
            let _ = writeln!(out, "{BACK_LABEL}: {BACK_LINK}");
            let _ = writeln!(
                out,
                "{}  [{}]",
                format_date(Some(post.display_date())),
                status_label(post.published)
            );
            let _ = writeln!(out, "\n{}\n", post.title);
            if !post.description.is_empty() {
                let _ = writeln!(out, "{}\n", post.description);
            }
            if let Some(image) = &post.image_url {
                let _ = writeln!(out, "![{}]({image})\n", post.title);
            }
            out.push_str(&post.content);
            out.push('\n');
            out
        }
    }
}
