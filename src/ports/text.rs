// src/ports/text.rs
use crate::constants::CAPTION_PREVIEW_LINES;
use crate::domain::PhotoNote;
use crate::util::text::caption_preview;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt::Display;
use tracing::instrument;
use uuid::Uuid;

/// One line of the note list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRow {
    pub position: usize,
    pub id: Uuid,
    pub caption: String,
    pub image_path: String,
    pub date_created: DateTime<chrono::Utc>,
    /// Whether the picture resolved; `false` shows a placeholder.
    pub has_picture: bool,
}

impl NoteRow {
    pub fn new(position: usize, note: &PhotoNote, has_picture: bool) -> Self {
        Self {
            position,
            id: note.id,
            caption: note.caption.clone(),
            image_path: note.image_path.clone(),
            date_created: note.date_created,
            has_picture,
        }
    }
}

/// Medium date with short time, e.g. `Oct 18, 2026 at 3:04 PM`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%b %-d, %Y at %-I:%M %p").to_string()
}

#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_row(&self, row: &NoteRow) -> String {
        let date = format_date(&row.date_created.with_timezone(&Local));
        let placeholder = if row.has_picture { "" } else { "  [no image]" };
        format!(
            "{:>3}  {}\n     {}  {}{}",
            row.position,
            caption_preview(&row.caption, CAPTION_PREVIEW_LINES),
            row.id,
            date,
            placeholder
        )
    }

    #[instrument(level = "trace", skip(self, rows))]
    pub fn render_list(&self, rows: &[NoteRow]) -> String {
        if rows.is_empty() {
            return "No photo notes yet.".to_string();
        }
        rows.iter()
            .map(|row| self.render_row(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_json(&self, rows: &[NoteRow]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(rows)
    }
}
