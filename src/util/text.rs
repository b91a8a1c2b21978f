// src/util/text.rs

/// True when the text is empty after trimming whitespace and newlines.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Shorten a caption for a list row.
///
/// Keeps at most `max_lines` non-empty lines and marks the cut with an
/// ellipsis.
///
/// # Examples
///
/// ```
/// use photonotes::util::text::caption_preview;
///
/// assert_eq!(caption_preview("Sunset\nat the pier\nwith Sam", 2), "Sunset at the pier…");
/// ```
pub fn caption_preview(caption: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = caption
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    let mut preview = lines
        .iter()
        .take(max_lines)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if lines.len() > max_lines {
        preview.push('…');
    }
    preview
}
