//! Terminal rendering of transcript chunks and the speaker legend
//!
//! Everything here builds styled strings and nothing touches the terminal,
//! so the blocks can be asserted on in tests. The binary decides when and
//! where to print them.

use crate::api::Chunk;
use crate::palette::{SpeakerColor, SpeakerPalette, RESERVED_SPEAKER, UNKNOWN_SPEAKER};
use crossterm::style::{Color, Stylize};

/// Display name and color key for a chunk.
///
/// The two differ for unattributed chunks: the block shows "Speaker" while the
/// color (and therefore the legend) is keyed on "Unknown Speaker". That
/// mismatch is inherited from the original client and preserved on purpose.
pub fn speaker_display(chunk: &Chunk) -> (String, String) {
    if chunk.source.as_deref() == Some("mic") {
        return (RESERVED_SPEAKER.to_string(), RESERVED_SPEAKER.to_string());
    }

    match &chunk.speaker_id {
        Some(id) => (id.clone(), id.clone()),
        None => ("Speaker".to_string(), UNKNOWN_SPEAKER.to_string()),
    }
}

/// One rendered chunk: a colored left border, the play ordinal, the server
/// timestamp, a badged speaker name, and the transcript text.
pub fn chunk_block(ordinal: usize, chunk: &Chunk, name: &str, color: SpeakerColor) -> String {
    let border = "▌".with(to_term(color));
    let badge = format!(" {name} ").on(to_term(color)).with(Color::Black);
    let timestamp = chunk.timestamp.as_str().dark_grey();

    format!(
        "{border} [{ordinal:>3}] {timestamp}  {badge}\n{border}       {text}\n",
        text = chunk.text
    )
}

/// The legend line listing every known speaker key with its color. Empty when
/// no speaker has been assigned a color yet; the caller skips printing it.
pub fn legend(palette: &SpeakerPalette) -> String {
    let mut items = Vec::new();

    for (key, color) in palette.known_speakers() {
        let badge = format!(" {key} ").on(to_term(color)).with(Color::Black);
        let label = if key == RESERVED_SPEAKER {
            "Your microphone"
        } else {
            "Computer audio"
        };
        items.push(format!("{badge} {label}"));
    }

    if items.is_empty() {
        return String::new();
    }

    format!("Speakers: {}", items.join("  "))
}

/// The session status line.
pub fn status_line(recording: bool) -> String {
    if recording {
        format!("{} Recording...", "●".red())
    } else {
        format!("{} Inactive", "○".dark_grey())
    }
}

fn to_term(color: SpeakerColor) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
