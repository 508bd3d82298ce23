/// Display key for chunks captured from the local microphone. Always colored
/// with the reserved first palette slot.
pub const RESERVED_SPEAKER: &str = "You";

/// Display key used to colorize chunks that arrive with no speaker label.
/// Note the mismatch with the rendered name ("Speaker"): the legend shows this
/// key even though no chunk text ever does. Inherited behavior, kept as-is.
pub const UNKNOWN_SPEAKER: &str = "Unknown Speaker";

/// The fixed ten-slot palette. Slot 0 is reserved for [`RESERVED_SPEAKER`];
/// the remaining nine slots are handed out round-robin, so the 10th distinct
/// speaker repeats the 1st speaker's color. Documented capacity limit.
pub const PALETTE: [SpeakerColor; 10] = [
    SpeakerColor::new(0x4c, 0xaf, 0x50), // green, reserved for "You"
    SpeakerColor::new(0x00, 0xbf, 0xff), // electric blue
    SpeakerColor::new(0xff, 0x57, 0x22), // deep orange
    SpeakerColor::new(0x9c, 0x27, 0xb0), // purple
    SpeakerColor::new(0xff, 0x98, 0x00), // orange
    SpeakerColor::new(0x21, 0x96, 0xf3), // blue
    SpeakerColor::new(0xf4, 0x43, 0x36), // red
    SpeakerColor::new(0x67, 0x3a, 0xb7), // deep purple
    SpeakerColor::new(0x00, 0x96, 0x88), // teal
    SpeakerColor::new(0xcd, 0xdc, 0x39), // lime
];

/// One palette slot as an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SpeakerColor {
    const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Stable speaker-to-color assignment for one recording session.
///
/// "You" always maps to slot 0 and is never recorded in the assignment list;
/// every other key gets the next unused slot in first-seen order. The list is
/// insertion-ordered because the legend renders speakers in the order they
/// were first heard.
#[derive(Debug, Default)]
pub struct SpeakerPalette {
    assigned: Vec<(String, SpeakerColor)>,
}

impl SpeakerPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// The color for `key`, assigning a new slot on first sight.
    pub fn color_for(&mut self, key: &str) -> SpeakerColor {
        if key == RESERVED_SPEAKER {
            return PALETTE[0];
        }

        if let Some((_, color)) = self.assigned.iter().find(|(k, _)| k == key) {
            return *color;
        }

        let slot = (self.assigned.len() % (PALETTE.len() - 1)) + 1;
        let color = PALETTE[slot];
        self.assigned.push((key.to_string(), color));
        color
    }

    /// Drop every assignment except "You". Called when a new session starts.
    pub fn reset(&mut self) {
        self.assigned.retain(|(key, _)| key == RESERVED_SPEAKER);
    }

    /// Known speakers in first-seen order, for the legend.
    pub fn known_speakers(&self) -> impl Iterator<Item = (&str, SpeakerColor)> {
        self.assigned.iter().map(|(key, color)| (key.as_str(), *color))
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn you_always_gets_the_reserved_slot() {
        let mut palette = SpeakerPalette::new();
        assert_eq!(palette.color_for("You"), PALETTE[0]);

        // Still slot 0 after other speakers have claimed colors.
        palette.color_for("Speaker 1");
        palette.color_for("Speaker 2");
        assert_eq!(palette.color_for("You"), PALETTE[0]);

        // "You" is never recorded as an assignment.
        assert_eq!(palette.known_speakers().count(), 2);
    }

    #[test]
    fn first_nine_speakers_get_distinct_colors() {
        let mut palette = SpeakerPalette::new();
        let mut seen = Vec::new();

        for i in 0..9 {
            let color = palette.color_for(&format!("Speaker {i}"));
            assert!(
                !seen.contains(&color),
                "speaker {i} repeated an earlier color"
            );
            assert_ne!(color, PALETTE[0], "speaker {i} took the reserved slot");
            seen.push(color);
        }
    }

    #[test]
    fn tenth_speaker_repeats_the_first() {
        let mut palette = SpeakerPalette::new();

        let first = palette.color_for("Speaker 0");
        for i in 1..9 {
            palette.color_for(&format!("Speaker {i}"));
        }

        // Slot capacity is 9 non-reserved colors; the 10th wraps around.
        assert_eq!(palette.color_for("Speaker 9"), first);
    }

    #[test]
    fn assignment_is_memoized() {
        let mut palette = SpeakerPalette::new();
        let first = palette.color_for("Alice");
        palette.color_for("Bob");
        palette.color_for("Carol");
        assert_eq!(palette.color_for("Alice"), first);
    }

    #[test]
    fn reset_keeps_only_you() {
        let mut palette = SpeakerPalette::new();
        palette.color_for("You");
        palette.color_for("Speaker 1");
        palette.color_for("Speaker 2");

        palette.reset();

        assert!(palette.is_empty());
        // Fresh assignments start over from slot 1.
        assert_eq!(palette.color_for("Speaker 3"), PALETTE[1]);
    }

    #[test]
    fn legend_order_is_first_seen_order() {
        let mut palette = SpeakerPalette::new();
        palette.color_for("Carol");
        palette.color_for("Alice");
        palette.color_for("Carol");
        palette.color_for("Bob");

        let order: Vec<&str> = palette.known_speakers().map(|(key, _)| key).collect();
        assert_eq!(order, vec!["Carol", "Alice", "Bob"]);
    }
}
