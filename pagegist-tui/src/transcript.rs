use ratatui::style::Style;

/// One logical transcript entry. Wrapping to the terminal width happens at
/// render time, so resizes re-flow the whole history.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptLine {
    pub text: String,
    pub style: Style,
}

impl TranscriptLine {
    pub fn new(text: String, style: Style) -> Self {
        Self { text, style }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text.into(), Style::default())
    }
}
