/// Errors that can occur in the text measurement layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// The requested font size is not representable.
    InvalidFontSize(f32),

    /// The shaping engine rejected the text.
    ShapingError(String),

    /// Invalid text range.
    InvalidRange {
        start: usize,
        end: usize,
        text_len: usize,
    },
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::InvalidFontSize(size) => {
                write!(f, "invalid font size: {size}")
            }
            TextError::ShapingError(msg) => write!(f, "shaping failed: {msg}"),
            TextError::InvalidRange {
                start,
                end,
                text_len,
            } => {
                write!(f, "invalid range {start}..{end} for text of length {text_len}")
            }
        }
    }
}

impl std::error::Error for TextError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = TextError::InvalidRange {
            start: 4,
            end: 9,
            text_len: 6,
        };
        assert_eq!(err.to_string(), "invalid range 4..9 for text of length 6");
        assert_eq!(
            TextError::InvalidFontSize(-1.0).to_string(),
            "invalid font size: -1"
        );
    }
}
