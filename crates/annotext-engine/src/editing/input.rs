use crate::editing::commands::Cmd;
use crate::editing::leaf::Mark;

/// Formatting requests arriving as `beforeinput`-style input types
/// (`formatBold`, `formatItalic`, `formatUnderline`, `formatComment`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatInput {
    Bold,
    Italic,
    Underline,
    Comment,
}

impl FormatInput {
    pub fn from_input_type(input_type: &str) -> Option<Self> {
        match input_type {
            "formatBold" => Some(FormatInput::Bold),
            "formatItalic" => Some(FormatInput::Italic),
            "formatUnderline" => Some(FormatInput::Underline),
            "formatComment" => Some(FormatInput::Comment),
            _ => None,
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            FormatInput::Bold => Mark::Bold,
            FormatInput::Italic => Mark::Italic,
            FormatInput::Underline => Mark::Underlined,
            FormatInput::Comment => Mark::Comment,
        }
    }

    /// Toggle command for this input. `comment_text` is attached when a
    /// comment gets set and ignored for the other marks.
    pub fn to_cmd(self, comment_text: Option<&str>) -> Cmd {
        match (self, comment_text) {
            (FormatInput::Comment, Some(text)) => Cmd::ToggleComment {
                text: text.to_string(),
            },
            _ => Cmd::ToggleMark { mark: self.mark() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("formatBold", Some(FormatInput::Bold))]
    #[case("formatItalic", Some(FormatInput::Italic))]
    #[case("formatUnderline", Some(FormatInput::Underline))]
    #[case("formatComment", Some(FormatInput::Comment))]
    #[case("formatStrikeThrough", None)]
    #[case("insertText", None)]
    fn test_from_input_type(#[case] input_type: &str, #[case] expected: Option<FormatInput>) {
        assert_eq!(FormatInput::from_input_type(input_type), expected);
    }

    #[test]
    fn test_underline_input_maps_to_underlined_mark() {
        assert_eq!(
            FormatInput::Underline.to_cmd(Some("ignored")),
            Cmd::ToggleMark {
                mark: Mark::Underlined
            }
        );
    }

    #[test]
    fn test_comment_input_carries_text() {
        assert_eq!(
            FormatInput::Comment.to_cmd(Some("note")),
            Cmd::ToggleComment {
                text: "note".to_string()
            }
        );
        assert_eq!(
            FormatInput::Comment.to_cmd(None),
            Cmd::ToggleMark {
                mark: Mark::Comment
            }
        );
    }
}
