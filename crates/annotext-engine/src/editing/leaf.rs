use serde::{Deserialize, Deserializer, Serialize};

/// Boolean formatting attributes a leaf can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underlined,
    /// The only mark with a payload (`Leaf::data`)
    Comment,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Bold, Mark::Italic, Mark::Underlined, Mark::Comment];

    /// Attribute name as it appears in the JSON document format
    pub fn name(self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underlined => "underlined",
            Mark::Comment => "comment",
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mark: {0}")]
pub struct UnknownMark(pub String);

impl std::str::FromStr for Mark {
    type Err = UnknownMark;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mark::ALL
            .into_iter()
            .find(|mark| mark.name() == s)
            .ok_or_else(|| UnknownMark(s.to_string()))
    }
}

/// Presentational wrapper a renderer applies around a leaf's text,
/// listed innermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    Strong,
    Emphasis,
    Underline,
    Comment { data: String },
}

/// Smallest text-bearing unit of a document.
///
/// Serialized in the same shape the editor stores on disk:
/// `{"text": "or comment", "comment": true, "data": " comment text"}`.
/// Marks that are unset are omitted, and `null` reads as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub bold: bool,
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub italic: bool,
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub underlined: bool,
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub comment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper for fixtures and sample content
    pub fn with(mut self, mark: Mark) -> Self {
        self.set(mark, true);
        self
    }

    pub fn with_comment(mut self, data: impl Into<String>) -> Self {
        self.comment = true;
        self.data = Some(data.into());
        self
    }

    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underlined => self.underlined,
            Mark::Comment => self.comment,
        }
    }

    /// Set or clear a mark. Clearing `Comment` also drops its payload.
    pub fn set(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Bold => self.bold = on,
            Mark::Italic => self.italic = on,
            Mark::Underlined => self.underlined = on,
            Mark::Comment => {
                self.comment = on;
                if !on {
                    self.data = None;
                }
            }
        }
    }

    /// Length in characters; all document offsets count characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when both leaves carry exactly the same marks and payload
    pub fn same_marks(&self, other: &Leaf) -> bool {
        self.bold == other.bold
            && self.italic == other.italic
            && self.underlined == other.underlined
            && self.comment == other.comment
            && self.data == other.data
    }

    /// Split at a character offset, keeping the head and returning the tail
    /// with identical marks
    pub fn split_off(&mut self, at: usize) -> Leaf {
        let byte = byte_offset(&self.text, at);
        let tail = self.text.split_off(byte);
        Leaf {
            text: tail,
            ..self.marks_only()
        }
    }

    /// Copy of this leaf's marks with empty text
    pub fn marks_only(&self) -> Leaf {
        Leaf {
            text: String::new(),
            bold: self.bold,
            italic: self.italic,
            underlined: self.underlined,
            comment: self.comment,
            data: self.data.clone(),
        }
    }

    /// Map marks to presentational wrappers. A comment without a payload
    /// renders with empty comment text.
    pub fn decorations(&self) -> Vec<Decoration> {
        let mut decorations = Vec::new();
        if self.bold {
            decorations.push(Decoration::Strong);
        }
        if self.italic {
            decorations.push(Decoration::Emphasis);
        }
        if self.underlined {
            decorations.push(Decoration::Underline);
        }
        if self.comment {
            decorations.push(Decoration::Comment {
                data: self.data.clone().unwrap_or_default(),
            });
        }
        decorations
    }
}

/// Byte index of the `chars`-th character, clamped to the end of `text`
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mark_names_round_trip_through_from_str() {
        for mark in Mark::ALL {
            assert_eq!(mark.name().parse::<Mark>(), Ok(mark));
        }
        assert_eq!(
            "strikethrough".parse::<Mark>(),
            Err(UnknownMark("strikethrough".to_string()))
        );
    }

    #[test]
    fn test_clearing_comment_drops_data() {
        let mut leaf = Leaf::new("note").with_comment("check this");
        leaf.set(Mark::Comment, false);

        assert!(!leaf.comment);
        assert_eq!(leaf.data, None);
    }

    #[test]
    fn test_clearing_bold_keeps_comment_data() {
        let mut leaf = Leaf::new("note").with(Mark::Bold).with_comment("keep");
        leaf.set(Mark::Bold, false);

        assert_eq!(leaf.data.as_deref(), Some("keep"));
    }

    #[test]
    fn test_split_off_respects_multibyte_characters() {
        let mut leaf = Leaf::new("héllo 世界").with(Mark::Italic);
        let tail = leaf.split_off(7);

        assert_eq!(leaf.text, "héllo 世");
        assert_eq!(tail.text, "界");
        assert!(tail.italic);
    }

    #[test]
    fn test_split_off_past_end_yields_empty_tail() {
        let mut leaf = Leaf::new("abc");
        let tail = leaf.split_off(10);

        assert_eq!(leaf.text, "abc");
        assert_eq!(tail.text, "");
    }

    #[test]
    fn test_deserialize_treats_null_and_missing_as_unset() {
        let leaf: Leaf =
            serde_json::from_str(r#"{"text": "x", "bold": null, "isVoid": true}"#).unwrap();

        assert_eq!(leaf, Leaf::new("x"));
    }

    #[test]
    fn test_serialize_omits_unset_marks() {
        let json = serde_json::to_string(&Leaf::new("b").with(Mark::Bold)).unwrap();
        assert_eq!(json, r#"{"text":"b","bold":true}"#);
    }

    #[test]
    fn test_decorations_follow_nesting_order() {
        let leaf = Leaf::new("x")
            .with(Mark::Underlined)
            .with(Mark::Bold)
            .with(Mark::Comment);

        assert_eq!(
            leaf.decorations(),
            vec![
                Decoration::Strong,
                Decoration::Underline,
                Decoration::Comment {
                    data: String::new()
                },
            ]
        );
    }
}
