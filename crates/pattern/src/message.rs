use std::fmt;

/// Text to draw, normalized to upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    text: String,
}

impl Message {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_uppercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
