use std::fmt;

pub const SPACE_TOKEN: &str = "SPACE";
pub const NEWLINE_TOKEN: &str = "NEWLINE";

/// Number of distinct symbols: 26 letters, 10 digits, `.`, `,`, space, newline.
pub const ALPHABET_SIZE: usize = 40;

/// A character from the permitted alphabet. Symbols order by character code,
/// so newline < space < `,` < `.` < digits < letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// Folds ASCII letters to lowercase, then classifies. Returns `None` for
    /// anything outside the alphabet.
    pub fn from_char(ch: char) -> Option<Self> {
        let ch = ch.to_ascii_lowercase();
        match ch {
            'a'..='z' | '0'..='9' | '.' | ',' | ' ' | '\n' => Some(Self(ch as u8)),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            SPACE_TOKEN => Some(Self(b' ')),
            NEWLINE_TOKEN => Some(Self(b'\n')),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    // Tokens are already folded, so `A` is not a leaf token.
                    (Some(ch), None) if !ch.is_ascii_uppercase() => Self::from_char(ch),
                    _ => None,
                }
            }
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    pub fn token(self) -> String {
        match self.0 {
            b' ' => SPACE_TOKEN.to_string(),
            b'\n' => NEWLINE_TOKEN.to_string(),
            value => (value as char).to_string(),
        }
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> Self {
        symbol.as_char()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// The text the codec actually carries: folded to lowercase, with everything
/// outside the alphabet dropped.
pub fn filter_and_fold(text: &str) -> String {
    symbols(text).map(Symbol::as_char).collect()
}

pub fn symbols(text: &str) -> impl Iterator<Item = Symbol> + '_ {
    text.chars().filter_map(Symbol::from_char)
}
