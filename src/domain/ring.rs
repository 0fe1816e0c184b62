use serde::Deserialize;
use std::fmt;

/// Ring letters used when no alphabet is configured, center outward
pub const DEFAULT_RINGS: &str = "ABCDEF";

/// A ring identifier: one letter of the ring alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RingId(char);

impl RingId {
    pub fn new(letter: char) -> Self {
        Self(letter)
    }

    pub fn letter(&self) -> char {
        self.0
    }

    /// Parse a ring from a token such as the street part of a placement address.
    /// Only single-character tokens qualify.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self(c)),
            _ => None,
        }
    }
}

impl From<char> for RingId {
    fn from(letter: char) -> Self {
        Self(letter)
    }
}

impl fmt::Display for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered set of ring letters, innermost first
///
/// A ring's position in the alphabet is its radial index: the first letter
/// sits at the base radius, each following letter one ring width further out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct RingAlphabet {
    letters: Vec<char>,
}

impl RingAlphabet {
    pub fn new(letters: impl IntoIterator<Item = char>) -> Self {
        Self {
            letters: letters.into_iter().collect(),
        }
    }

    /// Radial index of a ring, `None` if the letter is not part of the alphabet
    pub fn index_of(&self, ring: RingId) -> Option<usize> {
        self.letters.iter().position(|&c| c == ring.letter())
    }

    pub fn contains(&self, ring: RingId) -> bool {
        self.index_of(ring).is_some()
    }

    pub fn rings(&self) -> impl Iterator<Item = RingId> + '_ {
        self.letters.iter().map(|&c| RingId(c))
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// First letter that appears more than once, if any
    pub fn first_duplicate(&self) -> Option<char> {
        self.letters
            .iter()
            .enumerate()
            .find(|(i, c)| self.letters[..*i].contains(c))
            .map(|(_, &c)| c)
    }
}

impl Default for RingAlphabet {
    fn default() -> Self {
        Self::from(DEFAULT_RINGS)
    }
}

impl From<&str> for RingAlphabet {
    fn from(letters: &str) -> Self {
        Self::new(letters.chars().filter(|c| !c.is_whitespace()))
    }
}

impl From<String> for RingAlphabet {
    fn from(letters: String) -> Self {
        Self::from(letters.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet_order() {
        let alphabet = RingAlphabet::default();
        assert_eq!(alphabet.len(), 6);
        assert_eq!(alphabet.index_of(RingId::new('A')), Some(0));
        assert_eq!(alphabet.index_of(RingId::new('F')), Some(5));
        assert_eq!(alphabet.index_of(RingId::new('G')), None);
    }

    #[test]
    fn test_ring_from_token() {
        assert_eq!(RingId::from_token("B"), Some(RingId::new('B')));
        assert_eq!(RingId::from_token("B3:00"), None);
        assert_eq!(RingId::from_token(""), None);
    }

    #[test]
    fn test_alphabet_ignores_whitespace() {
        let alphabet = RingAlphabet::from("A B C");
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.index_of(RingId::new('C')), Some(2));
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(RingAlphabet::from("ABCA").first_duplicate(), Some('A'));
        assert_eq!(RingAlphabet::default().first_duplicate(), None);
    }
}
