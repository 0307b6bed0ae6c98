use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Red = 0,
    Yellow = 1,
    Green = 2,
    Blue = 3,
    White = 4,
}

impl Suit {
    pub const ALL: [Suit; 5] = [Suit::Red, Suit::Yellow, Suit::Green, Suit::Blue, Suit::White];
    pub const COUNT: usize = 5;

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Red),
            1 => Some(Suit::Yellow),
            2 => Some(Suit::Green),
            3 => Some(Suit::Blue),
            4 => Some(Suit::White),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Red => "R",
            Suit::Yellow => "Y",
            Suit::Green => "G",
            Suit::Blue => "B",
            Suit::White => "W",
        };
        f.write_str(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn display_returns_ascii_symbols() {
        assert_eq!(Suit::Red.to_string(), "R");
        assert_eq!(Suit::White.to_string(), "W");
    }

    #[test]
    fn from_index_maps_valid_values() {
        assert_eq!(Suit::from_index(2), Some(Suit::Green));
        assert_eq!(Suit::from_index(5), None);
    }

    #[test]
    fn all_matches_count() {
        assert_eq!(Suit::ALL.len(), Suit::COUNT);
    }
}
