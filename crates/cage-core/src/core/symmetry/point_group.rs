use serde::{Deserialize, Serialize};
use std::fmt;

/// A Schoenflies point-group symbol such as `Ih`, `D6d` or `C2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointGroup(String);

impl PointGroup {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the group contains only proper rotations.
    ///
    /// Groups in the `s`, `v`, `d`, `h` and `i` families and the `S2n`
    /// rotoreflection groups contain an improper element, so a structure
    /// with one of these symmetries is its own mirror image.
    pub fn is_chiral(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            None => true,
            Some('S') => false,
            Some(_) => !chars.any(|c| matches!(c, 's' | 'v' | 'd' | 'h' | 'i')),
        }
    }
}

impl From<&str> for PointGroup {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl fmt::Display for PointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_groups_are_chiral() {
        for symbol in ["C1", "C2", "C5", "D2", "D3", "T", "O", "I"] {
            assert!(PointGroup::from(symbol).is_chiral(), "{symbol}");
        }
    }

    #[test]
    fn groups_with_improper_elements_are_achiral() {
        for symbol in ["Cs", "Ci", "C2v", "C3h", "D6d", "D5h", "Td", "Th", "Oh", "Ih", "S4", "S6"] {
            assert!(!PointGroup::from(symbol).is_chiral(), "{symbol}");
        }
    }

    #[test]
    fn display_prints_the_symbol() {
        assert_eq!(PointGroup::new("D6d").to_string(), "D6d");
    }
}
