use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const PENTAGON: u8 = 5;
pub const HEXAGON: u8 = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseSequenceError {
    #[error("Face sequence is empty")]
    Empty,
    #[error("Invalid face size '{character}' at position {position}; expected a digit from 3 to 9")]
    InvalidFaceSize { character: char, position: usize },
}

/// The ordered face sizes a cage is wound from, written as a digit string
/// such as `"555555555555"`.
///
/// Whitespace, commas and underscores are ignored when parsing, so
/// `"5 5 6, 5"` and `"5565"` describe the same sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FaceSequence(Vec<u8>);

impl FaceSequence {
    pub fn new(sizes: Vec<u8>) -> Self {
        Self(sizes)
    }

    /// Builds the sequence with pentagons at the given 0-based positions and
    /// hexagons everywhere else.
    pub fn from_pentagon_positions(length: usize, positions: &[usize]) -> Self {
        let mut sizes = vec![HEXAGON; length];
        for &p in positions.iter().filter(|&&p| p < length) {
            sizes[p] = PENTAGON;
        }
        Self(sizes)
    }

    pub fn sizes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count_of(&self, size: u8) -> usize {
        self.0.iter().filter(|&&s| s == size).count()
    }

    /// Returns the 0-based positions of all pentagons.
    pub fn pentagon_positions(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == PENTAGON)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns the length of the longest run of consecutive pentagons.
    pub fn longest_pentagon_run(&self) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for &s in &self.0 {
            if s == PENTAGON {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        longest
    }

    /// Returns the number of vertices a trivalent cage wound from this sequence has.
    pub fn expected_vertex_count(&self) -> usize {
        let sides: usize = self.0.iter().map(|&s| s as usize).sum();
        sides / 3
    }
}

impl From<Vec<u8>> for FaceSequence {
    fn from(sizes: Vec<u8>) -> Self {
        Self(sizes)
    }
}

impl FromStr for FaceSequence {
    type Err = ParseSequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sizes = Vec::with_capacity(s.len());
        for (position, character) in s.chars().enumerate() {
            if character.is_whitespace() || character == ',' || character == '_' {
                continue;
            }
            match character.to_digit(10) {
                Some(d @ 3..=9) => sizes.push(d as u8),
                _ => {
                    return Err(ParseSequenceError::InvalidFaceSize {
                        character,
                        position,
                    });
                }
            }
        }
        if sizes.is_empty() {
            return Err(ParseSequenceError::Empty);
        }
        Ok(Self(sizes))
    }
}

impl TryFrom<String> for FaceSequence {
    type Error = ParseSequenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FaceSequence> for String {
    fn from(sequence: FaceSequence) -> Self {
        sequence.to_string()
    }
}

impl fmt::Display for FaceSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}
