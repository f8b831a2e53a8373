//! Stored puzzle records.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_RATING: i32 = 1500;
pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 3000;
pub const DEFAULT_RATING_DEVIATION: i32 = 100;
pub const DEFAULT_POPULARITY: i32 = 50;

/// Identifier the corpus assigned to a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleId(pub i64);

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rating band shown next to a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn from_rating(rating: i32) -> Self {
        match rating {
            r if r < 1200 => Difficulty::Easy,
            r if r < 1800 => Difficulty::Medium,
            r if r < 2400 => Difficulty::Hard,
            _ => Difficulty::Expert,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        })
    }
}

/// A puzzle as stored in a corpus.
///
/// `moves[0]` is the opponent's move that sets the puzzle up; the rest is
/// the solution, alternating between the solver and the opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: PuzzleId,
    /// External identifier, e.g. the source database's short id.
    pub key: String,
    pub fen: String,
    pub moves: Vec<String>,
    pub rating: i32,
    pub rating_deviation: i32,
    pub popularity: i32,
    pub nb_plays: i32,
    pub themes: Vec<String>,
    pub game_url: String,
    pub opening_tags: Vec<String>,
}

impl Puzzle {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_rating(self.rating)
    }

    pub fn setup_move(&self) -> Option<&str> {
        self.moves.first().map(String::as_str)
    }

    pub fn solution_moves(&self) -> &[String] {
        self.moves.get(1..).unwrap_or(&[])
    }
}

/// A puzzle that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPuzzle {
    pub key: String,
    pub fen: String,
    pub moves: Vec<String>,
    pub rating: i32,
    pub rating_deviation: i32,
    pub popularity: i32,
    pub nb_plays: i32,
    pub themes: Vec<String>,
    pub game_url: String,
    pub opening_tags: Vec<String>,
}

impl NewPuzzle {
    pub fn new(key: impl Into<String>, fen: impl Into<String>, moves: &str) -> Self {
        NewPuzzle {
            key: key.into(),
            fen: fen.into(),
            moves: parse_move_list(moves),
            rating: DEFAULT_RATING,
            rating_deviation: DEFAULT_RATING_DEVIATION,
            popularity: DEFAULT_POPULARITY,
            nb_plays: 0,
            themes: Vec::new(),
            game_url: String::new(),
            opening_tags: Vec::new(),
        }
    }

    /// Sets the rating, clamped to the accepted range.
    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = rating.clamp(MIN_RATING, MAX_RATING);
        self
    }

    pub fn with_stats(mut self, rating_deviation: i32, popularity: i32, nb_plays: i32) -> Self {
        self.rating_deviation = rating_deviation;
        self.popularity = popularity;
        self.nb_plays = nb_plays;
        self
    }

    pub fn with_themes(mut self, themes: &str) -> Self {
        self.themes = parse_tag_list(themes);
        self
    }

    pub fn with_opening_tags(mut self, tags: &str) -> Self {
        self.opening_tags = parse_tag_list(tags);
        self
    }

    pub fn with_game_url(mut self, url: impl Into<String>) -> Self {
        self.game_url = url.into();
        self
    }

    pub fn into_puzzle(self, id: PuzzleId) -> Puzzle {
        Puzzle {
            id,
            key: self.key,
            fen: self.fen,
            moves: self.moves,
            rating: self.rating,
            rating_deviation: self.rating_deviation,
            popularity: self.popularity,
            nb_plays: self.nb_plays,
            themes: self.themes,
            game_url: self.game_url,
            opening_tags: self.opening_tags,
        }
    }
}

/// Splits stored move text into coordinate moves.
///
/// Both `"e2e4 e7e5"` and `"e2e4,e7e5"` are accepted.
pub fn parse_move_list(text: &str) -> Vec<String> {
    split_list(text)
}

/// Splits a stored theme or opening-tag list.
pub fn parse_tag_list(text: &str) -> Vec<String> {
    split_list(text)
}

fn split_list(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
