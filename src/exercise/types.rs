//! Exercise type definitions

use crate::flow::Direction;
use crate::fretboard::Shape;
use crate::pitch::Note;
use serde::Serialize;

/// One generated measure (or, in a two-chord bar, one chord's half of it)
///
/// # Fields
/// - `bar`: bar number (1-indexed); two segments of a split bar share it
/// - `chord_symbol`: the progression token as written (`ii`, `Am7`, ...)
/// - `chord_name`: resolved chord name (`Dm7`)
/// - `notes`: sounding pitches in playing order
/// - `direction`: melodic direction at the end of the measure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMeasure {
    pub bar: usize,
    pub chord_symbol: String,
    pub chord_name: String,
    pub notes: Vec<Note>,
    pub direction: Direction,
}

/// A complete arpeggio exercise
///
/// # Fields
/// - `title`: song title, if generated from the song library
/// - `key`: key name (`"G major"`)
/// - `fifths`: key signature (positive = sharps, negative = flats)
/// - `shape`: CAGED shape the notes were restricted to, if any
/// - `tempo`: tempo in BPM (quarter note beat)
/// - `notes_per_bar`: notes in each full bar
/// - `anchor`: index into `measures` where generation started
/// - `measures`: generated measures in playing order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub key: String,
    pub fifths: i8,
    pub shape: Option<Shape>,
    pub tempo: u16,
    pub notes_per_bar: usize,
    pub anchor: usize,
    pub measures: Vec<ExerciseMeasure>,
}

impl Exercise {
    /// Number of bars (split bars count once).
    pub fn bar_count(&self) -> usize {
        self.measures.last().map_or(0, |m| m.bar)
    }

    /// All notes in playing order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.measures.iter().flat_map(|m| m.notes.iter())
    }

    /// Measures belonging to `bar` (1-indexed).
    pub fn bar(&self, bar: usize) -> impl Iterator<Item = &ExerciseMeasure> + '_ {
        self.measures.iter().filter(move |m| m.bar == bar)
    }
}
