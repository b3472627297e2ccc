//! Note-flow type definitions

use crate::pitch::Pitched;
use serde::Serialize;
use std::fmt;

/// Melodic direction carried from note to note and across measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// Direction of the motion `from` -> `to`, or `None` for a unison.
    ///
    /// This is the single direction-update rule of the engine: forward
    /// generation keeps its current direction on a unison, backward fill
    /// treats a unison as ascending.
    ///
    /// ```
    /// use arpeggio_flow::flow::Direction;
    ///
    /// assert_eq!(Direction::of_motion(&60, &64), Some(Direction::Ascending));
    /// assert_eq!(Direction::of_motion(&64, &60), Some(Direction::Descending));
    /// assert_eq!(Direction::of_motion(&60, &60), None);
    /// ```
    pub fn of_motion<A: Pitched + ?Sized, B: Pitched + ?Sized>(from: &A, to: &B) -> Option<Self> {
        match to.height().cmp(&from.height()) {
            std::cmp::Ordering::Greater => Some(Direction::Ascending),
            std::cmp::Ordering::Less => Some(Direction::Descending),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Ascending => "↑",
            Direction::Descending => "↓",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "ascending"),
            Direction::Descending => write!(f, "descending"),
        }
    }
}

/// Position of a pitch relative to the edges of an admissible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boundary {
    pub at_low: bool,
    pub at_high: bool,
}

impl Boundary {
    pub fn any(&self) -> bool {
        self.at_low || self.at_high
    }
}

/// One measure produced by the engine
///
/// # Fields
/// - `pitches`: exactly `notes_per_measure` pitches, in playing order
/// - `ending_direction`: direction to carry into the next measure
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMeasure<P> {
    pub pitches: Vec<P>,
    pub ending_direction: Direction,
}

impl<P> GeneratedMeasure<P> {
    pub fn first(&self) -> Option<&P> {
        self.pitches.first()
    }

    pub fn last(&self) -> Option<&P> {
        self.pitches.last()
    }
}
