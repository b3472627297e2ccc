//! # Fretboard
//!
//! Instrument range, CAGED shape windows and the scale diagram.
//!
//! ## Instrument
//! An [`Instrument`] is a tuning (lowest string first) plus a fret count. Its
//! playable range runs from the open lowest string to the open highest string
//! plus the fret count:
//!
//! | Tuning    | Frets | Range                  |
//! |-----------|-------|------------------------|
//! | standard  | 24    | E2 (40) ..= E6 (88)    |
//! | standard  | 16    | E2 (40) ..= G#5 (80)   |
//!
//! ## CAGED shapes
//! Each shape is a fret window anchored at the key's root on a reference
//! string. Offsets are relative to that root fret:
//!
//! | Shape | Root string | Window        |
//! |-------|-------------|---------------|
//! | C     | 5th         | root-3 ..= +1 |
//! | A     | 5th         | root-1 ..= +3 |
//! | G     | 6th         | root-3 ..= +1 |
//! | E     | 6th         | root-1 ..= +3 |
//! | D     | 4th         | root-1 ..= +3 |
//!
//! A window that would start below the nut moves up an octave (12 frets).
//!
//! ## Example
//! ```rust
//! use arpeggio_flow::fretboard::{Instrument, Shape};
//! use arpeggio_flow::theory::Key;
//!
//! let guitar = Instrument::standard();
//! assert_eq!(guitar.range(), 40..=88);
//!
//! let key = Key::parse("G").unwrap();
//! let window = Shape::E.window(&key, &guitar).unwrap();
//! assert_eq!((window.start, window.end), (2, 6));
//! ```

use crate::error::FlowError;
use crate::pitch::{Note, PitchClass, Pitched};
use crate::theory::Key;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Frets shown on a scale diagram.
pub const DIAGRAM_FRETS: u8 = 16;

/// Default fret count used for the playable range.
pub const DEFAULT_FRETS: u8 = 24;

const STANDARD_TUNING: [&str; 6] = ["E2", "A2", "D3", "G3", "B3", "E4"];

/// A fretted instrument: open-string pitches, lowest string first, and a fret count.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub tuning: Vec<Note>,
    pub frets: u8,
}

impl Instrument {
    pub fn new(tuning: Vec<Note>, frets: u8) -> Result<Self, FlowError> {
        if tuning.is_empty() {
            return Err(FlowError::ConfigError("tuning needs at least one string".to_string()));
        }
        Ok(Self { tuning, frets })
    }

    /// Six-string guitar in standard tuning with 24 frets.
    pub fn standard() -> Self {
        Self::standard_with_frets(DEFAULT_FRETS)
    }

    pub fn standard_with_frets(frets: u8) -> Self {
        let tuning = STANDARD_TUNING
            .iter()
            .filter_map(|name| Note::parse(name).ok())
            .collect();
        Self { tuning, frets }
    }

    /// Parse a tuning such as `["E2", "A2", "D3", "G3", "B3", "E4"]`.
    pub fn from_names<S: AsRef<str>>(names: &[S], frets: u8) -> Result<Self, FlowError> {
        let tuning = names
            .iter()
            .map(|name| Note::parse(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tuning, frets)
    }

    /// Height of the lowest open string.
    pub fn lowest(&self) -> i32 {
        self.tuning.iter().map(Pitched::height).min().unwrap_or_default()
    }

    /// Height of the highest open string plus the fret count.
    pub fn highest(&self) -> i32 {
        self.tuning.iter().map(Pitched::height).max().unwrap_or_default() + self.frets as i32
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        self.lowest()..=self.highest()
    }

    pub fn contains<P: Pitched + ?Sized>(&self, pitch: &P) -> bool {
        self.range().contains(&pitch.height())
    }

    pub fn string_count(&self) -> usize {
        self.tuning.len()
    }

    /// Guitar string number (1 = highest) for a tuning index (0 = lowest).
    pub fn string_number(&self, index: usize) -> usize {
        self.tuning.len() - index
    }

    /// Heights playable within `window` on any string.
    pub fn heights_in_window(&self, window: &FretWindow) -> Vec<i32> {
        let last_fret = window.end.min(self.frets);
        let mut heights: Vec<i32> = self
            .tuning
            .iter()
            .flat_map(|open| (window.start..=last_fret).map(move |fret| open.height() + fret as i32))
            .collect();
        heights.sort_unstable();
        heights.dedup();
        heights
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::standard()
    }
}

/// Inclusive span of frets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FretWindow {
    pub start: u8,
    pub end: u8,
}

impl FretWindow {
    pub fn contains(&self, fret: u8) -> bool {
        (self.start..=self.end).contains(&fret)
    }
}

/// CAGED fretboard shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Shape {
    C,
    A,
    G,
    E,
    D,
}

impl Shape {
    pub fn parse(s: &str) -> Result<Self, FlowError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(Shape::C),
            "A" => Ok(Shape::A),
            "G" => Ok(Shape::G),
            "E" => Ok(Shape::E),
            "D" => Ok(Shape::D),
            _ => Err(FlowError::UnknownShape(s.to_string())),
        }
    }

    /// Tuning index (0 = lowest string) carrying the shape's root.
    fn root_string(self) -> usize {
        match self {
            Shape::G | Shape::E => 0,
            Shape::C | Shape::A => 1,
            Shape::D => 2,
        }
    }

    /// Fret offsets around the root fret.
    fn offsets(self) -> (i32, i32) {
        match self {
            Shape::C | Shape::G => (-3, 1),
            Shape::A | Shape::E | Shape::D => (-1, 3),
        }
    }

    /// The shape's fret window for `key` on `instrument`.
    pub fn window(self, key: &Key, instrument: &Instrument) -> Result<FretWindow, FlowError> {
        let string = instrument.tuning.get(self.root_string()).ok_or_else(|| {
            FlowError::ConfigError(format!(
                "{} shape needs at least {} strings",
                self,
                self.root_string() + 1
            ))
        })?;

        let root_fret = (key.tonic.semitone() as i32 - string.height()).rem_euclid(12);
        let (low, high) = self.offsets();
        let mut start = root_fret + low;
        if start < 0 {
            start += 12;
        }
        let end = start + (high - low);

        Ok(FretWindow { start: start as u8, end: end as u8 })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::C => "C",
            Shape::A => "A",
            Shape::G => "G",
            Shape::E => "E",
            Shape::D => "D",
        };
        write!(f, "{}", name)
    }
}

/// One scale note on the fretboard
///
/// # Fields
/// - `string`: guitar string number (1 = highest)
/// - `fret`: fret number (0 = open)
/// - `note`: spelled pitch class
/// - `degree`: major-scale degree 1-7
/// - `in_box`: inside the selected shape's fret window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretPosition {
    pub string: usize,
    pub fret: u8,
    #[serde(serialize_with = "serialize_display")]
    pub note: PitchClass,
    pub degree: u8,
    pub is_root: bool,
    pub in_box: bool,
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Scale diagram: every scale note on frets 0..=16, marked in or out of the shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardDiagram {
    pub key: String,
    pub shape: Option<Shape>,
    pub string_count: usize,
    pub fret_count: u8,
    pub highlight: Option<FretWindow>,
    pub positions: Vec<FretPosition>,
}

impl FretboardDiagram {
    pub fn new(key: &Key, shape: Option<Shape>, instrument: &Instrument) -> Result<Self, FlowError> {
        let window = shape.map(|s| s.window(key, instrument)).transpose()?;
        let fret_count = DIAGRAM_FRETS.min(instrument.frets);
        let scale = key.scale();

        let mut positions = Vec::new();
        for (index, open) in instrument.tuning.iter().enumerate() {
            for fret in 0..=fret_count {
                let semitone = (open.height() + fret as i32).rem_euclid(12) as u8;
                let Some(degree) = scale.iter().position(|pc| pc.semitone() == semitone) else {
                    continue;
                };
                positions.push(FretPosition {
                    string: instrument.string_number(index),
                    fret,
                    note: scale[degree],
                    degree: degree as u8 + 1,
                    is_root: degree == 0,
                    in_box: window.is_some_and(|w| w.contains(fret)),
                });
            }
        }

        // Highlight the frets actually occupied by boxed notes
        let boxed = positions.iter().filter(|p| p.in_box).map(|p| p.fret);
        let highlight = match (boxed.clone().min(), boxed.max()) {
            (Some(start), Some(end)) => Some(FretWindow { start, end }),
            _ => None,
        };

        Ok(Self {
            key: key.to_string(),
            shape,
            string_count: instrument.string_count(),
            fret_count,
            highlight,
            positions,
        })
    }

    pub fn position(&self, string: usize, fret: u8) -> Option<&FretPosition> {
        self.positions.iter().find(|p| p.string == string && p.fret == fret)
    }

    /// Plain-text fretboard, highest string on top.
    ///
    /// Boxed notes show their scale degree (`R` for the root), scale notes
    /// outside the box show `o`, everything else `-`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self.shape {
            Some(shape) => out.push_str(&format!("{} - {} shape\n", self.key, shape)),
            None => out.push_str(&format!("{}\n", self.key)),
        }

        out.push_str("   ");
        for fret in 0..=self.fret_count {
            out.push_str(&format!("{:>3}", fret));
        }
        out.push('\n');

        for string in 1..=self.string_count {
            out.push_str(&format!("{:>2} ", string));
            for fret in 0..=self.fret_count {
                let cell = match self.position(string, fret) {
                    Some(p) if p.in_box && p.is_root => "R".to_string(),
                    Some(p) if p.in_box => p.degree.to_string(),
                    Some(_) => "o".to_string(),
                    None => "-".to_string(),
                };
                out.push_str(&format!("{:>3}", cell));
            }
            out.push('\n');
        }

        if let Some(window) = self.highlight {
            out.push_str(&format!("box: frets {}-{}\n", window.start, window.end));
        }
        out
    }
}
