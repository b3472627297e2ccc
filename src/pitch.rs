//! # Pitch Utilities
//!
//! Spelled notes (`C#4`, `Bb3`) and the [`Pitched`] trait through which the
//! flow engine sees them.
//!
//! The engine never looks at spelling: it compares pitches only through
//! [`Pitched::height`], a semitone-resolution integer (MIDI numbering, so
//! C4 = 60 and A4 = 69). Two pitches with the same height are a unison.
//!
//! ## Example
//! ```rust
//! use arpeggio_flow::pitch::{Note, Pitched};
//!
//! let note = Note::parse("G4").unwrap();
//! assert_eq!(note.height(), 67);
//! assert_eq!(note.to_string(), "G4");
//! assert!((Note::parse("A4").unwrap().frequency() - 440.0).abs() < 1e-9);
//! ```

use crate::error::FlowError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Anything the flow engine can place in a measure.
///
/// `height` is the only ordering the engine uses; `frequency` is derived from
/// it in twelve-tone equal temperament with A4 = 440 Hz.
pub trait Pitched {
    fn height(&self) -> i32;

    fn frequency(&self) -> f64 {
        440.0 * 2f64.powf((self.height() - 69) as f64 / 12.0)
    }
}

impl Pitched for u8 {
    fn height(&self) -> i32 {
        *self as i32
    }
}

impl Pitched for i32 {
    fn height(&self) -> i32 {
        *self
    }
}

/// Note names A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Semitone offset from C.
    pub fn semitone(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::D => "D",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::G => "G",
            NoteName::A => "A",
            NoteName::B => "B",
        }
    }
}

/// Accidentals: natural, sharp, flat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn alter(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }
}

/// A spelled pitch class: letter plus accidental, no octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PitchClass {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl PitchClass {
    pub fn new(name: NoteName, accidental: Accidental) -> Self {
        Self { name, accidental }
    }

    /// Semitone 0-11 (C = 0).
    pub fn semitone(&self) -> u8 {
        (self.name.semitone() + self.accidental.alter()).rem_euclid(12) as u8
    }

    /// Spell a semitone (taken mod 12), choosing flats or sharps for the black keys.
    pub fn from_semitone(semitone: i32, prefer_flat: bool) -> Self {
        // 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
        let (name, accidental) = match semitone.rem_euclid(12) {
            0 => (NoteName::C, Accidental::Natural),
            1 => if prefer_flat { (NoteName::D, Accidental::Flat) } else { (NoteName::C, Accidental::Sharp) },
            2 => (NoteName::D, Accidental::Natural),
            3 => if prefer_flat { (NoteName::E, Accidental::Flat) } else { (NoteName::D, Accidental::Sharp) },
            4 => (NoteName::E, Accidental::Natural),
            5 => (NoteName::F, Accidental::Natural),
            6 => if prefer_flat { (NoteName::G, Accidental::Flat) } else { (NoteName::F, Accidental::Sharp) },
            7 => (NoteName::G, Accidental::Natural),
            8 => if prefer_flat { (NoteName::A, Accidental::Flat) } else { (NoteName::G, Accidental::Sharp) },
            9 => (NoteName::A, Accidental::Natural),
            10 => if prefer_flat { (NoteName::B, Accidental::Flat) } else { (NoteName::A, Accidental::Sharp) },
            _ => (NoteName::B, Accidental::Natural),
        };
        Self { name, accidental }
    }

    /// Parse a pitch class such as "F#", "Bb" or "c".
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let name = NoteName::from_char(chars.next()?)?;
        let accidental = match chars.next() {
            None => Accidental::Natural,
            Some('#') | Some('s') => Accidental::Sharp,
            Some('b') | Some('f') => Accidental::Flat,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self { name, accidental })
    }

    /// Place this pitch class in an octave (scientific pitch notation, C4 = 60).
    pub fn in_octave(self, octave: i8) -> Note {
        Note { name: self.name, accidental: self.accidental, octave }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name.as_str(), self.accidental.as_str())
    }
}

/// A spelled note with octave, e.g. `C#4`.
///
/// Equality is by spelling; the engine compares notes by [`Pitched::height`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Note {
    pub name: NoteName,
    pub accidental: Accidental,
    pub octave: i8,
}

impl Note {
    /// Parse scientific pitch notation: letter, optional `#`/`b`, octave.
    ///
    /// ```
    /// use arpeggio_flow::pitch::{Note, Pitched};
    ///
    /// assert_eq!(Note::parse("E2").unwrap().height(), 40);
    /// assert_eq!(Note::parse("Bb3").unwrap().height(), 58);
    /// assert!(Note::parse("C#").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, FlowError> {
        let invalid = || FlowError::InvalidNote(s.to_string());
        let trimmed = s.trim();
        let mut chars = trimmed.char_indices().peekable();

        let name = chars
            .next()
            .and_then(|(_, c)| NoteName::from_char(c))
            .ok_or_else(invalid)?;

        let accidental = match chars.peek() {
            Some((_, '#')) => {
                chars.next();
                Accidental::Sharp
            }
            Some((_, 'b')) => {
                chars.next();
                Accidental::Flat
            }
            _ => Accidental::Natural,
        };

        let octave_start = chars.peek().map(|(i, _)| *i).ok_or_else(invalid)?;
        let octave: i8 = trimmed[octave_start..].parse().map_err(|_| invalid())?;

        Ok(Self { name, accidental, octave })
    }

    /// Spell a MIDI number.
    pub fn from_midi(midi: i32, prefer_flat: bool) -> Self {
        PitchClass::from_semitone(midi, prefer_flat).in_octave((midi.div_euclid(12) - 1) as i8)
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::new(self.name, self.accidental)
    }

    pub fn midi(&self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.name.semitone() + self.accidental.alter()
    }
}

impl Pitched for Note {
    fn height(&self) -> i32 {
        self.midi()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name.as_str(), self.accidental.as_str(), self.octave)
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_midi() {
        assert_eq!(Note::parse("C4").unwrap().midi(), 60);
        assert_eq!(Note::parse("E2").unwrap().midi(), 40);
        assert_eq!(Note::parse("G#5").unwrap().midi(), 80);
        assert_eq!(Note::parse("Db4").unwrap().midi(), 61);
        assert_eq!(Note::parse("Cb4").unwrap().midi(), 59);
        assert_eq!(Note::parse("B#3").unwrap().midi(), 60);
        assert_eq!(Note::parse("C-1").unwrap().midi(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Note::parse("").is_err());
        assert!(Note::parse("H2").is_err());
        assert!(Note::parse("C").is_err());
        assert!(Note::parse("C#x").is_err());
        assert_eq!(Note::parse("X9"), Err(FlowError::InvalidNote("X9".to_string())));
    }

    #[test]
    fn test_from_midi_spelling() {
        assert_eq!(Note::from_midi(61, false).to_string(), "C#4");
        assert_eq!(Note::from_midi(61, true).to_string(), "Db4");
        assert_eq!(Note::from_midi(40, false).to_string(), "E2");
        assert_eq!(Note::from_midi(88, false).to_string(), "E6");
    }

    #[test]
    fn test_frequency() {
        let a4 = Note::parse("A4").unwrap();
        assert!((a4.frequency() - 440.0).abs() < 1e-9);
        let a3 = Note::parse("A3").unwrap();
        assert!((a3.frequency() - 220.0).abs() < 1e-9);
        let c4 = Note::parse("C4").unwrap();
        assert!((c4.frequency() - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_class_parse() {
        let fs = PitchClass::parse("F#").unwrap();
        assert_eq!(fs.semitone(), 6);
        assert_eq!(fs.to_string(), "F#");
        assert_eq!(PitchClass::parse("Bb").unwrap().semitone(), 10);
        assert!(PitchClass::parse("Bbb").is_none());
        assert!(PitchClass::parse("").is_none());
    }
}
