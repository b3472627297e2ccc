//! # Chord-Tone Provider
//!
//! Turns a chord into the admissible pitch set the flow engine walks through:
//! every instance of the chord's tones across the instrument's range, sorted
//! by height and deduplicated, optionally narrowed to a CAGED shape's frets.
//!
//! Range and shape are fixed when the provider is built; nothing is cached
//! between calls.
//!
//! ## Example
//! ```rust
//! use arpeggio_flow::fretboard::Instrument;
//! use arpeggio_flow::pitch::Pitched;
//! use arpeggio_flow::provider::{ChordToneProvider, ChordTones};
//! use arpeggio_flow::theory::{Chord, Key};
//!
//! let key = Key::parse("C").unwrap();
//! let provider = ChordToneProvider::new(Instrument::standard());
//! let pitches = provider.admissible_pitches(&Chord::parse("I", &key).unwrap()).unwrap();
//!
//! // Cmaj7 on a 24-fret guitar: E2 is the lowest tone, E6 the highest
//! assert_eq!(pitches.first().unwrap().height(), 40);
//! assert_eq!(pitches.last().unwrap().height(), 88);
//! ```

use crate::error::FlowError;
use crate::fretboard::{FretWindow, Instrument, Shape};
use crate::pitch::{Note, Pitched};
use crate::theory::{Chord, Key};

/// Source of admissible pitch sets for the exercise assembler.
pub trait ChordTones {
    /// Non-empty, strictly ascending pitch set for `chord`.
    fn admissible_pitches(&self, chord: &Chord) -> Result<Vec<Note>, FlowError>;
}

/// Chord tones filtered to an instrument's range and, optionally, a fret window.
#[derive(Debug, Clone)]
pub struct ChordToneProvider {
    instrument: Instrument,
    window: Option<FretWindow>,
    window_heights: Vec<i32>,
}

impl ChordToneProvider {
    /// Provider covering the instrument's full range.
    pub fn new(instrument: Instrument) -> Self {
        Self { instrument, window: None, window_heights: Vec::new() }
    }

    /// Provider restricted to the pitches playable inside `shape` for `key`.
    pub fn with_shape(instrument: Instrument, key: &Key, shape: Shape) -> Result<Self, FlowError> {
        let window = shape.window(key, &instrument)?;
        let window_heights = instrument.heights_in_window(&window);
        log::debug!(
            target: "exercise",
            "{} shape in {}: frets {}-{}",
            shape,
            key,
            window.start,
            window.end
        );
        Ok(Self { instrument, window: Some(window), window_heights })
    }

    fn in_window(&self, height: i32) -> bool {
        self.window.is_none() || self.window_heights.binary_search(&height).is_ok()
    }
}

impl ChordTones for ChordToneProvider {
    fn admissible_pitches(&self, chord: &Chord) -> Result<Vec<Note>, FlowError> {
        let low_octave = (self.instrument.lowest().div_euclid(12) - 2) as i8;
        let high_octave = self.instrument.highest().div_euclid(12) as i8;

        let mut pitches = Vec::new();
        let mut out_of_range = Vec::new();
        let mut out_of_shape = Vec::new();

        for octave in low_octave..=high_octave {
            for tone in chord.tones() {
                let note = tone.in_octave(octave);
                if !self.instrument.contains(&note) {
                    out_of_range.push(note);
                } else if !self.in_window(note.height()) {
                    out_of_shape.push(note);
                } else {
                    pitches.push(note);
                }
            }
        }

        if !out_of_shape.is_empty() {
            log::debug!(target: "exercise", "{}: {} tones outside the shape", chord.name(), out_of_shape.len());
        }
        log::trace!(target: "exercise", "{}: excluded by range {:?}", chord.name(), out_of_range);

        pitches.sort_by_key(Pitched::height);
        pitches.dedup_by_key(|note| note.height());

        if pitches.is_empty() {
            return Err(FlowError::NoChordTones { chord: chord.name() });
        }

        log::debug!(
            target: "exercise",
            "{}: {} admissible pitches ({}..={})",
            chord.name(),
            pitches.len(),
            pitches[0],
            pitches[pitches.len() - 1]
        );
        Ok(pitches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights(notes: &[Note]) -> Vec<i32> {
        notes.iter().map(Pitched::height).collect()
    }

    fn chord(token: &str, key: &str) -> Chord {
        Chord::parse(token, &Key::parse(key).unwrap()).unwrap()
    }

    #[test]
    fn test_full_range_is_sorted_and_bounded() {
        let provider = ChordToneProvider::new(Instrument::standard());
        let pitches = provider.admissible_pitches(&chord("ii", "C")).unwrap();
        let h = heights(&pitches);

        assert!(h.windows(2).all(|w| w[0] < w[1]));
        assert!(h.iter().all(|p| (40..=88).contains(p)));
        // Dm7: F2 is the lowest tone above E2, D6 the highest below E6
        assert_eq!(h.first(), Some(&41));
        assert_eq!(h.last(), Some(&86));
        assert!(pitches.iter().all(|n| ["D", "F", "A", "C"].contains(&n.pitch_class().to_string().as_str())));
    }

    #[test]
    fn test_sixteen_fret_range() {
        let provider = ChordToneProvider::new(Instrument::standard_with_frets(16));
        let pitches = provider.admissible_pitches(&chord("I", "C")).unwrap();
        assert_eq!(heights(&pitches).last(), Some(&79));
    }

    #[test]
    fn test_spelling_follows_the_chord() {
        let provider = ChordToneProvider::new(Instrument::standard());
        let pitches = provider.admissible_pitches(&chord("V", "F")).unwrap();
        let names: Vec<String> = pitches.iter().take(4).map(|n| n.to_string()).collect();
        // C7 in F: E2 G2 Bb2 C3
        assert_eq!(names, vec!["E2", "G2", "Bb2", "C3"]);
    }

    #[test]
    fn test_shape_window_restricts_pitches() {
        let key = Key::parse("C").unwrap();
        let guitar = Instrument::standard();
        let provider = ChordToneProvider::with_shape(guitar.clone(), &key, Shape::C).unwrap();
        let allowed = guitar.heights_in_window(&FretWindow { start: 0, end: 4 });

        let pitches = provider.admissible_pitches(&chord("I", "C")).unwrap();
        assert!(pitches.iter().all(|n| allowed.contains(&n.height())));
        // Open-position Cmaj7: E2 up to G4
        assert_eq!(heights(&pitches).first(), Some(&40));
        assert_eq!(heights(&pitches).last(), Some(&67));
    }

    #[test]
    fn test_nothing_playable_is_an_error() {
        // A single string with two frets cannot reach any B7 tone
        let instrument = Instrument::from_names(&["C4"], 1).unwrap();
        let provider = ChordToneProvider::new(instrument);
        assert_eq!(
            provider.admissible_pitches(&chord("B7", "C")),
            Err(FlowError::NoChordTones { chord: "B7".to_string() })
        );
    }
}
