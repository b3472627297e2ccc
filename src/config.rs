//! # Exercise Requests
//!
//! YAML request parsing and validation.
//!
//! ## Format
//! Keys are kebab-case. Every field except the key/progression/bars trio is
//! optional, and a `song` replaces that trio entirely (combining them is an
//! error):
//!
//! ```yaml
//! key: C                 # major key (C, G, Bb, F#, ...)
//! progression: ii-V-I    # roman numerals or chord symbols, '-' separated
//! bars: 8
//! shape: E               # CAGED shape: C, A, G, E or D
//! notes-per-measure: 4
//! seed: 42               # fixes the random opening note
//! frets: 24              # playable range is top string + frets
//! tuning: [E2, A2, D3, G3, B3, E4]
//! tempo: 80
//! ```
//!
//! The request may be wrapped in `---` markers like a frontmatter block.
//!
//! ## Example
//! ```rust
//! use arpeggio_flow::config::ExerciseRequest;
//!
//! let request = ExerciseRequest::from_yaml(r#"---
//! key: Bb
//! progression: ii-V-I
//! bars: 6
//! shape: A
//! ---
//! "#).unwrap();
//!
//! assert_eq!(request.bars.len(), 6);
//! assert_eq!(request.notes_per_measure, 4);
//! assert_eq!(request.instrument.range(), 40..=88);
//! ```

use crate::error::FlowError;
use crate::exercise::{expand_to_bars, parse_progression};
use crate::fretboard::{Instrument, Shape, DEFAULT_FRETS};
use crate::songs;
use crate::theory::{Chord, Key};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

pub const DEFAULT_NOTES_PER_MEASURE: usize = 4;
pub const DEFAULT_TEMPO: u16 = 80;

/// Raw request for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawRequest {
    pub key: Option<String>,
    pub progression: Option<String>,
    pub bars: Option<usize>,
    pub shape: Option<String>,
    pub notes_per_measure: Option<usize>,
    pub seed: Option<u64>,
    pub frets: Option<u8>,
    pub tuning: Option<Vec<String>>,
    pub tempo: Option<u16>,
    pub song: Option<String>,
}

/// A validated exercise request
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRequest {
    pub title: Option<String>,
    pub key: Key,
    /// Chords of every bar, already expanded to the requested length
    pub bars: Vec<Vec<Chord>>,
    pub shape: Option<Shape>,
    pub notes_per_measure: usize,
    pub seed: Option<u64>,
    pub instrument: Instrument,
    pub tempo: u16,
}

impl ExerciseRequest {
    /// Parse and validate a YAML request (optionally between `---` markers).
    pub fn from_yaml(source: &str) -> Result<Self, FlowError> {
        let content = extract_frontmatter(source);
        let raw: RawRequest =
            serde_yaml::from_str(&content).map_err(|e| FlowError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Request for a bundled song with default settings.
    pub fn for_song(id: &str) -> Result<Self, FlowError> {
        Self::from_raw(RawRequest { song: Some(id.to_string()), ..RawRequest::default() })
    }

    pub fn from_raw(raw: RawRequest) -> Result<Self, FlowError> {
        let notes_per_measure = raw.notes_per_measure.unwrap_or(DEFAULT_NOTES_PER_MEASURE);
        if notes_per_measure == 0 {
            return Err(FlowError::ConfigError("notes-per-measure must be at least 1".to_string()));
        }
        if raw.bars == Some(0) {
            return Err(FlowError::ConfigError("bars must be at least 1".to_string()));
        }

        let (title, key, bars, song_tempo) = match &raw.song {
            Some(_) if raw.key.is_some() || raw.progression.is_some() => {
                return Err(FlowError::ConfigError(
                    "song cannot be combined with key or progression".to_string(),
                ));
            }
            Some(id) => {
                let song = songs::find(id)?;
                let key = song.parse_key()?;
                let chords = song.chord_bars(&key)?;
                let bars = match raw.bars {
                    Some(count) => expand_to_bars(&chords, count),
                    None => chords,
                };
                (Some(song.title), key, bars, Some(song.tempo))
            }
            None => {
                let key_name = raw
                    .key
                    .as_deref()
                    .ok_or_else(|| FlowError::ConfigError("key is required".to_string()))?;
                let key = Key::parse(key_name)?;
                let progression = raw
                    .progression
                    .as_deref()
                    .ok_or_else(|| FlowError::ConfigError("progression is required".to_string()))?;
                let count = raw
                    .bars
                    .ok_or_else(|| FlowError::ConfigError("bars is required".to_string()))?;
                let chords = parse_progression(progression, &key)?;
                let bars = expand_to_bars(&chords, count).into_iter().map(|c| vec![c]).collect();
                (None, key, bars, None)
            }
        };

        let shape = raw.shape.as_deref().map(Shape::parse).transpose()?;

        let frets = raw.frets.unwrap_or(DEFAULT_FRETS);
        let instrument = match &raw.tuning {
            Some(names) => Instrument::from_names(names.as_slice(), frets)?,
            None => Instrument::standard_with_frets(frets),
        };

        let tempo = raw.tempo.or(song_tempo).unwrap_or(DEFAULT_TEMPO);
        if tempo == 0 {
            return Err(FlowError::ConfigError("tempo must be at least 1".to_string()));
        }

        Ok(Self {
            title,
            key,
            bars,
            shape,
            notes_per_measure,
            seed: raw.seed,
            instrument,
            tempo,
        })
    }

    /// Seeded generator when the request carries a seed, entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Content between the first pair of `---` lines, or the whole source when
/// there is no such block.
pub(crate) fn extract_frontmatter(source: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();

    let mut start_idx = None;
    let mut end_idx = None;
    for (i, line) in lines.iter().enumerate() {
        if line.trim() == "---" {
            if start_idx.is_none() {
                start_idx = Some(i);
            } else {
                end_idx = Some(i);
                break;
            }
        }
    }

    match (start_idx, end_idx) {
        (Some(start), Some(end)) => lines[start + 1..end].join("\n"),
        _ => source.to_string(),
    }
}
