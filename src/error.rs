//! # Error Types
//!
//! This module defines all error types for the arpeggio exercise generator.
//!
//! Every error aborts the whole exercise: the voice-leading chain is only
//! meaningful when every measure connects to its neighbour, so partially
//! generated measures are dropped rather than returned.
//!
//! ## Error Types
//! - `EmptyAdmissibleSet` - the flow engine was handed no candidate pitches
//! - `NoChordTones` - a chord has no tones inside the chosen range or shape
//! - `UnknownChordSymbol` - a progression token has no chord mapping
//! - `UnknownKey` / `UnknownShape` / `UnknownSong` - unrecognized request values
//! - `InvalidNote` - a note name such as a tuning entry could not be parsed
//! - `ConfigError` - malformed or inconsistent exercise request
//! - `OutputError` - the exercise cannot be written in the requested format
//!
//! ## Usage
//! ```rust
//! use arpeggio_flow::{generate_from_yaml, FlowError};
//!
//! let source = "key: C\nprogression: ii-V-I\nbars: 4\nseed: 7\n";
//! match generate_from_yaml(source) {
//!     Ok(exercise) => println!("{} measures", exercise.measures.len()),
//!     Err(FlowError::UnknownChordSymbol(token)) => {
//!         eprintln!("Don't know how to play '{}'", token);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// A pitch selection function received an empty candidate set.
    ///
    /// Always a defect in the caller: the chord-tone provider must hand the
    /// engine at least one pitch per chord.
    ///
    /// # Example
    /// ```
    /// # use arpeggio_flow::FlowError;
    /// let err = FlowError::EmptyAdmissibleSet;
    /// assert_eq!(err.to_string(), "Admissible pitch set is empty");
    /// ```
    #[error("Admissible pitch set is empty")]
    EmptyAdmissibleSet,

    /// The provider found no tones for a chord within the playable range or
    /// the selected shape's fret window.
    ///
    /// # Example
    /// ```
    /// # use arpeggio_flow::FlowError;
    /// let err = FlowError::NoChordTones { chord: "Dm7".to_string() };
    /// assert_eq!(err.to_string(), "No playable chord tones for Dm7");
    /// ```
    #[error("No playable chord tones for {chord}")]
    NoChordTones { chord: String },

    /// A progression token is neither a known roman numeral nor a chord symbol
    /// with a supported quality.
    ///
    /// # Example
    /// ```
    /// # use arpeggio_flow::FlowError;
    /// let err = FlowError::UnknownChordSymbol("VIII".to_string());
    /// assert_eq!(err.to_string(), "Unknown chord symbol: VIII");
    /// ```
    #[error("Unknown chord symbol: {0}")]
    UnknownChordSymbol(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Unknown CAGED shape: {0} (expected one of C, A, G, E, D)")]
    UnknownShape(String),

    #[error("Unknown song: {0}")]
    UnknownSong(String),

    /// # Example
    /// ```
    /// # use arpeggio_flow::FlowError;
    /// let err = FlowError::InvalidNote("H2".to_string());
    /// assert_eq!(err.to_string(), "Invalid note: H2");
    /// ```
    #[error("Invalid note: {0}")]
    InvalidNote(String),

    /// Invalid exercise request.
    ///
    /// Occurs when the YAML request is malformed or a field value is out of
    /// range (zero bars, zero notes per measure, a bar whose chords cannot
    /// share its notes evenly, ...).
    ///
    /// # Example
    /// ```
    /// # use arpeggio_flow::FlowError;
    /// let err = FlowError::ConfigError("bars must be at least 1".to_string());
    /// assert_eq!(err.to_string(), "Invalid request: bars must be at least 1");
    /// ```
    #[error("Invalid request: {0}")]
    ConfigError(String),

    /// An exercise could not be written in the requested output format.
    ///
    /// # Example
    /// ```
    /// # use arpeggio_flow::FlowError;
    /// let err = FlowError::OutputError("no diagram in MusicXML".to_string());
    /// assert_eq!(err.to_string(), "Output error: no diagram in MusicXML");
    /// ```
    #[error("Output error: {0}")]
    OutputError(String),
}
