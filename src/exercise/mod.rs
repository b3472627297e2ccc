//! # Exercise Module
//!
//! Chains the flow engine across a whole chord progression.
//!
//! ## Purpose
//! A request names a key, a progression and a bar count. This module:
//! 1. **Expands** the progression to exactly that many bars (whole cycles,
//!    then a prefix)
//! 2. **Splits** bars with several chords into segments that share the bar's
//!    notes evenly
//! 3. **Anchors** generation at the first tonic segment
//! 4. **Generates** forward from the anchor and backward toward it
//!
//! ## Sub-modules
//! - `progression` - Progression parsing, bar expansion, segments, anchor
//! - `assemble` - Forward/backward generation over the segments
//! - `types` - Exercise, ExerciseMeasure
//!
//! ## Example
//! ```rust
//! use arpeggio_flow::config::ExerciseRequest;
//! use arpeggio_flow::exercise::generate_exercise;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let request = ExerciseRequest::from_yaml("key: C\nprogression: ii-V-I\nbars: 4\n").unwrap();
//! let exercise = generate_exercise(&request, &mut StdRng::seed_from_u64(7)).unwrap();
//!
//! assert_eq!(exercise.measures.len(), 4);
//! assert_eq!(exercise.anchor, 2); // the I chord
//! let chords: Vec<&str> = exercise.measures.iter().map(|m| m.chord_name.as_str()).collect();
//! assert_eq!(chords, vec!["Dm7", "G7", "Cmaj7", "Dm7"]);
//! ```
//!
//! ## Related Modules
//! - `flow` - The per-measure engine
//! - `provider` - Admissible pitch sets per chord
//! - `config` - Builds the [`ExerciseRequest`](crate::config::ExerciseRequest)

mod assemble;
mod progression;
mod types;

pub use assemble::assemble;
pub use progression::{expand_to_bars, find_anchor, parse_progression, segments, Segment};
pub use types::{Exercise, ExerciseMeasure};

use crate::config::ExerciseRequest;
use crate::error::FlowError;
use crate::provider::ChordToneProvider;
use rand::Rng;

/// Generate an exercise for a validated request.
///
/// Any error discards the whole exercise.
pub fn generate_exercise<R: Rng>(request: &ExerciseRequest, rng: &mut R) -> Result<Exercise, FlowError> {
    let provider = match request.shape {
        Some(shape) => ChordToneProvider::with_shape(request.instrument.clone(), &request.key, shape)?,
        None => ChordToneProvider::new(request.instrument.clone()),
    };

    let segments = segments(&request.bars, request.notes_per_measure)?;
    let (measures, anchor) = assemble(&segments, &provider, rng)?;

    log::info!(
        target: "exercise",
        "generated {} bars in {} ({} measures)",
        request.bars.len(),
        request.key,
        measures.len()
    );

    Ok(Exercise {
        title: request.title.clone(),
        key: request.key.to_string(),
        fifths: request.key.fifths,
        shape: request.shape,
        tempo: request.tempo,
        notes_per_bar: request.notes_per_measure,
        anchor,
        measures,
    })
}
