//! # Note-Flow Module
//!
//! The voice-leading engine: pure functions that turn one chord's admissible
//! pitch set into a measure of arpeggio notes.
//!
//! ## Purpose
//! Given the pitches a chord may use (sorted by height, deduplicated), the
//! engine picks notes so that:
//! 1. **Measures connect smoothly** - the first note of a measure is the chord
//!    tone closest to the last note of the previous measure
//! 2. **Direction is kept** - notes keep stepping up or down through the set
//! 3. **Boundaries turn the line around** - reaching the lowest or highest
//!    admissible pitch while moving toward it reverses the direction
//!
//! ## Sub-modules
//! - `types` - Direction, Boundary, GeneratedMeasure
//! - `select` - Closest-pitch selection
//! - `step` - Next pitch in direction, boundary detection, reversal
//! - `measure` - Measure generator and the backward "approach a target" fill
//!
//! ## Tie-break
//! When two candidates are equally close to the previous pitch, the **lower**
//! one wins: the set is scanned in ascending order and a candidate replaces
//! the current best only when strictly closer.
//!
//! ## Example
//! ```rust
//! use arpeggio_flow::flow::{generate_measure, Direction};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // Cmaj7 tones from C3 to G5, as MIDI numbers
//! let cmaj7: Vec<u8> = vec![48, 52, 55, 59, 60, 64, 67, 71, 72, 76, 79];
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let measure = generate_measure(&cmaj7, 4, Some(&79), Direction::Ascending, &mut rng).unwrap();
//!
//! // G5 is the high boundary, so the line turns around immediately
//! assert_eq!(measure.pitches, vec![79, 76, 72, 71]);
//! assert_eq!(measure.ending_direction, Direction::Descending);
//! ```
//!
//! ## Related Modules
//! - `provider` - Builds the admissible pitch sets fed to this module
//! - `exercise` - Chains measures forward and backward from the anchor
//! - `pitch` - The [`Pitched`](crate::pitch::Pitched) trait the engine compares through

mod types;
mod select;
mod step;
mod measure;

#[cfg(test)]
mod tests;

pub use types::{Boundary, Direction, GeneratedMeasure};
pub use select::select_closest_pitch;
pub use step::{next_in_direction, reached_boundary, reverse_if_needed};
pub use measure::{approach_target, generate_measure};
