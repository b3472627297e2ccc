//! Measure generation, forward and backward

use super::select::select_closest_pitch;
use super::step::{next_in_direction, reverse_if_needed};
use super::types::{Direction, GeneratedMeasure};
use crate::error::FlowError;
use crate::pitch::Pitched;
use rand::Rng;

/// Generate one measure of `notes_per_measure` pitches from `admissible`.
///
/// - First note: random when `previous` is `None` (the opening measure of an
///   exercise), otherwise the closest pitch to `previous`. In the latter case
///   the direction follows the motion from `previous` to that pitch; a
///   unison keeps `initial_direction`.
/// - Every further note steps through the set in the current direction.
/// - After each note the direction flips if the note is the boundary the
///   line was heading for.
///
/// With `previous` given the result does not depend on `rng`.
///
/// # Errors
/// [`FlowError::EmptyAdmissibleSet`] when `admissible` is empty.
pub fn generate_measure<P, R>(
    admissible: &[P],
    notes_per_measure: usize,
    previous: Option<&P>,
    initial_direction: Direction,
    rng: &mut R,
) -> Result<GeneratedMeasure<P>, FlowError>
where
    P: Pitched + Clone,
    R: Rng,
{
    if admissible.is_empty() {
        return Err(FlowError::EmptyAdmissibleSet);
    }

    let mut pitches: Vec<P> = Vec::with_capacity(notes_per_measure);
    let mut direction = initial_direction;

    for i in 0..notes_per_measure {
        let pitch = if i == 0 {
            match previous {
                None => {
                    let opening = admissible[rng.random_range(0..admissible.len())].clone();
                    log::debug!(target: "flow", "opening note (random): {}", opening.height());
                    opening
                }
                Some(previous) => {
                    let closest = select_closest_pitch(previous, admissible)?;
                    direction = Direction::of_motion(previous, &closest).unwrap_or(direction);
                    closest
                }
            }
        } else {
            next_in_direction(&pitches, admissible, direction)?
        };

        direction = reverse_if_needed(&pitch, admissible, direction);
        pitches.push(pitch);
    }

    Ok(GeneratedMeasure { pitches, ending_direction: direction })
}

/// Build a measure backward so that it leads into `target`.
///
/// The last pitch is the closest member of `admissible` to `target`. The
/// ending direction is the motion from that pitch to `target` (a unison
/// counts as ascending). The earlier pitches are found by walking away from
/// the last one, opposite to the ending direction, with the same stepping
/// and boundary rules as forward generation.
///
/// # Example
/// ```
/// use arpeggio_flow::flow::{approach_target, Direction};
///
/// let cmaj7: Vec<u8> = vec![48, 52, 55, 59, 60, 64, 67, 71, 72];
/// // Lead into D4 (62): end on C4 and arrive from below
/// let measure = approach_target(&cmaj7, 4, &62u8).unwrap();
/// assert_eq!(measure.pitches, vec![52, 55, 59, 60]);
/// assert_eq!(measure.ending_direction, Direction::Ascending);
/// ```
///
/// # Errors
/// [`FlowError::EmptyAdmissibleSet`] when `admissible` is empty.
pub fn approach_target<Q, P>(
    admissible: &[P],
    notes_per_measure: usize,
    target: &Q,
) -> Result<GeneratedMeasure<P>, FlowError>
where
    Q: Pitched + ?Sized,
    P: Pitched + Clone,
{
    let last = select_closest_pitch(target, admissible)?;
    let ending_direction = Direction::of_motion(&last, target).unwrap_or(Direction::Ascending);

    if notes_per_measure == 0 {
        return Ok(GeneratedMeasure { pitches: Vec::new(), ending_direction });
    }

    // Built in reverse playing order, then flipped
    let mut reversed: Vec<P> = Vec::with_capacity(notes_per_measure);
    let mut walk = reverse_if_needed(&last, admissible, ending_direction.reversed());
    reversed.push(last);

    while reversed.len() < notes_per_measure {
        let pitch = next_in_direction(&reversed, admissible, walk)?;
        walk = reverse_if_needed(&pitch, admissible, walk);
        reversed.push(pitch);
    }

    reversed.reverse();
    log::debug!(
        target: "flow",
        "approached {} with {} pitches, ending {}",
        target.height(),
        reversed.len(),
        ending_direction
    );
    Ok(GeneratedMeasure { pitches: reversed, ending_direction })
}
