//! Stepping through an admissible set and reversing at its edges

use super::types::{Boundary, Direction};
use crate::error::FlowError;
use crate::pitch::Pitched;

fn position_of<P: Pitched>(height: i32, admissible: &[P]) -> Option<usize> {
    admissible.iter().position(|p| p.height() == height)
}

/// One index further in `direction`, wrapping at both ends.
fn wrap_step(index: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Ascending => (index + 1) % len,
        Direction::Descending => (index + len - 1) % len,
    }
}

/// Next pitch after the last one in `placed`, stepping through `admissible`
/// in `direction`.
///
/// - Nothing placed yet: the step starts from the lowest pitch of the set.
/// - Last pitch not in the set (a chord change just happened): the walk
///   enters at the edge it is travelling from, the lowest pitch when
///   ascending and the highest when descending.
/// - Running off either end wraps around; the boundary check that follows
///   every placed note turns the direction before this matters in practice.
/// - The pitch just placed is never repeated unless the set holds only one
///   distinct height.
///
/// # Example
/// ```
/// use arpeggio_flow::flow::{next_in_direction, Direction};
///
/// let set: Vec<u8> = vec![60, 64, 67];
/// assert_eq!(next_in_direction(&[64u8], &set, Direction::Ascending).unwrap(), 67);
/// assert_eq!(next_in_direction(&[67u8], &set, Direction::Ascending).unwrap(), 60);
/// assert_eq!(next_in_direction(&[62u8], &set, Direction::Descending).unwrap(), 67);
/// ```
pub fn next_in_direction<P: Pitched + Clone>(
    placed: &[P],
    admissible: &[P],
    direction: Direction,
) -> Result<P, FlowError> {
    let first = admissible.first().ok_or(FlowError::EmptyAdmissibleSet)?;
    let len = admissible.len();
    let last_height = match placed.last() {
        Some(last) => last.height(),
        None => first.height(),
    };

    let mut index = match position_of(last_height, admissible) {
        Some(current) => wrap_step(current, len, direction),
        None => match direction {
            Direction::Ascending => 0,
            Direction::Descending => len - 1,
        },
    };

    // No repeats: keep going until the height changes or the set is exhausted
    let mut remaining = len;
    while admissible[index].height() == last_height && remaining > 1 {
        index = wrap_step(index, len, direction);
        remaining -= 1;
    }

    log::debug!(
        target: "flow",
        "step {} from {}: {}",
        direction,
        last_height,
        admissible[index].height()
    );
    Ok(admissible[index].clone())
}

/// Whether `pitch` is the lowest and/or highest member of `admissible`.
///
/// A pitch outside the set is at neither boundary.
pub fn reached_boundary<Q, P>(pitch: &Q, admissible: &[P]) -> Boundary
where
    Q: Pitched + ?Sized,
    P: Pitched,
{
    let height = pitch.height();
    Boundary {
        at_low: admissible.first().is_some_and(|low| low.height() == height),
        at_high: admissible.last().is_some_and(|high| high.height() == height),
    }
}

/// Flip `direction` when `pitch` sits on the boundary it is moving toward.
///
/// Sitting on the opposite boundary (ascending at the bottom) changes nothing.
pub fn reverse_if_needed<Q, P>(pitch: &Q, admissible: &[P], direction: Direction) -> Direction
where
    Q: Pitched + ?Sized,
    P: Pitched,
{
    let boundary = reached_boundary(pitch, admissible);
    let reverse = match direction {
        Direction::Ascending => boundary.at_high,
        Direction::Descending => boundary.at_low,
    };

    if reverse {
        log::debug!(target: "flow", "reversing at {}: was {}", pitch.height(), direction);
        direction.reversed()
    } else {
        direction
    }
}
