//! Closest-pitch selection

use crate::error::FlowError;
use crate::pitch::Pitched;

/// Return the member of `admissible` closest in height to `previous`.
///
/// Proximity only: direction is not consulted. Of two equally close
/// candidates the lower one wins.
///
/// # Errors
/// [`FlowError::EmptyAdmissibleSet`] when `admissible` is empty.
///
/// # Example
/// ```
/// use arpeggio_flow::flow::select_closest_pitch;
///
/// // G4 into Dm7: F4 (65) and A4 (69) are both two semitones away
/// let dm7: Vec<u8> = vec![50, 53, 57, 60, 62, 65, 69, 72, 74, 77];
/// assert_eq!(select_closest_pitch(&67u8, &dm7).unwrap(), 65);
/// ```
pub fn select_closest_pitch<Q, P>(previous: &Q, admissible: &[P]) -> Result<P, FlowError>
where
    Q: Pitched + ?Sized,
    P: Pitched + Clone,
{
    let target = previous.height();
    let mut best: Option<(&P, i32)> = None;

    for candidate in admissible {
        let distance = (candidate.height() - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    let (closest, distance) = best.ok_or(FlowError::EmptyAdmissibleSet)?;
    log::debug!(target: "flow", "closest to {}: {} (distance {})", target, closest.height(), distance);
    Ok(closest.clone())
}
