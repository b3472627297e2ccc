//! Progression parsing and expansion to bars

use crate::error::FlowError;
use crate::theory::{Chord, Key};

/// One chord's share of a bar: the unit the flow engine generates.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// 1-indexed bar number
    pub bar: usize,
    pub chord: Chord,
    pub notes: usize,
}

/// Parse a `-` separated progression such as `"ii - V - I"` or `"Am7-D7-Gmaj7"`.
///
/// Whitespace is ignored.
pub fn parse_progression(text: &str, key: &Key) -> Result<Vec<Chord>, FlowError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(FlowError::ConfigError("progression is empty".to_string()));
    }
    compact.split('-').map(|token| Chord::parse(token, key)).collect()
}

/// Repeat `items` to exactly `bars` entries: whole cycles, then a prefix.
///
/// ```
/// use arpeggio_flow::exercise::expand_to_bars;
///
/// let progression = ["ii", "V", "I"];
/// assert_eq!(expand_to_bars(&progression, 7), vec!["ii", "V", "I", "ii", "V", "I", "ii"]);
/// assert_eq!(expand_to_bars(&progression, 2), vec!["ii", "V"]);
/// ```
pub fn expand_to_bars<T: Clone>(items: &[T], bars: usize) -> Vec<T> {
    items.iter().cycle().take(bars).cloned().collect()
}

/// Split bars into segments, sharing each bar's notes evenly among its chords.
pub fn segments(bars: &[Vec<Chord>], notes_per_measure: usize) -> Result<Vec<Segment>, FlowError> {
    let mut out = Vec::new();
    for (i, chords) in bars.iter().enumerate() {
        let bar = i + 1;
        if chords.is_empty() {
            return Err(FlowError::ConfigError(format!("bar {} has no chord", bar)));
        }
        if notes_per_measure % chords.len() != 0 {
            return Err(FlowError::ConfigError(format!(
                "bar {} has {} chords; {} notes cannot be shared evenly",
                bar,
                chords.len(),
                notes_per_measure
            )));
        }
        let notes = notes_per_measure / chords.len();
        out.extend(chords.iter().map(|chord| Segment { bar, chord: chord.clone(), notes }));
    }
    Ok(out)
}

/// Index of the first tonic segment, or 0 when the progression never reaches the tonic.
pub fn find_anchor(segments: &[Segment]) -> usize {
    segments.iter().position(|s| s.chord.is_tonic()).unwrap_or(0)
}
