//! Bidirectional assembly: forward from the anchor, backward toward it

use super::progression::{find_anchor, Segment};
use super::types::ExerciseMeasure;
use crate::error::FlowError;
use crate::flow::{approach_target, generate_measure, Direction, GeneratedMeasure};
use crate::pitch::Note;
use crate::provider::ChordTones;
use rand::Rng;

/// Generate every segment of an exercise.
///
/// All admissible sets are fetched before any note is generated, so a chord
/// with no playable tones fails the whole exercise up front.
///
/// 1. The anchor (first tonic segment, else segment 0) opens with a random
///    note, ascending.
/// 2. Segments after the anchor continue forward from the previous
///    segment's last note and ending direction.
/// 3. Segments before the anchor are filled backward, each ending as close
///    as possible to the first note of the segment after it.
///
/// Returns the measures and the anchor index.
pub fn assemble<T, R>(
    segments: &[Segment],
    provider: &T,
    rng: &mut R,
) -> Result<(Vec<ExerciseMeasure>, usize), FlowError>
where
    T: ChordTones + ?Sized,
    R: Rng,
{
    if segments.is_empty() {
        return Ok((Vec::new(), 0));
    }

    let sets = segments
        .iter()
        .map(|segment| provider.admissible_pitches(&segment.chord))
        .collect::<Result<Vec<_>, _>>()?;

    let anchor = find_anchor(segments);
    log::debug!(
        target: "exercise",
        "anchor: segment {} ({}, bar {})",
        anchor,
        segments[anchor].chord.name(),
        segments[anchor].bar
    );

    // Forward: anchor and everything after it
    let mut forward: Vec<GeneratedMeasure<Note>> = Vec::with_capacity(segments.len() - anchor);
    for i in anchor..segments.len() {
        let (previous, direction) = match forward.last() {
            Some(measure) => (measure.last().copied(), measure.ending_direction),
            None => (None, Direction::Ascending),
        };
        forward.push(generate_measure(&sets[i], segments[i].notes, previous.as_ref(), direction, rng)?);
    }

    // Backward: from just before the anchor down to the first segment
    let mut backward: Vec<GeneratedMeasure<Note>> = Vec::with_capacity(anchor);
    for i in (0..anchor).rev() {
        let following = backward.last().or(forward.first());
        let measure = match following.and_then(|m| m.first()).copied() {
            Some(target) => approach_target(&sets[i], segments[i].notes, &target)?,
            None => generate_measure(&sets[i], segments[i].notes, None, Direction::Ascending, rng)?,
        };
        backward.push(measure);
    }
    backward.reverse();

    let measures = backward
        .into_iter()
        .chain(forward)
        .zip(segments)
        .map(|(generated, segment)| {
            log::debug!(
                target: "exercise",
                "bar {} {}: {} {}",
                segment.bar,
                segment.chord.name(),
                generated.pitches.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" "),
                generated.ending_direction.arrow()
            );
            ExerciseMeasure {
                bar: segment.bar,
                chord_symbol: segment.chord.symbol.clone(),
                chord_name: segment.chord.name(),
                notes: generated.pitches,
                direction: generated.ending_direction,
            }
        })
        .collect();

    Ok((measures, anchor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::progression::{parse_progression, segments};
    use crate::fretboard::Instrument;
    use crate::pitch::Pitched;
    use crate::provider::ChordToneProvider;
    use crate::theory::{Chord, Key};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn one_per_bar(text: &str, key: &str, bars: usize) -> Vec<Segment> {
        let key = Key::parse(key).unwrap();
        let chords = parse_progression(text, &key).unwrap();
        let bars: Vec<Vec<Chord>> = crate::exercise::expand_to_bars(&chords, bars)
            .into_iter()
            .map(|c| vec![c])
            .collect();
        segments(&bars, 4).unwrap()
    }

    /// Provider that hands out the same fixed set for every chord.
    struct Fixed(Vec<Note>);

    impl ChordTones for Fixed {
        fn admissible_pitches(&self, _chord: &Chord) -> Result<Vec<Note>, FlowError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_backward_measures_lead_into_anchor() {
        let segs = one_per_bar("ii-V-I-vi", "C", 8);
        let provider = ChordToneProvider::new(Instrument::standard());
        let (measures, anchor) = assemble(&segs, &provider, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(anchor, 2);
        assert_eq!(measures.len(), 8);
        for pair in measures.windows(2) {
            let from = pair[0].notes.last().unwrap().height();
            let to = pair[1].notes[0].height();
            assert!((from - to).abs() <= 12, "{} -> {}", from, to);
        }
    }

    #[test]
    fn test_forward_continues_from_previous_measure() {
        let segs = one_per_bar("I-IV", "C", 4);
        let provider = ChordToneProvider::new(Instrument::standard());
        let (measures, anchor) = assemble(&segs, &provider, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(anchor, 0);

        let fmaj7 = provider.admissible_pitches(&segs[1].chord).unwrap();
        let expected = generate_measure(
            &fmaj7,
            4,
            measures[0].notes.last(),
            measures[0].direction,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert_eq!(measures[1].notes, expected.pitches);
        assert_eq!(measures[1].direction, expected.ending_direction);
    }

    #[test]
    fn test_backward_measure_matches_approach() {
        let segs = one_per_bar("V-I", "C", 2);
        let provider = ChordToneProvider::new(Instrument::standard());
        let (measures, anchor) = assemble(&segs, &provider, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(anchor, 1);

        let g7 = provider.admissible_pitches(&segs[0].chord).unwrap();
        let expected = approach_target(&g7, 4, &measures[1].notes[0]).unwrap();
        assert_eq!(measures[0].notes, expected.pitches);
        assert_eq!(measures[0].direction, expected.ending_direction);
    }

    #[test]
    fn test_missing_chord_tones_abort_everything() {
        struct Broken;
        impl ChordTones for Broken {
            fn admissible_pitches(&self, chord: &Chord) -> Result<Vec<Note>, FlowError> {
                if chord.is_tonic() {
                    Ok(vec![Note::parse("C4")?])
                } else {
                    Err(FlowError::NoChordTones { chord: chord.name() })
                }
            }
        }

        let segs = one_per_bar("I-V", "C", 2);
        let result = assemble(&segs, &Broken, &mut StdRng::seed_from_u64(0));
        assert_eq!(result, Err(FlowError::NoChordTones { chord: "G7".to_string() }));
    }

    #[test]
    fn test_fixed_set_and_segment_lengths() {
        let set: Vec<Note> = ["C4", "E4", "G4"].iter().map(|s| Note::parse(s).unwrap()).collect();
        let key = Key::parse("C").unwrap();
        let bars = vec![
            vec![Chord::parse("ii", &key).unwrap(), Chord::parse("V", &key).unwrap()],
            vec![Chord::parse("I", &key).unwrap()],
        ];
        let segs = segments(&bars, 4).unwrap();
        let (measures, anchor) = assemble(&segs, &Fixed(set.clone()), &mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(anchor, 2);
        let lengths: Vec<usize> = measures.iter().map(|m| m.notes.len()).collect();
        assert_eq!(lengths, vec![2, 2, 4]);
        let bar_numbers: Vec<usize> = measures.iter().map(|m| m.bar).collect();
        assert_eq!(bar_numbers, vec![1, 1, 2]);
        assert!(measures.iter().flat_map(|m| &m.notes).all(|n| set.contains(n)));
    }

    #[test]
    fn test_empty_segments() {
        let (measures, anchor) = assemble(&[], &Fixed(vec![]), &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(measures.is_empty());
        assert_eq!(anchor, 0);
    }
}
