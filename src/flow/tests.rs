use super::*;
use crate::error::FlowError;
use crate::pitch::Pitched;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Cmaj7 from C3 to G5: C3 E3 G3 B3 C4 E4 G4 B4 C5 E5 G5
const CMAJ7: [i32; 11] = [48, 52, 55, 59, 60, 64, 67, 71, 72, 76, 79];

/// Dm7 from D3 to F5: D3 F3 A3 C4 D4 F4 A4 C5 D5 F5
const DM7: [i32; 10] = [50, 53, 57, 60, 62, 65, 69, 72, 74, 77];

/// Every pitch in `low..=high` whose pitch class is in `classes`.
fn chord_set(classes: &[i32], low: i32, high: i32) -> Vec<i32> {
    (low..=high).filter(|h| classes.contains(&h.rem_euclid(12))).collect()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ============================================================================
// Closest-pitch selection
// ============================================================================

#[test]
fn test_closest_prefers_unison() {
    assert_eq!(select_closest_pitch(&79, &CMAJ7).unwrap(), 79);
    assert_eq!(select_closest_pitch(&60, &CMAJ7).unwrap(), 60);
}

#[test]
fn test_closest_cross_chord_tie_picks_lower() {
    // G4 into Dm7: F4 and A4 are both two semitones away
    assert_eq!(select_closest_pitch(&67, &DM7).unwrap(), 65);
}

#[test]
fn test_closest_cross_chord_without_tie() {
    // E4 into Dm7: F4 is a semitone away, D4 a whole tone
    assert_eq!(select_closest_pitch(&64, &DM7).unwrap(), 65);
    // B4 into Dm7: C5
    assert_eq!(select_closest_pitch(&71, &DM7).unwrap(), 72);
}

#[test]
fn test_closest_outside_set_range() {
    assert_eq!(select_closest_pitch(&20, &CMAJ7).unwrap(), 48);
    assert_eq!(select_closest_pitch(&100, &CMAJ7).unwrap(), 79);
}

#[test]
fn test_closest_is_never_beaten() {
    let sets = [CMAJ7.to_vec(), DM7.to_vec(), chord_set(&[7, 11, 2, 5], 40, 88)];
    for set in &sets {
        for target in 30..100 {
            let chosen = select_closest_pitch(&target, set).unwrap();
            let best = (chosen - target).abs();
            assert!(
                set.iter().all(|p| (p - target).abs() >= best),
                "target {} chose {} but a closer pitch exists",
                target,
                chosen
            );
        }
    }
}

#[test]
fn test_closest_works_across_pitch_types() {
    let notes: Vec<crate::pitch::Note> = ["D4", "F4", "A4"]
        .iter()
        .map(|s| crate::pitch::Note::parse(s).unwrap())
        .collect();
    let chosen = select_closest_pitch(&67u8, &notes).unwrap();
    assert_eq!(chosen.to_string(), "F4");
}

// ============================================================================
// Next pitch in direction
// ============================================================================

#[test]
fn test_next_steps_up_and_down() {
    let set = [60, 64, 67, 71];
    assert_eq!(next_in_direction(&[64], &set, Direction::Ascending).unwrap(), 67);
    assert_eq!(next_in_direction(&[64], &set, Direction::Descending).unwrap(), 60);
    assert_eq!(next_in_direction(&[60, 64, 67], &set, Direction::Ascending).unwrap(), 71);
}

#[test]
fn test_next_with_nothing_placed_starts_from_lowest() {
    let set = [60, 64, 67, 71];
    assert_eq!(next_in_direction(&[], &set, Direction::Ascending).unwrap(), 64);
    // Descending from the lowest pitch wraps to the top
    assert_eq!(next_in_direction(&[], &set, Direction::Descending).unwrap(), 71);
}

#[test]
fn test_next_wraps_around() {
    let set = [60, 64, 67, 71];
    assert_eq!(next_in_direction(&[71], &set, Direction::Ascending).unwrap(), 60);
    assert_eq!(next_in_direction(&[60], &set, Direction::Descending).unwrap(), 71);
}

#[test]
fn test_next_enters_foreign_pitch_from_edge() {
    let set = [60, 64, 67, 71];
    // 66 belongs to another chord
    assert_eq!(next_in_direction(&[66], &set, Direction::Ascending).unwrap(), 60);
    assert_eq!(next_in_direction(&[66], &set, Direction::Descending).unwrap(), 71);
}

#[test]
fn test_next_never_repeats_unless_forced() {
    // Duplicate heights are skipped over
    let duplicated = [60, 60, 64];
    assert_eq!(next_in_direction(&[60], &duplicated, Direction::Ascending).unwrap(), 64);
    assert_eq!(next_in_direction(&[64], &duplicated, Direction::Ascending).unwrap(), 60);

    // A single distinct height has nowhere else to go
    assert_eq!(next_in_direction(&[60], &[60], Direction::Ascending).unwrap(), 60);
    assert_eq!(next_in_direction(&[60], &[60, 60], Direction::Descending).unwrap(), 60);
}

// ============================================================================
// Boundaries and reversal
// ============================================================================

#[test]
fn test_reached_boundary() {
    assert_eq!(reached_boundary(&48, &CMAJ7), Boundary { at_low: true, at_high: false });
    assert_eq!(reached_boundary(&79, &CMAJ7), Boundary { at_low: false, at_high: true });
    assert_eq!(reached_boundary(&64, &CMAJ7), Boundary::default());
    // Not a member at all
    assert!(!reached_boundary(&40, &CMAJ7).any());
    // A single pitch is both edges
    assert_eq!(reached_boundary(&60, &[60]), Boundary { at_low: true, at_high: true });
    assert!(!reached_boundary(&60, &[] as &[i32]).any());
}

#[test]
fn test_reverse_only_when_heading_into_boundary() {
    assert_eq!(reverse_if_needed(&79, &CMAJ7, Direction::Ascending), Direction::Descending);
    assert_eq!(reverse_if_needed(&48, &CMAJ7, Direction::Descending), Direction::Ascending);

    // Moving away from the boundary just reached
    assert_eq!(reverse_if_needed(&48, &CMAJ7, Direction::Ascending), Direction::Ascending);
    assert_eq!(reverse_if_needed(&79, &CMAJ7, Direction::Descending), Direction::Descending);

    // Interior pitches never reverse
    assert_eq!(reverse_if_needed(&64, &CMAJ7, Direction::Ascending), Direction::Ascending);
    assert_eq!(reverse_if_needed(&64, &CMAJ7, Direction::Descending), Direction::Descending);
}

// ============================================================================
// Measure generator
// ============================================================================

#[test]
fn test_measure_turns_at_high_boundary() {
    let measure = generate_measure(&CMAJ7, 4, Some(&79), Direction::Ascending, &mut rng(0)).unwrap();
    assert_eq!(measure.pitches, vec![79, 76, 72, 71]);
    assert_eq!(measure.ending_direction, Direction::Descending);
}

#[test]
fn test_measure_turns_after_first_step() {
    let last = *CMAJ7.last().unwrap();
    let measure = generate_measure(&CMAJ7, 1, Some(&last), Direction::Ascending, &mut rng(0)).unwrap();
    assert_eq!(measure.pitches, vec![79]);
    assert_eq!(measure.ending_direction, Direction::Descending);
}

#[test]
fn test_measure_turns_at_low_boundary() {
    let measure = generate_measure(&CMAJ7, 4, Some(&48), Direction::Descending, &mut rng(0)).unwrap();
    assert_eq!(measure.pitches, vec![48, 52, 55, 59]);
    assert_eq!(measure.ending_direction, Direction::Ascending);
}

#[test]
fn test_measure_direction_follows_first_move() {
    // F#4 into Cmaj7: G4 is closer than E4, so the line turns upward
    let measure = generate_measure(&CMAJ7, 4, Some(&66), Direction::Descending, &mut rng(0)).unwrap();
    assert_eq!(measure.pitches, vec![67, 71, 72, 76]);
    assert_eq!(measure.ending_direction, Direction::Ascending);

    // G#4 into Cmaj7: G4 is below, so it turns downward
    let measure = generate_measure(&CMAJ7, 4, Some(&68), Direction::Ascending, &mut rng(0)).unwrap();
    assert_eq!(measure.pitches, vec![67, 64, 60, 59]);
    assert_eq!(measure.ending_direction, Direction::Descending);
}

#[test]
fn test_measure_unison_keeps_direction() {
    let measure = generate_measure(&CMAJ7, 4, Some(&64), Direction::Descending, &mut rng(0)).unwrap();
    assert_eq!(measure.pitches, vec![64, 60, 59, 55]);
    assert_eq!(measure.ending_direction, Direction::Descending);
}

#[test]
fn test_measure_cross_chord_scenario() {
    // G4 into Dm7 ascending: F4 wins the tie and sends the line down
    let measure = generate_measure(&DM7, 4, Some(&67), Direction::Ascending, &mut rng(0)).unwrap();
    assert_eq!(measure.pitches, vec![65, 62, 60, 57]);
    assert_eq!(measure.ending_direction, Direction::Descending);
}

#[test]
fn test_measure_count_invariant() {
    for n in 0..9 {
        let opening = generate_measure(&DM7, n, None, Direction::Ascending, &mut rng(n as u64)).unwrap();
        assert_eq!(opening.pitches.len(), n);
        let chained = generate_measure(&DM7, n, Some(&60), Direction::Descending, &mut rng(0)).unwrap();
        assert_eq!(chained.pitches.len(), n);
    }
}

#[test]
fn test_measure_range_and_membership() {
    let set = chord_set(&[0, 4, 7, 11], 40, 88);
    for seed in 0..50 {
        let mut r = rng(seed);
        let mut previous: Option<i32> = None;
        let mut direction = Direction::Ascending;
        for _ in 0..8 {
            let measure = generate_measure(&set, 4, previous.as_ref(), direction, &mut r).unwrap();
            for pitch in &measure.pitches {
                assert!((40..=88).contains(pitch), "seed {} produced {}", seed, pitch);
                assert!(set.contains(pitch), "seed {} produced non-member {}", seed, pitch);
            }
            previous = measure.last().copied();
            direction = measure.ending_direction;
        }
    }
}

#[test]
fn test_measure_deterministic_once_previous_is_known() {
    let first = generate_measure(&DM7, 4, Some(&70), Direction::Ascending, &mut rng(1)).unwrap();
    let second = generate_measure(&DM7, 4, Some(&70), Direction::Ascending, &mut rng(999)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_measure_opening_is_seeded() {
    let a = generate_measure(&CMAJ7, 4, None, Direction::Ascending, &mut rng(42)).unwrap();
    let b = generate_measure(&CMAJ7, 4, None, Direction::Ascending, &mut rng(42)).unwrap();
    assert_eq!(a, b);
    assert!(CMAJ7.contains(&a.pitches[0]));
}

#[test]
fn test_measure_smooth_transitions() {
    // ii-V-I-vi in C across the guitar range
    let chords = [
        chord_set(&[2, 5, 9, 0], 40, 88),
        chord_set(&[7, 11, 2, 5], 40, 88),
        chord_set(&[0, 4, 7, 11], 40, 88),
        chord_set(&[9, 0, 4, 7], 40, 88),
    ];
    for seed in 0..20 {
        let mut r = rng(seed);
        let mut previous: Option<i32> = None;
        let mut direction = Direction::Ascending;
        for bar in 0..16 {
            let set = &chords[bar % chords.len()];
            let measure = generate_measure(set, 4, previous.as_ref(), direction, &mut r).unwrap();
            if let (Some(prev), Some(first)) = (previous, measure.first()) {
                assert!((first - prev).abs() <= 12, "jump {} -> {} in bar {}", prev, first, bar);
            }
            previous = measure.last().copied();
            direction = measure.ending_direction;
        }
    }
}

#[test]
fn test_measure_single_pitch_set_repeats() {
    let measure = generate_measure(&[60], 3, Some(&62), Direction::Ascending, &mut rng(0)).unwrap();
    assert_eq!(measure.pitches, vec![60, 60, 60]);
}

// ============================================================================
// Backward fill
// ============================================================================

#[test]
fn test_approach_from_below() {
    let measure = approach_target(&CMAJ7, 4, &62).unwrap();
    assert_eq!(measure.pitches, vec![52, 55, 59, 60]);
    assert_eq!(measure.ending_direction, Direction::Ascending);
}

#[test]
fn test_approach_from_above() {
    // Target below the whole set: end on the lowest pitch, arriving downward
    let measure = approach_target(&CMAJ7, 4, &40).unwrap();
    assert_eq!(measure.pitches, vec![59, 55, 52, 48]);
    assert_eq!(measure.ending_direction, Direction::Descending);
}

#[test]
fn test_approach_unison_counts_as_ascending() {
    let measure = approach_target(&CMAJ7, 4, &60).unwrap();
    assert_eq!(measure.last(), Some(&60));
    assert_eq!(measure.ending_direction, Direction::Ascending);
}

#[test]
fn test_approach_turns_at_boundary() {
    let set = [60, 64, 67];
    let measure = approach_target(&set, 4, &70).unwrap();
    assert_eq!(measure.pitches, vec![64, 60, 64, 67]);
    assert_eq!(measure.ending_direction, Direction::Ascending);
}

#[test]
fn test_approach_ends_close_to_target() {
    let set = chord_set(&[2, 5, 9, 0], 40, 88);
    for target in 45..85 {
        let measure = approach_target(&set, 4, &target).unwrap();
        assert_eq!(measure.pitches.len(), 4);
        let last = *measure.last().unwrap();
        assert!((last - target).abs() <= 2, "target {} approached from {}", target, last);
        assert!(measure.pitches.iter().all(|p| set.contains(p)));
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_set_is_an_error() {
    let empty: [i32; 0] = [];
    assert_eq!(select_closest_pitch(&60, &empty), Err(FlowError::EmptyAdmissibleSet));
    assert_eq!(next_in_direction(&[60], &empty, Direction::Ascending), Err(FlowError::EmptyAdmissibleSet));
    assert_eq!(
        generate_measure(&empty, 4, None, Direction::Ascending, &mut rng(0)),
        Err(FlowError::EmptyAdmissibleSet)
    );
    assert_eq!(approach_target(&empty, 4, &60), Err(FlowError::EmptyAdmissibleSet));
}

#[test]
fn test_direction_of_motion() {
    assert_eq!(Direction::of_motion(&60, &67), Some(Direction::Ascending));
    assert_eq!(Direction::of_motion(&67, &60), Some(Direction::Descending));
    assert_eq!(Direction::of_motion(&60, &60), None);
    assert_eq!(Direction::Ascending.reversed(), Direction::Descending);
    assert!((69i32.frequency() - 440.0).abs() < 1e-9);
}
