//! # Playback Data
//!
//! Timing and pitch data for an external player. Nothing here produces
//! sound; audio scheduling and synthesis live with the player.
//!
//! ## Output
//! - [`PlaybackData`] - tempo plus every note with MIDI number, frequency and
//!   timing in beats (one beat = one quarter note)
//! - Strudel helpers - mini-notation note patterns for the Strudel live-coding
//!   player (`"c4 e4 g4 b4"`), its cycles-per-minute tempo, and a ready
//!   `setcpm(..)` / `note(..)` snippet
//!
//! ## Example
//! ```rust
//! use arpeggio_flow::playback::{strudel_pattern, to_strudel_note};
//!
//! assert_eq!(to_strudel_note("Bb3").as_deref(), Some("bb3"));
//! assert_eq!(strudel_pattern(&["C4", "X9", "Bb3", "F#5"]), "c4 bb3 f#5");
//! ```

use crate::exercise::Exercise;
use crate::pitch::{Note, Pitched};
use serde::Serialize;

/// Playback data for a single note
///
/// # Fields
/// - `note`: sounding pitch name (`"E2"`)
/// - `midi_note`: MIDI number of the sounding pitch
/// - `frequency`: frequency in Hz (A4 = 440)
/// - `start_time`: start in beats from the beginning of the exercise
/// - `duration`: length in beats
/// - `note_index`: sequential index (0, 1, 2, ...)
/// - `measure_number`: bar the note belongs to (1-indexed)
/// - `beat_in_measure`: beat offset inside the bar
/// - `chord_name`: chord the note was drawn from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackNote {
    pub note: Note,
    pub midi_note: i32,
    pub frequency: f64,
    pub start_time: f64,
    pub duration: f64,
    pub note_index: usize,
    pub measure_number: usize,
    pub beat_in_measure: f64,
    pub chord_name: String,
}

/// Playback data for an entire exercise
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackData {
    pub tempo: u16,
    pub notes: Vec<PlaybackNote>,
}

/// Build playback data: every note is one quarter-note beat.
pub fn generate_playback_data(exercise: &Exercise) -> PlaybackData {
    let mut notes = Vec::new();
    let mut beat_in_measure = 0.0;
    let mut current_bar = 0;

    for measure in &exercise.measures {
        if measure.bar != current_bar {
            current_bar = measure.bar;
            beat_in_measure = 0.0;
        }
        for note in &measure.notes {
            notes.push(PlaybackNote {
                note: *note,
                midi_note: note.height(),
                frequency: note.frequency(),
                start_time: notes.len() as f64,
                duration: 1.0,
                note_index: notes.len(),
                measure_number: measure.bar,
                beat_in_measure,
                chord_name: measure.chord_name.clone(),
            });
            beat_in_measure += 1.0;
        }
    }

    PlaybackData { tempo: exercise.tempo, notes }
}

/// Strudel note name: lower case with accidentals kept (`"F#5"` -> `"f#5"`).
///
/// `None` for anything that is not a note with an octave.
pub fn to_strudel_note(note: &str) -> Option<String> {
    Note::parse(note).ok().map(|n| n.to_string().to_lowercase())
}

/// Space-separated Strudel pattern; invalid notes are skipped.
pub fn strudel_pattern<S: AsRef<str>>(notes: &[S]) -> String {
    notes
        .iter()
        .filter_map(|n| to_strudel_note(n.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strudel pattern of a whole exercise.
pub fn exercise_pattern(exercise: &Exercise) -> String {
    let names: Vec<String> = exercise.notes().map(|n| n.to_string()).collect();
    strudel_pattern(&names)
}

/// Strudel tempo: one cycle per 4/4 bar.
pub fn cycles_per_minute(bpm: f64) -> f64 {
    bpm / 4.0
}

/// Strudel snippet playing the exercise at its tempo.
pub fn strudel_code(exercise: &Exercise) -> String {
    format!(
        "setcpm({})\nnote(\"{}\")\n",
        cycles_per_minute(f64::from(exercise.tempo)),
        exercise_pattern(exercise)
    )
}
