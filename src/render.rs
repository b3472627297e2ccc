//! Plain-text rendering of an exercise.
//!
//! One header line, then one line per generated measure:
//!
//! ```text
//! Arpeggios in C major, 80 bpm
//!    1  Dm7      F4 D4 C4 A3  ↓
//!    2  G7       G3 B3 D4 F4  ↑
//! ```
//!
//! The two halves of a split bar print as two lines with the same bar
//! number. The anchor measure is marked with `*`.

use crate::exercise::{Exercise, ExerciseMeasure};

/// Render an exercise as text, one line per measure.
pub fn render_text(exercise: &Exercise) -> String {
    let mut out = String::new();

    let title = exercise
        .title
        .clone()
        .unwrap_or_else(|| format!("Arpeggios in {}", exercise.key));
    match exercise.shape {
        Some(shape) => out.push_str(&format!("{} ({} shape), {} bpm\n", title, shape, exercise.tempo)),
        None => out.push_str(&format!("{}, {} bpm\n", title, exercise.tempo)),
    }

    let chord_width = exercise
        .measures
        .iter()
        .map(|m| m.chord_name.chars().count())
        .max()
        .unwrap_or(0);

    for (i, measure) in exercise.measures.iter().enumerate() {
        out.push_str(&render_measure(measure, chord_width, i == exercise.anchor));
        out.push('\n');
    }

    out
}

/// Single measure line: bar number, chord, notes and direction arrow.
pub fn render_measure(measure: &ExerciseMeasure, chord_width: usize, anchor: bool) -> String {
    let notes: Vec<String> = measure.notes.iter().map(|n| n.to_string()).collect();
    format!(
        "{:>4}{} {:<width$}  {}  {}",
        measure.bar,
        if anchor { "*" } else { " " },
        measure.chord_name,
        notes.join(" "),
        measure.direction.arrow(),
        width = chord_width
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Direction;
    use crate::fretboard::Shape;
    use crate::pitch::Note;

    fn measure(bar: usize, chord: &str, notes: &[&str], direction: Direction) -> ExerciseMeasure {
        ExerciseMeasure {
            bar,
            chord_symbol: chord.to_string(),
            chord_name: chord.to_string(),
            notes: notes.iter().map(|n| Note::parse(n).unwrap()).collect(),
            direction,
        }
    }

    fn sample() -> Exercise {
        Exercise {
            title: None,
            key: "C major".to_string(),
            fifths: 0,
            shape: None,
            tempo: 80,
            notes_per_bar: 4,
            anchor: 1,
            measures: vec![
                measure(1, "Dm7", &["F4", "D4", "C4", "A3"], Direction::Descending),
                measure(2, "Cmaj7", &["B3", "C4", "E4", "G4"], Direction::Ascending),
            ],
        }
    }

    #[test]
    fn test_render_lines() {
        let text = render_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Arpeggios in C major, 80 bpm");
        assert_eq!(lines[1], "   1  Dm7    F4 D4 C4 A3  ↓");
        assert_eq!(lines[2], "   2* Cmaj7  B3 C4 E4 G4  ↑");
    }

    #[test]
    fn test_render_header_with_title_and_shape() {
        let mut ex = sample();
        ex.title = Some("Autumn Leaves".to_string());
        ex.shape = Some(Shape::E);
        let text = render_text(&ex);
        assert!(text.starts_with("Autumn Leaves (E shape), 80 bpm\n"));
    }

    #[test]
    fn test_split_bar_shares_number() {
        let mut ex = sample();
        ex.measures = vec![
            measure(1, "Em7", &["E3", "G3"], Direction::Ascending),
            measure(1, "A7", &["A3", "C#4"], Direction::Ascending),
        ];
        ex.anchor = 0;
        let text = render_text(&ex);
        let lines: Vec<&str> = text.lines().skip(1).collect();
        assert!(lines[0].starts_with("   1* Em7"));
        assert!(lines[1].starts_with("   1  A7 "));
    }
}
