//! # MusicXML Export
//!
//! Hands an exercise to notation software.
//!
//! Guitar is a transposing instrument: it sounds an octave below the written
//! note. Exercises hold sounding pitches (open low E = E2), so every note is
//! written one octave up and the part carries an octave-down `<transpose>`.
//!
//! Each bar is one `<measure>` of quarter notes (time signature
//! `notes_per_bar`/4). Every chord segment opens with a `<words>` direction
//! naming its chord.

use crate::exercise::{Exercise, ExerciseMeasure};
use crate::pitch::{Accidental, Note, NoteName};
use quick_xml::escape::escape;

/// Sharps and flats in key-signature order
const SHARP_ORDER: [NoteName; 7] =
    [NoteName::F, NoteName::C, NoteName::G, NoteName::D, NoteName::A, NoteName::E, NoteName::B];
const FLAT_ORDER: [NoteName; 7] =
    [NoteName::B, NoteName::E, NoteName::A, NoteName::D, NoteName::G, NoteName::C, NoteName::F];

/// Convert an exercise to MusicXML
pub fn to_musicxml(exercise: &Exercise) -> String {
    let mut xml = String::new();

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<!DOCTYPE score-partwise PUBLIC "-//Recordare//DTD MusicXML 4.0 Partwise//EN" "http://www.musicxml.org/dtds/partwise.dtd">"#);
    xml.push('\n');
    xml.push_str(r#"<score-partwise version="4.0">"#);
    xml.push('\n');

    let title = match (&exercise.title, exercise.shape) {
        (Some(title), _) => title.clone(),
        (None, Some(shape)) => format!("Arpeggios in {} ({} shape)", exercise.key, shape),
        (None, None) => format!("Arpeggios in {}", exercise.key),
    };
    xml.push_str("  <work>\n");
    xml.push_str(&format!("    <work-title>{}</work-title>\n", escape(title.as_str())));
    xml.push_str("  </work>\n");

    xml.push_str("  <part-list>\n");
    xml.push_str("    <score-part id=\"P1\">\n");
    xml.push_str("      <part-name>Guitar</part-name>\n");
    xml.push_str("    </score-part>\n");
    xml.push_str("  </part-list>\n");

    xml.push_str("  <part id=\"P1\">\n");
    for bar in 1..=exercise.bar_count() {
        let segments: Vec<&ExerciseMeasure> = exercise.bar(bar).collect();
        xml.push_str(&bar_to_xml(exercise, bar, &segments));
    }
    xml.push_str("  </part>\n");
    xml.push_str("</score-partwise>\n");

    xml
}

fn bar_to_xml(exercise: &Exercise, number: usize, segments: &[&ExerciseMeasure]) -> String {
    let mut xml = String::new();

    xml.push_str(&format!("    <measure number=\"{}\">\n", number));

    if number == 1 {
        xml.push_str("      <attributes>\n");
        xml.push_str("        <divisions>1</divisions>\n");
        xml.push_str("        <key>\n");
        xml.push_str(&format!("          <fifths>{}</fifths>\n", exercise.fifths));
        xml.push_str("        </key>\n");
        xml.push_str("        <time>\n");
        xml.push_str(&format!("          <beats>{}</beats>\n", exercise.notes_per_bar));
        xml.push_str("          <beat-type>4</beat-type>\n");
        xml.push_str("        </time>\n");
        xml.push_str("        <clef>\n");
        xml.push_str("          <sign>G</sign>\n");
        xml.push_str("          <line>2</line>\n");
        xml.push_str("        </clef>\n");
        xml.push_str("        <transpose>\n");
        xml.push_str("          <diatonic>0</diatonic>\n");
        xml.push_str("          <chromatic>0</chromatic>\n");
        xml.push_str("          <octave-change>-1</octave-change>\n");
        xml.push_str("        </transpose>\n");
        xml.push_str("      </attributes>\n");
    }

    if number == 1 {
        xml.push_str("      <direction placement=\"above\">\n");
        xml.push_str("        <direction-type>\n");
        xml.push_str(&format!("          <metronome><beat-unit>quarter</beat-unit><per-minute>{}</per-minute></metronome>\n", exercise.tempo));
        xml.push_str("        </direction-type>\n");
        xml.push_str(&format!("        <sound tempo=\"{}\"/>\n", exercise.tempo));
        xml.push_str("      </direction>\n");
    }

    for segment in segments {
        xml.push_str("      <direction placement=\"above\">\n");
        xml.push_str("        <direction-type>\n");
        xml.push_str(&format!("          <words>{}</words>\n", escape(segment.chord_name.as_str())));
        xml.push_str("        </direction-type>\n");
        xml.push_str("      </direction>\n");

        for note in &segment.notes {
            xml.push_str(&note_to_xml(note, exercise.fifths));
        }
    }

    xml.push_str("    </measure>\n");
    xml
}

fn note_to_xml(note: &Note, fifths: i8) -> String {
    let mut xml = String::new();

    xml.push_str("      <note>\n");
    xml.push_str("        <pitch>\n");
    xml.push_str(&format!("          <step>{}</step>\n", note.name.as_str()));
    match note.accidental {
        Accidental::Sharp => xml.push_str("          <alter>1</alter>\n"),
        Accidental::Flat => xml.push_str("          <alter>-1</alter>\n"),
        Accidental::Natural => {}
    }
    // Written an octave above sounding pitch
    xml.push_str(&format!("          <octave>{}</octave>\n", note.octave + 1));
    xml.push_str("        </pitch>\n");
    xml.push_str("        <duration>1</duration>\n");
    xml.push_str("        <type>quarter</type>\n");

    // Only mark accidentals the key signature does not already imply
    if note.accidental != key_accidental(note.name, fifths) {
        let accidental = match note.accidental {
            Accidental::Sharp => "sharp",
            Accidental::Flat => "flat",
            Accidental::Natural => "natural",
        };
        xml.push_str(&format!("        <accidental>{}</accidental>\n", accidental));
    }

    xml.push_str("      </note>\n");
    xml
}

/// Accidental the key signature applies to a letter.
fn key_accidental(name: NoteName, fifths: i8) -> Accidental {
    let count = fifths.unsigned_abs() as usize;
    if fifths > 0 && SHARP_ORDER[..count.min(7)].contains(&name) {
        Accidental::Sharp
    } else if fifths < 0 && FLAT_ORDER[..count.min(7)].contains(&name) {
        Accidental::Flat
    } else {
        Accidental::Natural
    }
}
