//! # Output Formats
//!
//! Writes a generated exercise in one of the hand-off formats, optionally
//! with a fretboard diagram of the key and shape.
//!
//! ## Formats
//! - `text` - [`render_text`](crate::render::render_text); a diagram is
//!   appended as a text grid
//! - `json` - the exercise as JSON; with a diagram the document becomes
//!   `{ "exercise": ..., "diagram": ... }`
//! - `xml` - MusicXML
//! - `playback` - [`PlaybackData`](crate::playback::PlaybackData) as JSON
//! - `strudel` - a Strudel snippet
//!
//! MusicXML, playback data and Strudel code have no place for a diagram, so
//! asking for one with those formats is an [`FlowError::OutputError`].

use crate::error::FlowError;
use crate::exercise::Exercise;
use crate::fretboard::FretboardDiagram;
use crate::musicxml::to_musicxml;
use crate::playback::{generate_playback_data, strudel_code};
use crate::render::render_text;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
    Xml,
    Playback,
    Strudel,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self, FlowError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "xml" | "musicxml" => Ok(Format::Xml),
            "playback" => Ok(Format::Playback),
            "strudel" => Ok(Format::Strudel),
            _ => Err(FlowError::OutputError(format!("unknown format '{}'", s))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Text => "text",
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Playback => "playback",
            Format::Strudel => "strudel",
        };
        write!(f, "{}", name)
    }
}

/// JSON document carrying an exercise together with its diagram
#[derive(Serialize)]
struct WithDiagram<'a> {
    exercise: &'a Exercise,
    diagram: &'a FretboardDiagram,
}

/// Write `exercise` in `format`, with `diagram` where the format allows one.
pub fn write_exercise(
    exercise: &Exercise,
    format: Format,
    diagram: Option<&FretboardDiagram>,
) -> Result<String, FlowError> {
    match (format, diagram) {
        (Format::Text, None) => Ok(render_text(exercise)),
        (Format::Text, Some(diagram)) => {
            let mut out = render_text(exercise);
            out.push('\n');
            out.push_str(&diagram.render());
            Ok(out)
        }
        (Format::Json, None) => to_json(exercise),
        (Format::Json, Some(diagram)) => to_json(&WithDiagram { exercise, diagram }),
        (Format::Xml, None) => Ok(to_musicxml(exercise)),
        (Format::Playback, None) => to_json(&generate_playback_data(exercise)),
        (Format::Strudel, None) => Ok(strudel_code(exercise)),
        (_, Some(_)) => Err(FlowError::OutputError(format!(
            "a fretboard diagram cannot be included in {} output",
            format
        ))),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FlowError> {
    serde_json::to_string_pretty(value).map_err(|e| FlowError::OutputError(e.to_string()))
}
