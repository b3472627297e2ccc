pub mod config;
pub mod error;
pub mod exercise;
pub mod flow;
pub mod fretboard;
pub mod musicxml;
pub mod output;
pub mod pitch;
pub mod playback;
pub mod provider;
pub mod render;
pub mod songs;
pub mod theory;

pub use config::ExerciseRequest;
pub use error::*;
pub use exercise::{generate_exercise, Exercise, ExerciseMeasure};
pub use flow::{Direction, GeneratedMeasure};
pub use fretboard::{FretboardDiagram, Instrument, Shape};
pub use musicxml::to_musicxml;
pub use output::{write_exercise, Format};
pub use pitch::{Note, Pitched};
pub use playback::generate_playback_data;
pub use render::render_text;
pub use theory::{Chord, Key};

/// Generate an exercise from a YAML request.
/// This is the main entry point for the library.
pub fn generate_from_yaml(source: &str) -> Result<Exercise, FlowError> {
    let request = ExerciseRequest::from_yaml(source)?;
    generate(&request)
}

/// Generate an exercise for a parsed request, seeding from the request when
/// it carries a seed.
pub fn generate(request: &ExerciseRequest) -> Result<Exercise, FlowError> {
    let mut rng = request.rng();
    generate_exercise(request, &mut rng)
}

/// Compile a YAML request straight to MusicXML.
pub fn compile(source: &str) -> Result<String, FlowError> {
    let exercise = generate_from_yaml(source)?;
    Ok(to_musicxml(&exercise))
}
