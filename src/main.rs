use arpeggio_flow::config::ExerciseRequest;
use arpeggio_flow::output::{write_exercise, Format};
use arpeggio_flow::{songs, FretboardDiagram};
use std::env;
use std::fs;
use std::process;

const USAGE: &str = "Usage: arpeggio-flow [--format text|json|xml|playback|strudel] [--diagram] <request.yaml> [output]
       arpeggio-flow [--format text|json|xml|playback|strudel] [--diagram] --song <id> [output]
       arpeggio-flow --list-songs

--diagram is available with text and json output";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        eprintln!("{}", USAGE);
        process::exit(1);
    }

    let mut format = Format::default();
    let mut diagram = false;
    let mut song: Option<&String> = None;
    let mut positional: Vec<&String> = Vec::new();

    // Parse flags
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--list-songs" => {
                list_songs();
                return;
            }
            "--diagram" => diagram = true,
            "--format" => {
                format = match Format::parse(iter.next().map(String::as_str).unwrap_or("")) {
                    Ok(format) => format,
                    Err(e) => {
                        eprintln!("{}", e);
                        eprintln!("{}", USAGE);
                        process::exit(1);
                    }
                }
            }
            "--song" => match iter.next() {
                Some(id) => song = Some(id),
                None => {
                    eprintln!("{}", USAGE);
                    process::exit(1);
                }
            },
            _ => positional.push(arg),
        }
    }

    // Build the request
    let (request, output_path) = match song {
        Some(id) => (ExerciseRequest::for_song(id), positional.first().copied()),
        None => {
            let input_path = match positional.first() {
                Some(path) => *path,
                None => {
                    eprintln!("{}", USAGE);
                    process::exit(1);
                }
            };
            let source = match fs::read_to_string(input_path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", input_path, e);
                    process::exit(1);
                }
            };
            (ExerciseRequest::from_yaml(&source), positional.get(1).copied())
        }
    };

    let request = match request {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Request error: {}", e);
            process::exit(1);
        }
    };

    // Generate
    let exercise = match arpeggio_flow::generate(&request) {
        Ok(exercise) => exercise,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            process::exit(1);
        }
    };

    let diagram = if diagram {
        match FretboardDiagram::new(&request.key, request.shape, &request.instrument) {
            Ok(d) => Some(d),
            Err(e) => {
                eprintln!("Diagram error: {}", e);
                process::exit(1);
            }
        }
    } else {
        None
    };

    let output = match write_exercise(&exercise, format, diagram.as_ref()) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote exercise to {}", path);
        }
        None => {
            println!("{}", output);
        }
    }
}

fn list_songs() {
    match songs::all() {
        Ok(all) => {
            for song in all {
                println!("{:<20} {} ({}, {} bars)", song.id, song.title, song.key, song.bars.len());
            }
        }
        Err(e) => {
            eprintln!("Song library error: {}", e);
            process::exit(1);
        }
    }
}
