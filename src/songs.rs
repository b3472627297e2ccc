//! # Song Library
//!
//! Lead-sheet chord charts bundled with the crate, stored as YAML under
//! `songs/` and embedded at compile time.
//!
//! A bar lists one or more chord symbols; several chords share the bar's
//! notes evenly.
//!
//! ```yaml
//! id: autumn-leaves
//! title: Autumn Leaves
//! key: G
//! tempo: 80
//! bars:
//!   - [Am7]
//!   - [Em7, A7]
//! ```

use crate::error::FlowError;
use crate::theory::{Chord, Key};
use serde::Deserialize;

const SONG_SOURCES: &[&str] = &[include_str!("../songs/autumn_leaves.yaml")];

/// A bundled chord chart
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub key: String,
    #[serde(default = "default_tempo")]
    pub tempo: u16,
    pub bars: Vec<Vec<String>>,
}

fn default_tempo() -> u16 {
    crate::config::DEFAULT_TEMPO
}

impl Song {
    pub fn from_yaml(source: &str) -> Result<Self, FlowError> {
        serde_yaml::from_str(source).map_err(|e| FlowError::ConfigError(e.to_string()))
    }

    pub fn parse_key(&self) -> Result<Key, FlowError> {
        Key::parse(&self.key)
    }

    /// Resolve every bar's chord symbols against the song's key.
    pub fn chord_bars(&self, key: &Key) -> Result<Vec<Vec<Chord>>, FlowError> {
        self.bars
            .iter()
            .map(|bar| bar.iter().map(|symbol| Chord::parse(symbol, key)).collect())
            .collect()
    }
}

/// Every bundled song.
pub fn all() -> Result<Vec<Song>, FlowError> {
    SONG_SOURCES.iter().map(|source| Song::from_yaml(source)).collect()
}

/// Look up a bundled song by id (`autumn-leaves`).
pub fn find(id: &str) -> Result<Song, FlowError> {
    all()?
        .into_iter()
        .find(|song| song.id == id)
        .ok_or_else(|| FlowError::UnknownSong(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_songs_parse() {
        let songs = all().unwrap();
        assert!(!songs.is_empty());
        for song in &songs {
            let key = song.parse_key().unwrap();
            song.chord_bars(&key).unwrap();
        }
    }

    #[test]
    fn test_autumn_leaves() {
        let song = find("autumn-leaves").unwrap();
        assert_eq!(song.title, "Autumn Leaves");
        assert_eq!(song.key, "G");
        assert_eq!(song.tempo, 80);
        assert_eq!(song.bars.len(), 32);
        assert_eq!(song.bars[26], vec!["Em7", "A7"]);

        let key = song.parse_key().unwrap();
        let bars = song.chord_bars(&key).unwrap();
        // Gmaj7 in bar 3 is the first tonic
        assert!(bars[2][0].is_tonic());
        assert!(!bars[0][0].is_tonic());
    }

    #[test]
    fn test_unknown_song() {
        assert_eq!(find("giant-steps"), Err(FlowError::UnknownSong("giant-steps".to_string())));
    }

    #[test]
    fn test_song_without_tempo_uses_default() {
        let song = Song::from_yaml("id: x\ntitle: X\nkey: C\nbars:\n  - [C]\n").unwrap();
        assert_eq!(song.tempo, crate::config::DEFAULT_TEMPO);
        assert!(Song::from_yaml("id: x\n").is_err());
    }
}
