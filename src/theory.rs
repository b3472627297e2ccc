//! # Music Theory
//!
//! Keys, major-scale degrees, roman numerals and chord symbols.
//!
//! ## Chords
//! A progression token is either a roman numeral, resolved against the key's
//! major scale, or an absolute chord symbol:
//!
//! | Numeral | Degree | Quality |
//! |---------|--------|---------|
//! | `I`     | 1      | maj7    |
//! | `ii`    | 2      | m7      |
//! | `iii`   | 3      | m7      |
//! | `IV`    | 4      | maj7    |
//! | `V`     | 5      | 7       |
//! | `vi`    | 6      | m7      |
//! | `vii°`  | 7      | m7b5    |
//!
//! Chord tones are spelled by letter (a third is always two letters above the
//! root), so `F#m7b5` yields `F# A C E`, not `F# A B# E`.
//!
//! ## Example
//! ```rust
//! use arpeggio_flow::theory::{Chord, Key};
//!
//! let key = Key::parse("C").unwrap();
//! let ii = Chord::parse("ii", &key).unwrap();
//! assert_eq!(ii.name(), "Dm7");
//! let tones: Vec<String> = ii.tones().iter().map(|pc| pc.to_string()).collect();
//! assert_eq!(tones, vec!["D", "F", "A", "C"]);
//! ```

use crate::error::FlowError;
use crate::pitch::{Accidental, NoteName, PitchClass};
use std::fmt;

/// Semitone offsets of the major scale degrees 1-7.
const MAJOR_SCALE: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

const LETTERS: [NoteName; 7] = [
    NoteName::C,
    NoteName::D,
    NoteName::E,
    NoteName::F,
    NoteName::G,
    NoteName::A,
    NoteName::B,
];

fn letter_index(name: NoteName) -> usize {
    match name {
        NoteName::C => 0,
        NoteName::D => 1,
        NoteName::E => 2,
        NoteName::F => 3,
        NoteName::G => 4,
        NoteName::A => 5,
        NoteName::B => 6,
    }
}

/// Spell `semitones` above `root` using the letter `letter_steps` above the root's letter.
/// Falls back to plain sharp/flat spelling when that would need a double accidental.
fn spell_interval(root: PitchClass, semitones: i32, letter_steps: usize, prefer_flat: bool) -> PitchClass {
    let target = (root.semitone() as i32 + semitones).rem_euclid(12);
    let name = LETTERS[(letter_index(root.name) + letter_steps) % 7];
    let mut diff = (target - name.semitone()).rem_euclid(12);
    if diff > 6 {
        diff -= 12;
    }
    match diff {
        0 => PitchClass::new(name, Accidental::Natural),
        1 => PitchClass::new(name, Accidental::Sharp),
        -1 => PitchClass::new(name, Accidental::Flat),
        _ => PitchClass::from_semitone(target, prefer_flat),
    }
}

/// A major key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key {
    pub tonic: PitchClass,
    /// Position on the circle of fifths: positive = sharps, negative = flats.
    pub fifths: i8,
}

impl Key {
    /// Parse a major key name like "G", "Bb", "F#" (also "Fs"/"Bf" spellings).
    pub fn parse(s: &str) -> Result<Self, FlowError> {
        let trimmed = s.trim();
        let fifths = match trimmed {
            "C" => 0,
            "G" => 1,
            "D" => 2,
            "A" => 3,
            "E" => 4,
            "B" => 5,
            "F#" | "Fs" => 6,
            "C#" | "Cs" => 7,
            "F" => -1,
            "Bb" | "Bf" => -2,
            "Eb" | "Ef" => -3,
            "Ab" | "Af" => -4,
            "Db" | "Df" => -5,
            "Gb" | "Gf" => -6,
            "Cb" | "Cf" => -7,
            _ => return Err(FlowError::UnknownKey(s.to_string())),
        };
        let tonic = PitchClass::parse(trimmed).ok_or_else(|| FlowError::UnknownKey(s.to_string()))?;
        Ok(Self { tonic, fifths })
    }

    pub fn prefer_flat(&self) -> bool {
        self.fifths < 0
    }

    /// The seven spelled degrees of the major scale.
    pub fn scale(&self) -> [PitchClass; 7] {
        let mut degrees = [self.tonic; 7];
        for (i, degree) in degrees.iter_mut().enumerate() {
            *degree = spell_interval(self.tonic, MAJOR_SCALE[i], i, self.prefer_flat());
        }
        degrees
    }

    /// Root of scale degree 1-7.
    pub fn degree_root(&self, degree: u8) -> Option<PitchClass> {
        let idx = (degree as usize).checked_sub(1)?;
        self.scale().get(idx).copied()
    }

    /// Scale degree (1-7) of a pitch class, if it belongs to the scale.
    pub fn degree_of(&self, pitch_class: PitchClass) -> Option<u8> {
        self.scale()
            .iter()
            .position(|pc| pc.semitone() == pitch_class.semitone())
            .map(|i| i as u8 + 1)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} major", self.tonic)
    }
}

/// Supported chord qualities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    Diminished,
    Diminished7,
    HalfDiminished,
    Augmented,
    Sus2,
    Sus4,
    Major6,
    Minor6,
    Dominant9,
    Major9,
    Minor9,
    Dominant7Flat9,
}

impl ChordQuality {
    /// Parse the suffix of a chord symbol (everything after the root).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let quality = match suffix {
            "" | "maj" | "M" => ChordQuality::Major,
            "m" | "min" | "-" => ChordQuality::Minor,
            "7" => ChordQuality::Dominant7,
            "maj7" | "M7" | "Δ" | "Δ7" => ChordQuality::Major7,
            "m7" | "min7" | "-7" => ChordQuality::Minor7,
            "dim" | "°" => ChordQuality::Diminished,
            "dim7" | "°7" => ChordQuality::Diminished7,
            "m7b5" | "min7b5" | "-7b5" | "ø" | "ø7" => ChordQuality::HalfDiminished,
            "aug" | "+" => ChordQuality::Augmented,
            "sus2" => ChordQuality::Sus2,
            "sus4" | "sus" => ChordQuality::Sus4,
            "6" => ChordQuality::Major6,
            "m6" | "min6" => ChordQuality::Minor6,
            "9" => ChordQuality::Dominant9,
            "maj9" | "M9" => ChordQuality::Major9,
            "m9" | "min9" => ChordQuality::Minor9,
            "7b9" => ChordQuality::Dominant7Flat9,
            _ => return None,
        };
        Some(quality)
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Diminished => "dim",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::HalfDiminished => "m7b5",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Major6 => "6",
            ChordQuality::Minor6 => "m6",
            ChordQuality::Dominant9 => "9",
            ChordQuality::Major9 => "maj9",
            ChordQuality::Minor9 => "m9",
            ChordQuality::Dominant7Flat9 => "7b9",
        }
    }

    /// (semitones above root, letters above root) for each chord tone.
    ///
    /// Intervals: minor 3rd = 3, major 3rd = 4, perfect 5th = 7, minor 7th = 10,
    /// major 7th = 11, 9th = 14.
    pub fn intervals(self) -> &'static [(i32, usize)] {
        match self {
            ChordQuality::Major => &[(0, 0), (4, 2), (7, 4)],
            ChordQuality::Minor => &[(0, 0), (3, 2), (7, 4)],
            ChordQuality::Dominant7 => &[(0, 0), (4, 2), (7, 4), (10, 6)],
            ChordQuality::Major7 => &[(0, 0), (4, 2), (7, 4), (11, 6)],
            ChordQuality::Minor7 => &[(0, 0), (3, 2), (7, 4), (10, 6)],
            ChordQuality::Diminished => &[(0, 0), (3, 2), (6, 4)],
            ChordQuality::Diminished7 => &[(0, 0), (3, 2), (6, 4), (9, 6)],
            ChordQuality::HalfDiminished => &[(0, 0), (3, 2), (6, 4), (10, 6)],
            ChordQuality::Augmented => &[(0, 0), (4, 2), (8, 4)],
            ChordQuality::Sus2 => &[(0, 0), (2, 1), (7, 4)],
            ChordQuality::Sus4 => &[(0, 0), (5, 3), (7, 4)],
            ChordQuality::Major6 => &[(0, 0), (4, 2), (7, 4), (9, 5)],
            ChordQuality::Minor6 => &[(0, 0), (3, 2), (7, 4), (9, 5)],
            ChordQuality::Dominant9 => &[(0, 0), (4, 2), (7, 4), (10, 6), (14, 1)],
            ChordQuality::Major9 => &[(0, 0), (4, 2), (7, 4), (11, 6), (14, 1)],
            ChordQuality::Minor9 => &[(0, 0), (3, 2), (7, 4), (10, 6), (14, 1)],
            ChordQuality::Dominant7Flat9 => &[(0, 0), (4, 2), (7, 4), (10, 6), (13, 1)],
        }
    }
}

/// Resolve a roman numeral to (scale degree, quality).
fn roman_numeral(token: &str) -> Option<(u8, ChordQuality)> {
    let resolved = match token {
        "I" => (1, ChordQuality::Major7),
        "ii" => (2, ChordQuality::Minor7),
        "iii" => (3, ChordQuality::Minor7),
        "IV" => (4, ChordQuality::Major7),
        "V" => (5, ChordQuality::Dominant7),
        "vi" => (6, ChordQuality::Minor7),
        "vii°" | "vii" | "viiø" | "viio" => (7, ChordQuality::HalfDiminished),
        _ => return None,
    };
    Some(resolved)
}

/// A chord resolved against a key.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    /// The token as written in the progression (`ii`, `Am7`, ...).
    pub symbol: String,
    pub root: PitchClass,
    pub quality: ChordQuality,
    /// Scale degree of the root in the key, when it is diatonic.
    pub degree: Option<u8>,
    prefer_flat: bool,
}

impl Chord {
    /// Parse a progression token: a roman numeral or an absolute chord symbol.
    ///
    /// ```
    /// use arpeggio_flow::theory::{Chord, ChordQuality, Key};
    ///
    /// let key = Key::parse("G").unwrap();
    /// let chord = Chord::parse("F#m7b5", &key).unwrap();
    /// assert_eq!(chord.quality, ChordQuality::HalfDiminished);
    /// assert_eq!(chord.degree, Some(7));
    /// assert!(Chord::parse("VIII", &key).is_err());
    /// ```
    pub fn parse(token: &str, key: &Key) -> Result<Self, FlowError> {
        let token = token.trim();
        if let Some((degree, quality)) = roman_numeral(token) {
            let root = key
                .degree_root(degree)
                .ok_or_else(|| FlowError::UnknownChordSymbol(token.to_string()))?;
            return Ok(Self {
                symbol: token.to_string(),
                root,
                quality,
                degree: Some(degree),
                prefer_flat: key.prefer_flat(),
            });
        }
        Self::parse_symbol(token, key)
    }

    fn parse_symbol(token: &str, key: &Key) -> Result<Self, FlowError> {
        let unknown = || FlowError::UnknownChordSymbol(token.to_string());
        let mut chars = token.chars();

        // Chord symbols always start with an upper-case root letter
        let first = chars.next().filter(|c| c.is_ascii_uppercase()).ok_or_else(unknown)?;
        let name = NoteName::from_char(first).ok_or_else(unknown)?;

        let rest = chars.as_str();
        let (accidental, suffix) = if let Some(stripped) = rest.strip_prefix('#') {
            (Accidental::Sharp, stripped)
        } else if let Some(stripped) = rest.strip_prefix('b') {
            (Accidental::Flat, stripped)
        } else {
            (Accidental::Natural, rest)
        };

        let quality = ChordQuality::from_suffix(suffix).ok_or_else(unknown)?;
        let root = PitchClass::new(name, accidental);
        let prefer_flat = match accidental {
            Accidental::Flat => true,
            Accidental::Sharp => false,
            Accidental::Natural => key.prefer_flat(),
        };

        Ok(Self {
            symbol: token.to_string(),
            root,
            quality,
            degree: key.degree_of(root),
            prefer_flat,
        })
    }

    /// Resolved chord name, e.g. "Dm7".
    pub fn name(&self) -> String {
        format!("{}{}", self.root, self.quality.suffix())
    }

    /// Spelled chord tones, root first.
    pub fn tones(&self) -> Vec<PitchClass> {
        self.quality
            .intervals()
            .iter()
            .map(|&(semitones, letters)| spell_interval(self.root, semitones, letters, self.prefer_flat))
            .collect()
    }

    pub fn is_tonic(&self) -> bool {
        self.degree == Some(1)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
