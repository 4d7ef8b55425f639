//! MIDI note name utilities.
//!
//! Note names are a letter `A`-`G`, an optional `#` (no flat spellings), and a
//! signed octave number. Octave -2 starts at note 0, so `C-2` is 0, `C3` is 60
//! and `C4` is 72.

use crate::error::{Error, Result};

/// Pitch class names, indexed by semitone above C.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Highest valid MIDI note number.
pub const MAX_NOTE: u8 = 127;

/// For a note name such as "C3" or "A#4", return the MIDI note number.
pub fn note_name_to_number(name: &str) -> Result<u8> {
    let invalid = || Error::InvalidNote(name.to_string());

    let (pitch, octave) = if name.get(1..2) == Some("#") {
        (name.get(..2).ok_or_else(invalid)?, &name[2..])
    } else {
        (name.get(..1).ok_or_else(invalid)?, name.get(1..).ok_or_else(invalid)?)
    };

    let pitch_class = NOTE_NAMES
        .iter()
        .position(|n| *n == pitch)
        .ok_or_else(invalid)? as i32;
    let octave: i32 = octave.parse().map_err(|_| invalid())?;

    let number = (octave + 2) * 12 + pitch_class;
    u8::try_from(number)
        .ok()
        .filter(|n| *n <= MAX_NOTE)
        .ok_or_else(invalid)
}

/// Convert a MIDI note number back to a note name.
pub fn note_name(note: u8) -> String {
    let octave = (note / 12) as i8 - 2;
    let name = NOTE_NAMES[(note % 12) as usize];
    format!("{}{}", name, octave)
}

/// Parse a root note given either as a note name ("C3") or a plain number ("60").
pub fn parse_root_note(text: &str) -> Result<u8> {
    match text.trim().parse::<u8>() {
        Ok(n) if n <= MAX_NOTE => Ok(n),
        Ok(_) => Err(Error::InvalidNote(text.to_string())),
        Err(_) => note_name_to_number(text.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names_to_numbers() {
        assert_eq!(note_name_to_number("C-2").unwrap(), 0);
        assert_eq!(note_name_to_number("C-1").unwrap(), 12);
        assert_eq!(note_name_to_number("C0").unwrap(), 24);
        assert_eq!(note_name_to_number("C1").unwrap(), 36);
        assert_eq!(note_name_to_number("C2").unwrap(), 48);

        // middle C
        assert_eq!(note_name_to_number("C3").unwrap(), 60);
        assert_eq!(note_name_to_number("C#3").unwrap(), 61);
        assert_eq!(note_name_to_number("D3").unwrap(), 62);
        assert_eq!(note_name_to_number("D#3").unwrap(), 63);
        assert_eq!(note_name_to_number("E3").unwrap(), 64);

        assert_eq!(note_name_to_number("A3").unwrap(), 69);
        assert_eq!(note_name_to_number("A#3").unwrap(), 70);
        assert_eq!(note_name_to_number("B3").unwrap(), 71);

        assert_eq!(note_name_to_number("C4").unwrap(), 72);
        assert_eq!(note_name_to_number("C5").unwrap(), 84);
        assert_eq!(note_name_to_number("C6").unwrap(), 96);
        assert_eq!(note_name_to_number("C7").unwrap(), 108);
        assert_eq!(note_name_to_number("G8").unwrap(), 127);
    }

    #[test]
    fn test_formula_holds_for_every_valid_name() {
        for octave in -2..=8 {
            for (idx, pitch) in NOTE_NAMES.iter().enumerate() {
                let expected = (octave + 2) * 12 + idx as i32;
                let result = note_name_to_number(&format!("{}{}", pitch, octave));
                if expected <= 127 {
                    assert_eq!(result.unwrap() as i32, expected);
                } else {
                    assert!(result.is_err());
                }
            }
        }
    }

    #[test]
    fn test_invalid_note_names() {
        for bad in ["", "C", "H3", "Db3", "c3", "C#", "C-3", "C#x", "G#8", "C99"] {
            assert!(
                matches!(note_name_to_number(bad), Err(Error::InvalidNote(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_note_name() {
        assert_eq!(note_name(0), "C-2");
        assert_eq!(note_name(60), "C3");
        assert_eq!(note_name(61), "C#3");
        assert_eq!(note_name(69), "A3");
        assert_eq!(note_name(127), "G8");
        for n in 0..=MAX_NOTE {
            assert_eq!(note_name_to_number(&note_name(n)).unwrap(), n);
        }
    }

    #[test]
    fn test_parse_root_note() {
        assert_eq!(parse_root_note("60").unwrap(), 60);
        assert_eq!(parse_root_note("C3").unwrap(), 60);
        assert_eq!(parse_root_note(" A#3 ").unwrap(), 70);
        assert!(parse_root_note("200").is_err());
        assert!(parse_root_note("X1").is_err());
    }
}
