use core::fmt;

use crate::ParseError;

#[doc = r#"
A MIDI key number interpreted as a pitch class and octave.

Keys are 7-bit numbers. Key `0` is `C(-1)`, and key `127` is `G9`.

# Example
```rust
# use midinotes::prelude::*;
let pitch = Pitch::from_key(63).unwrap();

assert_eq!(pitch.class(), PitchClass::DSharp);
assert_eq!(pitch.octave(), Octave::new(4));
assert_eq!(pitch.to_string(), "D#/Eb:4");
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch(u8);

impl Pitch {
    /// Create a pitch from a key byte.
    ///
    /// # Errors
    /// if the byte is > 127
    pub const fn from_key(key: u8) -> Result<Self, ParseError> {
        if key > 127 {
            return Err(ParseError::KeyOutOfRange(key));
        }
        Ok(Self(key))
    }

    /// Returns the underlying key number
    #[inline]
    pub const fn key(&self) -> u8 {
        self.0
    }

    /// Identifies the pitch class of the key
    #[inline]
    pub const fn class(&self) -> PitchClass {
        PitchClass::from_mod_12(self.0 % 12)
    }

    /// Identifies the octave of the key
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave((self.0 / 12) as i8 - 1)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.class(), self.octave())
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[doc = r#"
One of the twelve pitch classes of the chromatic scale
"#]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    const fn from_mod_12(value: u8) -> Self {
        use PitchClass::*;
        match value {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    /// Returns true for the five black keys
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use PitchClass::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PitchClass::*;
        let name = match self {
            C => "C",
            CSharp => "C#/Db",
            D => "D",
            DSharp => "D#/Eb",
            E => "E",
            F => "F",
            FSharp => "F#/Gb",
            G => "G",
            GSharp => "G#/Ab",
            A => "A",
            ASharp => "A#/Bb",
            B => "B",
        };
        f.write_str(name)
    }
}

/// The octave of a key. Values range from -1 to 9.
#[derive(PartialEq, Eq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octave(i8);

impl Octave {
    /// Should be a value between [-1, 9]. Clamps between these two values.
    pub const fn new(octave: i8) -> Self {
        if octave < -1 {
            Self(-1)
        } else if octave > 9 {
            Self(9)
        } else {
            Self(octave)
        }
    }

    /// The octave, from `[-1,9]`
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[test]
fn pitch_class_and_octave() {
    use pretty_assertions::assert_eq;
    let c = Pitch::from_key(12).unwrap();
    assert_eq!(c.class(), PitchClass::C);
    assert_eq!(c.octave().value(), 0);

    let a_sharp = Pitch::from_key(94).unwrap();
    assert_eq!(a_sharp.class(), PitchClass::ASharp);
    assert_eq!(a_sharp.octave().value(), 6);

    let lowest = Pitch::from_key(0).unwrap();
    assert_eq!(lowest.octave(), Octave::new(-1));
    let highest = Pitch::from_key(127).unwrap();
    assert_eq!(highest.class(), PitchClass::G);
    assert_eq!(highest.octave(), Octave::new(9));
}

#[test]
fn key_out_of_range() {
    assert_eq!(Pitch::from_key(128), Err(ParseError::KeyOutOfRange(128)));
}
