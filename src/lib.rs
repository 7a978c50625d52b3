#![doc = r#"
Standard MIDI File decoding and note reconstruction.

`midinotes` reads a Standard MIDI File (SMF) into a set of tracks, each
holding the raw delta-timed event stream and the discrete notes
reconstructed from it.

# Example
```rust
use midinotes::prelude::*;

let bytes = [
    // header
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    // track
    b'M', b'T', b'r', b'k', 0, 0, 0, 12,
    0x00, 0x90, 60, 80, // note on
    0x60, 0x80, 60, 0, // note off, 96 ticks later
    0x00, 0xFF, 0x2F, 0x00, // end of track
];

let file = MidiFile::parse(&bytes[..]).unwrap();
let track = &file.tracks()[0];

assert_eq!(
    track.notes(),
    &[Note {
        key: 60,
        velocity: 80,
        start_tick: 0,
        duration_ticks: 96
    }]
);
```
"#]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

mod diagnostic;
pub use diagnostic::*;

mod pitch;
pub use pitch::*;

pub mod file;
pub mod notes;
pub mod reader;

#[doc = r#"
Common re-exports
"#]
pub mod prelude {
    pub use crate::{
        diagnostic::*,
        error::*,
        file::{
            EventKind, FormatType, MetaEvent, MetaType, MidiFile, ParseOptions, RawEvent,
            RawHeader, SmpteFps, SmpteOffset, Tempo, Ticked, Timing, Track,
        },
        notes::{Note, NoteTracker},
        pitch::*,
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
    };
}
