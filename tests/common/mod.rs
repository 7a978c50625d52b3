#![allow(dead_code)]

/// Encodes a variable length quantity
pub fn vlq(mut value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        bytes.push(((value & 0x7F) as u8) | 0x80);
        value >>= 7;
    }
    bytes.reverse();
    bytes
}

/// Builds the bytes of a track chunk body event by event
#[derive(Default, Clone)]
pub struct TrackBytes {
    body: Vec<u8>,
}

impl TrackBytes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any event: a delta followed by raw bytes
    pub fn event(mut self, delta: u32, bytes: &[u8]) -> Self {
        self.body.extend(vlq(delta));
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn note_on(self, delta: u32, channel: u8, key: u8, velocity: u8) -> Self {
        self.event(delta, &[0x90 | channel, key, velocity])
    }

    pub fn note_off(self, delta: u32, channel: u8, key: u8) -> Self {
        self.event(delta, &[0x80 | channel, key, 0x40])
    }

    pub fn meta(self, delta: u32, meta_type: u8, payload: &[u8]) -> Self {
        let mut bytes = vec![0xFF, meta_type];
        bytes.extend(vlq(payload.len() as u32));
        bytes.extend_from_slice(payload);
        self.event(delta, &bytes)
    }

    pub fn tempo(self, delta: u32, micros_per_quarter: u32) -> Self {
        let [_, a, b, c] = micros_per_quarter.to_be_bytes();
        self.meta(delta, 0x51, &[a, b, c])
    }

    pub fn end_of_track(self, delta: u32) -> Self {
        self.meta(delta, 0x2F, &[])
    }

    /// The `MTrk` chunk with a correct length
    pub fn chunk(&self) -> Vec<u8> {
        let mut bytes = b"MTrk".to_vec();
        bytes.extend_from_slice(&(self.body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

pub fn header(format: u16, tracks: u16, division: u16) -> Vec<u8> {
    let mut bytes = b"MThd".to_vec();
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&format.to_be_bytes());
    bytes.extend_from_slice(&tracks.to_be_bytes());
    bytes.extend_from_slice(&division.to_be_bytes());
    bytes
}

/// A complete format 1 file at 96 ticks per quarter note
pub fn file(tracks: &[TrackBytes]) -> Vec<u8> {
    let mut bytes = header(1, tracks.len() as u16, 96);
    for track in tracks {
        bytes.extend(track.chunk());
    }
    bytes
}
