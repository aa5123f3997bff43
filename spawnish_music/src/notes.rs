// Note mapping: binary series + duration schedule -> timed note events.
//
// Each step consumes its scheduled duration whether or not it sounds: a
// set bit emits a note covering the step, a clear bit is silence. The
// time cursor advances identically either way, so the total length of a
// piece depends only on the schedule, never on note density.
//
// Pitch follows the scale cyclically from the root and is clamped into a
// per-track window (no octave wrapping), which keeps each track inside
// its instrument's comfortable register.

use serde::{Deserialize, Serialize};

/// Scale used by both tracks: minor with extensions, spanning the octave
/// below the root up to a fourth above it.
pub const DEFAULT_SCALE: [i32; 8] = [-12, -9, -7, -5, -2, 0, 2, 5];

/// One sounding note. `start`/`end` are wall-clock seconds from the
/// beginning of the arrangement; `end` is always strictly after `start`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI-style note number.
    pub pitch: u8,
    /// MIDI velocity, 0-127.
    pub velocity: u8,
    pub start: f64,
    pub end: f64,
}

/// Map a binary series onto note events, returning the events plus the
/// total elapsed time.
///
/// `bits` and `durations` must have equal length and `scale` must be
/// non-empty. Step `i` sounds at `root + scale[i % scale.len()]`, clamped
/// into the inclusive `pitch_window`. Velocity is `volume * 127`, rounded
/// and clamped to the MIDI range.
pub fn notes_from_bits(
    bits: &[bool],
    durations: &[f64],
    scale: &[i32],
    root: i32,
    pitch_window: (u8, u8),
    volume: f64,
) -> (Vec<NoteEvent>, f64) {
    assert_eq!(bits.len(), durations.len(), "one duration per step");
    assert!(!scale.is_empty(), "scale must have at least one degree");
    let (lo, hi) = pitch_window;
    let velocity = (volume * 127.0).round().clamp(0.0, 127.0) as u8;

    let mut notes = Vec::new();
    let mut cursor = 0.0;
    for (i, (&bit, &dur)) in bits.iter().zip(durations).enumerate() {
        if bit {
            let raw = root + scale[i % scale.len()];
            let pitch = raw.clamp(lo as i32, hi as i32) as u8;
            notes.push(NoteEvent {
                pitch,
                velocity,
                start: cursor,
                end: cursor + dur,
            });
        }
        cursor += dur;
    }
    (notes, cursor)
}
