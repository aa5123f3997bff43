// MIDI serialization for finished arrangements.
//
// Converts an `Arrangement` into a Standard MIDI File (SMF Format 1):
// one tempo meta track, then one track per instrument. Note events carry
// wall-clock seconds; they are mapped onto a 960-tick-per-quarter grid
// using the arrangement's tempo, so a MIDI player at that tempo
// reproduces the scheduled timing.
//
// Uses the `midly` crate for MIDI writing. Write failures surface to the
// caller unmodified; nothing is retried.

use crate::arrange::{Arrangement, Track as ArrangementTrack};
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 960;

/// Write an arrangement to a MIDI file.
pub fn write_midi(arr: &Arrangement, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let smf = arrangement_to_smf(arr);
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert an arrangement to an in-memory SMF.
pub fn arrangement_to_smf(arr: &Arrangement) -> Smf<'_> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track.
    let tempo_microseconds = (60_000_000.0 / arr.bpm).round() as u32;
    let mut tempo_track: Track<'_> = Vec::new();
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(tempo_track);

    smf.tracks
        .push(note_track(&arr.lead, u4::new(0), arr.bpm));
    smf.tracks
        .push(note_track(&arr.bass, u4::new(1), arr.bpm));

    smf
}

/// Seconds -> ticks at the arrangement tempo.
fn seconds_to_ticks(seconds: f64, bpm: f64) -> u32 {
    (seconds * bpm / 60.0 * TICKS_PER_QUARTER as f64).round() as u32
}

/// Build one delta-encoded MIDI track from an arrangement track.
fn note_track(track: &ArrangementTrack, channel: u4, bpm: f64) -> Track<'_> {
    let mut out: Track<'_> = Vec::new();
    out.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::TrackName(track.name.as_bytes())),
    });
    out.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(track.program),
            },
        },
    });

    // (tick, order, is_on, pitch, velocity); order puts note-offs before
    // note-ons sharing a tick, so back-to-back repeats of the same pitch
    // don't cancel each other.
    let mut events: Vec<(u32, u8, bool, u8, u8)> = Vec::with_capacity(track.notes.len() * 2);
    for note in &track.notes {
        events.push((seconds_to_ticks(note.start, bpm), 1, true, note.pitch, note.velocity));
        events.push((seconds_to_ticks(note.end, bpm), 0, false, note.pitch, 0));
    }
    events.sort_by_key(|&(tick, order, ..)| (tick, order));

    let mut last_tick = 0u32;
    for (tick, _, is_on, pitch, velocity) in events {
        let delta = tick - last_tick;
        last_tick = tick;
        let message = if is_on {
            MidiMessage::NoteOn {
                key: u7::new(pitch),
                vel: u7::new(velocity),
            }
        } else {
            MidiMessage::NoteOff {
                key: u7::new(pitch),
                vel: u7::new(0),
            }
        };
        out.push(TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi { channel, message },
        });
    }

    out.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    out
}
