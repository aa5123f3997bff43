// Arrangement assembly: configuration, validation, and the full pipeline.
//
// `generate` runs the whole chain for one request: derive the seed,
// evolve the ring, tap two columns, post-process the bit series, and map
// both tracks against a shared swing schedule. Configuration problems
// fail fast here, before any evolution work is spent; everything past
// validation is infallible.
//
// Two degenerate shapes are recovered silently rather than surfaced: an
// all-zero seed (fixed in the seed deriver) and an all-rest track, whose
// first step is forced audible so every generated piece makes a sound on
// both tracks.

use crate::notes::{DEFAULT_SCALE, NoteEvent, notes_from_bits};
use crate::seed::{SeedSpec, derive_seed};
use crate::swing::swing_durations;
use crate::tap::bits_from_tap;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use spawnish_ring::rule30;
use std::fmt;

/// Column offset for the lead track: the exact center of the ring.
const LEAD_TAP: i64 = 0;
/// Column offset for the bass track: a few cells left of center, close
/// enough to stay loosely correlated with the lead.
const BASS_TAP: i64 = -3;
/// Lead register, roughly C3..C5.
const LEAD_WINDOW: (u8, u8) = (48, 72);
/// Bass register, one octave down.
const BASS_WINDOW: (u8, u8) = (36, 55);
/// Volume shared by both tracks.
const TRACK_VOLUME: f64 = 0.8;
/// General MIDI: Acoustic Grand Piano.
const LEAD_PROGRAM: u8 = 0;
/// General MIDI: Acoustic Bass.
const BASS_PROGRAM: u8 = 32;

/// Parameters for one generation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Seed source; identical prompts reproduce the piece exactly.
    pub prompt: SeedSpec,
    /// Number of automaton steps rendered as musical steps.
    pub length_steps: usize,
    /// Ring width in bits.
    pub ring_width: usize,
    /// Tempo in beats per minute.
    pub bpm: f64,
    /// Subdivision of each beat; 2 enables swing.
    pub steps_per_beat: u32,
    /// Fraction of a beat given to the first step of each swung pair.
    pub swing: f64,
    /// MIDI note number the scale is built from.
    pub root: i32,
    /// Leading automaton steps computed and discarded, to start
    /// mid-pattern.
    pub burn_in: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            prompt: SeedSpec::Random,
            length_steps: 1024,
            ring_width: 1024,
            bpm: 112.0,
            steps_per_beat: 2,
            swing: 0.56,
            root: 60,
            burn_in: 0,
        }
    }
}

impl GenerationConfig {
    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ring_width < 2 {
            return Err(ConfigError::InvalidWidth(self.ring_width));
        }
        if self.length_steps == 0 {
            return Err(ConfigError::InvalidStepCount(self.length_steps));
        }
        if self.swing <= 0.0 || self.swing >= 1.0 {
            return Err(ConfigError::InvalidSwingRatio(self.swing));
        }
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(ConfigError::InvalidTempo(self.bpm));
        }
        if self.steps_per_beat == 0 {
            return Err(ConfigError::InvalidStepsPerBeat);
        }
        Ok(())
    }
}

/// A malformed generation request, rejected before any evolution runs.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Ring width below the 2-bit minimum rotation needs.
    InvalidWidth(usize),
    /// Zero-length output requested.
    InvalidStepCount(usize),
    /// Swing ratio outside the open interval (0, 1).
    InvalidSwingRatio(f64),
    /// Tempo not a positive finite number.
    InvalidTempo(f64),
    /// Beat subdivision of zero.
    InvalidStepsPerBeat,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWidth(w) => {
                write!(f, "ring width must be at least 2, got {w}")
            }
            ConfigError::InvalidStepCount(n) => {
                write!(f, "length_steps must be positive, got {n}")
            }
            ConfigError::InvalidSwingRatio(r) => {
                write!(f, "swing must be strictly between 0 and 1, got {r}")
            }
            ConfigError::InvalidTempo(bpm) => {
                write!(f, "bpm must be positive and finite, got {bpm}")
            }
            ConfigError::InvalidStepsPerBeat => {
                write!(f, "steps_per_beat must be positive")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A named, program-tagged sequence of note events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// General MIDI program number.
    pub program: u8,
    pub notes: Vec<NoteEvent>,
}

/// The finished two-track piece.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    pub lead: Track,
    pub bass: Track,
    pub bpm: f64,
    /// Total length in seconds, identical for both tracks.
    pub duration: f64,
}

/// Run the full pipeline for one request.
///
/// The RNG is consulted only when `config.prompt` is [`SeedSpec::Random`];
/// with a text or integer prompt the output is a pure function of the
/// configuration.
pub fn generate<R: RngCore>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Arrangement, ConfigError> {
    config.validate()?;

    let seed = derive_seed(&config.prompt, config.ring_width, rng);
    let states = rule30::evolve(&seed, config.length_steps, config.burn_in);

    let mut lead_bits = bits_from_tap(&states, LEAD_TAP);
    let mut bass_bits = bits_from_tap(&states, BASS_TAP);
    let len = config
        .length_steps
        .min(lead_bits.len())
        .min(bass_bits.len());
    lead_bits.truncate(len);
    bass_bits.truncate(len);

    ensure_audible(&mut lead_bits);
    ensure_audible(&mut bass_bits);
    // Bass only sounds on strong beats, whatever the raw column says.
    keep_on_beats(&mut bass_bits, config.steps_per_beat);

    let durations = swing_durations(len, config.steps_per_beat, config.swing, config.bpm);
    let (lead_notes, duration) = notes_from_bits(
        &lead_bits,
        &durations,
        &DEFAULT_SCALE,
        config.root,
        LEAD_WINDOW,
        TRACK_VOLUME,
    );
    let (bass_notes, _) = notes_from_bits(
        &bass_bits,
        &durations,
        &DEFAULT_SCALE,
        config.root - 12,
        BASS_WINDOW,
        TRACK_VOLUME,
    );

    Ok(Arrangement {
        lead: Track {
            name: "Lead".to_string(),
            program: LEAD_PROGRAM,
            notes: lead_notes,
        },
        bass: Track {
            name: "Bass".to_string(),
            program: BASS_PROGRAM,
            notes: bass_notes,
        },
        bpm: config.bpm,
        duration,
    })
}

/// Force the first step audible if the whole series is rests.
fn ensure_audible(bits: &mut [bool]) {
    if !bits.is_empty() && !bits.iter().any(|&b| b) {
        bits[0] = true;
    }
}

/// Clear every bit not aligned to a beat boundary.
fn keep_on_beats(bits: &mut [bool], steps_per_beat: u32) {
    for (i, bit) in bits.iter_mut().enumerate() {
        if i % steps_per_beat as usize != 0 {
            *bit = false;
        }
    }
}
