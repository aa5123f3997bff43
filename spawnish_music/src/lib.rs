// Spawnish Music Generator
//
// Turns the evolution of a Rule 30 cellular automaton on a wide circular
// bit-array into a deterministic two-track (lead + bass) note arrangement,
// and writes it out as a Standard MIDI File. A textual or integer prompt
// fully determines the output; only promptless generation draws on OS
// entropy, and even then the random source is injected by the caller so
// tests stay reproducible.
//
// Pipeline (data flows strictly forward):
// - seed.rs: prompt -> non-zero W-bit seed state (SHA-256 centering for
//   text, low-bit masking for integers, injected RNG otherwise)
// - spawnish_ring: seed -> trajectory of ring states (Rule 30, burn-in)
// - tap.rs: trajectory -> per-track binary time series (center column for
//   lead, a nearby column for bass)
// - swing.rs: step count + tempo -> per-step wall-clock durations with a
//   long-short swing feel
// - notes.rs: bits + durations + scale -> note events; rests advance time
//   without sounding
// - arrange.rs: validation and orchestration of the two tracks
// - midi.rs: arrangement -> SMF via midly

pub mod arrange;
pub mod midi;
pub mod notes;
pub mod seed;
pub mod swing;
pub mod tap;
