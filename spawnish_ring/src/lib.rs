// Fixed-width circular bit arrays and the Rule 30 automaton.
//
// This crate is the deterministic core of the spawnish generator: a W-bit
// ring state (`ring::RingState`) with explicitly masked shift, rotate, and
// bitwise operations, plus the Rule 30 transition and trajectory evolution
// built on top of it (`rule30`).
//
// The ring width W is chosen per generation and routinely exceeds native
// register width (the default is 1024 bits), so the state is a hand-rolled
// little-endian `u64` limb array rather than a machine integer. This is a
// deliberate zero-heavy-dependency implementation: every operation masks
// back to exactly W bits, so identical inputs produce identical states on
// every platform.
//
// **Critical constraint: determinism.** `rule30::step` and everything it
// calls must produce identical output given the same state, regardless of
// platform, compiler version, or optimization level. No floating-point
// arithmetic and no source of non-determinism belongs in this crate.

pub mod ring;
pub mod rule30;

pub use ring::RingState;
