// Rule 30 transition on a circular ring, as a whole-state computation.
//
// Each cell's next value is left XOR (self OR right), with left/right
// neighbors wrapping across the ring. Rather than looping over cells, the
// step rotates the whole state by one bit in each direction and combines
// the three W-bit values bitwise, which keeps the cost at a handful of
// limb passes regardless of width.
//
// Evolution supports a burn-in: extra leading steps are computed and
// discarded so a generation can start mid-pattern while remaining fully
// deterministic from the same seed. Intermediate all-zero states are
// legitimate trajectory entries; only the initial seed is degeneracy-
// corrected, and that happens upstream in the seed deriver.

use crate::ring::RingState;

/// Apply one Rule 30 step: `rotl1(s) XOR (s OR rotr1(s))`.
///
/// `rotl1(s)` places each cell's left neighbor at that cell's position,
/// and `rotr1(s)` its right neighbor, so the bitwise combination computes
/// every cell's transition at once.
pub fn step(state: &RingState) -> RingState {
    let left = state.rotate_left_1();
    let right = state.rotate_right_1();
    left.xor(&state.or(&right))
}

/// Evolve `seed` for `burn_in + steps` transitions and return the last
/// `steps` states, oldest first.
///
/// Entry `i` of the result is the state after `burn_in + i + 1`
/// applications of [`step`]. `steps == 0` yields an empty trajectory.
pub fn evolve(seed: &RingState, steps: usize, burn_in: usize) -> Vec<RingState> {
    let mut out = Vec::with_capacity(steps);
    let mut s = seed.clone();
    for i in 0..burn_in + steps {
        s = step(&s);
        if i >= burn_in {
            out.push(s.clone());
        }
    }
    out
}
