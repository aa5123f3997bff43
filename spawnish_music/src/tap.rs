// Column taps: sample one ring column across a trajectory.
//
// A tap is a fixed bit position read from every state in sequence,
// yielding a binary time series. Offsets are relative to the ring's
// center column and may be negative; the index wraps modulo the width.
// The lead track taps the exact center, the bass a column a few cells
// away — close enough to stay loosely correlated with the lead, far
// enough to not duplicate it.

use spawnish_ring::RingState;

/// Extract the bit at column `(W/2 + tap) mod W` from every state.
///
/// The modulo is Euclidean, so negative taps wrap to the high end of the
/// ring rather than indexing out of range.
pub fn bits_from_tap(states: &[RingState], tap: i64) -> Vec<bool> {
    states
        .iter()
        .map(|s| {
            let w = s.width() as i64;
            let col = (w / 2 + tap).rem_euclid(w) as usize;
            s.bit(col)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_tap_reads_middle_column() {
        // W = 8, center column 4.
        let states = vec![
            RingState::from_u64(0x10, 8), // bit 4 set
            RingState::from_u64(0x08, 8), // bit 3 set
            RingState::from_u64(0x30, 8), // bits 4,5 set
        ];
        assert_eq!(bits_from_tap(&states, 0), vec![true, false, true]);
    }

    #[test]
    fn negative_tap_offsets_left() {
        let states = vec![RingState::from_u64(0b0000_0010, 8)];
        // Center 4, tap -3 -> column 1.
        assert_eq!(bits_from_tap(&states, -3), vec![true]);
    }

    #[test]
    fn negative_tap_wraps_around() {
        // W = 4, center 2, tap -3 -> column (2 - 3).rem_euclid(4) = 3.
        let states = vec![RingState::from_u64(0b1000, 4)];
        assert_eq!(bits_from_tap(&states, -3), vec![true]);
    }

    #[test]
    fn empty_trajectory_gives_empty_series() {
        assert!(bits_from_tap(&[], 0).is_empty());
    }
}
