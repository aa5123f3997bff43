// Swing scheduling: step count + tempo -> per-step durations in seconds.
//
// With two steps per beat, consecutive step pairs split a beat unevenly
// (swing of it to the first step, the remainder to the second), giving
// the long-short swung feel. Any other subdivision gets plain equal
// shares. A trailing unpaired step keeps the unswung equal share.

/// Per-step durations in seconds for `n` steps.
///
/// Base case: every step lasts `(60 / bpm) / steps_per_beat`. When
/// `steps_per_beat == 2`, step `2k` gets `swing` of a beat and step
/// `2k + 1` the remaining `1 - swing`; if `n` is odd, the final step
/// stays at the equal share.
pub fn swing_durations(n: usize, steps_per_beat: u32, swing: f64, bpm: f64) -> Vec<f64> {
    let sec_per_beat = 60.0 / bpm;
    let mut durs = vec![sec_per_beat / steps_per_beat as f64; n];
    if steps_per_beat == 2 {
        for pair in durs.chunks_exact_mut(2) {
            pair[0] = swing * sec_per_beat;
            pair[1] = (1.0 - swing) * sec_per_beat;
        }
    }
    durs
}
