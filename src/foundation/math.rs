/// Small deterministic generator (SplitMix64) for layout-time jitter.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the wall clock, for unseeded (production) layouts.
    pub(crate) fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(nanos ^ u64::from(std::process::id()).rotate_left(32))
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform sample in `[lo, hi)`.
    pub(crate) fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }
}

/// Number of whole `period` jumps needed to bring `overshoot` back to `<= 0`.
///
/// Returns 0 for non-positive overshoot or a degenerate period.
pub(crate) fn periods_to_cover(overshoot: f64, period: f64) -> f64 {
    if overshoot <= 0.0 || period <= 0.0 || !overshoot.is_finite() {
        return 0.0;
    }
    (overshoot / period).ceil()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
