/// Lookup table mapping 8-bit luminance [0..255] → normalized intensity.
///
/// Pre-computed once per run for O(1) per-pixel cost: `out = (v / 255)^gamma`.
///
/// # Example
/// ```
/// use sf_core::gamma::GammaLut;
/// let lut = GammaLut::new(2.0);
/// assert_eq!(lut.map(0), 0.0);
/// assert_eq!(lut.map(255), 1.0);
/// assert!(lut.map(128) < 128.0 / 255.0);
/// ```
pub struct GammaLut {
    lut: [f32; 256],
}

impl GammaLut {
    /// Build the table. Non-finite or non-positive exponents yield identity.
    #[must_use]
    pub fn new(gamma: f32) -> Self {
        let gamma = if gamma.is_finite() && gamma > 0.0 {
            gamma
        } else {
            1.0
        };
        let mut lut = [0.0f32; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            let v = (i as f32 / 255.0).powf(gamma);
            *slot = v.clamp(0.0, 1.0);
        }
        // powf peut dériver d'un ulp aux bornes
        lut[0] = 0.0;
        lut[255] = 1.0;
        Self { lut }
    }

    /// Identity table (gamma = 1).
    #[must_use]
    pub fn identity() -> Self {
        Self::new(1.0)
    }

    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> f32 {
        self.lut[luminance as usize]
    }
}
