//! Color bands for the gauge fill

/// Temperature band used to tint the thermometer fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorBand {
    /// Below 10 °C
    Cold,
    /// 10 °C up to 20 °C
    Cool,
    /// 20 °C up to 30 °C
    Warm,
    /// 30 °C and above
    Hot,
}

impl ColorBand {
    /// Pick the band for a Celsius value
    pub fn classify(celsius: f32) -> Self {
        if celsius < 10.0 {
            ColorBand::Cold
        } else if celsius < 20.0 {
            ColorBand::Cool
        } else if celsius < 30.0 {
            ColorBand::Warm
        } else {
            ColorBand::Hot
        }
    }

    /// Base fill color as RGB
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            ColorBand::Cold => [0, 0, 200],
            ColorBand::Cool => [0, 200, 200],
            ColorBand::Warm => [200, 120, 0],
            ColorBand::Hot => [200, 0, 0],
        }
    }

    /// Returns a human-readable name for the band
    pub fn name(&self) -> &'static str {
        match self {
            ColorBand::Cold => "Cold",
            ColorBand::Cool => "Cool",
            ColorBand::Warm => "Warm",
            ColorBand::Hot => "Hot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColorBand;
    use proptest::prelude::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(ColorBand::classify(0.0), ColorBand::Cold);
        assert_eq!(ColorBand::classify(9.875), ColorBand::Cold);
        assert_eq!(ColorBand::classify(10.0), ColorBand::Cool);
        assert_eq!(ColorBand::classify(19.875), ColorBand::Cool);
        assert_eq!(ColorBand::classify(20.0), ColorBand::Warm);
        assert_eq!(ColorBand::classify(29.875), ColorBand::Warm);
        assert_eq!(ColorBand::classify(30.0), ColorBand::Hot);
        assert_eq!(ColorBand::classify(8191.875), ColorBand::Hot);
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(ColorBand::Cold.rgb(), [0, 0, 200]);
        assert_eq!(ColorBand::Cool.rgb(), [0, 200, 200]);
        assert_eq!(ColorBand::Warm.rgb(), [200, 120, 0]);
        assert_eq!(ColorBand::Hot.rgb(), [200, 0, 0]);
    }

    fn rank(band: ColorBand) -> u8 {
        match band {
            ColorBand::Cold => 0,
            ColorBand::Cool => 1,
            ColorBand::Warm => 2,
            ColorBand::Hot => 3,
        }
    }

    proptest! {
        #[test]
        fn bands_are_monotonic(a in 0.0f32..100.0, b in 0.0f32..100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(ColorBand::classify(lo)) <= rank(ColorBand::classify(hi)));
        }
    }
}
