/// A trait to convert 8-bit device levels from and to percentages.
pub trait PercentConversions {
    /// Returns the value in percent by treating `self` as a level in [0, 255].
    fn level_to_percent(self) -> Self;

    /// Returns the level in [0, 255] by treating `self` as a percentage, values above 100 are clamped.
    fn percent_to_level(self) -> Self;
}

impl PercentConversions for u8 {
    fn level_to_percent(self) -> u8 {
        ((self as u16 * 100) / u8::MAX as u16) as u8
    }

    fn percent_to_level(self) -> u8 {
        ((self.min(100) as u16 * u8::MAX as u16) / 100) as u8
    }
}
