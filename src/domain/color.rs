use serde::Serialize;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Builds a color from channel intensities in the unit range, values outside [0, 1] are clamped.
    pub fn from_unit(red: f64, green: f64, blue: f64) -> Rgb {
        Rgb(unit_to_channel(red), unit_to_channel(green), unit_to_channel(blue))
    }

    /// Converts HSV to RGB. The hue is in degrees and wraps around, saturation and value are in [0, 1].
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Rgb {
        let saturation = saturation.clamp(0.0, 1.0);
        let value = value.clamp(0.0, 1.0);

        let sector = hue.rem_euclid(360.0) / 60.0;
        let chroma = value * saturation;
        let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
        let m = value - chroma;

        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Rgb::from_unit(r + m, g + m, b + m)
    }

    /// Approximates the color of a black body radiator at the given temperature.
    /// See https://tannerhelland.com/2012/09/18/convert-temperature-rgb-algorithm-code.html.
    pub fn from_kelvin(kelvin: u32) -> Rgb {
        let temperature = kelvin as f64 / 100.0;

        let red = if temperature <= 66.0 {
            255.0
        } else {
            329.698727446 * (temperature - 60.0).powf(-0.1332047592)
        };

        let green = if temperature <= 66.0 {
            99.4708025861 * temperature.ln() - 161.1195681661
        } else {
            288.1221695283 * (temperature - 60.0).powf(-0.0755148492)
        };

        let blue = if temperature >= 66.0 {
            255.0
        } else if temperature <= 19.0 {
            0.0
        } else {
            138.5177312231 * (temperature - 10.0).ln() - 305.0447927307
        };

        Rgb::from_unit(red / 255.0, green / 255.0, blue / 255.0)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(color: Rgb) -> Self {
        (color.0, color.1, color.2)
    }
}

fn unit_to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    mod from_hsv {
        use super::*;
        use pretty_assertions::assert_eq;

        #[rstest]
        #[case::red(0.0, Rgb(255, 0, 0))]
        #[case::green(120.0, Rgb(0, 255, 0))]
        #[case::blue(240.0, Rgb(0, 0, 255))]
        #[case::yellow(60.0, Rgb(255, 255, 0))]
        #[case::wraps_around(360.0, Rgb(255, 0, 0))]
        #[case::negative_hue(-120.0, Rgb(0, 0, 255))]
        fn converts_fully_saturated_hues(#[case] hue: f64, #[case] expected: Rgb) {
            assert_eq!(Rgb::from_hsv(hue, 1.0, 1.0), expected);
        }

        #[test]
        fn zero_saturation_is_grey() {
            assert_eq!(Rgb::from_hsv(200.0, 0.0, 0.5), Rgb(128, 128, 128));
        }
    }

    mod from_kelvin {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn daylight_is_white() {
            assert_eq!(Rgb::from_kelvin(6600), Rgb::WHITE);
        }

        #[test]
        fn candle_light_is_warm() {
            let Rgb(r, g, b) = Rgb::from_kelvin(2000);

            assert_eq!(r, 255);
            assert!((100..170).contains(&g), "green was {}", g);
            assert!(b < 50, "blue was {}", b);
        }

        #[test]
        fn overcast_sky_is_cool() {
            let Rgb(r, _, b) = Rgb::from_kelvin(10_000);

            assert_eq!(b, 255);
            assert!(r < 220, "red was {}", r);
        }
    }

    #[test]
    fn from_unit_clamps_out_of_range_values() {
        assert_eq!(Rgb::from_unit(1.5, -0.2, f64::NAN), Rgb(255, 0, 0));
    }

    #[test]
    fn to_hex() {
        assert_eq!(Rgb(255, 0, 255).to_hex(), "#ff00ff");
        assert_eq!(Rgb(50, 100, 150).to_hex(), "#326496");
    }
}
