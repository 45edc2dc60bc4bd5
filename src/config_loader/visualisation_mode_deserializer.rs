use crate::config_loader::normalize_name;
use crate::domain::VisualisationMode;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for VisualisationMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawVisualisationMode {
            Index(u8),
            Name(String),
        }

        match RawVisualisationMode::deserialize(deserializer)? {
            RawVisualisationMode::Index(index) => VisualisationMode::try_from(index).map_err(Error::custom),
            RawVisualisationMode::Name(name) => match normalize_name(&name).as_str() {
                "frequencycolor" => Ok(VisualisationMode::FrequencyColor),
                "energybrightness" => Ok(VisualisationMode::EnergyBrightness),
                "beateffects" => Ok(VisualisationMode::BeatEffects),
                "spectralflow" => Ok(VisualisationMode::SpectralFlow),
                "enhancedfrequencycolor" => Ok(VisualisationMode::EnhancedFrequencyColor),
                "bpmsync" => Ok(VisualisationMode::BpmSync),
                _ => Err(Error::custom(format!("unknown visualisation mode '{}'", name))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::name(r#""SpectralFlow""#, Ok(VisualisationMode::SpectralFlow))]
    #[case::snake_case_name(r#""enhanced_frequency_color""#, Ok(VisualisationMode::EnhancedFrequencyColor))]
    #[case::index("0", Ok(VisualisationMode::FrequencyColor))]
    #[case::last_index("5", Ok(VisualisationMode::BpmSync))]
    #[case::unknown_index("6", Err(Error::custom("unknown visualisation mode 6")))]
    #[case::unknown_name(r#""Strobe""#, Err(Error::custom("unknown visualisation mode 'Strobe'")))]
    fn deserializes_visualisation_modes(#[case] json: &str, #[case] expected: serde_json::Result<VisualisationMode>) {
        let response = serde_json::from_str::<VisualisationMode>(json);

        // As serde_json::Error does not implement PartialEq, use debug print for comparison
        assert_eq!(format!("{:#?}", response), format!("{:#?}", expected));
    }
}
