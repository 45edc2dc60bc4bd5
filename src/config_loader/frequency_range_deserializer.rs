use crate::config_loader::normalize_name;
use crate::domain::FrequencyRange;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for FrequencyRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawFrequencyRange {
            Index(u8),
            Name(String),
        }

        match RawFrequencyRange::deserialize(deserializer)? {
            RawFrequencyRange::Index(index) => FrequencyRange::try_from(index).map_err(Error::custom),
            RawFrequencyRange::Name(name) => match normalize_name(&name).as_str() {
                "bass" => Ok(FrequencyRange::Bass),
                "mid" => Ok(FrequencyRange::Mid),
                "high" => Ok(FrequencyRange::High),
                "full" => Ok(FrequencyRange::Full),
                _ => Err(Error::custom(format!("unknown frequency range '{}'", name))),
            },
        }
    }
}
