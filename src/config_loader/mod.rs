mod frequency_range_deserializer;
mod visualisation_mode_deserializer;
mod visualizer_config_request;

pub use visualizer_config_request::VisualizerConfigRequest;

/// Normalizes enum names so that `FrequencyColor`, `frequency_color` and `frequency-color` are treated alike.
fn normalize_name(name: &str) -> String {
    name.chars().filter(|c| *c != '_' && *c != '-').flat_map(char::to_lowercase).collect()
}
