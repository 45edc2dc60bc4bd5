pub mod app_config;
pub mod audio;
pub mod config_loader;
pub mod device;
pub mod domain;
pub mod extensions;
pub mod light_handle;
pub mod pipeline;
pub mod store;
pub mod store_listener;
