pub mod initializer;
pub mod sink;

pub use initializer::{DeviceInitializer, DeviceManager, InitError, SimulatedDevice};
pub use sink::{DeviceSink, LoggingSink, SinkError};
