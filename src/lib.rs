pub mod actuator;
pub mod bus;
pub mod config;
pub mod error;
pub mod journal;
pub mod plugin;
pub mod sdg;
pub mod types;

pub use actuator::{Actuator, SettingValue, StatusChannel, StatusEvent};
pub use bus::{MockBus, ScpiBus, TcpBus};
pub use config::{ActuatorSettings, AppConfig, ConnectionSettings};
pub use error::SdgError;
pub use journal::Journal;
pub use plugin::SdgActuator;
pub use sdg::SdgClient;
pub use types::{Axis, Channel, Load, Switch, TriggerSource, WaveType};
