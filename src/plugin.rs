//! The Siglent SDG exposed as a host-framework actuator.
//!
//! Maps the generic actuator callbacks onto [`SdgClient`] accessors, with the
//! currently selected [`Axis`] deciding whether moves act on amplitude or
//! phase. Holds the user-facing concerns the device client knows nothing
//! about: travel bounds, linear scaling, and status notifications.

use log::warn;

use crate::actuator::{Actuator, SettingValue, StatusChannel};
use crate::bus::TcpBus;
use crate::config::{ActuatorSettings, AppConfig, ConnectionSettings};
use crate::error::SdgError;
use crate::sdg::SdgClient;
use crate::types::{Axis, Switch};
use std::time::Duration;

/// Actuator adapter for one SDG output channel.
///
/// # Examples
///
/// ```no_run
/// use siglent_sdg::{Actuator, AppConfig, SdgActuator};
///
/// let mut actuator = SdgActuator::new(AppConfig::default());
/// let info = actuator.initialize()?;
/// println!("{info}");
///
/// actuator.move_abs(1.5)?;
/// actuator.move_rel(-0.25)?;
/// actuator.stop_motion()?;
/// # Ok::<(), siglent_sdg::SdgError>(())
/// ```
pub struct SdgActuator {
    client: Option<SdgClient>,
    connection: ConnectionSettings,
    settings: ActuatorSettings,
    status: StatusChannel,
}

impl SdgActuator {
    /// Create an actuator that will open its own connection on
    /// [`Actuator::initialize`].
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: None,
            connection: config.connection,
            settings: config.actuator,
            status: StatusChannel::disconnected(),
        }
    }

    /// Wrap an already-connected client. This is the slave-style
    /// construction for sharing a controller, and the seam tests use to
    /// inject a client on a recording bus.
    pub fn with_client(mut client: SdgClient, settings: ActuatorSettings) -> Self {
        client.set_axis(settings.axis);
        Self {
            client: Some(client),
            connection: ConnectionSettings::default(),
            settings,
            status: StatusChannel::disconnected(),
        }
    }

    /// Route status notifications to the host.
    pub fn set_status_channel(&mut self, status: StatusChannel) {
        self.status = status;
    }

    pub fn epsilon(&self) -> f64 {
        self.settings.epsilon
    }

    fn client(&mut self) -> Result<&mut SdgClient, SdgError> {
        self.client.as_mut().ok_or(SdgError::NotConnected)
    }

    /// Clamp a user-unit target to the configured bounds.
    fn check_bound(&self, value: f64) -> f64 {
        let bounds = &self.settings.bounds;
        if !bounds.enabled {
            return value;
        }
        let clamped = value.clamp(bounds.min, bounds.max);
        if clamped != value {
            warn!(
                "target {value} outside bounds [{}, {}], clamped to {clamped}",
                bounds.min, bounds.max
            );
        }
        clamped
    }

    fn scale_from_device(&self, value: f64) -> f64 {
        let s = &self.settings.scaling;
        if s.use_scaling {
            value * s.scaling + s.offset
        } else {
            value
        }
    }

    fn scale_to_device(&self, value: f64) -> f64 {
        let s = &self.settings.scaling;
        if s.use_scaling {
            (value - s.offset) / s.scaling
        } else {
            value
        }
    }

    fn scale_rel_to_device(&self, delta: f64) -> f64 {
        let s = &self.settings.scaling;
        if s.use_scaling {
            delta / s.scaling
        } else {
            delta
        }
    }
}

impl Actuator for SdgActuator {
    fn initialize(&mut self) -> Result<String, SdgError> {
        let bus = TcpBus::builder()
            .host(&self.connection.host)
            .port(self.connection.port)
            .connect_timeout(Duration::from_millis(self.connection.connect_timeout_ms))
            .write_timeout(Duration::from_millis(self.connection.write_timeout_ms))
            .connect()?;

        let mut client = SdgClient::new(Box::new(bus))?;
        client.set_axis(self.settings.axis);
        let channel = client.channel();
        self.client = Some(client);

        let info = format!(
            "SDG at {}:{} initialized, channel {channel} set to defaults",
            self.connection.host, self.connection.port
        );
        self.status.emit(info.clone());
        Ok(info)
    }

    fn close(&mut self) -> Result<(), SdgError> {
        // Dropping the client closes the underlying socket.
        self.client = None;
        Ok(())
    }

    fn actuator_value(&mut self) -> Result<f64, SdgError> {
        let device = self.client()?.get_pos();
        Ok(self.scale_from_device(device))
    }

    fn move_abs(&mut self, value: f64) -> Result<(), SdgError> {
        let target = self.check_bound(value);
        let device = self.scale_to_device(target);
        self.client()?.set_pos(device)?;
        self.status.emit("position updated");
        Ok(())
    }

    fn move_rel(&mut self, delta: f64) -> Result<(), SdgError> {
        let current = self.actuator_value()?;
        let target = self.check_bound(current + delta);
        let device_delta = self.scale_rel_to_device(target - current);
        self.client()?.set_rel_pos(device_delta)?;
        self.status.emit("position updated");
        Ok(())
    }

    fn move_home(&mut self) -> Result<(), SdgError> {
        // Home is device-specific and asymmetric: 2 V amplitude, 0° phase,
        // whichever axis is selected.
        let client = self.client()?;
        client.set_amplitude(2.0)?;
        client.set_phase(0.0)?;
        self.status.emit("moved home (amp = 2 V, phase = 0°)");
        Ok(())
    }

    fn stop_motion(&mut self) -> Result<(), SdgError> {
        // Writes are synchronous, so there is no in-flight move to abort;
        // forcing the output off is the safe-state equivalent.
        self.client()?.set_output(Switch::Off)?;
        self.status.emit("channel output OFF");
        Ok(())
    }

    fn commit_setting(&mut self, name: &str, value: SettingValue) -> Result<(), SdgError> {
        match name {
            "axis" => {
                let axis: Axis = value.as_str()?.parse()?;
                self.settings.axis = axis;
                self.client()?.set_axis(axis);
            }
            "frequency" => self.client()?.set_frequency(value.as_f64()?)?,
            "offset" => self.client()?.set_offset(value.as_f64()?)?,
            "delay" => self.client()?.set_delay(value.as_f64()?)?,
            "cycles" => {
                let cycles = u32::try_from(value.as_i64()?)
                    .map_err(|_| SdgError::Type(format!("invalid cycle count: {value:?}")))?;
                self.client()?.set_cycles(cycles)?;
            }
            "wavetype" => {
                let wavetype = value.as_str()?.parse()?;
                self.client()?.set_wavetype(wavetype)?;
            }
            "file" => self.client()?.set_arbwave(value.as_str()?)?,
            other => warn!("ignoring change of unknown setting {other:?}"),
        }
        Ok(())
    }

    fn units(&self) -> &str {
        self.settings.axis.units()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::StatusChannel;
    use crate::bus::{CommandLog, MockBus};
    use crate::config::{BoundsSettings, ScalingSettings};
    use crossbeam_channel::unbounded;

    fn actuator_with_log(settings: ActuatorSettings) -> (SdgActuator, CommandLog) {
        let bus = MockBus::new();
        let log = bus.log();
        let client = SdgClient::new(Box::new(bus)).unwrap();
        log.clear();
        (SdgActuator::with_client(client, settings), log)
    }

    fn scaled_settings() -> ActuatorSettings {
        ActuatorSettings {
            scaling: ScalingSettings {
                use_scaling: true,
                scaling: 2.0,
                offset: 1.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn move_abs_on_amplitude_leaves_phase_untouched() {
        let (mut actuator, log) = actuator_with_log(ActuatorSettings::default());

        actuator.move_abs(1.5).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,1.5"]);
        assert_eq!(actuator.actuator_value().unwrap(), 1.5);
    }

    #[test]
    fn move_abs_on_phase_leaves_amplitude_untouched() {
        let settings = ActuatorSettings {
            axis: Axis::Phase,
            ..Default::default()
        };
        let (mut actuator, log) = actuator_with_log(settings);

        actuator.move_abs(90.0).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV PHSE,90"]);
        assert_eq!(actuator.actuator_value().unwrap(), 90.0);
    }

    #[test]
    fn move_abs_applies_inverse_scaling() {
        let (mut actuator, log) = actuator_with_log(scaled_settings());

        // user 5.0 -> device (5 - 1) / 2 = 2
        actuator.move_abs(5.0).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,2"]);
        assert_eq!(actuator.actuator_value().unwrap(), 5.0);
    }

    #[test]
    fn move_abs_clamps_to_bounds() {
        let settings = ActuatorSettings {
            bounds: BoundsSettings {
                enabled: true,
                min: 0.0,
                max: 4.0,
            },
            ..Default::default()
        };
        let (mut actuator, log) = actuator_with_log(settings);

        actuator.move_abs(10.0).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,4"]);
    }

    #[test]
    fn move_rel_clamps_the_resulting_target() {
        let settings = ActuatorSettings {
            bounds: BoundsSettings {
                enabled: true,
                min: 0.0,
                max: 3.5,
            },
            ..Default::default()
        };
        let (mut actuator, log) = actuator_with_log(settings);

        // default amplitude is 3 V; +1 V clamps to 3.5
        actuator.move_rel(1.0).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,3.5"]);
        assert_eq!(actuator.actuator_value().unwrap(), 3.5);
    }

    #[test]
    fn move_rel_applies_relative_scaling() {
        let (mut actuator, log) = actuator_with_log(scaled_settings());

        // device amplitude 3 -> user 7; +2 user -> +1 device
        actuator.move_rel(2.0).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,4"]);
        assert_eq!(actuator.actuator_value().unwrap(), 9.0);
    }

    #[test]
    fn move_home_is_axis_independent() {
        let settings = ActuatorSettings {
            axis: Axis::Phase,
            ..Default::default()
        };
        let (mut actuator, log) = actuator_with_log(settings);

        actuator.move_home().unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,2", "C1:BSWV PHSE,0"]);
    }

    #[test]
    fn stop_forces_output_off() {
        let (mut actuator, log) = actuator_with_log(ActuatorSettings::default());

        actuator.stop_motion().unwrap();

        assert_eq!(log.commands(), vec!["C1:OUTP OFF"]);
    }

    #[test]
    fn unknown_setting_writes_nothing_and_is_not_an_error() {
        let (mut actuator, log) = actuator_with_log(ActuatorSettings::default());

        actuator
            .commit_setting("speed_of_light", SettingValue::from(3e8))
            .unwrap();

        assert!(log.is_empty());
    }

    #[test]
    fn settings_forward_to_the_device() {
        let (mut actuator, log) = actuator_with_log(ActuatorSettings::default());

        actuator
            .commit_setting("frequency", SettingValue::from(5000.0))
            .unwrap();
        actuator
            .commit_setting("cycles", SettingValue::from(4i64))
            .unwrap();
        actuator
            .commit_setting("wavetype", SettingValue::from("SQUARE"))
            .unwrap();

        assert_eq!(
            log.commands(),
            vec!["C1:BSWV FRQ,5000", "C1:BTWV TIME,4", "C1:BSWV WVTP,SQUARE"]
        );
    }

    #[test]
    fn file_setting_runs_the_arb_sequence() {
        let (mut actuator, log) = actuator_with_log(ActuatorSettings::default());

        actuator
            .commit_setting("file", SettingValue::from("cal_ramp"))
            .unwrap();

        assert_eq!(
            log.commands(),
            vec![
                "C1:BSWV WVTP,ARB",
                "C1:ARWV NAME,\"cal_ramp\"",
                "C1:ARBM AFG",
            ]
        );
    }

    #[test]
    fn axis_setting_switches_dispatch_and_units() {
        let (mut actuator, log) = actuator_with_log(ActuatorSettings::default());
        assert_eq!(actuator.units(), "V");

        actuator
            .commit_setting("axis", SettingValue::from("Phase"))
            .unwrap();

        assert_eq!(actuator.units(), "°");
        assert!(log.is_empty());

        actuator.move_abs(45.0).unwrap();
        assert_eq!(log.commands(), vec!["C1:BSWV PHSE,45"]);
    }

    #[test]
    fn invalid_setting_values_are_type_errors() {
        let (mut actuator, log) = actuator_with_log(ActuatorSettings::default());

        assert!(actuator
            .commit_setting("cycles", SettingValue::from(-1i64))
            .is_err());
        assert!(actuator
            .commit_setting("wavetype", SettingValue::from("TRIANGLE"))
            .is_err());
        assert!(actuator
            .commit_setting("frequency", SettingValue::from("fast"))
            .is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn operations_before_initialize_fail_cleanly() {
        let mut actuator = SdgActuator::new(AppConfig::default());

        assert!(matches!(
            actuator.move_abs(1.0),
            Err(SdgError::NotConnected)
        ));
        assert!(matches!(
            actuator.actuator_value(),
            Err(SdgError::NotConnected)
        ));
    }

    #[test]
    fn moves_notify_the_status_channel() {
        let (mut actuator, _log) = actuator_with_log(ActuatorSettings::default());
        let (tx, rx) = unbounded();
        actuator.set_status_channel(StatusChannel::new(tx));

        actuator.move_abs(1.0).unwrap();
        actuator.stop_motion().unwrap();

        assert_eq!(rx.try_recv().unwrap().message, "position updated");
        assert_eq!(rx.try_recv().unwrap().message, "channel output OFF");
    }

    #[test]
    fn close_drops_the_connection() {
        let (mut actuator, _log) = actuator_with_log(ActuatorSettings::default());

        actuator.close().unwrap();

        assert!(matches!(
            actuator.move_abs(1.0),
            Err(SdgError::NotConnected)
        ));
    }
}
