use log::info;

use crate::bus::{ScpiBus, TcpBus};
use crate::error::SdgError;
use crate::types::{Axis, Channel, Load, Switch, TriggerSource, WaveType};

pub mod arb;
pub mod basic_wave;
pub mod burst;
pub mod output;

/// Power-on defaults applied by [`SdgClient::new`], in the order the
/// instrument grammar requires (trigger source before burst timing, burst
/// state before burst parameters).
pub const DEFAULT_LOAD: Load = Load::Ohms(50);
pub const DEFAULT_FREQUENCY_HZ: f64 = 10_000_000.0;
pub const DEFAULT_AMPLITUDE_V: f64 = 3.0;
pub const DEFAULT_PHASE_DEG: f64 = 0.0;
pub const DEFAULT_OFFSET_V: f64 = 0.0;
pub const DEFAULT_DELAY_S: f64 = 0.000_005;
pub const DEFAULT_CYCLES: u32 = 1;

/// Driver for one output channel of a Siglent SDG-series generator.
///
/// The client owns its bus connection and keeps a local mirror of every
/// parameter it has written. Getters return the mirror, not a hardware query:
/// the generator is driven write-only, so the mirror is only as truthful as
/// the last command that reached the device. State changed from the front
/// panel or by another connection is not observed.
///
/// # Examples
///
/// ```no_run
/// use siglent_sdg::SdgClient;
///
/// let mut sdg = SdgClient::connect("192.168.1.44", 5025)?;
/// sdg.set_amplitude(1.5)?;
/// assert_eq!(sdg.amplitude(), 1.5);
/// # Ok::<(), siglent_sdg::SdgError>(())
/// ```
pub struct SdgClient {
    bus: Box<dyn ScpiBus>,
    channel: Channel,
    axis: Axis,
    // Local mirror of the instrument state. Written by the setters, never
    // read back from the device.
    amplitude: f64,
    offset: f64,
    phase: f64,
    frequency: f64,
    delay: f64,
    cycles: u32,
    trig_src: TriggerSource,
    load: Load,
    wavetype: WaveType,
    arb_file: Option<String>,
    burst: Switch,
    output: Switch,
}

impl SdgClient {
    /// Take ownership of a bus and bring channel 1 into the known default
    /// state: 50 Ω load, burst mode with external trigger, 10 MHz sine at
    /// 3 V / 0°, 5 µs trigger delay, single cycle, output off.
    ///
    /// The ten commands are sent in this exact order; later ones (burst
    /// timing) only take effect once the earlier ones (burst state, trigger
    /// source) are in place.
    ///
    /// # Errors
    /// Fails on the first bus write that does not go through. No retry is
    /// attempted and the device may be left partially configured.
    pub fn new(bus: Box<dyn ScpiBus>) -> Result<Self, SdgError> {
        let mut client = Self {
            bus,
            channel: Channel::default(),
            axis: Axis::default(),
            amplitude: DEFAULT_AMPLITUDE_V,
            offset: DEFAULT_OFFSET_V,
            phase: DEFAULT_PHASE_DEG,
            frequency: DEFAULT_FREQUENCY_HZ,
            delay: DEFAULT_DELAY_S,
            cycles: DEFAULT_CYCLES,
            trig_src: TriggerSource::External,
            load: DEFAULT_LOAD,
            wavetype: WaveType::Sine,
            arb_file: None,
            burst: Switch::On,
            output: Switch::Off,
        };
        client.apply_defaults()?;
        Ok(client)
    }

    /// Connect over TCP with default timeouts and apply the default
    /// configuration.
    pub fn connect(host: &str, port: u16) -> Result<Self, SdgError> {
        let bus = TcpBus::connect(host, port)?;
        Self::new(Box::new(bus))
    }

    fn apply_defaults(&mut self) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:OUTP LOAD,{DEFAULT_LOAD}"))?;
        self.write(&format!("{ch}:BTWV STATE,{}", Switch::On))?;
        self.write(&format!("{ch}:BTWV TRSR,{}", TriggerSource::External))?;
        self.write(&format!("{ch}:BSWV WVTP,{}", WaveType::Sine))?;
        self.write(&format!("{ch}:BSWV FRQ,{DEFAULT_FREQUENCY_HZ}"))?;
        self.write(&format!("{ch}:BSWV AMP,{DEFAULT_AMPLITUDE_V}"))?;
        self.write(&format!("{ch}:BSWV PHSE,{DEFAULT_PHASE_DEG}"))?;
        self.write(&format!("{ch}:BTWV DLAY,{DEFAULT_DELAY_S}"))?;
        self.write(&format!("{ch}:BTWV TIME,{DEFAULT_CYCLES}"))?;
        self.write(&format!("{ch}:OUTP {}", Switch::Off))?;
        info!("SDG channel {ch} reset to default configuration");
        Ok(())
    }

    pub(crate) fn write(&mut self, command: &str) -> Result<(), SdgError> {
        self.bus.write_command(command)
    }

    /// Channel this client drives.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Select the quantity the generic position operations act on.
    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Move the selected axis to an absolute value.
    pub fn set_pos(&mut self, pos: f64) -> Result<(), SdgError> {
        match self.axis {
            Axis::Amplitude => self.set_amplitude(pos),
            Axis::Phase => self.set_phase(pos),
        }
    }

    /// Current value of the selected axis, from the local mirror.
    pub fn get_pos(&self) -> f64 {
        match self.axis {
            Axis::Amplitude => self.amplitude(),
            Axis::Phase => self.phase(),
        }
    }

    /// Move the selected axis by a relative amount.
    pub fn set_rel_pos(&mut self, delta: f64) -> Result<(), SdgError> {
        match self.axis {
            Axis::Amplitude => self.set_rel_amplitude(delta),
            Axis::Phase => self.set_rel_phase(delta),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MockBus;

    #[test]
    fn construction_sends_default_sequence_in_order() {
        let bus = MockBus::new();
        let log = bus.log();
        let _client = SdgClient::new(Box::new(bus)).unwrap();

        assert_eq!(
            log.commands(),
            vec![
                "C1:OUTP LOAD,50",
                "C1:BTWV STATE,ON",
                "C1:BTWV TRSR,EXT",
                "C1:BSWV WVTP,SINE",
                "C1:BSWV FRQ,10000000",
                "C1:BSWV AMP,3",
                "C1:BSWV PHSE,0",
                "C1:BTWV DLAY,0.000005",
                "C1:BTWV TIME,1",
                "C1:OUTP OFF",
            ]
        );
    }

    #[test]
    fn mirror_seeded_with_defaults() {
        let (client, _log) = test_support::client_with_log();

        assert_eq!(client.amplitude(), DEFAULT_AMPLITUDE_V);
        assert_eq!(client.offset(), DEFAULT_OFFSET_V);
        assert_eq!(client.phase(), DEFAULT_PHASE_DEG);
        assert_eq!(client.frequency(), DEFAULT_FREQUENCY_HZ);
        assert_eq!(client.delay(), DEFAULT_DELAY_S);
        assert_eq!(client.cycles(), DEFAULT_CYCLES);
        assert_eq!(client.trig_src(), TriggerSource::External);
        assert_eq!(client.load(), DEFAULT_LOAD);
        assert_eq!(client.wavetype(), WaveType::Sine);
        assert_eq!(client.burst_state(), Switch::On);
        assert_eq!(client.output_state(), Switch::Off);
        assert_eq!(client.arb_file(), None);
    }

    #[test]
    fn axis_dispatch_amplitude() {
        let (mut client, log) = test_support::client_with_log();

        client.set_axis(Axis::Amplitude);
        client.set_pos(1.2).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,1.2"]);
        assert_eq!(client.get_pos(), 1.2);
        assert_eq!(client.phase(), DEFAULT_PHASE_DEG);
    }

    #[test]
    fn axis_dispatch_phase() {
        let (mut client, log) = test_support::client_with_log();

        client.set_axis(Axis::Phase);
        client.set_pos(90.0).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV PHSE,90"]);
        assert_eq!(client.get_pos(), 90.0);
        assert_eq!(client.amplitude(), DEFAULT_AMPLITUDE_V);
    }

    #[test]
    fn relative_moves_accumulate() {
        let (mut client, log) = test_support::client_with_log();

        client.set_axis(Axis::Phase);
        client.set_rel_pos(10.0).unwrap();
        client.set_rel_pos(-4.0).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV PHSE,10", "C1:BSWV PHSE,6"]);
        assert_eq!(client.get_pos(), 6.0);
    }
}
