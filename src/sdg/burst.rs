//! Burst (`BTWV`) parameters: burst state, trigger source, delay, cycle count.

use super::SdgClient;
use crate::error::SdgError;
use crate::types::{Switch, TriggerSource};

impl SdgClient {
    /// Switch burst mode on or off.
    pub fn set_burst(&mut self, state: Switch) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BTWV STATE,{state}"))?;
        self.burst = state;
        Ok(())
    }

    /// Last burst state written (local mirror).
    pub fn burst_state(&self) -> Switch {
        self.burst
    }

    /// Select the burst trigger source. Only takes effect while burst mode
    /// is on.
    pub fn set_trig_src(&mut self, source: TriggerSource) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BTWV TRSR,{source}"))?;
        self.trig_src = source;
        Ok(())
    }

    /// Last trigger source written (local mirror).
    pub fn trig_src(&self) -> TriggerSource {
        self.trig_src
    }

    /// Set the trigger delay, in seconds. Only available with an external
    /// trigger; the instrument is unstable with large delays (around 1 ms
    /// and above), minimum is 2.494 µs.
    pub fn set_delay(&mut self, delay: f64) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BTWV DLAY,{delay}"))?;
        self.delay = delay;
        Ok(())
    }

    /// Last trigger delay written, in seconds (local mirror).
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Set how many base wave cycles one burst emits per trigger.
    pub fn set_cycles(&mut self, cycles: u32) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BTWV TIME,{cycles}"))?;
        self.cycles = cycles;
        Ok(())
    }

    /// Last cycle count written (local mirror).
    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}
