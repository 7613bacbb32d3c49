//! Arbitrary waveform selection (`ARWV` / `ARBM`).

use super::SdgClient;
use crate::error::SdgError;
use crate::types::WaveType;

impl SdgClient {
    /// Select an arbitrary waveform file previously stored on the device.
    ///
    /// Issues three commands in an order mandated by the instrument grammar:
    /// switch the wave type to ARB, name the wave file, then confirm AFG
    /// mode. Without the final `ARBM AFG` the generator ignores subsequent
    /// parameter changes such as frequency.
    ///
    /// # Examples
    /// ```no_run
    /// use siglent_sdg::SdgClient;
    ///
    /// let mut sdg = SdgClient::connect("192.168.1.44", 5025)?;
    /// sdg.set_arbwave("ramp_cal")?;
    /// # Ok::<(), siglent_sdg::SdgError>(())
    /// ```
    pub fn set_arbwave(&mut self, file: &str) -> Result<(), SdgError> {
        self.set_wavetype(WaveType::Arb)?;
        let ch = self.channel;
        self.write(&format!("{ch}:ARWV NAME,\"{file}\""))?;
        self.write(&format!("{ch}:ARBM AFG"))?;
        self.arb_file = Some(file.to_string());
        Ok(())
    }

    /// Last arbitrary wave file selected, if any (local mirror).
    pub fn arb_file(&self) -> Option<&str> {
        self.arb_file.as_deref()
    }
}
