//! Basic wave (`BSWV`) parameters: shape, frequency, amplitude, offset, phase.

use super::SdgClient;
use crate::error::SdgError;
use crate::types::WaveType;

impl SdgClient {
    /// Set the signal amplitude, in volts.
    ///
    /// # Errors
    /// Returns `SdgError` if the bus write fails; the mirror is not updated
    /// in that case.
    ///
    /// # Examples
    /// ```no_run
    /// use siglent_sdg::SdgClient;
    ///
    /// let mut sdg = SdgClient::connect("192.168.1.44", 5025)?;
    /// sdg.set_amplitude(1.5)?;
    /// # Ok::<(), siglent_sdg::SdgError>(())
    /// ```
    pub fn set_amplitude(&mut self, amplitude: f64) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BSWV AMP,{amplitude}"))?;
        self.amplitude = amplitude;
        Ok(())
    }

    /// Last amplitude written, in volts (local mirror, no hardware query).
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Change the amplitude by a relative amount, in volts.
    pub fn set_rel_amplitude(&mut self, delta: f64) -> Result<(), SdgError> {
        self.set_amplitude(self.amplitude + delta)
    }

    /// Set the amplitude offset, in volts.
    pub fn set_offset(&mut self, offset: f64) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BSWV OFST,{offset}"))?;
        self.offset = offset;
        Ok(())
    }

    /// Last offset written, in volts (local mirror).
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Set the signal phase, in degrees.
    pub fn set_phase(&mut self, phase: f64) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BSWV PHSE,{phase}"))?;
        self.phase = phase;
        Ok(())
    }

    /// Last phase written, in degrees (local mirror).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Change the phase by a relative amount, in degrees.
    pub fn set_rel_phase(&mut self, delta: f64) -> Result<(), SdgError> {
        self.set_phase(self.phase + delta)
    }

    /// Set the base wave frequency, in hertz.
    pub fn set_frequency(&mut self, frequency: f64) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BSWV FRQ,{frequency}"))?;
        self.frequency = frequency;
        Ok(())
    }

    /// Last frequency written, in hertz (local mirror).
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Select the basic wave shape.
    ///
    /// For arbitrary waveforms prefer [`SdgClient::set_arbwave`], which also
    /// selects the wave file and confirms AFG mode as the instrument
    /// requires.
    pub fn set_wavetype(&mut self, wavetype: WaveType) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:BSWV WVTP,{wavetype}"))?;
        self.wavetype = wavetype;
        Ok(())
    }

    /// Last wave shape written (local mirror).
    pub fn wavetype(&self) -> WaveType {
        self.wavetype
    }
}

#[cfg(test)]
mod tests {
    use crate::sdg::test_support::client_with_log;
    use crate::types::WaveType;

    #[test]
    fn amplitude_writes_one_command_and_updates_mirror() {
        let (mut client, log) = client_with_log();

        client.set_amplitude(0.25).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,0.25"]);
        assert_eq!(client.amplitude(), 0.25);
    }

    #[test]
    fn offset_has_its_own_mirror_field() {
        let (mut client, log) = client_with_log();

        client.set_offset(-0.5).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV OFST,-0.5"]);
        assert_eq!(client.offset(), -0.5);
        // amplitude untouched
        assert_eq!(client.amplitude(), 3.0);
    }

    #[test]
    fn frequency_and_phase_commands() {
        let (mut client, log) = client_with_log();

        client.set_frequency(1_000.0).unwrap();
        client.set_phase(45.5).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV FRQ,1000", "C1:BSWV PHSE,45.5"]);
        assert_eq!(client.frequency(), 1_000.0);
        assert_eq!(client.phase(), 45.5);
    }

    #[test]
    fn wavetype_command() {
        let (mut client, log) = client_with_log();

        client.set_wavetype(WaveType::Square).unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV WVTP,SQUARE"]);
        assert_eq!(client.wavetype(), WaveType::Square);
    }

    #[test]
    fn relative_amplitude_builds_on_mirror() {
        let (mut client, log) = client_with_log();

        client.set_rel_amplitude(-1.0).unwrap();

        // default amplitude is 3 V
        assert_eq!(log.commands(), vec!["C1:BSWV AMP,2"]);
        assert_eq!(client.amplitude(), 2.0);
    }
}
