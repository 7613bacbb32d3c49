//! Output (`OUTP`) parameters: impedance load and channel output state.

use super::SdgClient;
use crate::error::SdgError;
use crate::types::{Load, Switch};

impl SdgClient {
    /// Set the output impedance load.
    pub fn set_load(&mut self, load: Load) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:OUTP LOAD,{load}"))?;
        self.load = load;
        Ok(())
    }

    /// Last load written (local mirror).
    pub fn load(&self) -> Load {
        self.load
    }

    /// Switch the channel output on or off.
    ///
    /// Note the command shape: `OUTP` takes the state directly, without a
    /// field name.
    pub fn set_output(&mut self, state: Switch) -> Result<(), SdgError> {
        let ch = self.channel;
        self.write(&format!("{ch}:OUTP {state}"))?;
        self.output = state;
        Ok(())
    }

    /// Last output state written (local mirror).
    pub fn output_state(&self) -> Switch {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use crate::sdg::test_support::client_with_log;
    use crate::types::{Load, Switch};

    #[test]
    fn load_command() {
        let (mut client, log) = client_with_log();

        client.set_load(Load::HighZ).unwrap();

        assert_eq!(log.commands(), vec!["C1:OUTP LOAD,HZ"]);
        assert_eq!(client.load(), Load::HighZ);
    }

    #[test]
    fn output_state_command() {
        let (mut client, log) = client_with_log();

        client.set_output(Switch::On).unwrap();

        assert_eq!(log.commands(), vec!["C1:OUTP ON"]);
        assert_eq!(client.output_state(), Switch::On);
    }
}
