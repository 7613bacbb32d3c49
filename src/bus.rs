use log::{debug, warn};
use parking_lot::Mutex;
use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use crate::error::SdgError;

/// Default resource address of the bench generator. There is no discovery
/// mechanism; override the host/port through the configuration file instead.
pub const DEFAULT_HOST: &str = "192.168.1.44";
/// Raw SCPI socket port used by Siglent bench instruments.
pub const DEFAULT_PORT: u16 = 5025;

/// Write-only command transport to the instrument.
///
/// The generator is driven fire-and-forget: one text command per write, no
/// response parsing. This trait is the single seam between the driver and the
/// wire, so tests can substitute a recording fake ([`MockBus`]).
pub trait ScpiBus: Send {
    /// Send one command. The transport appends the line terminator.
    fn write_command(&mut self, command: &str) -> Result<(), SdgError>;
}

/// Timeout settings for the TCP connection lifecycle.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Timeout for establishing the initial TCP connection
    pub connect_timeout: Duration,
    /// Timeout for writing a command to the instrument
    pub write_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),
        }
    }
}

/// Builder for [`TcpBus`] instances.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use siglent_sdg::bus::TcpBus;
///
/// let bus = TcpBus::builder()
///     .host("192.168.1.44")
///     .port(5025)
///     .connect_timeout(Duration::from_secs(10))
///     .connect()?;
/// # Ok::<(), siglent_sdg::SdgError>(())
/// ```
#[derive(Default)]
pub struct TcpBusBuilder {
    host: Option<String>,
    port: Option<u16>,
    config: ConnectionConfig,
}

impl TcpBusBuilder {
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn config(mut self, config: ConnectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    /// Open the TCP connection and apply the socket timeouts.
    pub fn connect(self) -> Result<TcpBus, SdgError> {
        let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = self.port.unwrap_or(DEFAULT_PORT);

        let address = format!("{host}:{port}");
        let socket_addr: SocketAddr = address
            .to_socket_addrs()
            .map_err(|_| SdgError::InvalidAddress(address.clone()))?
            .next()
            .ok_or_else(|| SdgError::InvalidAddress(address.clone()))?;

        debug!("Connecting to SDG at {address}");

        let stream = TcpStream::connect_timeout(&socket_addr, self.config.connect_timeout)
            .map_err(|e| {
                warn!("Failed to connect to {address}: {e}");
                if e.kind() == std::io::ErrorKind::TimedOut {
                    SdgError::Timeout
                } else {
                    SdgError::Io(e)
                }
            })?;

        stream.set_write_timeout(Some(self.config.write_timeout))?;

        debug!("Connected to SDG at {address}");

        Ok(TcpBus { stream, address })
    }
}

/// Blocking SCPI-over-LAN transport.
///
/// Commands are newline terminated and written synchronously; a hung write
/// blocks the caller until the configured write timeout elapses.
pub struct TcpBus {
    stream: TcpStream,
    address: String,
}

impl TcpBus {
    /// Connect with default timeouts.
    pub fn connect(host: &str, port: u16) -> Result<Self, SdgError> {
        Self::builder().host(host).port(port).connect()
    }

    pub fn builder() -> TcpBusBuilder {
        TcpBusBuilder::default()
    }

    /// Remote address this bus is connected to.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl ScpiBus for TcpBus {
    fn write_command(&mut self, command: &str) -> Result<(), SdgError> {
        debug!("SCPI write: {command}");
        self.stream.write_all(command.as_bytes())?;
        self.stream.write_all(b"\n")?;
        Ok(())
    }
}

/// In-memory bus that records every command instead of talking to hardware.
///
/// The command log is shared, so a clone of the handle taken before the bus
/// is handed to a client stays readable afterwards:
///
/// ```
/// use siglent_sdg::bus::{MockBus, ScpiBus};
///
/// let mut bus = MockBus::new();
/// let log = bus.log();
/// bus.write_command("C1:OUTP OFF").unwrap();
/// assert_eq!(log.commands(), vec!["C1:OUTP OFF"]);
/// ```
#[derive(Clone, Default)]
pub struct MockBus {
    written: Arc<Mutex<Vec<String>>>,
}

/// Read handle onto a [`MockBus`] command log.
#[derive(Clone)]
pub struct CommandLog {
    written: Arc<Mutex<Vec<String>>>,
}

impl CommandLog {
    /// All commands written so far, in write order.
    pub fn commands(&self) -> Vec<String> {
        self.written.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.written.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.lock().is_empty()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.written.lock().clear();
    }
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CommandLog {
        CommandLog {
            written: Arc::clone(&self.written),
        }
    }
}

impl ScpiBus for MockBus {
    fn write_command(&mut self, command: &str) -> Result<(), SdgError> {
        debug!("mock SCPI write: {command}");
        self.written.lock().push(command.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_bus_records_in_order() {
        let mut bus = MockBus::new();
        let log = bus.log();

        bus.write_command("C1:BSWV AMP,3").unwrap();
        bus.write_command("C1:OUTP OFF").unwrap();

        assert_eq!(log.commands(), vec!["C1:BSWV AMP,3", "C1:OUTP OFF"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn command_log_clear() {
        let mut bus = MockBus::new();
        let log = bus.log();

        bus.write_command("C1:OUTP OFF").unwrap();
        log.clear();

        assert!(log.is_empty());
    }

    #[test]
    fn builder_rejects_bad_address() {
        let result = TcpBus::builder().host("not an address").port(0).connect();
        assert!(result.is_err());
    }
}
