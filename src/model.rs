use std::fmt;

use crate::profiler::HardwareReport;
use crate::security::SecurityDescriptor;

/// Connection state of a wireless interface.
///
/// `Off` doubles as the lenient default when the hardware report carries a
/// status string we do not recognize: an unrecognized value means the field
/// was never populated, not that data was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterfaceStatus {
    Connected,
    Disassociated,
    #[default]
    Off,
}

impl fmt::Display for InterfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceStatus::Connected => write!(f, "connected"),
            InterfaceStatus::Disassociated => write!(f, "disassociated"),
            InterfaceStatus::Off => write!(f, "off"),
        }
    }
}

/// One discovered broadcast from a scan.
///
/// SSID and BSSID together identify an observation within a single scan;
/// the parser rejects batches in which the same BSSID shows up twice.
/// Signal quality is on the dBm-like negative scale where a numerically
/// larger value (closer to zero) is a stronger signal.
#[derive(Clone, PartialEq, Eq)]
pub struct WirelessNetwork {
    /// Display name, not unique across access points.
    pub ssid: String,
    /// Hardware identifier of the broadcasting radio.
    pub bssid: String,
    /// Signal quality; larger value = stronger signal.
    pub rssi: i32,
    pub channel: u32,
    /// High-throughput (802.11n) capability.
    pub ht: bool,
    pub country_code: Option<String>,
    /// Security schemes in scan order. Open networks carry exactly one
    /// descriptor with protocol `NONE`; the parser never produces an
    /// empty sequence.
    pub security: Vec<SecurityDescriptor>,
    /// Write-only credential supplied by the caller for a later connect;
    /// never produced by parsing and kept out of Debug output.
    key: Option<String>,
}

impl WirelessNetwork {
    pub fn new(ssid: impl Into<String>, bssid: impl Into<String>, rssi: i32, channel: u32) -> Self {
        WirelessNetwork {
            ssid: ssid.into(),
            bssid: bssid.into(),
            rssi,
            channel,
            ht: false,
            country_code: None,
            security: vec![SecurityDescriptor::open()],
            key: None,
        }
    }

    /// Attach the pre-shared key the caller wants to use when joining
    /// this network.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.security.iter().all(SecurityDescriptor::is_open)
    }
}

impl fmt::Debug for WirelessNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WirelessNetwork")
            .field("ssid", &self.ssid)
            .field("bssid", &self.bssid)
            .field("rssi", &self.rssi)
            .field("channel", &self.channel)
            .field("ht", &self.ht)
            .field("country_code", &self.country_code)
            .field("security", &self.security)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A physical radio adapter, combining the OS-level interface name with
/// the attributes the hardware report supplies for it.
#[derive(Debug, Clone, PartialEq)]
pub struct WirelessInterface {
    /// Stable OS-level identifier, e.g. `en0`.
    pub name: String,
    pub vendor: String,
    pub model: String,
    pub firmware: Option<String>,
    pub mac_address: Option<String>,
    pub status: InterfaceStatus,
    /// The network this interface is currently joined to, owned by value.
    current: Option<WirelessNetwork>,
}

impl WirelessInterface {
    /// Build an interface from the transient hardware report record,
    /// consuming it.
    pub fn from_hardware(report: HardwareReport) -> Self {
        WirelessInterface {
            name: report.name,
            vendor: report.vendor,
            model: report.model,
            firmware: report.firmware,
            mac_address: report.mac_address,
            status: report.status,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&WirelessNetwork> {
        self.current.as_ref()
    }

    /// Record the network this interface is joined to. The interface takes
    /// its own copy; later scan results never mutate it.
    pub fn set_connection(&mut self, network: WirelessNetwork) {
        self.current = Some(network);
        self.status = InterfaceStatus::Connected;
    }

    pub fn clear_connection(&mut self) {
        self.current = None;
        if self.status == InterfaceStatus::Connected {
            self.status = InterfaceStatus::Disassociated;
        }
    }
}
