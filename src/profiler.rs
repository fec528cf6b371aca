use std::process::Command;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::errors::{AirmanError, Result};
use crate::model::InterfaceStatus;

lazy_static! {
    /// Captures vendor and model id from the composite card type string,
    /// e.g. `AirPort Extreme  (0x14E4, 0x93)`.
    static ref CARD_TYPE_RE: Regex = Regex::new(r"\((.+), (.+)\)").unwrap();
}

/// Per-interface attributes extracted from the hardware report. Transient:
/// merged into a `WirelessInterface` and then discarded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HardwareReport {
    pub name: String,
    /// Vendor id from the card type string; empty when the platform omits
    /// the parenthesized detail.
    pub vendor: String,
    /// Model id from the card type string; empty under the same condition.
    pub model: String,
    pub firmware: Option<String>,
    pub mac_address: Option<String>,
    pub country_code: Option<String>,
    pub phy_modes: Option<String>,
    pub supported_channels: Vec<u32>,
    /// Link MTU, when the caller has an OS interface listing to merge it
    /// from; the hardware report itself does not carry one.
    pub mtu: Option<u32>,
    /// The status string exactly as reported.
    pub raw_status: String,
    pub status: InterfaceStatus,
}

/// The hardware report for every listed interface, in report order.
///
/// Interface counts are single digits, so lookup is a linear scan.
#[derive(Debug, Clone, Default)]
pub struct HardwareInventory {
    entries: Vec<HardwareReport>,
}

impl HardwareInventory {
    /// The report for the named interface, or `NotFound`.
    pub fn get(&self, name: &str) -> Result<&HardwareReport> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| {
                AirmanError::NotFound(format!("no wireless interface with name {}", name))
            })
    }

    pub fn entries(&self) -> &[HardwareReport] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<HardwareReport> {
        self.entries
    }
}

// The property-list shape the hardware report command emits: an array of
// data sets, each holding items, of which one lists the wireless
// interfaces. Keys not listed here are ignored.

#[derive(Debug, Deserialize)]
struct ReportDataSet {
    #[serde(rename = "_dataType", default)]
    data_type: String,
    #[serde(rename = "_items", default)]
    items: Vec<ReportItem>,
}

#[derive(Debug, Deserialize)]
struct ReportItem {
    #[serde(rename = "spairport_airport_interfaces", default)]
    interfaces: Vec<ReportInterface>,
}

#[derive(Debug, Deserialize)]
struct ReportInterface {
    #[serde(rename = "_name", default)]
    name: String,
    #[serde(rename = "spairport_wireless_card_type", default)]
    card_type: String,
    #[serde(rename = "spairport_status_connected", default)]
    status: String,
    #[serde(rename = "spairport_wireless_firmware_version")]
    firmware: Option<String>,
    #[serde(rename = "spairport_wireless_mac_address")]
    mac_address: Option<String>,
    #[serde(rename = "spairport_wireless_country_code")]
    country_code: Option<String>,
    #[serde(rename = "spairport_supported_phymodes")]
    phy_modes: Option<String>,
    #[serde(rename = "spairport_supported_channels", default)]
    supported_channels: Vec<u32>,
}

/// Parse the property-list hardware report into per-interface records.
///
/// A buffer that is not a valid property list is `MalformedInput`. A card
/// type string without the `(<vendor>, <model>)` clause leaves vendor and
/// model empty; that is expected on some platforms, not an error.
pub fn parse_hardware_report(output: &[u8]) -> Result<HardwareInventory> {
    let data_sets: Vec<ReportDataSet> = plist::from_bytes(output).map_err(|err| {
        AirmanError::MalformedInput(format!("hardware report is not a valid property list: {}", err))
    })?;

    let item = data_sets
        .iter()
        .flat_map(|set| set.items.iter().map(move |item| (set, item)))
        .find(|(_, item)| !item.interfaces.is_empty());

    let (data_set, item) = match item {
        Some(found) => found,
        None => {
            return Err(AirmanError::MalformedInput(
                "hardware report lists no wireless interfaces".to_string(),
            ))
        }
    };
    debug!(
        "hardware report data set {:?} lists {} interface(s)",
        data_set.data_type,
        item.interfaces.len()
    );

    let entries = item.interfaces.iter().map(build_report).collect();
    Ok(HardwareInventory { entries })
}

fn build_report(iface: &ReportInterface) -> HardwareReport {
    let (vendor, model) = match CARD_TYPE_RE.captures(&iface.card_type) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (String::new(), String::new()),
    };

    HardwareReport {
        name: iface.name.clone(),
        vendor,
        model,
        firmware: iface.firmware.clone(),
        mac_address: iface.mac_address.clone(),
        country_code: iface.country_code.clone(),
        phy_modes: iface.phy_modes.clone(),
        supported_channels: iface.supported_channels.clone(),
        mtu: None,
        raw_status: iface.status.clone(),
        status: parse_status(&iface.status),
    }
}

/// Anything other than the three recognized tokens leaves the status at
/// `Off`: an unrecognized value means the field was never populated.
fn parse_status(raw: &str) -> InterfaceStatus {
    match raw {
        "spairport_status_connected" => InterfaceStatus::Connected,
        "spairport_status_disassociated" => InterfaceStatus::Disassociated,
        "spairport_status_off" => InterfaceStatus::Off,
        _ => InterfaceStatus::Off,
    }
}

/// Thin wrapper for the hardware report command. Constructed by the
/// application layer and passed in explicitly; the parsers above never
/// spawn anything themselves.
#[derive(Debug, Clone)]
pub struct SystemProfiler {
    program: String,
}

impl SystemProfiler {
    pub fn new() -> Self {
        SystemProfiler {
            program: "system_profiler".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        SystemProfiler {
            program: program.into(),
        }
    }

    /// Whether the executable resolves on the current PATH.
    pub fn is_installed(&self) -> bool {
        Command::new("which")
            .arg(&self.program)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Run the report command and parse its output.
    pub fn run(&self) -> Result<HardwareInventory> {
        let output = Command::new(&self.program)
            .args(["-detailLevel", "mini", "SPAirPortDataType", "-xml"])
            .output()?;
        if !output.status.success() {
            return Err(AirmanError::CommandFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        parse_hardware_report(&output.stdout)
    }
}

impl Default for SystemProfiler {
    fn default() -> Self {
        SystemProfiler::new()
    }
}
