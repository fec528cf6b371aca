//! airman - wireless network discovery and control for macOS
//!
//! This library turns the output of the macOS networking tools into a
//! typed model and selects candidate access points from it:
//! - Scan listing parsing (`airport -s`) into [`WirelessNetwork`] records
//! - Hardware report parsing (`system_profiler` property list) into
//!   per-interface attributes
//! - Grouping candidates by SSID and picking the strongest signal
//! - Thin wrappers around the scan, report, and control commands
//!
//! All parsing and selection is pure and synchronous; process invocation
//! is confined to the command wrappers.

pub mod airport;
pub mod errors;
pub mod logging;
pub mod model;
pub mod networksetup;
pub mod profiler;
pub mod scan;
pub mod security;
pub mod select;

// Re-export commonly used types for convenience
pub use airport::AirPort;
pub use errors::AirmanError;
pub use model::{InterfaceStatus, WirelessInterface, WirelessNetwork};
pub use networksetup::NetworkSetup;
pub use profiler::{parse_hardware_report, HardwareInventory, HardwareReport, SystemProfiler};
pub use scan::parse_scan;
pub use security::{AuthMethod, Cipher, Protocol, SecurityDescriptor};
pub use select::{group_by_ssid, select_best};
