use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::errors::{AirmanError, Result};
use crate::model::WirelessNetwork;
use crate::scan::parse_scan;

/// Where the airport executable lives; it is never on the PATH.
pub const AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

/// Thin wrapper for the airport scan command. Spawning and exit-status
/// handling live here; everything the command prints is handed to the
/// pure parser untouched.
#[derive(Debug, Clone)]
pub struct AirPort {
    path: PathBuf,
}

impl AirPort {
    pub fn new() -> Self {
        AirPort {
            path: PathBuf::from(AIRPORT_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        AirPort { path: path.into() }
    }

    /// Whether the executable exists at its specialized location.
    pub fn is_installed(&self) -> bool {
        Path::new(&self.path).exists()
    }

    /// Run a scan and parse the listing into networks.
    pub fn scan(&self) -> Result<Vec<WirelessNetwork>> {
        let output = Command::new(&self.path).arg("-s").output()?;
        if !output.status.success() {
            return Err(AirmanError::CommandFailed(format!(
                "airport scan exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let networks = parse_scan(&output.stdout)?;
        info!("scan found {} network(s)", networks.len());
        Ok(networks)
    }

    /// Drop the current association without powering the interface down.
    pub fn disconnect(&self) -> Result<()> {
        let output = Command::new(&self.path).arg("--disassociate").output()?;
        if !output.status.success() {
            return Err(AirmanError::CommandFailed(format!(
                "airport disassociate exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

impl Default for AirPort {
    fn default() -> Self {
        AirPort::new()
    }
}
