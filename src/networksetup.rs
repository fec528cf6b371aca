use std::process::Command;

use log::info;

use crate::errors::{AirmanError, Result};

/// Thin wrapper for the network control command: join a network, toggle
/// interface power. It only ever receives arguments the core produced
/// (interface name, SSID, security key); it never parses anything.
#[derive(Debug, Clone)]
pub struct NetworkSetup {
    program: String,
}

impl NetworkSetup {
    pub fn new() -> Self {
        NetworkSetup {
            program: "networksetup".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        NetworkSetup {
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

    /// Join the named network on the given interface. `key` is omitted
    /// for open networks.
    pub fn connect(&self, iface: &str, ssid: &str, key: Option<&str>) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(["-setairportnetwork", iface, ssid]);
        if let Some(key) = key {
            command.arg(key);
        }
        self.run(command, &format!("connect {} to {:?}", iface, ssid))?;
        info!("requested association of {} with {:?}", iface, ssid);
        Ok(())
    }

    /// Power the interface radio on.
    pub fn up(&self, iface: &str) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(["-setairportpower", iface, "on"]);
        self.run(command, &format!("power {} on", iface))
    }

    /// Power the interface radio off.
    pub fn down(&self, iface: &str) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(["-setairportpower", iface, "off"]);
        self.run(command, &format!("power {} off", iface))
    }

    fn run(&self, mut command: Command, what: &str) -> Result<()> {
        let output = command.output()?;
        if !output.status.success() {
            return Err(AirmanError::CommandFailed(format!(
                "{} failed with {}: {}",
                what,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

impl Default for NetworkSetup {
    fn default() -> Self {
        NetworkSetup::new()
    }
}
