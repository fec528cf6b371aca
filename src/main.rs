use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use airman::airport::AirPort;
use airman::logging::{self, ErrorCode};
use airman::model::{WirelessInterface, WirelessNetwork};
use airman::networksetup::NetworkSetup;
use airman::profiler::SystemProfiler;
use airman::select::{group_by_ssid, select_best};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Write logs to daily-rotated files in this directory instead of stderr
    #[arg(long = "log-dir", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PowerState {
    On,
    Off,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for nearby wireless networks
    Scan,

    /// Show hardware details for the wireless interfaces
    Hardware {
        /// Only show the named interface (e.g. en0)
        #[arg(short = 'i', long = "interface")]
        interface: Option<String>,
    },

    /// Pick the strongest access point broadcasting an SSID
    Best {
        /// Network name to group by
        #[arg(short = 's', long = "ssid")]
        ssid: String,
    },

    /// Join a network on an interface
    Connect {
        /// Interface name (e.g. en0)
        #[arg(short = 'i', long = "interface")]
        interface: String,

        /// Network name (SSID)
        #[arg(short = 's', long = "ssid")]
        ssid: String,

        /// Security key; omit for open networks
        #[arg(short = 'p', long = "password")]
        password: Option<String>,
    },

    /// Drop the current association without powering the radio down
    Disconnect,

    /// Toggle the radio power of an interface
    Power {
        /// Interface name (e.g. en0)
        #[arg(short = 'i', long = "interface")]
        interface: String,

        /// on or off
        #[arg(value_enum)]
        state: PowerState,
    },

    /// Map nearby networks over time into a CSV file
    #[command(name = "map-networks")]
    MapNetworks {
        /// Scan interval in seconds
        #[arg(short = 'i', long = "interval", default_value = "5")]
        interval: u64,

        /// Total duration to run in seconds
        #[arg(short = 't', long = "time", default_value = "300")]
        duration: u64,

        /// Maximum number of networks to log per scan
        #[arg(short = 'n', long = "networks", default_value = "10")]
        max_networks: usize,

        /// Filter by SSID (optional)
        #[arg(short = 's', long = "ssid")]
        ssid_filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::setup_logging(cli.log_dir.as_deref())?;

    info!(
        "airman executing: {}",
        match &cli.command {
            Commands::Scan => "scan",
            Commands::Hardware { .. } => "hardware",
            Commands::Best { .. } => "best",
            Commands::Connect { .. } => "connect",
            Commands::Disconnect => "disconnect",
            Commands::Power { .. } => "power",
            Commands::MapNetworks { .. } => "map-networks",
        }
    );

    match &cli.command {
        Commands::Scan => {
            let airport = require_airport()?;
            let networks = airport.scan().with_context(|| {
                format!("{} Scan failed", logging::error_code(ErrorCode::ScanFailed))
            })?;
            print_networks(&networks);
        }

        Commands::Hardware { interface } => {
            let profiler = SystemProfiler::new();
            if !profiler.is_installed() {
                return Err(anyhow::anyhow!(
                    "{} system_profiler not found on PATH",
                    logging::error_code(ErrorCode::ToolMissing)
                ));
            }
            let inventory = profiler.run().with_context(|| {
                format!(
                    "{} Hardware report failed",
                    logging::error_code(ErrorCode::HardwareReportFailed)
                )
            })?;
            match interface {
                Some(name) => {
                    let report = inventory.get(name).with_context(|| {
                        format!(
                            "{} No hardware entry for {}",
                            logging::error_code(ErrorCode::HardwareReportFailed),
                            name
                        )
                    })?;
                    print_interface(&WirelessInterface::from_hardware(report.clone()));
                }
                None => {
                    for report in inventory.into_entries() {
                        print_interface(&WirelessInterface::from_hardware(report));
                        println!();
                    }
                }
            }
        }

        Commands::Best { ssid } => {
            let airport = require_airport()?;
            let networks = airport.scan().with_context(|| {
                format!("{} Scan failed", logging::error_code(ErrorCode::ScanFailed))
            })?;
            let candidates = group_by_ssid(ssid, &networks).with_context(|| {
                format!(
                    "{} No candidates for SSID {:?}",
                    logging::error_code(ErrorCode::SelectionFailed),
                    ssid
                )
            })?;
            let best = select_best(&candidates).with_context(|| {
                format!(
                    "{} Selection failed",
                    logging::error_code(ErrorCode::SelectionFailed)
                )
            })?;
            println!(
                "{} {} RSSI {} channel {} ({} candidate(s))",
                best.ssid,
                best.bssid,
                best.rssi,
                best.channel,
                candidates.len()
            );
        }

        Commands::Connect {
            interface,
            ssid,
            password,
        } => {
            let airport = require_airport()?;
            let setup = require_networksetup()?;

            // Scan first so we only hand networksetup an SSID we can see,
            // and so the strongest access point informs the log line.
            let networks = airport.scan().with_context(|| {
                format!("{} Scan failed", logging::error_code(ErrorCode::ScanFailed))
            })?;
            let candidates = group_by_ssid(ssid, &networks).with_context(|| {
                format!(
                    "{} Network {:?} not found in scan results",
                    logging::error_code(ErrorCode::ConnectFailed),
                    ssid
                )
            })?;
            let mut target = select_best(&candidates)
                .with_context(|| {
                    format!(
                        "{} Selection failed",
                        logging::error_code(ErrorCode::SelectionFailed)
                    )
                })?
                .clone();
            if let Some(password) = password {
                target.set_key(password.clone());
            }

            info!(
                "joining {:?} via {} (RSSI {}, channel {})",
                target.ssid, target.bssid, target.rssi, target.channel
            );
            setup
                .connect(interface, &target.ssid, target.key())
                .with_context(|| {
                    format!(
                        "{} Failed to join {:?} on {}",
                        logging::error_code(ErrorCode::ConnectFailed),
                        ssid,
                        interface
                    )
                })?;
            println!("Joined {} on {}", target.ssid, interface);
        }

        Commands::Disconnect => {
            let airport = require_airport()?;
            airport.disconnect().with_context(|| {
                format!(
                    "{} Disconnect failed",
                    logging::error_code(ErrorCode::DisconnectFailed)
                )
            })?;
            println!("Disassociated from the current network");
        }

        Commands::Power { interface, state } => {
            let setup = require_networksetup()?;
            let result = match state {
                PowerState::On => setup.up(interface),
                PowerState::Off => setup.down(interface),
            };
            result.with_context(|| {
                format!(
                    "{} Failed to set power state of {}",
                    logging::error_code(ErrorCode::PowerFailed),
                    interface
                )
            })?;
            println!(
                "Turned {} {}",
                interface,
                match state {
                    PowerState::On => "on",
                    PowerState::Off => "off",
                }
            );
        }

        Commands::MapNetworks {
            interval,
            duration,
            max_networks,
            ssid_filter,
        } => {
            let airport = require_airport()?;
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let filename = format!(
                "network_map{}_{}.csv",
                ssid_filter
                    .as_ref()
                    .map(|s| format!("_{}", s))
                    .unwrap_or_default(),
                timestamp
            );

            println!("Starting network mapping:");
            println!("Scan interval: {} seconds", interval);
            println!("Total duration: {} seconds", duration);
            println!("Networks per scan: {}", max_networks);
            if let Some(ssid) = ssid_filter {
                println!("Filtering for SSID: {}", ssid);
            }
            println!("Output file: {}", filename);

            map_networks(
                &airport,
                *interval,
                *duration,
                *max_networks,
                &filename,
                ssid_filter.as_deref(),
            )
            .with_context(|| {
                format!(
                    "{} Network mapping failed",
                    logging::error_code(ErrorCode::MappingFailed)
                )
            })?;

            println!("\nMapping completed. Results saved to: {}", filename);
        }
    }

    Ok(())
}

fn require_airport() -> Result<AirPort> {
    let airport = AirPort::new();
    if !airport.is_installed() {
        return Err(anyhow::anyhow!(
            "{} airport executable not found at its framework location",
            logging::error_code(ErrorCode::ToolMissing)
        ));
    }
    Ok(airport)
}

fn require_networksetup() -> Result<NetworkSetup> {
    let setup = NetworkSetup::new();
    if !setup.is_installed() {
        return Err(anyhow::anyhow!(
            "{} networksetup not found on PATH",
            logging::error_code(ErrorCode::ToolMissing)
        ));
    }
    Ok(setup)
}

fn print_networks(networks: &[WirelessNetwork]) {
    println!(
        "{:<32} {:<17} {:>5} {:>7} {:>2} {:>3} SECURITY",
        "SSID", "BSSID", "RSSI", "CHANNEL", "HT", "CC"
    );
    for network in networks {
        let security = network
            .security
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:<32} {:<17} {:>5} {:>7} {:>2} {:>3} {}",
            network.ssid,
            network.bssid,
            network.rssi,
            network.channel,
            if network.ht { "Y" } else { "N" },
            network.country_code.as_deref().unwrap_or("--"),
            security
        );
    }
}

fn print_interface(iface: &WirelessInterface) {
    println!("Interface: {}", iface.name);
    println!("  Vendor:   {}", iface.vendor);
    println!("  Model:    {}", iface.model);
    println!("  Status:   {}", iface.status);
    if let Some(firmware) = &iface.firmware {
        println!("  Firmware: {}", firmware);
    }
    if let Some(mac) = &iface.mac_address {
        println!("  MAC:      {}", mac);
    }
}

fn map_networks(
    airport: &AirPort,
    interval: u64,
    duration: u64,
    max_networks: usize,
    filename: &str,
    ssid_filter: Option<&str>,
) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .open(filename)
        .with_context(|| format!("Failed to create output file: {}", filename))?;

    writeln!(file, "timestamp,ssid,bssid,rssi,channel,ht,country,security")?;

    let deadline = Instant::now() + Duration::from_secs(duration);
    while Instant::now() < deadline {
        let scan_started = Instant::now();
        let mut networks = airport.scan()?;
        if let Some(ssid) = ssid_filter {
            networks.retain(|network| network.ssid == ssid);
        }
        // Strongest first, then log the top slice.
        networks.sort_by(|a, b| b.rssi.cmp(&a.rssi));
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        for network in networks.iter().take(max_networks) {
            let security = network
                .security
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                file,
                "{},{},{},{},{},{},{},{}",
                timestamp,
                network.ssid,
                network.bssid,
                network.rssi,
                network.channel,
                network.ht,
                network.country_code.as_deref().unwrap_or_default(),
                security
            )?;
        }

        let elapsed = scan_started.elapsed().as_secs();
        if elapsed < interval {
            thread::sleep(Duration::from_secs(interval - elapsed));
        }
    }

    Ok(())
}
