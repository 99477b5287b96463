//! free-the-wheel CLI: switch Logitech wheels into native mode.

use anyhow::Result;
use clap::Parser;
use free_the_wheel_core::controller::RequestedMode;
use free_the_wheel_core::device::HidBus;
use free_the_wheel_core::fleet::{configure_all, FleetReport};
use free_the_wheel_core::range::{WheelRange, WheelSettings};
use tracing_subscriber::EnvFilter;

/// Log level when `RUST_LOG` is unset; device failures are logged at warn.
const DEFAULT_LOG_LEVEL: &str = "warn";

const BANNER: &str = "\
================================================================================
=                              Free The Wheel (FTW)                            =
=   Switches Logitech wheels into native mode with full rotation range.       =
================================================================================";

const USAGE_HINT: &str = "\
=   --info       - display list of supported devices.                          =
=   --restore    - Restore your wheel to restricted (default) mode.            =
================================================================================";

#[derive(Parser)]
#[command(
    name = "free-the-wheel",
    version,
    about = "Enable native mode and full rotation range on Logitech wheels"
)]
struct Cli {
    /// Display connected supported wheels without changing them.
    #[arg(long, conflicts_with = "restore")]
    info: bool,
    /// Return wheels to restricted (default) behavior.
    #[arg(long)]
    restore: bool,
    /// Rotation range in degrees applied in native mode (40-900).
    #[arg(long, default_value_t = WheelRange::MAX.degrees())]
    range: u16,
    /// Print the per-wheel report as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn mode(&self) -> RequestedMode {
        if self.info {
            RequestedMode::ReportOnly
        } else if self.restore {
            RequestedMode::Restricted
        } else {
            RequestedMode::FullRange
        }
    }
}

fn print_report(report: &FleetReport) {
    if report.wheels.is_empty() {
        println!("No supported Logitech wheels found.");
        return;
    }
    for wheel in &report.wheels {
        let outcome = match (report.mode, wheel.changed) {
            (RequestedMode::ReportOnly, _) => "",
            (_, true) => "  changed",
            (_, false) => "  unchanged",
        };
        println!(
            "Device ID={:x}   Product ID={} ({}){}",
            wheel.key, wheel.product, wheel.state, outcome
        );
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = WheelSettings {
        full_range: WheelRange::new(cli.range)?,
        ..WheelSettings::default()
    };
    let mode = cli.mode();

    if !cli.json {
        match mode {
            RequestedMode::FullRange => {
                println!("Looking for supported wheels to enable in NATIVE mode. . .\n")
            }
            RequestedMode::Restricted => {
                println!("Returning wheels to RESTRICTED (Default) mode  . . .\n")
            }
            RequestedMode::ReportOnly => println!("Displaying list of supported wheels:\n"),
        }
    }

    let bus = HidBus::new()?;
    let report = configure_all(&bus, mode, &settings)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        if mode != RequestedMode::ReportOnly && !report.changed() && !report.wheels.is_empty() {
            println!("\nNo wheel was changed; see the warnings above for details.");
            println!("Opening wheels may require root or a udev rule granting hidraw access.");
        }
    }
    Ok(())
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();

    // Bad arguments are reported like any other failure: no devices touched, exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };

    if !cli.json {
        println!("{BANNER}");
        if !cli.info && !cli.restore {
            println!("{USAGE_HINT}");
        }
    }

    // Failures are reported, never turned into a non-zero exit.
    if let Err(e) = run(&cli) {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
    }

    if !cli.json {
        println!("\nDone.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_is_full_range() {
        let cli = Cli::parse_from(["free-the-wheel"]);
        assert_eq!(cli.mode(), RequestedMode::FullRange);
        assert_eq!(cli.range, 900);
    }

    #[test]
    fn info_and_restore_select_modes() {
        let cli = Cli::parse_from(["free-the-wheel", "--info"]);
        assert_eq!(cli.mode(), RequestedMode::ReportOnly);
        let cli = Cli::parse_from(["free-the-wheel", "--restore"]);
        assert_eq!(cli.mode(), RequestedMode::Restricted);
    }

    #[test]
    fn info_conflicts_with_restore() {
        assert!(Cli::try_parse_from(["free-the-wheel", "--info", "--restore"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected_before_any_run() {
        assert!(Cli::try_parse_from(["free-the-wheel", "--bogus"]).is_err());
    }

    #[test]
    fn default_log_filter_shows_warnings() {
        let filter = EnvFilter::new(DEFAULT_LOG_LEVEL);
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing::level_filters::LevelFilter::WARN)
        );
    }

    #[test]
    fn range_flag_is_validated_at_run() {
        let cli = Cli::parse_from(["free-the-wheel", "--range", "1080"]);
        assert!(WheelRange::new(cli.range).is_err());
    }
}
