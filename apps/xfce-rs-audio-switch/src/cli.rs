// Command-line surface and command dispatch
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::config::SwitcherConfig;
use crate::directory::{DeviceDirectory, SoundEffectsSync};
use crate::host::AudioHost;
use crate::lists::{parse_favorites, Blocklist};
use crate::presenter::ItemList;
use crate::rotation::Rotation;
use crate::selector::{resolve_by_index, resolve_by_name, Selector};
use crate::{DeviceId, Direction, SwitchError};

#[derive(Parser, Debug)]
#[command(name = "xfce-rs-audio-switch", version, about = "List and switch default audio devices")]
pub struct Cli {
    /// Config file (defaults to <config dir>/xfce-rs/audio-switch.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
#[command(rename_all = "snake_case")]
pub enum Command {
    /// Print devices as launcher JSON
    List {
        direction: Direction,
        /// Newline-separated device names to hide
        blocklist: Option<String>,
    },
    /// Make the device with this id the default
    SwitchById {
        direction: Direction,
        device_id: String,
    },
    /// Make the device at INDEX of a newline-separated list the default
    SwitchByName {
        direction: Direction,
        index: String,
        /// Falls back to the configured favorites
        devices: Option<String>,
    },
    /// Print raw device names, one per line
    PrintDeviceNames { direction: Direction },
    /// Switch to the next available configured favorite
    RotateFavorites { direction: Direction },
}

impl Command {
    pub fn direction(&self) -> Direction {
        match self {
            Command::List { direction, .. }
            | Command::SwitchById { direction, .. }
            | Command::SwitchByName { direction, .. }
            | Command::PrintDeviceNames { direction }
            | Command::RotateFavorites { direction } => *direction,
        }
    }
}

/// Run one command against `host`, writing the result to `out`.
pub fn run<H: AudioHost, W: Write>(
    command: &Command,
    config: &SwitcherConfig,
    host: H,
    out: &mut W,
) -> Result<()> {
    let direction = command.direction();
    let mut directory =
        DeviceDirectory::new(host, direction).with_sound_effects(SoundEffectsSync::from_config(config));
    let favorites = config.favorites(direction);

    debug!("Running {:?}", command);
    match command {
        Command::List { blocklist, .. } => {
            let blocklist = match blocklist {
                Some(raw) => Blocklist::parse(raw),
                None => config.blocklist.clone(),
            };
            let default = directory.default_device()?;
            let devices = directory.list_devices()?;

            let items = Selector::new(&blocklist, favorites).presentation_set(&devices, Some(&default));
            writeln!(out, "{}", ItemList::from_items(&items, direction).to_json()?)?;
        }
        Command::SwitchById { device_id, .. } => {
            let id: DeviceId = device_id.parse()?;
            let device = directory.set_default(id)?;
            writeln!(out, "{}", device.name)?;
        }
        Command::SwitchByName { index, devices, .. } => {
            let index: usize = index.trim().parse().map_err(|_| SwitchError::InvalidArgument {
                reason: format!("invalid device index: {:?}", index),
            })?;
            let names = match devices {
                Some(raw) => parse_favorites(raw).names(),
                None => favorites.names(),
            };
            let name = resolve_by_index(&names, index)?;

            let live = directory.list_devices()?;
            let id = resolve_by_name(&live, name)?.id;
            let device = directory.set_default(id)?;
            writeln!(out, "{}", device.name)?;
        }
        Command::PrintDeviceNames { .. } => {
            for device in directory.list_devices()? {
                writeln!(out, "{}", device.name)?;
            }
        }
        Command::RotateFavorites { .. } => {
            let names = favorites.names();
            // An unknown default (e.g. an unplugged sink) starts at the first favorite
            let current = if names.is_empty() {
                None
            } else {
                directory
                    .default_device()
                    .map_err(|e| warn!("No current default {}: {}", direction, e))
                    .ok()
            };
            let device = Rotation::new(&names).rotate(&mut directory, current.as_ref())?;
            writeln!(out, "{}", device.name)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SoundEffectsPolicy;
    use crate::lists::parse_favorites;
    use crate::testing::FakeHost;

    fn host() -> FakeHost {
        FakeHost::new()
            .with_output(1, "Built-in Speakers")
            .with_output(2, "USB Headset")
            .with_output(3, "HDMI")
            .with_input(4, "Built-in Microphone")
            .with_default(Direction::Output, 2)
            .with_default(Direction::Input, 4)
    }

    fn run_to_string(command: Command, config: &SwitcherConfig) -> Result<String> {
        let mut out = Vec::new();
        run(&command, config, host(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn switch_error(result: Result<String>) -> SwitchError {
        result.unwrap_err().downcast::<SwitchError>().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["xfce-rs-audio-switch", "list", "output"]).unwrap();
        assert_eq!(
            cli.command,
            Command::List { direction: Direction::Output, blocklist: None }
        );

        let cli = Cli::try_parse_from(["xfce-rs-audio-switch", "switch_by_id", "input", "73"]).unwrap();
        assert_eq!(
            cli.command,
            Command::SwitchById { direction: Direction::Input, device_id: "73".into() }
        );

        let cli = Cli::try_parse_from([
            "xfce-rs-audio-switch",
            "--config",
            "/tmp/a.toml",
            "switch_by_name",
            "output",
            "1",
            "a\nb",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/a.toml")));
        assert_eq!(cli.command.direction(), Direction::Output);

        assert!(Cli::try_parse_from(["xfce-rs-audio-switch", "print_device_names", "input"]).is_ok());
        assert!(Cli::try_parse_from(["xfce-rs-audio-switch", "rotate_favorites", "output"]).is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_usage() {
        assert!(Cli::try_parse_from(["xfce-rs-audio-switch"]).is_err());
        assert!(Cli::try_parse_from(["xfce-rs-audio-switch", "list"]).is_err());
        assert!(Cli::try_parse_from(["xfce-rs-audio-switch", "list", "sideways"]).is_err());
        assert!(Cli::try_parse_from(["xfce-rs-audio-switch", "switch_by_id", "output"]).is_err());
        assert!(Cli::try_parse_from(["xfce-rs-audio-switch", "explode", "output"]).is_err());
    }

    #[test]
    fn test_list_outputs_json() {
        let config = SwitcherConfig {
            output_favorites: parse_favorites("USB Headset;Headset"),
            ..Default::default()
        };
        let output = run_to_string(
            Command::List { direction: Direction::Output, blocklist: Some("HDMI".into()) },
            &config,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let items = value["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "Built-in Speakers");
        assert_eq!(items[0]["icon"]["path"], "./icons/output.png");
        assert_eq!(items[1]["title"], "Headset");
        assert_eq!(items[1]["uid"], "USB Headset");
        assert_eq!(items[1]["arg"], "2");
        assert_eq!(items[1]["icon"]["path"], "./icons/output_selected.png");
    }

    #[test]
    fn test_list_uses_configured_blocklist_without_argument() {
        let config = SwitcherConfig {
            blocklist: Blocklist::parse("Built-in Speakers\nHDMI"),
            ..Default::default()
        };
        let output = run_to_string(
            Command::List { direction: Direction::Output, blocklist: None },
            &config,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_switch_by_id() {
        let config = SwitcherConfig::default();
        let output = run_to_string(
            Command::SwitchById { direction: Direction::Output, device_id: "3".into() },
            &config,
        )
        .unwrap();
        assert_eq!(output, "HDMI\n");

        let err = switch_error(run_to_string(
            Command::SwitchById { direction: Direction::Output, device_id: "three".into() },
            &config,
        ));
        assert!(matches!(err, SwitchError::InvalidArgument { .. }));
    }

    #[test]
    fn test_switch_by_name() {
        let config = SwitcherConfig::default();
        let output = run_to_string(
            Command::SwitchByName {
                direction: Direction::Output,
                index: "1".into(),
                devices: Some("HDMI\nBuilt-in Speakers;Speakers".into()),
            },
            &config,
        )
        .unwrap();
        assert_eq!(output, "Built-in Speakers\n");
    }

    #[test]
    fn test_switch_by_name_errors() {
        let config = SwitcherConfig::default();

        let err = switch_error(run_to_string(
            Command::SwitchByName {
                direction: Direction::Output,
                index: "2".into(),
                devices: Some("HDMI\nUSB Headset".into()),
            },
            &config,
        ));
        assert!(matches!(err, SwitchError::IndexOutOfRange { index: 2, len: 2 }));

        let err = switch_error(run_to_string(
            Command::SwitchByName {
                direction: Direction::Output,
                index: "-1".into(),
                devices: Some("HDMI".into()),
            },
            &config,
        ));
        assert!(matches!(err, SwitchError::InvalidArgument { .. }));

        let err = switch_error(run_to_string(
            Command::SwitchByName {
                direction: Direction::Output,
                index: "0".into(),
                devices: Some("Unplugged DAC".into()),
            },
            &config,
        ));
        assert!(matches!(err, SwitchError::DeviceNotFound { .. }));
    }

    #[test]
    fn test_switch_by_name_falls_back_to_favorites() {
        let config = SwitcherConfig {
            output_favorites: parse_favorites("HDMI;TV\nUSB Headset"),
            ..Default::default()
        };
        let output = run_to_string(
            Command::SwitchByName { direction: Direction::Output, index: "0".into(), devices: None },
            &config,
        )
        .unwrap();
        assert_eq!(output, "HDMI\n");
    }

    #[test]
    fn test_print_device_names() {
        let output = run_to_string(
            Command::PrintDeviceNames { direction: Direction::Input },
            &SwitcherConfig::default(),
        )
        .unwrap();
        assert_eq!(output, "Built-in Microphone\n");
    }

    #[test]
    fn test_rotate_favorites() {
        let config = SwitcherConfig {
            output_favorites: parse_favorites("Built-in Speakers\nUSB Headset;Headset\nHDMI"),
            sound_effects_policy: SoundEffectsPolicy::BestEffort,
            ..Default::default()
        };
        let output = run_to_string(
            Command::RotateFavorites { direction: Direction::Output },
            &config,
        )
        .unwrap();
        assert_eq!(output, "HDMI\n");
    }

    #[test]
    fn test_rotate_without_default_starts_at_first_favorite() {
        let config = SwitcherConfig {
            output_favorites: parse_favorites("Unplugged DAC\nUSB Headset"),
            ..Default::default()
        };
        let host = FakeHost::new().with_output(7, "USB Headset");
        let mut out = Vec::new();

        run(&Command::RotateFavorites { direction: Direction::Output }, &config, host, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "USB Headset\n");
    }

    #[test]
    fn test_rotate_without_favorites() {
        let err = switch_error(run_to_string(
            Command::RotateFavorites { direction: Direction::Input },
            &SwitcherConfig::default(),
        ));
        assert!(matches!(err, SwitchError::EmptyFavorites));
    }
}
