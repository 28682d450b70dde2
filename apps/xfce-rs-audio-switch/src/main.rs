use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use xfce_rs_audio_switch::cli::{self, Cli};
use xfce_rs_audio_switch::config::SwitcherConfig;
use xfce_rs_audio_switch::pulseaudio::PulseAudioHost;

fn main() -> ExitCode {
    // stdout carries the command result, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    info!("Audio switcher starting: {:?}", args.command);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = SwitcherConfig::load(args.config.as_deref(), |key| std::env::var(key).ok())?;
    let stdout = std::io::stdout();
    cli::run(&args.command, &config, PulseAudioHost::new(), &mut stdout.lock())
}
