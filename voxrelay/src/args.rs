use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use voxrelay_server::Service;

/// Speech-to-text, translation and speech synthesis services
#[derive(Debug, Parser)]
#[command(name = "voxrelay", about = "Speech-to-text, translation and text-to-speech HTTP services")]
pub struct Args {
    /// Service process to run
    #[arg(value_enum)]
    pub service: ServiceArg,

    /// Path to configuration file
    #[arg(short, long, default_value = "voxrelay.toml", env = "VOXRELAY_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address of the selected service
    #[arg(long, env = "VOXRELAY_LISTEN")]
    pub listen: Option<SocketAddr>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ServiceArg {
    /// Speech-to-text and the translation proxy
    Backend,
    /// Translation service
    Translation,
    /// Text-to-speech service
    Tts,
}

impl From<ServiceArg> for Service {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Backend => Self::Backend,
            ServiceArg::Translation => Self::Translation,
            ServiceArg::Tts => Self::Tts,
        }
    }
}
