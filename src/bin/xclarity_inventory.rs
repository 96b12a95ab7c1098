/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use clap::Parser;
use log::debug;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use xclarity_inventory::{
    create_service, write_raw, write_records, ConfigurationProvider, OutputFormat,
    TomlConfigurationProvider, DEFAULT_CONFIG_PATH,
};

#[derive(Parser, Debug)]
#[command(
    name = "xclarity_inventory",
    version,
    about = "Extract node hardware inventory from an XClarity management appliance"
)]
struct Opt {
    /// Path to xclarity_inventory configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output raw JSON (same as --format raw)
    #[arg(long)]
    raw: bool,

    /// Output format (table, csv, csv-memory or raw)
    #[arg(long, default_value = "table")]
    format: OutputFormat,

    /// Appliance password, overriding the configuration file
    #[arg(long, env = "XCLARITY_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Opt {
    fn output_format(&self) -> OutputFormat {
        if self.raw {
            OutputFormat::Raw
        } else {
            self.format
        }
    }
}

/// Filter used when `RUST_LOG` is unset; `info` keeps trust-store fallbacks visible
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_logging(verbose: bool) {
    let level = default_log_filter(verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

async fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    let format = opt.output_format();

    let config = TomlConfigurationProvider::new(&opt.config)
        .with_password(opt.password)
        .appliance_config()?;
    debug!("Loaded configuration from {}", opt.config.display());

    let service = create_service(config)?;

    if format == OutputFormat::Raw {
        let raw = service.fetch_document().await?;
        let mut out = io::stdout().lock();
        write_raw(&mut out, &raw)?;
    } else {
        let extraction = service.collect_nodes().await?;
        let mut out = io::stdout().lock();
        write_records(&mut out, &extraction.records, format)?;
        out.flush()?;
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let opt = Opt::parse();
    init_logging(opt.verbose);

    match run(opt).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
