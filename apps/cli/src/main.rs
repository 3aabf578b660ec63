use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use urlc::domain::config::AppConfig;
use urlc::kernel::config::load_config;
use urlc_cli::Cli;
use urlc_logger::Logger;

#[urlc_runtime::main(lightweight)]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let logger = Logger::builder().name("url-collector").level(cli.log_level());
    let _log = match &cli.log_dir {
        Some(dir) => logger.path(dir).init()?,
        None => logger.init()?,
    };

    let config: AppConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    urlc_cli::run(&cli, config).await
}
