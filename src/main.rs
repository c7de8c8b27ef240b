mod app;
mod cli;
mod config;
mod error;
mod launcher;
mod logging;
mod mailto;
mod model;
mod providers;
mod report;

use anyhow::Result;

use app::App;
use report::ReportWeek;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = cli::parse_args(&args)?;
    if args.help {
        cli::print_help();
        return Ok(());
    }

    let path = args.config.unwrap_or_else(config::config_path);
    let config = config::load_config(&path)?;

    logging::init(args.debug || config.debug);

    let client = providers::create_client(&config);
    let app = App::new(config, client);
    app.export(ReportWeek::current(), args.dry_run).await
}
