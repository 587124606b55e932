use clap::Parser;
use showdex::cli::{Cli, Commands};
use showdex::db::Store;
use showdex::{Config, run};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        if Config::create_default_if_missing()? {
            println!("Created config.toml - edit it and run `showdex serve`.");
        } else {
            println!("config.toml already exists.");
        }
        return Ok(());
    }

    let config = Config::load()?;
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;

    match cli.command {
        None | Some(Commands::Serve) => runtime.block_on(run(config)),
        Some(Commands::Ping) => runtime.block_on(ping(config)),
        Some(Commands::Init) => unreachable!("handled above"),
    }
}

async fn ping(config: Config) -> anyhow::Result<()> {
    let store = Store::connect(&config.database).await?;
    store.ping().await?;
    println!("Database reachable");
    Ok(())
}
