use clap::Parser;
use classdesk_client::commands::Cli;
use classdesk_client::config::ClientConfig;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Logs go to stderr so command output stays clean
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match classdesk_client::run(cli, config).await {
        Ok(screen) => println!("{screen}"),
        Err(report) => match classdesk_client::user_facing_message(&report) {
            Some(message) => {
                eprintln!("Error: {message}");
                std::process::exit(1);
            }
            None => return Err(report),
        },
    }

    Ok(())
}
