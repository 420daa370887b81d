use relnotes::{Result, cli, command};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("relnotes")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

async fn run() -> Result<()> {
    let matches = cli::command().get_matches();

    initialize_logger(matches.get_flag("debug"))?;

    match matches.subcommand() {
        Some((command::lint::NAME, sub_matches)) => {
            command::lint::execute(sub_matches).await
        }
        Some((command::release::NAME, sub_matches)) => {
            command::release::execute(sub_matches).await
        }
        // clap enforces that one of the known subcommands is present
        _ => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
