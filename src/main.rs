use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "timetable-parser-rust",
    version,
    about = "Reconstruct weekly class schedules from positioned page fragments"
)]
struct Cli {
    /// Fragment page dump to parse (JSON: one array of {text, x, y} objects per page)
    #[arg(short = 'd', long = "data")]
    data: Option<String>,

    /// Discover and download the current week's schedule document
    #[arg(long = "fetch")]
    fetch: bool,

    /// Destination path for --fetch
    #[arg(short = 'O', long = "output", default_value = "orario.pdf")]
    output: String,

    /// Class to look up (e.g. 3BC)
    #[arg(short = 'c', long = "classe")]
    classe: Option<String>,

    /// Weekday to look up (e.g. lunedì)
    #[arg(short = 'g', long = "giorno")]
    giorno: Option<String>,

    /// Hour to look up (e.g. 8h00)
    #[arg(short = 'o', long = "ora")]
    ora: Option<String>,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    timetable_parser_rust::logging::init(cli.verbose)?;

    let output = timetable_parser_rust::run(timetable_parser_rust::Config {
        data: cli.data,
        fetch: cli.fetch,
        output: cli.output,
        classe: cli.classe,
        giorno: cli.giorno,
        ora: cli.ora,
        settings_path: cli.read_settings,
        verbose: cli.verbose,
    })
    .await?;

    println!("{}", output);
    Ok(())
}
