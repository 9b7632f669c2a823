use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches, Command};
use fixture_ref::{parse, AliasConfig, RawReference, ReferenceFields};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("parse", submatches)) => run_parse(submatches),
        Some(("serve", submatches)) => run_serve(submatches).await,
        _ => ExitCode::FAILURE,
    }
}

fn cli() -> Command {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let aliases = Arg::new("aliases")
        .long("aliases")
        .value_name("FILE")
        .help("JSON file of alias phrases and the references they stand for.");

    Command::new("fixture-ref")
        .version(VERSION)
        .propagate_version(true)
        .about("Resolve natural language fixture references.")
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a single reference and print it as JSON")
                .arg(
                    Arg::new("structured")
                        .long("structured")
                        .action(ArgAction::SetTrue)
                        .help("Read the reference as a JSON object with factory, index and label keys."),
                )
                .arg(aliases.clone())
                .arg(
                    Arg::new("reference")
                        .required(true)
                        .help("The reference, e.g. 'the 2nd colour' or 'user: \"fred\"'."),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the reference parser over HTTP")
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .value_name("ADDR")
                        .default_value("0.0.0.0:3000")
                        .help("Address to listen on."),
                )
                .arg(aliases),
        )
}

fn load_aliases(matches: &ArgMatches) -> Option<AliasConfig> {
    match matches.get_one::<String>("aliases") {
        Some(filename) => match AliasConfig::load(Path::new(filename)) {
            Ok(config) => Some(config),
            Err(err) => {
                error!("Failed loading aliases from {}: {}", filename, err);
                None
            }
        },
        None => Some(AliasConfig::default()),
    }
}

fn run_parse(matches: &ArgMatches) -> ExitCode {
    let Some(config) = load_aliases(matches) else {
        return ExitCode::FAILURE;
    };
    let Some(text) = matches.get_one::<String>("reference") else {
        return ExitCode::FAILURE;
    };

    let input = if matches.get_flag("structured") {
        match serde_json::from_str::<ReferenceFields>(text) {
            Ok(fields) => RawReference::Structured(fields),
            Err(err) => {
                error!("Invalid structured reference: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        RawReference::from(text.as_str())
    };

    match parse(input, Some(&config)) {
        Ok(reference) => match serde_json::to_string(&reference) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("Failed encoding reference: {}", err);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("error[{}]: {}", err.reason(), err);
            ExitCode::FAILURE
        }
    }
}

async fn run_serve(matches: &ArgMatches) -> ExitCode {
    let Some(config) = load_aliases(matches) else {
        return ExitCode::FAILURE;
    };
    let Some(bind) = matches.get_one::<String>("bind") else {
        return ExitCode::FAILURE;
    };

    let app = fixture_ref::api::create_app(Arc::new(config));

    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed binding {}: {}", bind, err);
            return ExitCode::FAILURE;
        }
    };

    info!("Listening on http://{}", bind);
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::cli;

    #[test]
    fn test_serve_bind_default() {
        let matches = cli().try_get_matches_from(["fixture-ref", "serve"]).unwrap();
        let (_, serve) = matches.subcommand().unwrap();
        assert_eq!(serve.get_one::<String>("bind").map(String::as_str), Some("0.0.0.0:3000"));
    }

    #[test]
    fn test_serve_bind_override() {
        let matches = cli()
            .try_get_matches_from(["fixture-ref", "serve", "--bind", "127.0.0.1:8080"])
            .unwrap();
        let (_, serve) = matches.subcommand().unwrap();
        assert_eq!(serve.get_one::<String>("bind").map(String::as_str), Some("127.0.0.1:8080"));
    }

    #[test]
    fn test_parse_structured_flag() {
        let matches = cli()
            .try_get_matches_from(["fixture-ref", "parse", "--structured", "{\"factory\": \"colour\"}"])
            .unwrap();
        let (name, parse) = matches.subcommand().unwrap();
        assert_eq!(name, "parse");
        assert!(parse.get_flag("structured"));
        assert!(parse.get_one::<String>("aliases").is_none());
    }
}
