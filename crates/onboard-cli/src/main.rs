use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use onboard_cli::{execute, load_config, load_plan, Action};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ONBOARD_LOG";

fn plan_arg() -> Arg {
    Arg::new("plan")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Plan file (.toml or .json)")
}

fn json_arg(help: &'static str) -> Arg {
    Arg::new("json").long("json").action(ArgAction::SetTrue).help(help)
}

fn cli() -> Command {
    Command::new("onboard")
        .version(onboard_cli::VERSION)
        .about("Check and chart project onboarding plans")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (TOML)"),
        )
        .subcommand(
            Command::new("validate")
                .about("Check phase dates against the scheduling rules")
                .arg(plan_arg())
                .arg(json_arg("Output the report as JSON")),
        )
        .subcommand(
            Command::new("timeline")
                .about("Lay out phases on the project timeline")
                .arg(plan_arg())
                .arg(json_arg("Output the layout as JSON")),
        )
        .subcommand(
            Command::new("summary")
                .about("Render the project summary document")
                .arg(plan_arg())
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .action(ArgAction::SetTrue)
                        .help("Output the export manifest as JSON"),
                ),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<bool> {
    let (name, args) = matches
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("no command given"))?;
    let action = match name {
        "validate" => Action::Validate { json: args.get_flag("json") },
        "timeline" => Action::Timeline { json: args.get_flag("json") },
        "summary" => Action::Summary { manifest: args.get_flag("manifest") },
        other => anyhow::bail!("unknown command '{other}'"),
    };
    let plan = args
        .get_one::<PathBuf>("plan")
        .ok_or_else(|| anyhow::anyhow!("missing plan path"))?;

    let config_path = args
        .get_one::<PathBuf>("config")
        .or_else(|| matches.get_one::<PathBuf>("config"));
    let config = load_config(config_path.map(PathBuf::as_path))?;
    let form = load_plan(plan, config)?;
    let outcome = execute(&form, action)?;

    print!("{}", outcome.output);
    if !outcome.output.ends_with('\n') {
        println!();
    }
    Ok(outcome.success)
}

fn main() -> ExitCode {
    init_tracing();
    let matches = cli().get_matches();

    match run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
