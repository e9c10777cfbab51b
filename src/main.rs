//! CLI entrypoint for `ohc-uploader`.
//!
//! Parses the single mode flag, validates the configured key, runs either
//! the task-list dump or the collect/diff/submit sequence against the
//! current directory, and maps the outcome onto the documented exit codes:
//! 0 success or no-op, 1 overflow written, 2 misconfiguration, 3 service
//! failure, 4 network failure.
use clap::{Parser, ValueEnum};
use log::{LevelFilter, error};
use ohc_uploader::{
    api::OhcClient,
    config::Config,
    engine::{run_list, run_upload},
    report::{render_outcome, render_response},
};

#[derive(Parser, Debug)]
#[command(
    name = "ohc-uploader",
    version,
    about = "One-shot duplicate-safe hash uploader for OnlineHashCrack"
)]
struct Args {
    /// List current tasks on the account and exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    match args.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }
    std::process::exit(run(&args));
}

fn run(args: &Args) -> i32 {
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        error!("{e}");
        return e.exit_code();
    }
    let client = match OhcClient::new(config.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return e.exit_code();
        }
    };

    if args.list {
        println!("Fetching the task list from {}...", config.api_url);
        return match run_list(&client) {
            Ok(resp) => {
                print!("{}", render_response(&resp));
                if resp.is_success() { 0 } else { 3 }
            }
            Err(e) => {
                error!("{e}");
                e.exit_code()
            }
        };
    }

    let dir = match std::env::current_dir() {
        Ok(d) => d,
        Err(e) => {
            error!("cannot determine the working directory: {e}");
            return 1;
        }
    };
    match run_upload(&config, &client, &dir) {
        Ok(outcome) => {
            println!("{}", render_outcome(&outcome, &config));
            outcome.exit_code()
        }
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    }
}
