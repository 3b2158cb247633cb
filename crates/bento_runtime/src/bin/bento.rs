//! Bento demo entry point.

use std::env;
use std::process::ExitCode;

use bento_runtime::demo::{DemoConfig, moving_entities, run_demo};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    demo: DemoConfig,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid {flag} value: {raw}"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--stress" => config.demo = DemoConfig::stress(),
            "-n" | "--entities" => {
                i += 1;
                config.demo.entities = parse(value(args, i, flag)?, flag)?;
            }
            "-t" | "--ticks" => {
                i += 1;
                config.demo.ticks = parse(value(args, i, flag)?, flag)?;
            }
            "--delta" => {
                i += 1;
                config.demo.delta = parse(value(args, i, flag)?, flag)?;
            }
            "--seed" => {
                i += 1;
                config.demo.seed = parse(value(args, i, flag)?, flag)?;
            }
            "--report-every" => {
                i += 1;
                config.demo.report_every = parse(value(args, i, flag)?, flag)?;
            }
            "--arena" => {
                i += 1;
                config.demo.arena = parse(value(args, i, flag)?, flag)?;
            }
            arg => return Err(format!("unknown option: {arg}").into()),
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("bento {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing::info!(
        entities = config.demo.entities,
        ticks = config.demo.ticks,
        seed = config.demo.seed,
        "starting demo"
    );
    let storage = run_demo(&config.demo)?;

    println!("\x1b[1;36m=== Final State ===\x1b[0m");
    println!("Entities: {}", storage.len());
    println!("Containers: {}", storage.container_count());
    println!("Moving: {}", moving_entities(&storage).len());
    for container in storage.containers() {
        println!("  - {} x {}", container.signature(), container.len());
    }

    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mBento\x1b[0m - Archetype storage demo

\x1b[1mUSAGE:\x1b[0m
    bento [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help            Print help information
    -V, --version         Print version information
    -n, --entities N      Entities to spawn (default 10)
    -t, --ticks N         Ticks to run (default 10)
        --delta F         Time step per tick (default 1.0)
        --seed N          Seed for the spawned population (default 42)
        --report-every N  Log a report every N ticks, 0 for never (default 1)
        --arena F         Arena half-width; entities outside stop (default 100)
        --stress          Use the stress preset (10000 entities, 100 ticks)

\x1b[1mENVIRONMENT:\x1b[0m
    RUST_LOG              Log filter (default \"info\"), e.g. RUST_LOG=bento_storage=debug"
    );
}
