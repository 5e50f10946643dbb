// SPDX-License-Identifier: MPL-2.0
use metrics_view::app::{command, App, Command, Flags};
use metrics_view::environment::Environment;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{}", command::USAGE);
        return ExitCode::SUCCESS;
    }

    let flags = match parse_flags(&mut args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{}\n\n{}", err, command::USAGE);
            return ExitCode::FAILURE;
        }
    };

    let parsed = command::free_args(args.finish()).and_then(|free| Command::parse(&free));
    let command = match parsed {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let app = match App::init(flags, Environment::detect()).await {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Failed to start: {}", err);
            return ExitCode::FAILURE;
        }
    };
    for warning in &app.warnings {
        log::warn!("{}", warning);
    }

    let mut stdout = std::io::stdout().lock();
    match command.run(&app, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    Ok(Flags {
        lang: args.opt_value_from_str("--lang")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        no_storage: args.contains("--no-storage"),
    })
}
