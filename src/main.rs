mod cli;
mod settings;

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let invocation = match cli::parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(2);
        }
    };

    let settings = settings::load_settings(&invocation.settings_path());

    match cli::run(&invocation, &settings) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
