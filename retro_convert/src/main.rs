mod cli;
mod convert;

use clap::Parser;
use cli::Args;
use convert::AppError;

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    match &args.log {
        Some(path) => lib_retro::init_logging(path)?,
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init(),
    }

    if args.list_presets {
        println!("{}", convert::list_presets());
        return Ok(());
    }

    convert::run(&args)
}
