//! ID1FS - Entry Point
//!
//! One-shot command runner: every invocation loads the configuration, opens
//! the sandbox, runs a single operation and exits.

use clap::Parser;
use log::info;
use std::process::ExitCode;

use id1fs::cli::responses;
use id1fs::cli::{self, Args, Commands};
use id1fs::error::handlers::{error_to_exit_code, handle_error};
use id1fs::error::StorageError;
use id1fs::operations;
use id1fs::{Id1fsConfig, Id1fsError, Sandbox};

fn main() -> ExitCode {
    // RUST_LOG overrides; warnings are shown by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            handle_error(&e);
            println!("{}", responses::format_error(&e));
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

fn run(args: Args) -> Result<String, Id1fsError> {
    let config = Id1fsConfig::load(args.config.as_deref(), args.root.as_deref())?;
    let sandbox = Sandbox::open(config)?;

    info!("Running {:?}", args.command);

    let output = match args.command {
        Commands::Create(target) => {
            let (name, kind) = target.target().ok_or_else(missing_target)?;
            responses::format_create(&operations::create_item(&sandbox, name, kind)?)
        }
        Commands::Delete(target) => {
            let (name, kind) = target.target().ok_or_else(missing_target)?;
            responses::format_delete(&operations::delete_item(&sandbox, name, kind)?)
        }
        Commands::List {
            path,
            files,
            dirs,
            hidden,
            long,
            count,
            show_content,
        } => {
            let show_content = show_content || sandbox.config().list_show_file_content;
            let options = cli::list_options(files, dirs, hidden, long, count, show_content);
            responses::format_list(&operations::list_directory(&sandbox, &path, options)?)
        }
        Commands::Display {
            file,
            numbered,
            lines,
            chars,
        } => {
            let mode = cli::display_mode(numbered, lines, chars);
            responses::format_display(&operations::display_file_content(&sandbox, &file, mode)?)
        }
        Commands::Count {
            file,
            characters,
            words,
            lines: _,
        } => {
            let mode = cli::count_mode(characters, words);
            responses::format_count(&operations::count_file(&sandbox, &file, mode)?)
        }
        Commands::Login => responses::format_login(&operations::login(&sandbox)?),
        Commands::Logout => responses::format_logout(&operations::logout(&sandbox)?),
        Commands::Status => responses::format_status(&operations::status(&sandbox)),
    };

    Ok(output)
}

// clap's argument group already enforces this
fn missing_target() -> Id1fsError {
    StorageError::InvalidName(String::new()).into()
}
