//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `userstore_core` linkage.
//! - Optionally probe a live server: connect, list collections, close.
//!
//! Usage: `userstore_cli [connection-string]`

use std::process::ExitCode;
use userstore_core::{default_log_level, init_logging, Repository};

fn main() -> ExitCode {
    println!("userstore_core version={}", userstore_core::core_version());

    let Some(dsn) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    if let Err(err) = init_logging(default_log_level(), None) {
        eprintln!("logging disabled: {err}");
    }

    match probe(&dsn) {
        Ok(names) => {
            println!("collections={}", names.join(","));
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("event=cli_probe module=cli status=error error={err}");
            eprintln!("probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn probe(dsn: &str) -> userstore_core::RepoResult<Vec<String>> {
    let mut repo = Repository::connect(dsn)?;
    println!("database={}", repo.database_name());
    let names = repo.list_collection_names();
    repo.close()?;
    names
}
