//! CLI smoke entry point.
//!
//! Opens a throwaway in-memory database so schema wiring can be checked
//! without the mobile shell.

use orderdesk_core::db::{migrations, open_db_in_memory};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("orderdesk_core ping={}", orderdesk_core::ping());
    println!("orderdesk_core version={}", orderdesk_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("orderdesk_core db=error {err}");
            return ExitCode::FAILURE;
        }
    };
    match migrations::current_user_version(&conn) {
        Ok(version) => {
            println!(
                "orderdesk_core schema={version}/{}",
                migrations::latest_version()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("orderdesk_core schema=error {err}");
            ExitCode::FAILURE
        }
    }
}
