//! SEC Bot API server binary.
//! Run with: cargo run --bin sec-bot-server

use std::process::ExitCode;

use sec_bot::start_sec_bot;

fn main() -> ExitCode {
    start_sec_bot::run()
}
