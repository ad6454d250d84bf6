//! FILENAME: app/cli/src/main.rs
// PURPOSE: Command line entry point with unified logging.
// FORMAT: seq|level|category|message

fn main() {
    std::process::exit(workhub::run());
}
