//! Diarview entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = diarview::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
