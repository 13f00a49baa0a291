use ZeroDReactors::Examples::reactor_examples::reactor_examples;
use ZeroDReactors::context::AppContext;
use log::{LevelFilter, error};
use std::path::PathBuf;

/// `ZeroDReactors [example number] [log file]`
pub fn main() {
    let mut args = std::env::args().skip(1);
    let task: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(0);
    let log_file = args.next().map(PathBuf::from);
    if let Err(e) = AppContext::init_logging(LevelFilter::Info, log_file.as_deref()) {
        eprintln!("logging disabled: {}", e);
    }
    if let Err(e) = reactor_examples(task) {
        error!("example {} failed: {}", task, e);
        std::process::exit(1);
    }
}
