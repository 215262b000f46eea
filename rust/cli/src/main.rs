use std::io;

fn main() {
    // Already installed when embedded in a host that set its own subscriber
    let _ = quickdraw_cli::logging::init_logging();
    let code = quickdraw_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
