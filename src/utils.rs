use std::fs::OpenOptions;
use std::io::Write;

/// Append a line to the debug log; the terminal itself belongs to ratatui
pub fn log_debug(msg: &str) {
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/api-explorer.log")
        .and_then(|mut f| writeln!(f, "{}", msg));
}
