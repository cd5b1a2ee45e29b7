/* src/cli/core/src/ui.rs */

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

// Status lines go to stderr so rendered output can be piped from stdout

pub fn ok(msg: &str) {
  eprintln!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  eprintln!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  eprintln!("  {YELLOW}!{RESET} {msg}");
}

pub fn detail(msg: &str) {
  eprintln!("        {DIM}{msg}{RESET}");
}

pub fn banner(cmd: &str) {
  eprintln!();
  eprintln!("  {BOLD}folio{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  eprintln!();
}
