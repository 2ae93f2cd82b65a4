/* src/cli/core/src/ui.rs */

// Console reporting shared by every command.

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Written files are listed one by one up to this many; larger sets are summarized.
const LISTED_FILES: usize = 3;

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  eprintln!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  println!("  {YELLOW}!{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn step(n: usize, total: usize, msg: &str) {
  println!("  {BOLD}[{n}/{total}]{RESET} {msg}...");
}

pub fn detail(msg: &str) {
  println!("        {msg}");
}

pub fn detail_ok(msg: &str) {
  println!("        {GREEN}\u{2713}{RESET} {msg}");
}

/// `locale-transpile <cmd> v<version>  <project> (<subject>)`
pub fn banner(cmd: &str, project: &str, subject: Option<&str>) {
  let title = match subject {
    Some(s) => format!("{project} ({s})"),
    None => project.to_string(),
  };
  println!();
  println!("  {BOLD}locale-transpile{RESET} {cmd} {DIM}v{VERSION}{RESET}  {title}");
  println!();
}

/// Report the files a stage wrote.
pub fn files(paths: &[String]) {
  for line in file_lines(paths) {
    detail_ok(&line);
  }
}

fn file_lines(paths: &[String]) -> Vec<String> {
  match paths {
    [first, ..] if paths.len() > LISTED_FILES => {
      vec![format!("{} ({first}, ...)", plural(paths.len(), "file"))]
    }
    _ => paths.to_vec(),
  }
}

pub fn plural(n: usize, word: &str) -> String {
  if n == 1 { format!("1 {word}") } else { format!("{n} {word}s") }
}

pub fn blank() {
  println!();
}
