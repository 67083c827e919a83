pub mod exec;
pub mod parse;

pub use exec::{Attributor, GitBlame};
pub use parse::{count_lines, parse, parse_line, BlameLine};
