mod args;

pub use args::{CaptureArgs, Cli, Command, FindArgs, NamesArgs, ValuesArgs};
