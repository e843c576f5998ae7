//! Protocol I/O and terminal messages.
//!
//! Requests are read from stdin and responses written to stdout as JSON.
//! Everything meant for a human goes to stderr.

use std::io;

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod symbols {
  pub const ERROR: &str = "✗";
}

pub fn read_request<T: DeserializeOwned>() -> anyhow::Result<T> {
  serde_json::from_reader(io::stdin().lock()).context("Failed to parse request from stdin")
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
  println!("{}", json);
  Ok(())
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}
