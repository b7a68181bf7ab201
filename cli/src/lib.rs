// SPDX-License-Identifier: MIT OR Apache-2.0

//! meshgo CLI - a line-oriented front end for the rules engine
//!
//! Commands are read one per line; every engine event they cause is written
//! back as a JSON line, followed by a text rendering of the board.

pub mod command;
pub mod config;
pub mod render;
pub mod session;

pub use command::{parse_command, parse_point, Command};
pub use config::{load_config, CliConfig, Overrides};
pub use session::{Reply, Session};
