#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod board;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod persist;
mod placement;
mod ship;
mod stats;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with_default, LOG_ENV};
pub use placement::*;
pub use ship::*;
pub use stats::*;
