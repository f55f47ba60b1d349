#![no_std]

extern crate alloc;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use marker::*;
pub use store::*;
pub use system::*;
pub use theme::*;
pub use toggle::*;

pub mod bootstrap;
mod config;
mod controller;
mod error;
mod marker;
mod store;
mod system;
mod theme;
mod toggle;
