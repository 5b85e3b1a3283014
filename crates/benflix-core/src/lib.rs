//! Hardware-independent core library for the benflix nice!view shield
//!
//! This crate contains the peripheral-half status widget: battery and
//! connection state tracking, canvas drawing and rotation, composition with
//! the decorative art, and the display manager that flushes frames.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod canvas;
pub mod config;
pub mod display_manager;
pub mod error;
pub mod events;
pub mod framebuffer;
pub mod registry;
pub mod ui;
pub mod widgets;

pub use config::{BatteryStyle, Palette, ScratchStrategy, StatusConfig};
pub use display_manager::StatusDisplay;
pub use error::StatusError;
pub use events::{HostSnapshot, StateSource, StatusEvent};
pub use widgets::{StatusState, StatusWidget};
