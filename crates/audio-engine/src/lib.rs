#![warn(missing_docs)]

//! Device resolution and audio control logic for select-audio-output.
//!
//! - [`resolve`] maps a user-typed name to a reported device name, tolerating
//!   case differences, partial names and typos.
//! - [`Controller`] reads and changes volume and mute, treating every failure
//!   as a non-fatal [`Unavailable`].
//! - [`switch_to`] joins the two halves: fetch devices, resolve, select.
//!
//! Nothing here caches backend state; each call works from a fresh snapshot.

mod controller;
mod error;
pub mod resolver;
mod similarity;
mod switcher;

pub use controller::Controller;
pub use error::{NotFound, Result, SwitchError, Unavailable};
pub use resolver::{MatchKind, Resolved, resolve};
pub use similarity::similarity;
pub use switcher::{Switched, switch_to};
