//! Per-phase screens.
//!
//! # Phase Sequence
//!
//! 1. **Search** ([`idle`]): corner blink while polling for a pass
//! 2. **Standby** ([`idle`]): heartbeat pulse and scrolling reminders
//! 3. **Countdown** ([`countdown`]): shrinking pie with seconds left
//! 4. **Setup** ([`countdown`]): north marker and blinking start marker
//! 5. **Monitor** ([`monitor`]): satellite spot and azimuth marker
//!
//! Screens are pure drawing functions of the phase inputs at one instant. The
//! phase machine in [`state`](crate::state) works out those inputs, clears the
//! frame, calls the screen and presents the result.

mod countdown;
mod idle;
mod monitor;

pub use countdown::{draw_countdown, draw_setup};
pub use idle::{STATUS_CELL, draw_search, draw_standby};
pub use monitor::draw_monitor;
