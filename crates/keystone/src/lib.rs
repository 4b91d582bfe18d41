//! Keystone simulator: drives a Push controller from a line based script and
//! prints what the hardware would show.

mod script;
mod simulator;

pub use script::{parse_line, Action, Command};
pub use simulator::Simulator;
