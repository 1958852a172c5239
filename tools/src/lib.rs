//! Inspection and simulation tools for guardian beams.
//!
//! - Decode packet captures into structured reports
//! - Replay a scripted observer against a beam and record every packet sent
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what a beam sends and when.

mod inspect;
mod simulate;

pub use inspect::{
    format_inspect_pretty, inspect_capture, inspect_packet, parse_hex, split_frames,
    InspectReport, PacketSummary,
};
pub use simulate::{
    format_simulation_pretty, simulate, Scenario, ScenarioStep, SimulationReport, TickReport,
};
