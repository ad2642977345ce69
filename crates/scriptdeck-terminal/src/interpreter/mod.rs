mod csi;
mod esc_osc;
mod handler;
mod perform;
mod sgr;

pub use handler::*;

// ===========================================================================
// Tests
// ===========================================================================
