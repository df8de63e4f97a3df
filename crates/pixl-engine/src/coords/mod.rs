//! Canvas coordinate types.
//!
//! Two spaces are in play:
//! - normalized canvas space (`CanvasPoint`), `[0, 1]²`, origin top-left
//! - texel space (`Texel`), integer, `[0, width) × [0, height)`
//!
//! Screen/window coordinates never reach the engine; hosts normalize first.

mod point;

pub use point::{CanvasPoint, CanvasSize, Texel};
