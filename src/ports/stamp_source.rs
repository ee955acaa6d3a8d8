//! Stamp source port.
//!
//! Rendering is a pure function of its inputs; the generation time and the
//! document identifier are the only ambient values and come through here.

use super::RenderStamp;

/// Supplies a fresh stamp for each rendered document.
pub trait StampSource: Send + Sync {
    fn next_stamp(&self) -> RenderStamp;
}
