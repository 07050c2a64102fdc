//! Sega Master System / Game Gear VDP core.
//!
//! The chip model is self-contained: VRAM and CRAM are private, the CPU talks
//! to it exclusively through the four I/O ports, and the only outbound edge is
//! the maskable-interrupt request delivered through an [`InterruptSink`].

pub mod interrupt;
pub mod palette;
pub mod state;
pub mod vdp;

pub use interrupt::{InterruptSink, NullSink};
pub use palette::Palette;
pub use vdp::Vdp;
