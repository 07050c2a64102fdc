//! Save-state framing.
//!
//! The chip state serializes in struct field order (VRAM, CRAM, registers,
//! latches, counters, status); this module frames that dump with a magic
//! tag and a version so stale files fail loudly instead of decoding into
//! garbage. The interrupt sink is runtime wiring and survives a load
//! untouched.

use std::error::Error;
use std::io::{Read, Write};

use crate::vdp::Vdp;

pub const STATE_MAGIC: [u8; 4] = *b"SMSS";
pub const STATE_VERSION: u32 = 1;

pub fn save_state<W: Write>(vdp: &Vdp, mut writer: W) -> Result<(), Box<dyn Error>> {
    writer.write_all(&STATE_MAGIC)?;
    writer.write_all(&STATE_VERSION.to_le_bytes())?;
    let bytes = bincode::encode_to_vec(vdp, bincode::config::standard())?;
    writer.write_all(&bytes)?;
    Ok(())
}

pub fn load_state<R: Read>(vdp: &mut Vdp, mut reader: R) -> Result<(), Box<dyn Error>> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != STATE_MAGIC {
        return Err("not a VDP save-state file".into());
    }
    let mut version = [0u8; 4];
    reader.read_exact(&mut version)?;
    let version = u32::from_le_bytes(version);
    if version != STATE_VERSION {
        return Err(format!("unsupported save-state version {version}").into());
    }
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let (mut state, _): (Vdp, usize) =
        bincode::decode_from_slice(&bytes, bincode::config::standard())?;
    // Keep the live interrupt wiring; the decoded handle is a placeholder.
    state.adopt_sink_from(vdp);
    *vdp = state;
    Ok(())
}
