// src/emitter.rs

//! Kitty graphics protocol serialization.
//!
//! One image becomes one self-delimited APC sequence:
//! `ESC _ G f=1,t=d,w=<W>,h=<H>;x=<base64> ESC \`
//! with `f=1` the format marker, `t=d` direct transmission, `w`/`h` the
//! declared display size in pixels, and the payload the base64 PNG bytes.
//! Row breaks between grid rows are plain newlines written to the same
//! stream; they position the cursor and carry no payload.

use crate::transcode::EncodedImage;
use std::io::{self, Write};

// --- Graphics escape sequence constants ---
const APC_GRAPHICS_INTRO: &str = "\x1b_G"; // Start of a graphics APC sequence
const STRING_TERMINATOR: &str = "\x1b\\"; // ST, ends the sequence

/// Writes the inline-graphics sequence for one encoded image at the given
/// display dimensions.
pub fn emit<W: Write>(
    out: &mut W,
    payload: &EncodedImage,
    pixel_width: u32,
    pixel_height: u32,
) -> io::Result<()> {
    write!(
        out,
        "{}f=1,t=d,w={},h={};x={}{}",
        APC_GRAPHICS_INTRO, pixel_width, pixel_height, payload.base64, STRING_TERMINATOR
    )
}

/// Advances the terminal cursor to the next on-screen row. Called after
/// every `columns`-th image of a grid.
pub fn row_break<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\n")
}
