//! Run-length encoded block patches.
//!
//! A patch describes how to turn a reference block into a new block of the same
//! length. It is a stream of operations, each advancing a write position over
//! the target:
//!
//! | bytes | operation |
//! |---|---|
//! | `0x00 n v` | fill `n` bytes with `v` |
//! | `0x01..=0x7F` + data | copy that many literal bytes |
//! | `0x81..=0xFF` | skip `b & 0x7F` bytes |
//! | `0x80 w:u16le` | long operation, see below |
//!
//! For the long operation, `w == 0` ends the stream, `w < 0x8000` skips `w` bytes,
//! `0x8000 | n` copies `n` literal bytes and `0xC000 | n` fills `n` bytes with the
//! value byte that follows.
//!
//! Skipped bytes keep whatever the target holds.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, ErrorKind, Read};

const LONG_OP: u8 = 0x80;
const MAX_SHORT_SKIP: usize = 0x7F;
const MAX_SHORT_COPY: usize = 0x7F;
const MAX_SHORT_FILL: usize = 0xFF;
const MAX_LONG_SKIP: usize = 0x7FFF;
const MAX_LONG_RUN: usize = 0x3FFF;

/// Fill runs shorter than this are cheaper as literal copies.
const MIN_FILL_RUN: usize = 4;
/// Equal stretches shorter than this are absorbed into the surrounding change.
const MIN_SKIP_RUN: usize = 3;

/// Creates a patch that turns `reference` into `new`.
///
/// Both blocks must have the same length.
pub fn create_patch(new: &[u8], reference: &[u8]) -> Result<Vec<u8>> {
    if new.len() != reference.len() {
        return Err(Error::PatchLengthMismatch {
            expected: reference.len(),
            actual: new.len(),
        });
    }

    let mut patch = Vec::new();
    let mut pending_skip = 0;
    let mut pos = 0;

    while pos < new.len() {
        if new[pos] == reference[pos] {
            pending_skip += 1;
            pos += 1;
            continue;
        }

        let end = change_end(new, reference, pos);
        write_skip(&mut patch, pending_skip)?;
        pending_skip = 0;
        write_changes(&mut patch, &new[pos..end])?;
        pos = end;
    }

    // Trailing skips are implied by the end marker.
    patch.write_u8(LONG_OP)?;
    patch.write_u16::<LittleEndian>(0)?;
    Ok(patch)
}

/// Applies a patch onto `target` in place.
pub fn apply_patch(patch: &[u8], target: &mut [u8]) -> Result<()> {
    let mut reader = Cursor::new(patch);
    let mut pos = 0usize;

    loop {
        let op = read_u8(&mut reader)?;
        match op {
            0x00 => {
                let count = read_u8(&mut reader)? as usize;
                let value = read_u8(&mut reader)?;
                fill(target, &mut pos, count, value)?;
            }
            0x01..=0x7F => copy(&mut reader, target, &mut pos, op as usize)?,
            LONG_OP => {
                let word = read_u16(&mut reader)?;
                if word == 0 {
                    return Ok(());
                }
                let count = (word & 0x3FFF) as usize;
                match word & 0xC000 {
                    0x8000 => copy(&mut reader, target, &mut pos, count)?,
                    0xC000 => {
                        let value = read_u8(&mut reader)?;
                        fill(target, &mut pos, count, value)?;
                    }
                    _ => skip(target, &mut pos, word as usize)?,
                }
            }
            _ => skip(target, &mut pos, (op & 0x7F) as usize)?,
        }
    }
}

/// Finds the end of the changed stretch starting at `start`.
fn change_end(new: &[u8], reference: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < new.len() {
        let equal_run = new[end..]
            .iter()
            .zip(&reference[end..])
            .take(MIN_SKIP_RUN)
            .take_while(|(a, b)| a == b)
            .count();
        if equal_run == MIN_SKIP_RUN || end + equal_run == new.len() {
            break;
        }
        end += equal_run.max(1);
    }
    end
}

fn write_changes(patch: &mut Vec<u8>, data: &[u8]) -> Result<()> {
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < data.len() {
        let value = data[pos];
        let run = data[pos..].iter().take_while(|&&b| b == value).count();
        if run >= MIN_FILL_RUN {
            write_copy(patch, &data[literal_start..pos])?;
            write_fill(patch, run, value)?;
            pos += run;
            literal_start = pos;
        } else {
            pos += run;
        }
    }
    write_copy(patch, &data[literal_start..])
}

fn write_skip(patch: &mut Vec<u8>, mut count: usize) -> Result<()> {
    while count > 0 {
        if count <= MAX_SHORT_SKIP {
            patch.write_u8(LONG_OP | count as u8)?;
            return Ok(());
        }
        let chunk = count.min(MAX_LONG_SKIP);
        patch.write_u8(LONG_OP)?;
        patch.write_u16::<LittleEndian>(chunk as u16)?;
        count -= chunk;
    }
    Ok(())
}

fn write_copy(patch: &mut Vec<u8>, mut data: &[u8]) -> Result<()> {
    while !data.is_empty() {
        let chunk = if data.len() <= MAX_SHORT_COPY {
            patch.write_u8(data.len() as u8)?;
            data.len()
        } else {
            let chunk = data.len().min(MAX_LONG_RUN);
            patch.write_u8(LONG_OP)?;
            patch.write_u16::<LittleEndian>(0x8000 | chunk as u16)?;
            chunk
        };
        patch.extend_from_slice(&data[..chunk]);
        data = &data[chunk..];
    }
    Ok(())
}

fn write_fill(patch: &mut Vec<u8>, mut count: usize, value: u8) -> Result<()> {
    while count > 0 {
        if count <= MAX_SHORT_FILL {
            patch.write_u8(0x00)?;
            patch.write_u8(count as u8)?;
            patch.write_u8(value)?;
            return Ok(());
        }
        let chunk = count.min(MAX_LONG_RUN);
        patch.write_u8(LONG_OP)?;
        patch.write_u16::<LittleEndian>(0xC000 | chunk as u16)?;
        patch.write_u8(value)?;
        count -= chunk;
    }
    Ok(())
}

fn read_u8(reader: &mut Cursor<&[u8]>) -> Result<u8> {
    reader.read_u8().map_err(truncated)
}

fn read_u16(reader: &mut Cursor<&[u8]>) -> Result<u16> {
    reader.read_u16::<LittleEndian>().map_err(truncated)
}

fn truncated(err: std::io::Error) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::MalformedPatch("unexpected end of patch".to_string())
    } else {
        Error::Io(err)
    }
}

fn claim(target: &[u8], pos: &mut usize, count: usize) -> Result<std::ops::Range<usize>> {
    let end = *pos + count;
    if end > target.len() {
        return Err(Error::MalformedPatch(format!(
            "operation at offset {} with length {} overruns block of {} bytes",
            pos,
            count,
            target.len()
        )));
    }
    let range = *pos..end;
    *pos = end;
    Ok(range)
}

fn skip(target: &[u8], pos: &mut usize, count: usize) -> Result<()> {
    claim(target, pos, count).map(|_| ())
}

fn fill(target: &mut [u8], pos: &mut usize, count: usize, value: u8) -> Result<()> {
    let range = claim(target, pos, count)?;
    target[range].fill(value);
    Ok(())
}

fn copy(reader: &mut Cursor<&[u8]>, target: &mut [u8], pos: &mut usize, count: usize) -> Result<()> {
    let range = claim(target, pos, count)?;
    reader.read_exact(&mut target[range]).map_err(truncated)
}
