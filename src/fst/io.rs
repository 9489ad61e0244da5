#![forbid(unsafe_code)]

use std::io::{ErrorKind, Read};

use crate::fst::error::{FstError, FstResult};

pub fn read_exact<const N: usize>(r: &mut dyn Read, context: &'static str) -> FstResult<[u8; N]> {
    let mut buf = [0u8; N];
    match r.read_exact(&mut buf) {
        Ok(()) => Ok(buf),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(FstError::Truncated { wanted: N, context }),
        Err(e) => Err(e.into()),
    }
}

pub fn read_u8(r: &mut dyn Read, context: &'static str) -> FstResult<u8> {
    Ok(read_exact::<1>(r, context)?[0])
}

pub fn read_u32_be(r: &mut dyn Read, context: &'static str) -> FstResult<u32> {
    Ok(u32::from_be_bytes(read_exact::<4>(r, context)?))
}

pub fn be_u24(b: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, b[0], b[1], b[2]])
}

pub fn be_u32(b: [u8; 4]) -> u32 {
    u32::from_be_bytes(b)
}

/// Reads a zero-terminated name; non-ASCII bytes become `?`.
pub fn read_cstr(r: &mut dyn Read, max_len: usize) -> FstResult<String> {
    let mut out = String::new();
    loop {
        let b = read_u8(r, "string table")?;
        if b == 0 {
            return Ok(out);
        }
        if out.len() >= max_len {
            return Err(FstError::Invalid(format!("name longer than {max_len} bytes")));
        }
        out.push(if b.is_ascii() { b as char } else { '?' });
    }
}

pub fn hex32(v: &[u8; 32]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = [0u8; 64];
    for (i, b) in v.iter().copied().enumerate() {
        out[i * 2] = HEX[(b >> 4) as usize];
        out[i * 2 + 1] = HEX[(b & 0xF) as usize];
    }
    String::from_utf8_lossy(&out).into_owned()
}
