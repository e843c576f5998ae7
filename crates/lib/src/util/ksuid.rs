//! K-sortable unique identifiers.
//!
//! A KSUID is a 4-byte big-endian timestamp (seconds since 2014-05-13T16:53:20Z)
//! followed by 16 random bytes, base62-encoded to a fixed 27 characters. Ids
//! generated later sort after earlier ones as plain strings.

use chrono::{DateTime, Utc};

/// KSUID epoch as a Unix timestamp.
const EPOCH: i64 = 1_400_000_000;

const ENCODED_LEN: usize = 27;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generate a new KSUID for the current time.
pub fn ksuid() -> String {
  ksuid_at(Utc::now(), *uuid::Uuid::new_v4().as_bytes())
}

/// Build a KSUID from an explicit time and payload.
pub fn ksuid_at(time: DateTime<Utc>, payload: [u8; 16]) -> String {
  let ts = (time.timestamp() - EPOCH).clamp(0, i64::from(u32::MAX)) as u32;

  let mut raw = [0u8; 20];
  raw[..4].copy_from_slice(&ts.to_be_bytes());
  raw[4..].copy_from_slice(&payload);
  base62(raw)
}

fn base62(mut num: [u8; 20]) -> String {
  let mut out = [b'0'; ENCODED_LEN];
  for slot in out.iter_mut().rev() {
    let mut rem: u32 = 0;
    for byte in num.iter_mut() {
      let acc = (rem << 8) | u32::from(*byte);
      *byte = (acc / 62) as u8;
      rem = acc % 62;
    }
    *slot = ALPHABET[rem as usize];
  }
  out.iter().map(|&b| b as char).collect()
}
