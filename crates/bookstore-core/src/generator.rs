//! # Identifier Generation
//!
//! Short, URL-safe identifiers for new catalog entities.
//!
//! ## Format
//! ```text
//! UUID v4 (122 random bits)
//!      │
//!      ▼
//! u128 ──► base62 ──► left-pad with '0' to 22 chars
//!
//! e.g. "4fT9qK0bZx1LmN3pQr7sUv"
//! ```
//!
//! 62^22 > 2^128, so every UUID maps to exactly one 22-character id.
//! Collisions are left to the store's PRIMARY KEY constraint.

use uuid::Uuid;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of every id produced by [`ShortIdGenerator`].
pub const SHORT_ID_LENGTH: usize = 22;

/// Produces identifiers for new aggregate roots and catalog entries.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Stateless generator backed by random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortIdGenerator;

impl IdGenerator for ShortIdGenerator {
    fn new_id(&self) -> String {
        encode_base62(Uuid::new_v4().as_u128())
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn new_id(&self) -> String {
        (**self).new_id()
    }
}

fn encode_base62(mut value: u128) -> String {
    let mut buf = [b'0'; SHORT_ID_LENGTH];
    let mut pos = SHORT_ID_LENGTH;

    while value > 0 {
        pos -= 1;
        buf[pos] = ALPHABET[(value % 62) as usize];
        value /= 62;
    }

    // buf only ever holds ASCII alphanumerics
    buf.iter().map(|&b| b as char).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
