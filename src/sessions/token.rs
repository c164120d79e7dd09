//! Validation-token derivation.

use md5::{Digest, Md5};
use sha1::Sha1;

/// Derive the validation token binding a client identity to a session name.
///
/// Two fixed stages: a 128-bit digest over `client_identity + session_name`,
/// rendered as lowercase hex, then a 160-bit digest over that hex string
/// (the hex rendering, not the raw bytes). The result is stable across
/// processes, so a resumed session can be re-checked against the client
/// that opened it.
pub fn derive(client_identity: &str, session_name: &str) -> String {
    let mut inner = Md5::new();
    inner.update(client_identity.as_bytes());
    inner.update(session_name.as_bytes());
    let inner_hex = format!("{:x}", inner.finalize());

    let mut outer = Sha1::new();
    outer.update(inner_hex.as_bytes());
    format!("{:x}", outer.finalize())
}
