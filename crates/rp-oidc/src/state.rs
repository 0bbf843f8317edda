//! CSRF state generation for the authorization code flow

use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a random state string for CSRF protection
///
/// Produces 32 bytes (256 bits) from the operating system's secure random
/// source, hex-encoded to a 64-character string. The state is stored in a
/// cookie before redirecting to the authorization server and compared when
/// the callback comes back.
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
