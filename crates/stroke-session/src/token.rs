//! Session token and salt generation from the OS CSPRNG.

use rand::{rngs::OsRng, RngCore};

use stroke_contracts::{
    error::{StrokeError, StrokeResult},
    session::SessionToken,
};

/// Fill `buf` from the operating system's secure random source.
pub(crate) fn fill_random(buf: &mut [u8]) -> StrokeResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| StrokeError::EntropyUnavailable {
            reason: e.to_string(),
        })
}

/// Generate a token of `bytes` random bytes, hex encoded.
pub fn generate_token(bytes: usize) -> StrokeResult<SessionToken> {
    let mut buf = vec![0u8; bytes];
    fill_random(&mut buf)?;
    Ok(SessionToken::new(hex::encode(buf)))
}
