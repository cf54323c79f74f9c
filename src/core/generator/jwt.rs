use rand::rngs::OsRng;
use rand::RngCore;

use super::{GenerateOptions, Generator};
use crate::error::{GenerateError, Result};

const DEFAULT_BITS: u32 = 256;
const MIN_BITS: u32 = 128;
const MAX_BITS: u32 = 512;

/// Hex-encoded HMAC signing secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtGenerator;

impl Generator for JwtGenerator {
    fn generate(&self, opts: &GenerateOptions) -> Result<String> {
        let bits = opts.bits.unwrap_or(DEFAULT_BITS);
        if !(MIN_BITS..=MAX_BITS).contains(&bits) {
            return Err(GenerateError::InvalidBits {
                value: bits,
                min: MIN_BITS,
                max: MAX_BITS,
            }
            .into());
        }

        let mut bytes = vec![0u8; bits.div_ceil(8) as usize];
        OsRng.fill_bytes(&mut bytes);
        Ok(hex::encode(bytes))
    }
}
