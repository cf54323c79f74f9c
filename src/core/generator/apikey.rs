use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

use super::{check_length, GenerateOptions, Generator, KeyFormat};
use crate::error::Result;

const DEFAULT_BYTES: usize = 32;
const MIN_BYTES: usize = 1;
const MAX_BYTES: usize = 512;

/// API keys in base64, hex or UUID form, with an optional prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiKeyGenerator;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

impl Generator for ApiKeyGenerator {
    fn generate(&self, opts: &GenerateOptions) -> Result<String> {
        let length = check_length(opts.length.unwrap_or(DEFAULT_BYTES), MIN_BYTES, MAX_BYTES)?;

        let key = match opts.format.unwrap_or_default() {
            KeyFormat::Base64 => URL_SAFE.encode(random_bytes(length)),
            KeyFormat::Hex => hex::encode(random_bytes(length)),
            KeyFormat::Uuid => Uuid::new_v4().to_string(),
            KeyFormat::UuidV7 => Uuid::now_v7().to_string(),
        };

        Ok(match opts.prefix.as_deref() {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key,
        })
    }
}
