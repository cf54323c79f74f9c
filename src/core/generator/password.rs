use rand::rngs::OsRng;
use rand::Rng;

use super::{check_length, GenerateOptions, Generator};
use crate::error::Result;

const DEFAULT_LENGTH: usize = 32;
const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 128;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Random passwords.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordGenerator;

impl Generator for PasswordGenerator {
    fn generate(&self, opts: &GenerateOptions) -> Result<String> {
        let length = check_length(
            opts.length.unwrap_or(DEFAULT_LENGTH),
            MIN_LENGTH,
            MAX_LENGTH,
        )?;

        let charset: Vec<u8> = if opts.no_symbols {
            ALPHANUMERIC.to_vec()
        } else {
            [ALPHANUMERIC, SYMBOLS].concat()
        };

        let mut rng = OsRng;
        Ok((0..length)
            .map(|_| charset[rng.gen_range(0..charset.len())] as char)
            .collect())
    }
}
