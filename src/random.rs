//! Secure random values drawn from the operating system's entropy source.

use anyhow::anyhow;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};

use crate::{Error, Result};

/// Generate `n` random bytes.
///
/// # Errors
///
/// Returns [`Error::Other`] if the entropy source is unavailable.
pub fn random_bytes(n: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; n];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| anyhow!("entropy source unavailable: {e}"))?;
    Ok(bytes)
}

/// Generate a random integer uniformly distributed in `[low, high)`.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] if `low >= high`.
pub fn random_int(low: u64, high: u64) -> Result<u64> {
    if low >= high {
        crate::tracerr!(Error::InvalidRange { low, high }, "empty random range {low}..{high}");
    }
    Ok(OsRng.gen_range(low..high))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_have_requested_length() {
        assert_eq!(random_bytes(32).expect("should generate").len(), 32);
        assert!(random_bytes(0).expect("should generate").is_empty());
        let one = random_bytes(32).expect("should generate");
        let two = random_bytes(32).expect("should generate");
        assert_ne!(one, two);
    }

    #[test]
    fn int_in_range() {
        for _ in 0..100 {
            let n = random_int(10, 20).expect("should generate");
            assert!((10..20).contains(&n));
        }
        assert_eq!(random_int(7, 8).expect("should generate"), 7);
    }

    #[test]
    fn empty_range() {
        assert!(matches!(random_int(5, 5), Err(Error::InvalidRange { low: 5, high: 5 })));
        assert!(matches!(random_int(6, 5), Err(Error::InvalidRange { .. })));
    }
}
