//! Power-of-two helpers for bracket sizing.

use crate::errors::{DrawError, DrawResult};

/// True iff `n` is positive with exactly one set bit
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Smallest power of two greater than or equal to `n`
///
/// # Errors
///
/// `InvalidBracketSize` for `n == 0` or when the result overflows `usize`
pub fn next_power_of_two(n: usize) -> DrawResult<usize> {
    if n == 0 {
        return Err(DrawError::InvalidBracketSize(n));
    }
    n.checked_next_power_of_two()
        .ok_or(DrawError::InvalidBracketSize(n))
}

/// Largest power of two less than or equal to `n`, 0 when `n < 1`
pub fn largest_power_of_two_le(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_power_of_two() {
        for n in [1, 2, 4, 8, 16, 1024] {
            assert!(is_power_of_two(n), "{n} is a power of two");
        }
        for n in [0, 3, 6, 12, 48, 1023] {
            assert!(!is_power_of_two(n), "{n} is not a power of two");
        }
    }

    #[test]
    fn test_next_power_of_two() {
        assert_eq!(next_power_of_two(1).unwrap(), 1);
        assert_eq!(next_power_of_two(5).unwrap(), 8);
        assert_eq!(next_power_of_two(32).unwrap(), 32);
        assert_eq!(next_power_of_two(48).unwrap(), 64);
        assert!(matches!(
            next_power_of_two(0),
            Err(DrawError::InvalidBracketSize(0))
        ));
        assert!(next_power_of_two(usize::MAX).is_err());
    }

    #[test]
    fn test_largest_power_of_two_le() {
        assert_eq!(largest_power_of_two_le(0), 0);
        assert_eq!(largest_power_of_two_le(1), 1);
        assert_eq!(largest_power_of_two_le(7), 4);
        assert_eq!(largest_power_of_two_le(36), 32);
        assert_eq!(largest_power_of_two_le(64), 64);
    }
}
