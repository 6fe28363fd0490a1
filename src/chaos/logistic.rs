//! LogisticMap: x(n+1) = r * x(n) * (1 - x(n))

use crate::error::ValidationError;

/// Exclusive lower bound of the chaotic regime
pub const R_MIN: f64 = 3.57;
/// Inclusive upper bound; beyond 4.0 the orbit escapes [0, 1]
pub const R_MAX: f64 = 4.0;
/// Parameter used when none is configured
pub const DEFAULT_R: f64 = 3.99;

/// Hex characters of the digest that feed the seed
const SEED_HEX_CHARS: usize = 8;

/// Logistic map generator with a fixed, validated parameter `r`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticMap {
    r: f64,
}

impl LogisticMap {
    pub fn new(r: f64) -> Result<Self, ValidationError> {
        if !(r > R_MIN && r <= R_MAX) {
            return Err(ValidationError::ChaosParameterOutOfRange(r));
        }
        Ok(Self { r })
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    /// Iterate the map `count` times from `seed`, returning every
    /// post-iteration value. The seed itself is never part of the output.
    ///
    /// Identical `(seed, count, r)` always yields the identical sequence.
    pub fn generate(&self, seed: f64, count: usize) -> Result<Vec<f64>, ValidationError> {
        if !(0.0..=1.0).contains(&seed) {
            return Err(ValidationError::SeedOutOfRange(seed));
        }
        let mut sequence = Vec::with_capacity(count);
        let mut x = seed;
        for _ in 0..count {
            x = self.r * x * (1.0 - x);
            sequence.push(x);
        }
        Ok(sequence)
    }
}

impl Default for LogisticMap {
    fn default() -> Self {
        Self { r: DEFAULT_R }
    }
}

/// Derive the initial condition x0 from a hex digest: the first 8 hex
/// characters as a u32, normalised by `0xFFFFFFFF` into [0, 1].
pub fn seed_from_hash(hash: &str) -> Result<f64, ValidationError> {
    let prefix = hash.get(..SEED_HEX_CHARS).unwrap_or(hash);
    // from_str_radix tolerates a leading '+', a digest never has one
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidHash);
    }
    let value = u32::from_str_radix(prefix, 16).map_err(|_| ValidationError::InvalidHash)?;
    Ok(f64::from(value) / f64::from(u32::MAX))
}

/// Quartile bucket of a chaotic value, numbering the substitution rule:
/// `[0, .25) -> 1`, `[.25, .5) -> 2`, `[.5, .75) -> 3`, `[.75, 1] -> 4`.
pub fn rule_for_value(x: f64) -> u8 {
    if x < 0.25 {
        1
    } else if x < 0.5 {
        2
    } else if x < 0.75 {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let map = LogisticMap::new(3.99).unwrap();
        let a = map.generate(0.5, 10).unwrap();
        let b = map.generate(0.5, 10).unwrap();
        assert_eq!(a.len(), 10);
        assert_eq!(a, b);
        assert!(a.iter().all(|x| (0.0..=1.0).contains(x)));
    }

    #[test]
    fn test_seed_is_not_emitted() {
        let map = LogisticMap::new(3.99).unwrap();
        let seq = map.generate(0.5, 2).unwrap();
        assert!((seq[0] - 3.99 * 0.25).abs() < 1e-12);
        assert!((seq[1] - 3.99 * seq[0] * (1.0 - seq[0])).abs() < 1e-12);
    }

    #[test]
    fn test_zero_count() {
        let map = LogisticMap::default();
        assert!(map.generate(0.3, 0).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_seed_outside_unit_interval() {
        let map = LogisticMap::default();
        assert_eq!(map.generate(2.5, 4), Err(ValidationError::SeedOutOfRange(2.5)));
        assert_eq!(map.generate(-0.1, 4), Err(ValidationError::SeedOutOfRange(-0.1)));
        assert!(map.generate(f64::NAN, 4).is_err());
        assert!(map.generate(0.0, 4).is_ok());
        assert!(map.generate(1.0, 4).is_ok());
    }

    #[test]
    fn test_parameter_bounds() {
        assert!(LogisticMap::new(3.57).is_err());
        assert!(LogisticMap::new(4.0001).is_err());
        assert!(LogisticMap::new(f64::NAN).is_err());
        assert!(LogisticMap::new(3.58).is_ok());
        assert_eq!(LogisticMap::new(4.0).unwrap().r(), 4.0);
    }

    #[test]
    fn test_seed_from_hash() {
        assert_eq!(seed_from_hash("00000000abc").unwrap(), 0.0);
        assert_eq!(seed_from_hash("ffffffff").unwrap(), 1.0);
        let mid = seed_from_hash("80000000").unwrap();
        assert!((mid - 0.5).abs() < 1e-9);
        let digest = "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a";
        assert_eq!(
            seed_from_hash(digest).unwrap(),
            f64::from(0x44136fa3u32) / f64::from(u32::MAX)
        );
    }

    #[test]
    fn test_seed_from_hash_rejects_non_hex() {
        assert_eq!(seed_from_hash("zzzzzzzz"), Err(ValidationError::InvalidHash));
        assert_eq!(seed_from_hash("+1234567"), Err(ValidationError::InvalidHash));
        assert_eq!(seed_from_hash(""), Err(ValidationError::InvalidHash));
    }

    #[test]
    fn test_rule_boundaries() {
        assert_eq!(rule_for_value(0.1), 1);
        assert_eq!(rule_for_value(0.3), 2);
        assert_eq!(rule_for_value(0.6), 3);
        assert_eq!(rule_for_value(0.9), 4);
        assert_eq!(rule_for_value(0.0), 1);
        assert_eq!(rule_for_value(0.25), 2);
        assert_eq!(rule_for_value(0.5), 3);
        assert_eq!(rule_for_value(0.75), 4);
        assert_eq!(rule_for_value(1.0), 4);
    }
}
