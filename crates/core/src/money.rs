use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Whole-yen amount. The yen has no fractional unit, so no decimal type
/// is needed for domain arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Yen(i64);

impl Yen {
    pub fn new(amount: i64) -> Self {
        Yen(amount)
    }

    pub fn zero() -> Self {
        Yen(0)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Decimal digit string, no separators or currency sign. This is the
    /// form free-text search runs against.
    pub fn digits(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Yen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "¥{}", self.0)
    }
}

impl Add for Yen {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Yen(self.0 + rhs.0)
    }
}

impl Sub for Yen {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Yen(self.0 - rhs.0)
    }
}

impl Sum for Yen {
    fn sum<I: Iterator<Item = Yen>>(iter: I) -> Self {
        iter.fold(Yen::zero(), |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_sub() {
        let a = Yen::new(15_000);
        let b = Yen::new(5_000);
        assert_eq!((a + b).amount(), 20_000);
        assert_eq!((a - b).amount(), 10_000);
    }

    #[test]
    fn sum_over_iterator() {
        let total: Yen = [Yen::new(100), Yen::new(200), Yen::new(300)]
            .into_iter()
            .sum();
        assert_eq!(total, Yen::new(600));
    }

    #[test]
    fn display_has_yen_sign() {
        assert_eq!(Yen::new(15000).to_string(), "¥15000");
    }

    #[test]
    fn digits_form() {
        assert_eq!(Yen::new(15000).digits(), "15000");
        assert_eq!(Yen::zero().digits(), "0");
    }

    #[test]
    fn serde_is_transparent() {
        let y: Yen = serde_json::from_str("15000").unwrap();
        assert_eq!(y, Yen::new(15000));
        assert_eq!(serde_json::to_string(&y).unwrap(), "15000");
    }
}
