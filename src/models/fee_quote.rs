use std::fmt::Display;

use alloy::primitives::U256;
use serde::{Serialize, Serializer};

use super::EstimationError;

/// Total cost of a rollup transaction, split into its L2 execution and L1 data parts.
///
/// All amounts are in wei. The only constructor derives `l2_fee` and `total` from its inputs,
/// so a quote always satisfies `l2_fee == l2_gas_used * l2_gas_price` and
/// `total == l1_fee + l2_fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    l2_gas_used: u64,
    #[serde(serialize_with = "decimal_string")]
    l2_gas_price: u128,
    #[serde(serialize_with = "decimal_string")]
    l2_fee: U256,
    #[serde(serialize_with = "decimal_string")]
    l1_fee: U256,
    #[serde(serialize_with = "decimal_string")]
    total: U256,
}

impl FeeQuote {
    /// Fails with [`EstimationError::FeeOverflow`] when `l2_fee + l1_fee` does not fit in 256 bits.
    pub fn new(
        l2_gas_used: u64,
        l2_gas_price: u128,
        l1_fee: U256,
    ) -> Result<Self, EstimationError> {
        // u64 * u128 always fits in 192 bits
        let l2_fee = U256::from(l2_gas_used) * U256::from(l2_gas_price);
        let total = l2_fee
            .checked_add(l1_fee)
            .ok_or(EstimationError::FeeOverflow { l2_fee, l1_fee })?;

        Ok(Self {
            l2_gas_used,
            l2_gas_price,
            l2_fee,
            l1_fee,
            total,
        })
    }

    pub fn l2_gas_used(&self) -> u64 {
        self.l2_gas_used
    }

    pub fn l2_gas_price(&self) -> u128 {
        self.l2_gas_price
    }

    pub fn l2_fee(&self) -> U256 {
        self.l2_fee
    }

    pub fn l1_fee(&self) -> U256 {
        self.l1_fee
    }

    pub fn total(&self) -> U256 {
        self.total
    }
}

/// Amounts can exceed what JSON numbers represent exactly.
fn decimal_string<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fee_quote_greeter_example() {
        let quote = FeeQuote::new(45_000, 1_000, U256::from(2_100)).unwrap();

        assert_eq!(quote.l2_fee(), U256::from(45_000_000u64));
        assert_eq!(quote.l1_fee(), U256::from(2_100u64));
        assert_eq!(quote.total(), U256::from(45_002_100u64));
    }

    #[test]
    fn test_fee_quote_zero_inputs() {
        let quote = FeeQuote::new(0, 0, U256::ZERO).unwrap();

        assert_eq!(quote.l2_fee(), U256::ZERO);
        assert_eq!(quote.total(), U256::ZERO);
    }

    #[test]
    fn test_fee_quote_max_l2_inputs_do_not_overflow() {
        let quote = FeeQuote::new(u64::MAX, u128::MAX, U256::from(1)).unwrap();

        let expected = U256::from(u64::MAX) * U256::from(u128::MAX);
        assert_eq!(quote.l2_fee(), expected);
        assert_eq!(quote.total(), expected + U256::from(1));
    }

    #[test]
    fn test_fee_quote_total_at_u256_max() {
        let quote = FeeQuote::new(1, 1, U256::MAX - U256::from(1)).unwrap();

        assert_eq!(quote.total(), U256::MAX);
    }

    #[test]
    fn test_fee_quote_rejects_total_past_u256_max() {
        let result = FeeQuote::new(2, 1, U256::MAX - U256::from(1));

        match result {
            Err(EstimationError::FeeOverflow { l2_fee, l1_fee }) => {
                assert_eq!(l2_fee, U256::from(2));
                assert_eq!(l1_fee, U256::MAX - U256::from(1));
            }
            other => panic!("expected FeeOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_fee_quote_serializes_amounts_as_strings() {
        let quote = FeeQuote::new(45_000, 1_000, U256::from(2_100)).unwrap();

        let json = serde_json::to_value(quote).unwrap();

        assert_eq!(json["l2GasUsed"], 45_000);
        assert_eq!(json["l2GasPrice"], "1000");
        assert_eq!(json["l2Fee"], "45000000");
        assert_eq!(json["l1Fee"], "2100");
        assert_eq!(json["total"], "45002100");
    }

    proptest! {
        #[test]
        fn prop_total_is_exact_sum(
            gas_used in any::<u64>(),
            gas_price in any::<u128>(),
            l1_fee in any::<u128>(),
        ) {
            let quote = FeeQuote::new(gas_used, gas_price, U256::from(l1_fee)).unwrap();

            prop_assert_eq!(quote.l2_fee(), U256::from(gas_used) * U256::from(gas_price));
            prop_assert_eq!(quote.total(), U256::from(l1_fee) + U256::from(gas_used) * U256::from(gas_price));
        }
    }
}
