use crate::core::GenericResult;
use crate::types::Decimal;

/// Flat capital gains tax (fjármagnstekjuskattur) applied to interest income.
#[derive(Debug, Clone, Copy)]
pub struct FlatTaxRate {
    rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxedIncome {
    pub tax: Decimal,
    pub net: Decimal,
}

impl FlatTaxRate {
    pub const DEFAULT_RATE: Decimal = dec!(0.22);

    pub fn new(rate: Decimal) -> GenericResult<FlatTaxRate> {
        if rate.is_sign_negative() || rate > dec!(1) {
            return Err!("Invalid tax rate: {}", rate);
        }
        Ok(FlatTaxRate {rate})
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Net income is derived directly from the gross one and the tax is the remainder, so
    /// `net == income * (1 - rate)` holds exactly.
    pub fn apply(&self, income: Decimal) -> TaxedIncome {
        if income.is_sign_negative() {
            return TaxedIncome {tax: dec!(0), net: income};
        }

        let net = income * (dec!(1) - self.rate);
        TaxedIncome {tax: income - net, net}
    }
}

impl Default for FlatTaxRate {
    fn default() -> FlatTaxRate {
        FlatTaxRate {rate: FlatTaxRate::DEFAULT_RATE}
    }
}
