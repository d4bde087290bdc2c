//! Employer severance deposit (FGTS).
//!
//! Paid by the employer on top of the salary, so it is reported but never
//! deducted from net pay.

use rust_decimal::Decimal;

/// Flat-rate employer deposit.
///
/// ```
/// use rust_decimal_macros::dec;
/// use brtax_core::calculations::EmployerDepositCalculator;
///
/// let calculator = EmployerDepositCalculator::new(dec!(0.08));
/// assert_eq!(calculator.compute(dec!(3000.00)), dec!(240.00));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmployerDepositCalculator {
    rate: Decimal,
}

impl EmployerDepositCalculator {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    pub fn compute(
        &self,
        gross_salary: Decimal,
    ) -> Decimal {
        gross_salary * self.rate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn applies_flat_rate() {
        let calculator = EmployerDepositCalculator::new(dec!(0.08));

        assert_eq!(calculator.compute(dec!(1412.00)), dec!(112.96));
        assert_eq!(calculator.compute(dec!(12345.67)), dec!(987.6536));
    }
}
