use rust_decimal::Decimal;

/// Take-home pay after both withholdings.
///
/// No clamping: a negative result can only come from inconsistent inputs,
/// which the engine's validation rules out.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetSalaryCalculator;

impl NetSalaryCalculator {
    pub fn compute(
        &self,
        gross_salary: Decimal,
        social_security_withheld: Decimal,
        income_tax_withheld: Decimal,
    ) -> Decimal {
        gross_salary - social_security_withheld - income_tax_withheld
    }
}
