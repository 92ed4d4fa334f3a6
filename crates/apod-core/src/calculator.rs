//! Investment metrics calculator.
//!
//! A pure function from a [`PropertyRecord`] and its [`Assumptions`] to the
//! standard rental-property metrics. Evaluation order:
//!
//! 1. insurance = list price × insurance rate
//! 2. maintenance = monthly reserve × units × 12
//! 3. gross income = monthly rent × units × 12
//! 4. effective income = gross × (1 − vacancy)
//! 5. management = effective × management rate
//! 6. operating expenses = tax + insurance + maintenance + management
//! 7. NOI = effective − operating expenses
//! 8. cap rate = NOI / list price × 100
//! 9. loan = list price × (1 − down payment)
//! 10. r = annual rate / 12, n = term × 12
//! 11. payment = level amortized payment (straight-line when r = 0)
//! 12. debt service = payment × 12
//! 13. cash flow = NOI − debt service
//! 14. equity = list price × down payment
//! 15. cash-on-cash = cash flow / equity × 100
//!
//! Nothing is rounded here. Every step uses checked arithmetic.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::{ApodError, ApodResult};
use crate::types::{Assumptions, InvestmentMetrics, MetricsBreakdown, PropertyRecord};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Computes the headline metrics for one property.
///
/// # Errors
///
/// - `InvalidListPrice` if the price is not positive
/// - `InvalidPropertyTax` if the tax is negative
/// - `InvalidUnits` if the unit count is zero
/// - `DivisionByZero` if the down payment or the loan term is zero
/// - `Overflow` if an intermediate value leaves the decimal range
///
/// # Example
///
/// ```rust
/// use apod_core::calculator::calculate;
/// use apod_core::types::{Assumptions, PropertyRecord};
/// use rust_decimal_macros::dec;
///
/// let record = PropertyRecord::new("12 Elm St", dec!(300000)).with_property_tax(dec!(3600));
/// let metrics = calculate(&record, &Assumptions::default()).unwrap();
/// assert_eq!(metrics.noi, dec!(20068.8));
/// ```
pub fn calculate(record: &PropertyRecord, assumptions: &Assumptions) -> ApodResult<InvestmentMetrics> {
    calculate_breakdown(record, assumptions).map(|breakdown| breakdown.metrics())
}

/// Computes the metrics along with every intermediate value.
///
/// # Errors
///
/// Same as [`calculate`].
pub fn calculate_breakdown(
    record: &PropertyRecord,
    assumptions: &Assumptions,
) -> ApodResult<MetricsBreakdown> {
    record.validate()?;
    if assumptions.units == 0 {
        return Err(ApodError::InvalidUnits {
            units: assumptions.units,
        });
    }

    let list_price = record.list_price;
    let units = Decimal::from(assumptions.units);

    let insurance = mul(list_price, assumptions.insurance_rate, "insurance")?;
    let maintenance_annual = mul(
        mul(assumptions.maintenance_per_unit_monthly, units, "maintenance")?,
        MONTHS_PER_YEAR,
        "maintenance",
    )?;
    let gross_annual_income = mul(
        mul(assumptions.monthly_rent_per_unit, units, "gross income")?,
        MONTHS_PER_YEAR,
        "gross income",
    )?;
    let effective_annual_income = mul(
        gross_annual_income,
        sub(Decimal::ONE, assumptions.vacancy_rate, "effective income")?,
        "effective income",
    )?;
    let property_management_cost = mul(
        effective_annual_income,
        assumptions.property_management_rate,
        "property management",
    )?;
    let operating_expenses = [insurance, maintenance_annual, property_management_cost]
        .into_iter()
        .try_fold(record.property_tax, |total, cost| {
            add(total, cost, "operating expenses")
        })?;
    let noi = sub(effective_annual_income, operating_expenses, "net operating income")?;
    let cap_rate_pct = mul(
        div(noi, list_price, "cap rate")?,
        Decimal::ONE_HUNDRED,
        "cap rate",
    )?;

    let loan_amount = mul(
        list_price,
        sub(Decimal::ONE, assumptions.down_payment_pct, "loan amount")?,
        "loan amount",
    )?;
    let monthly_rate = div(assumptions.interest_rate_annual, MONTHS_PER_YEAR, "monthly rate")?;
    let payment_count = assumptions.loan_term_years.saturating_mul(12);
    let monthly_payment = amortized_payment(
        loan_amount,
        monthly_rate,
        payment_count,
        assumptions.interest_rate_annual,
    )?;
    let annual_debt_service = mul(monthly_payment, MONTHS_PER_YEAR, "debt service")?;
    let cash_flow = sub(noi, annual_debt_service, "cash flow")?;

    let equity_invested = mul(list_price, assumptions.down_payment_pct, "equity")?;
    if equity_invested.is_zero() {
        return Err(ApodError::division_by_zero("cash-on-cash return"));
    }
    let cash_on_cash_pct = mul(
        div(cash_flow, equity_invested, "cash-on-cash return")?,
        Decimal::ONE_HUNDRED,
        "cash-on-cash return",
    )?;

    log::trace!(
        "{}: noi={} cap_rate={} cash_flow={}",
        record.address,
        noi,
        cap_rate_pct,
        cash_flow
    );

    Ok(MetricsBreakdown {
        insurance,
        maintenance_annual,
        gross_annual_income,
        effective_annual_income,
        property_management_cost,
        operating_expenses,
        noi,
        cap_rate_pct,
        loan_amount,
        monthly_rate,
        payment_count,
        monthly_payment,
        annual_debt_service,
        cash_flow,
        equity_invested,
        cash_on_cash_pct,
    })
}

/// Level monthly payment for a fixed-rate loan.
///
/// `annual_rate` is a fraction (0.07 = 7%). A zero rate repays the
/// principal in equal installments.
///
/// # Errors
///
/// Returns `DivisionByZero` for a zero term and `InvalidInterestRate` if
/// the compounding factor overflows.
///
/// # Example
///
/// ```rust
/// use apod_core::calculator::monthly_payment;
/// use rust_decimal_macros::dec;
///
/// let payment = monthly_payment(dec!(240000), dec!(0), 30).unwrap();
/// assert_eq!(payment * dec!(360), dec!(240000));
/// ```
pub fn monthly_payment(
    loan_amount: Decimal,
    annual_rate: Decimal,
    term_years: u32,
) -> ApodResult<Decimal> {
    amortized_payment(
        loan_amount,
        annual_rate / MONTHS_PER_YEAR,
        term_years.saturating_mul(12),
        annual_rate,
    )
}

fn amortized_payment(
    loan_amount: Decimal,
    monthly_rate: Decimal,
    payment_count: u32,
    annual_rate: Decimal,
) -> ApodResult<Decimal> {
    if payment_count == 0 {
        return Err(ApodError::division_by_zero("loan amortization"));
    }

    if monthly_rate.is_zero() {
        return div(loan_amount, Decimal::from(payment_count), "loan amortization");
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(payment_count))
        .ok_or(ApodError::InvalidInterestRate { rate: annual_rate })?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(ApodError::division_by_zero("loan amortization"));
    }

    let numerator = mul(
        loan_amount,
        mul(monthly_rate, growth, "loan amortization")?,
        "loan amortization",
    )?;
    div(numerator, denominator, "loan amortization")
}

// Checked arithmetic. Leaving the decimal range is a row error.

fn add(a: Decimal, b: Decimal, operation: &str) -> ApodResult<Decimal> {
    a.checked_add(b).ok_or_else(|| ApodError::overflow(operation))
}

fn sub(a: Decimal, b: Decimal, operation: &str) -> ApodResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| ApodError::overflow(operation))
}

fn mul(a: Decimal, b: Decimal, operation: &str) -> ApodResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| ApodError::overflow(operation))
}

fn div(a: Decimal, b: Decimal, operation: &str) -> ApodResult<Decimal> {
    if b.is_zero() {
        return Err(ApodError::division_by_zero(operation));
    }
    a.checked_div(b).ok_or_else(|| ApodError::overflow(operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::round_money;
    use rust_decimal_macros::dec;

    fn scenario_record() -> PropertyRecord {
        PropertyRecord::new("123 Main St", dec!(300000)).with_property_tax(dec!(3600))
    }

    #[test]
    fn test_reference_scenario() {
        let b = calculate_breakdown(&scenario_record(), &Assumptions::default()).unwrap();

        assert_eq!(b.insurance, dec!(1200));
        assert_eq!(b.maintenance_annual, dec!(2400));
        assert_eq!(b.gross_annual_income, dec!(31200));
        assert_eq!(b.effective_annual_income, dec!(29640));
        assert_eq!(b.property_management_cost, dec!(2371.2));
        assert_eq!(b.operating_expenses, dec!(9571.2));
        assert_eq!(b.noi, dec!(20068.8));
        assert_eq!(b.cap_rate_pct, dec!(6.6896));
        assert_eq!(b.loan_amount, dec!(240000));
        assert_eq!(b.monthly_rate.round_dp(6), dec!(0.005833));
        assert_eq!(b.payment_count, 360);
        assert_eq!(round_money(b.monthly_payment), dec!(1596.73));
        assert_eq!(round_money(b.annual_debt_service), dec!(19160.71));
        assert_eq!(round_money(b.cash_flow), dec!(908.09));
        assert_eq!(b.equity_invested, dec!(60000));
        assert_eq!(round_money(b.cash_on_cash_pct), dec!(1.51));
    }

    #[test]
    fn test_calculate_matches_breakdown() {
        let record = scenario_record();
        let assumptions = Assumptions::default();
        let metrics = calculate(&record, &assumptions).unwrap();
        let breakdown = calculate_breakdown(&record, &assumptions).unwrap();
        assert_eq!(metrics, breakdown.metrics());
    }

    #[test]
    fn test_zero_interest_is_straight_line() {
        let assumptions = Assumptions::default().with_interest_rate_annual(Decimal::ZERO);
        let b = calculate_breakdown(&scenario_record(), &assumptions).unwrap();
        assert_eq!(b.monthly_payment, b.loan_amount / dec!(360));
        assert_eq!(b.annual_debt_service, b.monthly_payment * dec!(12));
    }

    #[test]
    fn test_zero_down_payment_is_division_by_zero() {
        let assumptions = Assumptions::default().with_down_payment_pct(Decimal::ZERO);
        let err = calculate(&scenario_record(), &assumptions).unwrap_err();
        assert!(matches!(err, ApodError::DivisionByZero { .. }));
    }

    #[test]
    fn test_full_cash_purchase() {
        let assumptions = Assumptions::default().with_down_payment_pct(Decimal::ONE);
        let b = calculate_breakdown(&scenario_record(), &assumptions).unwrap();
        assert_eq!(b.loan_amount, Decimal::ZERO);
        assert_eq!(b.monthly_payment, Decimal::ZERO);
        assert_eq!(b.cash_flow, b.noi);
        // All-cash cash-on-cash equals the cap rate.
        assert_eq!(b.cash_on_cash_pct, b.cap_rate_pct);
    }

    #[test]
    fn test_invalid_list_price() {
        let record = PropertyRecord::new("0 Nowhere", Decimal::ZERO);
        let err = calculate(&record, &Assumptions::default()).unwrap_err();
        assert_eq!(err, ApodError::invalid_list_price(Decimal::ZERO));
    }

    #[test]
    fn test_invalid_units() {
        let assumptions = Assumptions::default().with_units(0);
        let err = calculate(&scenario_record(), &assumptions).unwrap_err();
        assert_eq!(err, ApodError::InvalidUnits { units: 0 });
    }

    #[test]
    fn test_zero_loan_term() {
        let assumptions = Assumptions::default().with_loan_term_years(0);
        let err = calculate(&scenario_record(), &assumptions).unwrap_err();
        assert!(matches!(err, ApodError::DivisionByZero { .. }));
    }

    #[test]
    fn test_units_beyond_ui_range_still_compute() {
        let assumptions = Assumptions::default().with_units(48);
        let b = calculate_breakdown(&scenario_record(), &assumptions).unwrap();
        assert_eq!(b.gross_annual_income, dec!(1300) * dec!(48) * dec!(12));
    }

    #[test]
    fn test_monthly_payment_standalone() {
        let payment = monthly_payment(dec!(240000), dec!(0.07), 30).unwrap();
        assert_eq!(round_money(payment), dec!(1596.73));

        let err = monthly_payment(dec!(240000), dec!(0.07), 0).unwrap_err();
        assert!(matches!(err, ApodError::DivisionByZero { .. }));
    }

    #[test]
    fn test_negative_cash_flow_is_reported() {
        let assumptions = Assumptions::default()
            .with_monthly_rent_per_unit(dec!(500))
            .with_interest_rate_annual(dec!(0.15));
        let metrics = calculate(&scenario_record(), &assumptions).unwrap();
        assert!(metrics.cash_flow < Decimal::ZERO);
        assert!(metrics.cash_on_cash_pct < Decimal::ZERO);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let tiny = PropertyRecord::new("1 Small St", dec!(0.0000000000000000000000001))
            .with_property_tax(dec!(3600));
        let err = calculate(&tiny, &Assumptions::default()).unwrap_err();
        assert_eq!(err, ApodError::overflow("cap rate"));

        let taxed = scenario_record().with_property_tax(Decimal::MAX);
        let err = calculate(&taxed, &Assumptions::default()).unwrap_err();
        assert_eq!(err, ApodError::overflow("operating expenses"));
    }
}
