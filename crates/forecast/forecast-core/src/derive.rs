//! Derived series
//!
//! Savings and balance are not fitted directly: savings is income minus
//! expense, balance is the running sum of savings on top of the current
//! balance. Bounds are carried through the same arithmetic so they keep
//! bracketing the point values.

use forecast_spi::{ForecastError, ForecastOutput, Result};

/// `income - expense`, step by step.
///
/// Bounds pair the pessimistic and optimistic ends of each side:
/// `lower = income.lower - expense.upper`, `upper = income.upper - expense.lower`.
/// Bounds are produced only when both inputs have them.
pub fn derive_savings(income: &ForecastOutput, expense: &ForecastOutput) -> Result<ForecastOutput> {
    if income.horizon() != expense.horizon() {
        return Err(ForecastError::ModelFit(format!(
            "income horizon {} does not match expense horizon {}",
            income.horizon(),
            expense.horizon()
        )));
    }

    let values = income
        .values
        .iter()
        .zip(expense.values.iter())
        .map(|(i, e)| i - e)
        .collect();

    let bounds = match (&income.lower, &income.upper, &expense.lower, &expense.upper) {
        (Some(il), Some(iu), Some(el), Some(eu)) => {
            let lower = il.iter().zip(eu.iter()).map(|(l, u)| l - u).collect();
            let upper = iu.iter().zip(el.iter()).map(|(u, l)| u - l).collect();
            Some((lower, upper))
        }
        _ => None,
    };

    Ok(match bounds {
        Some((lower, upper)) => ForecastOutput {
            values,
            lower: Some(lower),
            upper: Some(upper),
        },
        None => ForecastOutput::point(values),
    })
}

/// Running balance: `start + cumulative sum` of each series in `savings`.
pub fn accumulate_balance(start: f64, savings: &ForecastOutput) -> ForecastOutput {
    let running = |series: &[f64]| -> Vec<f64> {
        series
            .iter()
            .scan(start, |acc, step| {
                *acc += step;
                Some(*acc)
            })
            .collect()
    };

    ForecastOutput {
        values: running(&savings.values),
        lower: savings.lower.as_deref().map(running),
        upper: savings.upper.as_deref().map(running),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_savings_is_difference() {
        let income = ForecastOutput::point(vec![100.0, 120.0]);
        let expense = ForecastOutput::point(vec![40.0, 150.0]);
        let savings = derive_savings(&income, &expense).unwrap();
        assert_eq!(savings.values, vec![60.0, -30.0]);
        assert!(!savings.has_intervals());
    }

    #[test]
    fn test_savings_bounds_cross_pair() {
        let income = ForecastOutput::with_band(vec![100.0], &[10.0]);
        let expense = ForecastOutput::with_band(vec![40.0], &[5.0]);
        let savings = derive_savings(&income, &expense).unwrap();
        assert_eq!(savings.values, vec![60.0]);
        assert_eq!(savings.lower, Some(vec![90.0 - 45.0]));
        assert_eq!(savings.upper, Some(vec![110.0 - 35.0]));
    }

    #[test]
    fn test_savings_requires_one_sided_bounds_on_both() {
        let income = ForecastOutput::with_band(vec![100.0], &[10.0]);
        let expense = ForecastOutput::point(vec![40.0]);
        assert!(!derive_savings(&income, &expense).unwrap().has_intervals());
    }

    #[test]
    fn test_savings_horizon_mismatch() {
        let income = ForecastOutput::point(vec![1.0, 2.0]);
        let expense = ForecastOutput::point(vec![1.0]);
        assert!(matches!(
            derive_savings(&income, &expense),
            Err(ForecastError::ModelFit(_))
        ));
    }

    #[test]
    fn test_balance_accumulates_values_and_bounds() {
        let savings = ForecastOutput::with_band(vec![10.0, -5.0, 20.0], &[1.0, 1.0, 1.0]);
        let balance = accumulate_balance(1000.0, &savings);
        assert_eq!(balance.values, vec![1010.0, 1005.0, 1025.0]);
        assert_eq!(balance.lower, Some(vec![1009.0, 1003.0, 1022.0]));
        assert_eq!(balance.upper, Some(vec![1011.0, 1007.0, 1028.0]));
    }
}
