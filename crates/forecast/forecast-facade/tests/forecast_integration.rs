//! Integration tests for the forecast stack

use forecast_facade::prelude::*;
use forecast_facade::ForecastError;

/// 120 days of expenses around 50,000 with weekend spikes to 150,000
fn expense_history() -> Vec<f64> {
    (0..120)
        .map(|i| {
            if i % 7 >= 5 {
                150_000.0
            } else {
                50_000.0 + (i % 3) as f64 * 500.0
            }
        })
        .collect()
}

fn income_history() -> Vec<f64> {
    (0..120)
        .map(|i| if i % 14 == 0 { 400_000.0 } else { 20_000.0 })
        .collect()
}

fn assert_bracketed(output: &ForecastOutput) {
    let lower = output.lower.as_ref().expect("lower bound");
    let upper = output.upper.as_ref().expect("upper bound");
    assert_eq!(lower.len(), output.horizon());
    assert_eq!(upper.len(), output.horizon());
    for i in 0..output.horizon() {
        assert!(lower[i] <= output.values[i], "lower > value at {i}");
        assert!(output.values[i] <= upper[i], "value > upper at {i}");
    }
}

#[test]
fn test_seasonal_expense_week_ahead() {
    let model = model_for(Algorithm::Seasonal, &ModelParams::default());
    let output = model.fit_predict(&expense_history(), 7, true).unwrap();

    assert_eq!(output.horizon(), 7);
    assert_bracketed(&output);
    // day 120 sits at cycle position 1, days 124 and 125 are the weekend
    assert!(output.values[4] > output.values[0] + 50_000.0);
    assert!(output.values[5] > output.values[1] + 50_000.0);
}

#[test]
fn test_all_variants_bracket_their_forecasts() {
    let params = ModelParams::default();
    for algorithm in Algorithm::ALL {
        let output = model_for(algorithm, &params)
            .fit_predict(&expense_history(), 36, true)
            .unwrap();
        assert_eq!(output.horizon(), 36);
        assert_bracketed(&output);
    }
}

#[test]
fn test_savings_derivation_law() {
    let model = model_for(Algorithm::Seasonal, &ModelParams::default());
    let income = model.fit_predict(&income_history(), 14, true).unwrap();
    let expense = model.fit_predict(&expense_history(), 14, true).unwrap();

    let savings = derive_savings(&income, &expense).unwrap();
    for t in 0..14 {
        assert!((savings.values[t] - (income.values[t] - expense.values[t])).abs() < 1e-6);
    }
    assert_bracketed(&savings);
}

#[test]
fn test_balance_from_savings() {
    let model = model_for(Algorithm::Linear, &ModelParams::default());
    let income = model.fit_predict(&income_history(), 5, true).unwrap();
    let expense = model.fit_predict(&expense_history(), 5, true).unwrap();
    let savings = derive_savings(&income, &expense).unwrap();

    let balance = accumulate_balance(1_000_000.0, &savings);
    let mut running = 1_000_000.0;
    for t in 0..5 {
        running += savings.values[t];
        assert!((balance.values[t] - running).abs() < 1e-6);
    }
    assert_bracketed(&balance);
}

#[test]
fn test_primitive_clamp_keeps_ordering() {
    let falling: Vec<f64> = (0..30).map(|i| 300.0 - 12.0 * i as f64).collect();
    let output = model_for(Algorithm::Linear, &ModelParams::default())
        .fit_predict(&falling, 10, true)
        .unwrap()
        .clamp_non_negative();

    assert!(output.values.iter().all(|v| *v >= 0.0));
    assert_bracketed(&output);
}

#[test]
fn test_nan_series_is_model_fit_error() {
    let mut series = expense_history();
    series[50] = f64::NAN;
    let err = model_for(Algorithm::Seasonal, &ModelParams::default())
        .fit_predict(&series, 7, false)
        .unwrap_err();
    assert!(matches!(err, ForecastError::ModelFit(_)));
}

#[test]
fn test_unknown_algorithm_name() {
    let err = "arima".parse::<Algorithm>().unwrap_err();
    assert_eq!(err, ForecastError::UnsupportedAlgorithm("arima".to_string()));
    assert_eq!(
        "moving_average".parse::<Algorithm>().unwrap(),
        Algorithm::MovingAverage
    );
}
