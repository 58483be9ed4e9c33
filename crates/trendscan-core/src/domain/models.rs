use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// Listing market of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    Kospi,
    Kosdaq,
}

impl Market {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kospi => "KOSPI",
            Self::Kosdaq => "KOSDAQ",
        }
    }
}

impl FromStr for Market {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "KOSPI" => Ok(Self::Kospi),
            "KOSDAQ" => Ok(Self::Kosdaq),
            _ => Err(ValidationError::UnknownMarket {
                value: input.to_owned(),
            }),
        }
    }
}

impl Display for Market {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instrument metadata. Owned by the ingestion side; the engine only
/// reads it and keys everything on the ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub ticker: Symbol,
    pub name: String,
    pub market: Market,
    pub is_active: bool,
}

impl Instrument {
    pub fn new(ticker: Symbol, name: impl Into<String>, market: Market, is_active: bool) -> Self {
        Self {
            ticker,
            name: name.into(),
            market,
            is_active,
        }
    }
}

/// One daily OHLCV observation for an instrument.
///
/// The derived analytic columns (moving averages, ROC, momentum, rank)
/// live in the store; this is the raw input the indicator pass reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PriceObservation {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_positive("open", open)?;
        validate_positive("high", high)?;
        validate_positive("low", low)?;
        validate_positive("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }
        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(input: &str) -> TradingDate {
        TradingDate::parse(input).expect("date")
    }

    #[test]
    fn parses_market_case_insensitively() {
        assert_eq!("kosdaq".parse::<Market>().expect("market"), Market::Kosdaq);
        assert!(matches!(
            "NYSE".parse::<Market>(),
            Err(ValidationError::UnknownMarket { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_close() {
        let err = PriceObservation::new(date("2024-01-02"), 10.0, 12.0, 9.0, 0.0, None)
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonPositiveValue { field: "close" }
        ));
    }

    #[test]
    fn rejects_close_outside_range() {
        let err = PriceObservation::new(date("2024-01-02"), 10.0, 12.0, 9.0, 12.5, Some(100))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarBounds));
    }
}
