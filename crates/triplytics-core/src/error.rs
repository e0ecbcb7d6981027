use thiserror::Error;
use triplytics_domain::{PeriodSelector, PeriodWindowError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Unknown period selector `{input}`{}", suggestion_hint(.suggestion))]
    UnknownPeriod {
        input: String,
        suggestion: Option<PeriodSelector>,
    },
    #[error("Invalid window: {0}")]
    InvalidWindow(#[from] PeriodWindowError),
}

fn suggestion_hint(suggestion: &Option<PeriodSelector>) -> String {
    match suggestion {
        Some(selector) => format!(" (did you mean `{}`?)", selector.as_str()),
        None => String::new(),
    }
}

const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Parses a caller-supplied period selector.
///
/// This is the gate in front of the aggregator: unknown values fail here with
/// the closest known selector attached, so the aggregation itself only ever
/// sees the closed [`PeriodSelector`] set.
pub fn parse_period(input: &str) -> Result<PeriodSelector, CoreError> {
    input.parse::<PeriodSelector>().map_err(|_| {
        let needle = input.trim().to_ascii_lowercase();
        let suggestion = PeriodSelector::ALL
            .into_iter()
            .map(|selector| (selector, strsim::jaro_winkler(&needle, selector.as_str())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(selector, _)| selector);
        CoreError::UnknownPeriod {
            input: input.to_string(),
            suggestion,
        }
    })
}
