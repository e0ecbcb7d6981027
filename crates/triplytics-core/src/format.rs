//! Presentation helpers applied at the reporting boundary.

/// Decimal places used when figures leave the core.
pub const PRESENTATION_DECIMALS: i32 = 2;

/// Rounds a figure to two decimals, half away from zero.
///
/// Only called on outputs; aggregation keeps full precision.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(PRESENTATION_DECIMALS);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// How the integer part of an amount is split into digit groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigitGrouping {
    /// `1,234,567`
    #[default]
    Thousands,
    /// `12,34,567`: the last three digits, then pairs.
    Indian,
}

impl DigitGrouping {
    /// Grouping conventionally used by a BCP 47 locale tag such as `en-IN`.
    pub fn for_locale(locale: &str) -> Self {
        let region = locale
            .split(['-', '_'])
            .skip(1)
            .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()));
        match region {
            Some(region) if region.eq_ignore_ascii_case("IN") => DigitGrouping::Indian,
            _ => DigitGrouping::Thousands,
        }
    }

    fn apply(self, digits: &str) -> String {
        let len = digits.len();
        let mut grouped = String::with_capacity(len + len / 2);
        for (idx, ch) in digits.chars().enumerate() {
            let remaining = len - idx;
            let boundary = match self {
                DigitGrouping::Thousands => remaining % 3 == 0,
                DigitGrouping::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
            };
            if idx > 0 && boundary {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        grouped
    }
}

/// Currency label plus digit grouping, resolved once from preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub currency: String,
    pub grouping: DigitGrouping,
}

impl MoneyFormat {
    pub fn new(currency: &str, locale: &str) -> Self {
        Self {
            currency: currency.to_string(),
            grouping: DigitGrouping::for_locale(locale),
        }
    }

    /// Formats `amount` rounded to cents, e.g. `INR 1,23,456.50` for `en-IN`.
    pub fn format(&self, amount: f64) -> String {
        let rounded = round_to_cents(amount);
        let sign = if rounded < 0.0 { "-" } else { "" };
        let text = format!("{:.2}", rounded.abs());
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        format!("{sign}{} {}.{fraction}", self.currency, self.grouping.apply(whole))
    }
}

/// Formats an amount with its currency label and thousands grouping, e.g. `INR 1,234.50`.
pub fn format_money(amount: f64, currency: &str) -> String {
    MoneyFormat {
        currency: currency.to_string(),
        grouping: DigitGrouping::Thousands,
    }
    .format(amount)
}

/// Formats a fuel volume in litres.
pub fn format_litres(litres: f64) -> String {
    format!("{:.2} L", round_to_cents(litres))
}
