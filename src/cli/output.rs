use std::{
    fmt,
    io::{self, Write},
};

use colored::Colorize;
use serde::Serialize;
use triplytics_core::{
    format_litres, Dashboard, MoneyFormat, FuelStatus, MonthlySummary, PeriodReport,
    PeriodSummary, PlatformSummary,
};
use triplytics_domain::PeriodWindow;

use crate::errors::CliError;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => text,
        MessageKind::Success => format!("[ok] {text}").bright_green().to_string(),
        MessageKind::Warning => format!("[!] {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("[x] {text}").bright_red().to_string(),
    }
}

pub fn print(out: &mut dyn Write, kind: MessageKind, message: impl fmt::Display) -> io::Result<()> {
    writeln!(out, "{}", apply_style(kind, message))
}

pub fn success(out: &mut dyn Write, message: impl fmt::Display) -> io::Result<()> {
    print(out, MessageKind::Success, message)
}

pub fn warning(out: &mut dyn Write, message: impl fmt::Display) -> io::Result<()> {
    print(out, MessageKind::Warning, message)
}

pub fn section(out: &mut dyn Write, title: impl fmt::Display) -> io::Result<()> {
    print(out, MessageKind::Section, title)
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn signed_money(amount: f64, money: &MoneyFormat) -> String {
    let text = money.format(amount);
    if amount < 0.0 {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

fn window_label(window: &PeriodWindow) -> String {
    format!(
        "{} .. {}",
        window.start.format("%Y-%m-%d %H:%M UTC"),
        window.end.format("%Y-%m-%d %H:%M UTC")
    )
}

fn row(out: &mut dyn Write, label: &str, value: impl fmt::Display) -> io::Result<()> {
    writeln!(out, "{label:<16}{value}")
}

fn summary_rows(out: &mut dyn Write, summary: &PeriodSummary, money: &MoneyFormat) -> io::Result<()> {
    row(out, "Trips", summary.trip_count)?;
    row(out, "Income", money.format(summary.total_income))?;
    row(out, "Fuel cost", money.format(summary.estimated_fuel_cost))?;
    row(out, "Other expenses", money.format(summary.ancillary_expenses))?;
    row(out, "Net profit", signed_money(summary.net_profit, money))?;
    row(out, "Fuel remaining", format_litres(summary.fuel_remaining_litres))
}

pub fn render_report(out: &mut dyn Write, report: &PeriodReport, money: &MoneyFormat) -> io::Result<()> {
    section(out, format!("{} report", capitalize(report.period.as_str())))?;
    row(out, "Window", window_label(&report.window))?;
    summary_rows(out, &report.summary, money)
}

pub fn render_range(
    out: &mut dyn Write,
    window: &PeriodWindow,
    summary: &PeriodSummary,
    money: &MoneyFormat,
) -> io::Result<()> {
    section(out, "Custom range report")?;
    row(out, "Window", window_label(window))?;
    summary_rows(out, summary, money)
}

pub fn render_dashboard(out: &mut dyn Write, dashboard: &Dashboard, money: &MoneyFormat) -> io::Result<()> {
    section(
        out,
        format!("Dashboard as of {}", dashboard.generated_at.format("%Y-%m-%d %H:%M UTC")),
    )?;
    writeln!(
        out,
        "{:<12}{:>7}{:>18}{:>18}{:>18}{:>18}",
        "Period", "Trips", "Income", "Fuel cost", "Other", "Net profit"
    )?;
    for report in &dashboard.periods {
        let summary = &report.summary;
        writeln!(
            out,
            "{:<12}{:>7}{:>18}{:>18}{:>18}{:>18}",
            report.period.as_str(),
            summary.trip_count,
            money.format(summary.total_income),
            money.format(summary.estimated_fuel_cost),
            money.format(summary.ancillary_expenses),
            money.format(summary.net_profit),
        )?;
    }
    render_fuel(out, &dashboard.fuel, money)
}

pub fn render_monthly(out: &mut dyn Write, months: &[MonthlySummary], money: &MoneyFormat) -> io::Result<()> {
    section(out, "Monthly breakdown")?;
    if months.is_empty() {
        return writeln!(out, "No dated trips recorded.");
    }
    writeln!(
        out,
        "{:<10}{:>7}{:>18}{:>18}{:>18}",
        "Month", "Trips", "Income", "Costs", "Net profit"
    )?;
    for month in months {
        writeln!(
            out,
            "{:<10}{:>7}{:>18}{:>18}{:>18}",
            format!("{}-{:02}", month.year, month.month),
            month.trip_count,
            money.format(month.total_income),
            money.format(month.estimated_fuel_cost + month.ancillary_expenses),
            money.format(month.net_profit),
        )?;
    }
    Ok(())
}

pub fn render_platforms(
    out: &mut dyn Write,
    window: &PeriodWindow,
    platforms: &[PlatformSummary],
    money: &MoneyFormat,
) -> io::Result<()> {
    section(out, format!("Platforms {}", window_label(window)))?;
    if platforms.is_empty() {
        return writeln!(out, "No trips in this window.");
    }
    writeln!(
        out,
        "{:<16}{:>7}{:>18}{:>18}",
        "Platform", "Trips", "Income", "Net profit"
    )?;
    for platform in platforms {
        writeln!(
            out,
            "{:<16}{:>7}{:>18}{:>18}",
            platform.platform,
            platform.trip_count,
            money.format(platform.total_income),
            money.format(platform.net_profit),
        )?;
    }
    Ok(())
}

pub fn render_fuel(out: &mut dyn Write, fuel: &FuelStatus, money: &MoneyFormat) -> io::Result<()> {
    section(out, "Fuel")?;
    row(out, "Mileage", format!("{:.2} km/L", fuel.mileage))?;
    row(out, "Purchased", format_litres(fuel.purchased_litres))?;
    row(out, "Spent", money.format(fuel.purchase_cost))?;
    row(out, "Avg price", format!("{} / L", money.format(fuel.average_price_per_litre)))?;
    row(out, "Consumed", format_litres(fuel.consumed_litres))?;
    row(out, "Remaining", format_litres(fuel.remaining_litres))?;
    if fuel.is_overdrawn() {
        warning(out, "Estimated consumption exceeds recorded fuel purchases.")?;
    }
    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use triplytics_domain::PeriodSelector;

    fn inr() -> MoneyFormat {
        MoneyFormat::new("INR", "en-IN")
    }

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut buffer: Vec<u8> = Vec::new();
        f(&mut buffer as &mut dyn Write).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn report_lists_every_figure_with_two_decimals() {
        let now = Utc.with_ymd_and_hms(2025, 7, 17, 12, 0, 0).unwrap();
        let report = PeriodReport {
            period: PeriodSelector::HalfAnnual,
            window: PeriodSelector::HalfAnnual.window(now),
            summary: PeriodSummary {
                net_profit: -12.5,
                total_income: 1500.0,
                estimated_fuel_cost: 1480.0,
                ancillary_expenses: 32.5,
                trip_count: 4,
                fuel_remaining_litres: 3.0,
            },
        };

        let text = render(|out| render_report(out, &report, &inr()));
        assert!(text.contains("=== Half-annual report ==="));
        assert!(text.contains("Income          INR 1,500.00"));
        assert!(text.contains("Net profit      -INR 12.50"));
        assert!(text.contains("Fuel remaining  3.00 L"));
    }

    #[test]
    fn configured_locale_drives_digit_grouping() {
        let summary = PeriodSummary {
            total_income: 250_000.0,
            net_profit: 250_000.0,
            ..PeriodSummary::default()
        };
        let window = PeriodSelector::Annual.window(Utc.with_ymd_and_hms(2025, 7, 17, 12, 0, 0).unwrap());

        let indian = render(|out| render_range(out, &window, &summary, &inr()));
        assert!(indian.contains("=== Custom range report ==="));
        assert!(indian.contains("Income          INR 2,50,000.00"));

        let western = MoneyFormat::new("USD", "en-US");
        let text = render(|out| render_range(out, &window, &summary, &western));
        assert!(text.contains("Income          USD 250,000.00"));
    }

    #[test]
    fn overdrawn_fuel_prints_warning() {
        let fuel = FuelStatus {
            remaining_litres: -2.0,
            ..FuelStatus::default()
        };
        let text = render(|out| render_fuel(out, &fuel, &inr()));
        assert!(text.contains("[!] Estimated consumption exceeds"));
    }

    #[test]
    fn empty_monthly_breakdown_says_so() {
        let text = render(|out| render_monthly(out, &[], &inr()));
        assert!(text.contains("No dated trips recorded."));
    }
}
