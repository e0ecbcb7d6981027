use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use strsim::levenshtein;
use tracing::{debug, info};
use triplytics_config::CONFIG_KEYS;
use triplytics_core::{
    parse_period, Clock, FixedClock, MoneyFormat, PeriodAggregator, SummaryService, SystemClock,
};
use triplytics_domain::{PeriodSelector, PeriodWindow, TripSnapshot};
use triplytics_storage_json::{load_snapshot, save_snapshot, JsonSnapshotStore};

use super::{args::Invocation, output, CliContext};
use crate::{
    errors::{CliError, TriplyticsError},
    utils::build_info,
};

type CommandHandler = fn(&mut CliContext, &Invocation, &mut dyn Write) -> Result<(), CliError>;

pub(crate) struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition::new(
        "report",
        "Net profit for one period",
        "report [snapshot] [--period P | --from TS] [--now TS] [--json]",
        cmd_report,
    ),
    CommandDefinition::new(
        "dashboard",
        "Profit for every period plus fuel status",
        "dashboard [snapshot] [--now TS] [--json]",
        cmd_dashboard,
    ),
    CommandDefinition::new(
        "monthly",
        "Totals per calendar month, newest first",
        "monthly [snapshot] [--json]",
        cmd_monthly,
    ),
    CommandDefinition::new(
        "platforms",
        "Totals per ride platform within a period",
        "platforms [snapshot] [--period P] [--now TS] [--json]",
        cmd_platforms,
    ),
    CommandDefinition::new(
        "fuel",
        "Fuel purchased, consumed and remaining",
        "fuel [snapshot] [--json]",
        cmd_fuel,
    ),
    CommandDefinition::new(
        "normalize",
        "Rewrite an exported document in the canonical snapshot layout",
        "normalize <input> <output-path-or-name>",
        cmd_normalize,
    ),
    CommandDefinition::new(
        "list",
        "List snapshots stored in the data root",
        "list",
        cmd_list,
    ),
    CommandDefinition::new(
        "config",
        "Show or change preferences",
        "config show | config set <key> <value>",
        cmd_config,
    ),
    CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
    CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
];

fn find(name: &str) -> Option<&'static CommandDefinition> {
    COMMANDS.iter().find(|definition| definition.name == name)
}

pub(crate) fn dispatch(
    context: &mut CliContext,
    invocation: &Invocation,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let name = invocation.command.to_ascii_lowercase();
    match find(&name) {
        Some(definition) => {
            debug!(command = definition.name, args = ?invocation.positionals, "dispatching command");
            (definition.handler)(context, invocation, out)
        }
        None => Err(unknown_command(&name)),
    }
}

fn unknown_command(input: &str) -> CliError {
    let best = COMMANDS
        .iter()
        .map(|definition| (levenshtein(definition.name, input), definition.name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3);

    match best {
        Some((_, name)) => CliError::Input(format!("Unknown command `{input}`. Did you mean `{name}`?")),
        None => CliError::Input(format!(
            "Unknown command `{input}`. Run `help` to list commands."
        )),
    }
}

fn cmd_report(context: &mut CliContext, invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(from) = invocation.from {
        return report_range(context, invocation, from, out);
    }
    let period = resolve_period(context, invocation)?;
    let snapshot = load_target(context, invocation.target())?;
    let report = SummaryService::period(&snapshot, period, clock(invocation).now()).rounded();

    if invocation.json {
        return output::write_json(out, &report);
    }
    output::render_report(out, &report, &money_format(context))?;
    Ok(())
}

fn report_range(
    context: &mut CliContext,
    invocation: &Invocation,
    from: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if invocation.period.is_some() {
        return Err(CliError::Input("`--period` and `--from` cannot be combined".into()));
    }
    let end = clock(invocation).now();
    let snapshot = load_target(context, invocation.target())?;
    let summary = PeriodAggregator::aggregate_between(&snapshot.trips, snapshot.vehicle(), from, end)?
        .rounded();
    let window = PeriodWindow { start: from, end };

    if invocation.json {
        return output::write_json(out, &serde_json::json!({ "window": window, "summary": summary }));
    }
    output::render_range(out, &window, &summary, &money_format(context))?;
    Ok(())
}

fn cmd_dashboard(context: &mut CliContext, invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    let snapshot = load_target(context, invocation.target())?;
    let dashboard = SummaryService::dashboard_with_clock(&snapshot, &*clock(invocation)).rounded();

    if invocation.json {
        return output::write_json(out, &dashboard);
    }
    output::render_dashboard(out, &dashboard, &money_format(context))?;
    Ok(())
}

fn cmd_monthly(context: &mut CliContext, invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    let snapshot = load_target(context, invocation.target())?;
    let months: Vec<_> = SummaryService::monthly_breakdown(&snapshot)
        .iter()
        .map(|month| month.rounded())
        .collect();

    if invocation.json {
        return output::write_json(out, &months);
    }
    output::render_monthly(out, &months, &money_format(context))?;
    Ok(())
}

fn cmd_platforms(context: &mut CliContext, invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    let period = resolve_period(context, invocation)?;
    let snapshot = load_target(context, invocation.target())?;
    let window = clock(invocation).window(period);
    let platforms: Vec<_> = SummaryService::platform_breakdown(&snapshot, window)
        .iter()
        .map(|platform| platform.rounded())
        .collect();

    if invocation.json {
        return output::write_json(out, &platforms);
    }
    output::render_platforms(out, &window, &platforms, &money_format(context))?;
    Ok(())
}

fn cmd_fuel(context: &mut CliContext, invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    let snapshot = load_target(context, invocation.target())?;
    let fuel = SummaryService::fuel_status(&snapshot).rounded();

    if invocation.json {
        return output::write_json(out, &fuel);
    }
    output::render_fuel(out, &fuel, &money_format(context))?;
    Ok(())
}

fn cmd_normalize(context: &mut CliContext, invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    let (input, target) = match invocation.positionals.as_slice() {
        [input, target] => (input, target),
        _ => return Err(usage_error("normalize")),
    };

    let input = Path::new(input);
    if !input.is_file() {
        return Err(TriplyticsError::SnapshotNotFound(input.display().to_string()).into());
    }
    let snapshot = load_snapshot(input)?;

    let destination = if looks_like_path(target) {
        let path = PathBuf::from(target);
        save_snapshot(&snapshot, &path)?;
        path
    } else {
        store(context)?.save(target, &snapshot)?
    };

    info!(
        input = %input.display(),
        output = %destination.display(),
        trips = snapshot.trips.len(),
        "normalized snapshot"
    );
    output::success(
        out,
        format!(
            "Normalized {} trip(s) into {}",
            snapshot.trips.len(),
            destination.display()
        ),
    )?;
    Ok(())
}

fn cmd_list(context: &mut CliContext, _invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    let store = store(context)?;
    let names = store.list()?;
    if names.is_empty() {
        writeln!(out, "No snapshots in {}", store.root().display())?;
        return Ok(());
    }
    output::section(out, format!("Snapshots in {}", store.root().display()))?;
    for name in names {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

fn cmd_config(context: &mut CliContext, invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    match invocation.positionals.as_slice() {
        [] => show_config(context, out),
        [action] if action == "show" => show_config(context, out),
        [action, key, value @ ..] if action == "set" && !value.is_empty() => {
            let value = value.join(" ");
            if key == "default_period" {
                parse_period(&value)?;
            }
            context.config.set(key, &value)?;
            context.persist_config()?;
            output::success(out, format!("{key} = {value}"))?;
            Ok(())
        }
        _ => Err(usage_error("config")),
    }
}

fn show_config(context: &CliContext, out: &mut dyn Write) -> Result<(), CliError> {
    let config = &context.config;
    output::section(out, "Configuration")?;
    writeln!(out, "{:<20}{}", "file", context.config_path().display())?;
    for key in CONFIG_KEYS {
        let value = match key {
            "locale" => config.locale.clone(),
            "currency" => config.currency.clone(),
            "ui_color_enabled" => config.ui_color_enabled.to_string(),
            "default_period" => config.default_period.clone(),
            "default_data_root" => config.resolve_data_root().display().to_string(),
            _ => continue,
        };
        writeln!(out, "{key:<20}{value}")?;
    }
    if let Some(path) = &config.last_snapshot {
        writeln!(out, "{:<20}{}", "last_snapshot", path.display())?;
    }
    Ok(())
}

fn cmd_version(_context: &mut CliContext, _invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{}", build_info::current())?;
    Ok(())
}

fn cmd_help(_context: &mut CliContext, invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(name) = invocation.target() {
        let definition = find(&name.to_ascii_lowercase()).ok_or_else(|| unknown_command(name))?;
        writeln!(out, "{}", definition.description)?;
        writeln!(out, "usage: triplytics_cli {}", definition.usage)?;
        return Ok(());
    }

    output::section(out, "Triplytics commands")?;
    for definition in COMMANDS {
        writeln!(out, "  {:<12}{}", definition.name, definition.description)?;
    }
    writeln!(
        out,
        "\nPeriods: {}",
        PeriodSelector::ALL.map(PeriodSelector::as_str).join(", ")
    )?;
    Ok(())
}

fn usage_error(command: &str) -> CliError {
    let usage = find(command).map_or(command, |definition| definition.usage);
    CliError::Input(format!("usage: triplytics_cli {usage}"))
}

fn clock(invocation: &Invocation) -> Box<dyn Clock> {
    match invocation.now {
        Some(instant) => Box::new(FixedClock(instant)),
        None => Box::new(SystemClock),
    }
}

fn resolve_period(context: &CliContext, invocation: &Invocation) -> Result<PeriodSelector, CliError> {
    let raw = invocation
        .period
        .as_deref()
        .unwrap_or(context.config.default_period.as_str());
    Ok(parse_period(raw)?)
}

fn money_format(context: &CliContext) -> MoneyFormat {
    MoneyFormat::new(&context.config.currency, &context.config.locale)
}

fn store(context: &CliContext) -> Result<JsonSnapshotStore, CliError> {
    Ok(JsonSnapshotStore::new(context.config.resolve_data_root())?)
}

fn looks_like_path(target: &str) -> bool {
    target.contains(std::path::MAIN_SEPARATOR) || target.contains('/') || target.ends_with(".json")
}

/// Resolves `target` as a file path, then as a stored snapshot name, then
/// falls back to the last snapshot loaded. The resolved path is remembered.
fn load_target(context: &mut CliContext, target: Option<&str>) -> Result<TripSnapshot, CliError> {
    let path = match target {
        Some(target) if Path::new(target).is_file() => PathBuf::from(target),
        Some(target) => store(context)?.snapshot_path(target),
        None => context.config.last_snapshot.clone().ok_or_else(|| {
            CliError::Input("No snapshot given and none loaded before. Pass a path or a snapshot name.".into())
        })?,
    };

    if !path.is_file() {
        return Err(TriplyticsError::SnapshotNotFound(path.display().to_string()).into());
    }

    let snapshot = load_snapshot(&path)?;
    if snapshot.is_empty() {
        debug!(path = %path.display(), "snapshot has no trips");
    }

    let path = fs::canonicalize(&path).unwrap_or(path);
    if context.config.last_snapshot.as_deref() != Some(path.as_path()) {
        context.config.last_snapshot = Some(path);
        context.persist_config()?;
    }
    Ok(snapshot)
}
