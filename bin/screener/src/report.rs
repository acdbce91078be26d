//! Plain-text and JSON rendering of scan reports.

use std::fmt::{self, Write};

use common::format::{format_money, format_price, format_volume, stars};
use common::{OutputFormat, ScanReport, ScanResult, SignalTier, StrategyKind, StrategyOutcome};
use risk::PriceLevels;

pub fn render(report: &ScanReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

pub fn render_text(report: &ScanReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "IDX SCREENER  {}",
        report.taken_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(
        out,
        "Scanned {} instruments, {} rejected",
        report.scanned,
        report.rejected.len()
    )?;
    for r in &report.rejected {
        writeln!(out, "  rejected {}: {}", r.symbol, r.reason)?;
    }

    for outcome in &report.outcomes {
        out.push('\n');
        write_outcome(&mut out, outcome)?;
    }

    out.push('\n');
    write_stats(&mut out, report)?;
    out.push('\n');
    write_sectors(&mut out, report)?;
    Ok(out)
}

fn title(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Reversal => "REVERSAL: buy near the close, sell the next open",
        StrategyKind::Momentum => "MOMENTUM: buy after the open, sell into the close",
        StrategyKind::ForeignAccumulation => "FOREIGN ACCUMULATION: net foreign buying",
        StrategyKind::ForeignDistribution => "FOREIGN DISTRIBUTION: net foreign selling",
    }
}

fn write_outcome(out: &mut String, outcome: &StrategyOutcome) -> fmt::Result {
    writeln!(
        out,
        "== {} (top {} of {}) ==",
        title(outcome.strategy),
        outcome.top().len(),
        outcome.results.len()
    )?;
    if outcome.results.is_empty() {
        return writeln!(out, "  no instruments admitted");
    }

    match outcome.strategy {
        StrategyKind::Reversal | StrategyKind::Momentum => {
            writeln!(
                out,
                "{:>3}  {:<6} {:>9} {:>7} {:>6}  {:<5}  {:<11} {:>9} {:>9} {:>5}  {}",
                "#", "Symbol", "Price", "Chg%", "Score", "Str", "Signal", "Target", "Stop", "R:R", "Reason"
            )?;
            for (i, r) in outcome.top().iter().enumerate() {
                write_price_row(out, i + 1, r)?;
            }
        }
        StrategyKind::ForeignAccumulation | StrategyKind::ForeignDistribution => {
            writeln!(
                out,
                "{:>3}  {:<6} {:>9} {:>8} {:>11} {:>5} {:>4}  {:<5}  {:<11} {}",
                "#", "Symbol", "Price", "NetFB", "Value", "F%", "Acc", "Str", "Signal", "Sector"
            )?;
            for (i, r) in outcome.top().iter().enumerate() {
                write_flow_row(out, i + 1, r)?;
            }
        }
    }
    Ok(())
}

fn write_price_row(out: &mut String, rank: usize, r: &ScanResult) -> fmt::Result {
    let (target, stop, rr) = match (r.target, r.stop_loss) {
        (Some(target), Some(stop_loss)) => {
            let levels = PriceLevels { target, stop_loss };
            (
                format_price(target),
                format_price(stop_loss),
                format!("{:.1}", levels.risk_reward(r.price)),
            )
        }
        _ => ("-".into(), "-".into(), "-".into()),
    };
    writeln!(
        out,
        "{:>3}  {:<6} {:>9} {:>+7.2} {:>6.1}  {:<5}  {:<11} {:>9} {:>9} {:>5}  {}",
        rank,
        r.symbol,
        format_price(r.price),
        r.change_pct,
        r.score,
        stars(r.strength),
        r.tier.to_string(),
        target,
        stop,
        rr,
        r.reason
    )
}

fn write_flow_row(out: &mut String, rank: usize, r: &ScanResult) -> fmt::Result {
    writeln!(
        out,
        "{:>3}  {:<6} {:>9} {:>8} {:>11} {:>4.0}% {:>4}  {:<5}  {:<11} {}",
        rank,
        r.symbol,
        format_price(r.price),
        format_volume(r.net_foreign_buy),
        format_money(r.net_foreign_value),
        r.foreign_pct,
        r.accumulation_days,
        stars(r.strength),
        r.tier.to_string(),
        r.sector
    )
}

fn write_stats(out: &mut String, report: &ScanReport) -> fmt::Result {
    writeln!(out, "== STATISTICS ==")?;
    for outcome in &report.outcomes {
        let tiers: Vec<String> = tier_order(outcome.strategy)
            .iter()
            .map(|t| format!("{t}: {}", outcome.count(*t)))
            .collect();
        writeln!(
            out,
            "  {:<21} admitted {:>3}  ({})",
            outcome.strategy.to_string(),
            outcome.results.len(),
            tiers.join(", ")
        )?;
    }
    Ok(())
}

fn tier_order(kind: StrategyKind) -> &'static [SignalTier] {
    match kind {
        StrategyKind::Reversal | StrategyKind::Momentum => {
            &[SignalTier::StrongBuy, SignalTier::Buy, SignalTier::Watch]
        }
        StrategyKind::ForeignAccumulation => {
            &[SignalTier::StrongBuy, SignalTier::Buy, SignalTier::Accumulate]
        }
        StrategyKind::ForeignDistribution => {
            &[SignalTier::StrongSell, SignalTier::Sell, SignalTier::Distribute]
        }
    }
}

/// Per-sector instrument count, average price-screen scores and net foreign value.
fn write_sectors(out: &mut String, report: &ScanReport) -> fmt::Result {
    writeln!(out, "== BY SECTOR ==")?;
    writeln!(
        out,
        "  {:<15} {:>3} {:>9} {:>9} {:>12}",
        "Sector", "N", "Reversal", "Momentum", "Foreign"
    )?;
    for (sector, rows) in report.by_sector() {
        let avg = |kind: StrategyKind| {
            let sum: f64 = rows.iter().filter_map(|r| r.scores.get(kind)).sum();
            sum / rows.len() as f64
        };
        let foreign: f64 = rows.iter().map(|r| r.net_foreign_value).sum();
        writeln!(
            out,
            "  {:<15} {:>3} {:>9.1} {:>9.1} {:>12}",
            sector,
            rows.len(),
            avg(StrategyKind::Reversal),
            avg(StrategyKind::Momentum),
            format_money(foreign)
        )?;
    }
    Ok(())
}
