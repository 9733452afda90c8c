use anyhow::Result;
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::report::{InstrumentReport, TimeframeReport};
use crate::swings::{RepairGap, SwingMarker, SwingSequence};
use crate::trend::TrendVerdict;

pub fn print_swings(swings: &SwingSequence) {
    println!("{:>6}  {:<25}  {:<4}  {:>12}", "index", "timestamp", "type", "price");
    for p in &swings.points {
        println!(
            "{:>6}  {:<25}  {:<4}  {:>12.4}",
            p.index,
            p.ts.to_rfc3339(),
            p.label,
            p.price
        );
    }
    for gap in &swings.gaps {
        println!(
            "warning: consecutive {:?} points at {} and {} could not be separated",
            gap.kind, gap.before, gap.after
        );
    }
}

pub fn print_trend(trend: TrendVerdict) {
    println!("Trend:                   {trend}");
}

pub fn print_analysis(result: &AnalysisResult) {
    println!("Entry:                   #{} {}", result.entry_index, result.entry_ts);
    println!("Entry price:             {:.4}", result.entry_price);
    println!(
        "Reversal:                #{} {} ({})",
        result.reversal_index, result.reversal_ts, result.reversal_label
    );
    println!("Reversal price:          {:.4}", result.reversal_price);
    println!(
        "Max favorable:           {:.4} ({:+.2}%)",
        result.max_favorable_price, result.max_favorable_pct
    );
    println!(
        "Max adverse:             {:.4} ({:+.2}%)",
        result.max_adverse_price, result.max_adverse_pct
    );
    println!(
        "Final P&L:               {:+.4} ({:+.2}%)",
        result.final_pnl_abs, result.final_pnl_pct
    );
    println!("Candles held:            {}", result.candle_count);
    println!("Trend at entry:          {}", result.trend);
}

pub fn print_timeframe_report(report: &TimeframeReport) {
    println!(
        "[{}] {} candles, {} swing points",
        report.timeframe,
        report.candle_count,
        report.swings.points.len()
    );
    if let Some(last) = report.swings.points.last() {
        println!("Last swing:              {} {} @ {:.4}", last.label, last.ts, last.price);
    }
    print_trend(report.trend);
}

pub fn print_instrument_report(report: &InstrumentReport) {
    println!("=== {} ===", report.name);
    for timeframe in &report.timeframes {
        print_timeframe_report(timeframe);
    }
}

/// Everything a chart front end needs for one series.
#[derive(Debug, Serialize)]
pub struct ChartPayload<'a> {
    pub swings: Vec<SwingMarker>,
    pub gaps: &'a [RepairGap],
    pub trend: TrendVerdict,
    pub analysis: Option<&'a AnalysisResult>,
}

impl<'a> ChartPayload<'a> {
    pub fn new(
        swings: &'a SwingSequence,
        trend: TrendVerdict,
        analysis: Option<&'a AnalysisResult>,
    ) -> Self {
        Self {
            swings: swings.markers(),
            gaps: &swings.gaps,
            trend,
            analysis,
        }
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
