use anyhow::{Context, Result, ensure};
use chrono::{DateTime, TimeDelta, Utc};
use clap::ValueEnum;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct CandleRow {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub ts: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

pub fn get_candles_from_input_file(input: &Path) -> Result<Vec<Candle>> {
    let file =
        File::open(input).with_context(|| format!("failed to open input file: {:?}", input))?;
    let candles = read_candles(file)?;
    log::debug!("loaded {} candles from {:?}", candles.len(), input);
    Ok(candles)
}

/// Parse `timestamp,open,high,low,close[,volume]` rows and check that the
/// timestamps are strictly increasing.
pub fn read_candles<R: Read>(reader: R) -> Result<Vec<Candle>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut candles: Vec<Candle> = Vec::new();

    for result in rdr.deserialize::<CandleRow>() {
        let row: CandleRow = result.with_context(|| "failed to deserialize CSV row")?;
        let ts = DateTime::parse_from_rfc3339(&row.timestamp)
            .with_context(|| format!("failed to parse timestamp: {}", row.timestamp))?
            .with_timezone(&Utc);
        candles.push(Candle {
            ts,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.unwrap_or(0.0),
        });
    }

    ensure_chronological(&candles)?;
    Ok(candles)
}

/// Every algorithm downstream works on positions, so a series that goes
/// backwards in time is rejected instead of silently reordered.
pub fn ensure_chronological(candles: &[Candle]) -> Result<()> {
    for (i, pair) in candles.windows(2).enumerate() {
        ensure!(
            pair[0].ts < pair[1].ts,
            "candle {} ({}) is not after candle {} ({})",
            i + 1,
            pair[1].ts,
            i,
            pair[0].ts
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
pub enum Timeframe {
    /// Use the series exactly as loaded.
    #[serde(rename = "native")]
    #[value(name = "native")]
    Native,
    #[serde(rename = "1m")]
    #[value(name = "1m")]
    M1,
    #[serde(rename = "5m")]
    #[value(name = "5m")]
    M5,
    #[serde(rename = "15m")]
    #[value(name = "15m")]
    M15,
    #[serde(rename = "30m")]
    #[value(name = "30m")]
    M30,
    #[serde(rename = "1h")]
    #[value(name = "1h")]
    H1,
    #[serde(rename = "4h")]
    #[value(name = "4h")]
    H4,
    #[serde(rename = "1d")]
    #[value(name = "1d")]
    D1,
}

impl Timeframe {
    /// Bucket width in seconds, `None` for [`Timeframe::Native`].
    pub fn seconds(self) -> Option<i64> {
        match self {
            Timeframe::Native => None,
            Timeframe::M1 => Some(60),
            Timeframe::M5 => Some(5 * 60),
            Timeframe::M15 => Some(15 * 60),
            Timeframe::M30 => Some(30 * 60),
            Timeframe::H1 => Some(60 * 60),
            Timeframe::H4 => Some(4 * 60 * 60),
            Timeframe::D1 => Some(24 * 60 * 60),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Timeframe::Native => "native",
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
        };
        f.pad(name)
    }
}

fn bucket_start(ts: DateTime<Utc>, width_secs: i64) -> DateTime<Utc> {
    let rem = ts.timestamp().rem_euclid(width_secs);
    ts - TimeDelta::seconds(rem) - TimeDelta::nanoseconds(i64::from(ts.timestamp_subsec_nanos()))
}

/// Aggregate candles into `timeframe` buckets aligned to the UTC epoch.
///
/// Each bucket keeps the first open, the highest high, the lowest low, the
/// last close and the summed volume. The bucket candle is stamped with the
/// bucket start. Input is expected in chronological order.
pub fn resample(candles: &[Candle], timeframe: Timeframe) -> Vec<Candle> {
    let Some(width) = timeframe.seconds() else {
        return candles.to_vec();
    };

    let mut buckets: BTreeMap<DateTime<Utc>, Candle> = BTreeMap::new();

    for c in candles {
        let start = bucket_start(c.ts, width);
        buckets
            .entry(start)
            .and_modify(|b| {
                b.high = b.high.max(c.high);
                b.low = b.low.min(c.low);
                // Chronological input: the latest candle in the bucket wins the close.
                b.close = c.close;
                b.volume += c.volume;
            })
            .or_insert(Candle { ts: start, ..*c });
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candle(h: u32, min: u32, open: f64, high: f64, low: f64, close: f64) -> Candle {
        let ts = Utc
            .with_ymd_and_hms(2025, 11, 28, h, min, 0)
            .single()
            .expect("valid datetime");
        Candle {
            ts,
            open,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn test_read_candles_parses_rows_and_defaults_missing_volume() {
        let csv = "timestamp,open,high,low,close,volume\n\
                   2025-11-28T10:00:00Z,100,105,99,104,12.5\n\
                   2025-11-28T11:00:00+00:00,104,106,101,102,\n";
        let candles = read_candles(csv.as_bytes()).expect("valid csv");

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].high, 105.0);
        assert_eq!(candles[0].volume, 12.5);
        assert_eq!(candles[1].close, 102.0);
        assert_eq!(candles[1].volume, 0.0);
    }

    #[test]
    fn test_read_candles_rejects_bad_timestamp() {
        let csv = "timestamp,open,high,low,close,volume\nyesterday,1,2,0.5,1.5,0\n";
        assert!(read_candles(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_read_candles_rejects_out_of_order_rows() {
        let csv = "timestamp,open,high,low,close,volume\n\
                   2025-11-28T11:00:00Z,1,2,0.5,1.5,0\n\
                   2025-11-28T10:00:00Z,1,2,0.5,1.5,0\n";
        let err = read_candles(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("candle 1"));
    }

    #[test]
    fn test_ensure_chronological_rejects_duplicate_timestamps() {
        let a = candle(10, 0, 1.0, 2.0, 0.5, 1.5);
        assert!(ensure_chronological(&[a, a]).is_err());
        assert!(ensure_chronological(&[a]).is_ok());
        assert!(ensure_chronological(&[]).is_ok());
    }

    #[test]
    fn test_resample_native_returns_input_unchanged() {
        let input = vec![candle(10, 0, 1.0, 2.0, 0.5, 1.5), candle(10, 5, 1.5, 3.0, 1.0, 2.5)];
        assert_eq!(resample(&input, Timeframe::Native), input);
    }

    #[test]
    fn test_resample_empty_input_returns_empty_vec() {
        assert!(resample(&[], Timeframe::H1).is_empty());
    }

    #[test]
    fn test_resample_to_hourly_merges_ohlcv_inside_one_bucket() {
        // All three candles fall in the 10:00–10:59 bucket.
        let input = vec![
            candle(10, 5, 100.0, 101.0, 99.0, 100.5),
            candle(10, 30, 100.5, 104.0, 100.0, 103.0),
            candle(10, 55, 103.0, 103.5, 98.0, 99.0),
        ];
        let out = resample(&input, Timeframe::H1);

        assert_eq!(out.len(), 1);
        let bucket = out[0];
        assert_eq!(bucket.ts, candle(10, 0, 0.0, 0.0, 0.0, 0.0).ts);
        assert_eq!(bucket.open, 100.0); // first open
        assert_eq!(bucket.high, 104.0); // highest high
        assert_eq!(bucket.low, 98.0); // lowest low
        assert_eq!(bucket.close, 99.0); // last close
        assert_eq!(bucket.volume, 3.0);
    }

    #[test]
    fn test_resample_candles_on_boundary_start_a_new_bucket() {
        // 10:00, 10:14 -> bucket 10:00; 10:15 -> bucket 10:15; 10:44 -> bucket 10:30
        let input = vec![
            candle(10, 0, 1.0, 2.0, 0.5, 1.5),
            candle(10, 14, 1.5, 2.5, 1.0, 2.0),
            candle(10, 15, 2.0, 3.0, 1.5, 2.5),
            candle(10, 44, 2.5, 3.5, 2.0, 3.0),
        ];
        let out = resample(&input, Timeframe::M15);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].close, 2.0);
        assert_eq!(out[0].high, 2.5);
        assert_eq!(out[1].ts, candle(10, 15, 0.0, 0.0, 0.0, 0.0).ts);
        assert_eq!(out[2].ts, candle(10, 30, 0.0, 0.0, 0.0, 0.0).ts);
        assert_eq!(out[2].open, 2.5);
    }

    #[test]
    fn test_timeframe_display_matches_config_names() {
        assert_eq!(Timeframe::Native.to_string(), "native");
        assert_eq!(Timeframe::M15.to_string(), "15m");
        assert_eq!(Timeframe::H4.to_string(), "4h");
        assert_eq!(Timeframe::D1.seconds(), Some(86_400));
    }
}
