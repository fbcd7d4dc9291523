use crate::error::{EngineError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::Candle;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Timestamp layouts found in historical-quote exports
pub mod quote_format {
    use super::*;

    /// Parses `2021-04-30T15:59:00Z`, `2021-04-30 15:59:00-04:00`,
    /// `2021-04-30 15:59:00` (taken as UTC) or a bare `2021-04-30`.
    pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{Datelike, Timelike};

        #[test]
        fn test_parse_rfc3339() {
            let dt = parse_timestamp("2021-04-30T15:59:00Z").unwrap();
            assert_eq!((dt.hour(), dt.minute()), (15, 59));
        }

        #[test]
        fn test_parse_with_offset_converts_to_utc() {
            let dt = parse_timestamp("2021-04-30 15:59:00-04:00").unwrap();
            assert_eq!(dt.hour(), 19);
            assert_eq!(dt.day(), 30);
        }

        #[test]
        fn test_parse_naive_and_date_only() {
            assert_eq!(parse_timestamp("2021-04-30 09:30:00").unwrap().minute(), 30);
            let day = parse_timestamp("2021-04-30").unwrap();
            assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2021, 4, 30, 0));
        }

        #[test]
        fn test_parse_invalid() {
            assert!(parse_timestamp("30/04/2021").is_none());
            assert!(parse_timestamp("2021-13-01").is_none());
        }
    }
}

pub struct QuoteCsvParser;

impl QuoteCsvParser {
    // Header: Date,Open,High,Low,Close,Volume[,Dividends,Stock Splits]
    // Example Row: 2021-04-30 15:59:00-04:00,131.46,131.50,131.40,131.45,1204311,0,0
    pub fn load_candles_from_csv(file_path: impl AsRef<Path>, symbol: &str) -> Result<Vec<Candle>> {
        let path = file_path.as_ref();
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), symbol, "Loading quote bars");
        Self::load_candles_from_reader(BufReader::new(file), symbol)
    }

    pub fn load_candles_from_reader<R: Read>(reader: R, symbol: &str) -> Result<Vec<Candle>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = Columns::locate(&headers)?;

        let mut candles = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;

            let timestamp_str = Self::field(&record, columns.date, "Date", line)?;
            let timestamp = quote_format::parse_timestamp(timestamp_str).ok_or_else(|| {
                EngineError::CsvDataFormatError(format!(
                    "Error parsing 'Date' at line {}: '{}'",
                    line, timestamp_str
                ))
            })?;

            candles.push(Candle {
                symbol: symbol.to_string(),
                timestamp,
                open: Self::number(&record, columns.open, "Open", line)?,
                high: Self::number(&record, columns.high, "High", line)?,
                low: Self::number(&record, columns.low, "Low", line)?,
                close: Self::number(&record, columns.close, "Close", line)?,
                volume: Self::number(&record, columns.volume, "Volume", line)?,
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        tracing::debug!(symbol, bars = candles.len(), "Loaded quote bars");
        Ok(candles)
    }

    fn field<'a>(record: &'a StringRecord, pos: usize, name: &str, line: usize) -> Result<&'a str> {
        record.get(pos).filter(|s| !s.is_empty()).ok_or_else(|| {
            EngineError::CsvDataFormatError(format!("Missing '{}' field at line {}", name, line))
        })
    }

    fn number(record: &StringRecord, pos: usize, name: &str, line: usize) -> Result<f64> {
        let raw = Self::field(record, pos, name, line)?;
        raw.parse::<f64>().map_err(|e| {
            EngineError::CsvDataFormatError(format!(
                "Error parsing '{}' at line {}: '{}' ({})",
                name, line, raw, e
            ))
        })
    }
}

struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    EngineError::CsvDataFormatError(format!("Missing '{}' column in header", name))
                })
        };
        // Intraday exports name the timestamp column "Datetime"
        let date = find("Date").or_else(|_| find("Datetime"))?;
        Ok(Columns {
            date,
            open: find("Open")?,
            high: find("High")?,
            low: find("Low")?,
            close: find("Close")?,
            volume: find("Volume")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_candles_from_csv_valid_data() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume,Dividends,Stock Splits
2021-04-30 15:58:00-04:00,131.40,131.48,131.38,131.46,802311,0,0
2021-04-30 15:59:00-04:00,131.46,131.50,131.40,131.45,1204311,0,0";
        let tmp_file = create_test_csv(csv_content);
        let candles = QuoteCsvParser::load_candles_from_csv(tmp_file.path(), "AAPL").unwrap();

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].symbol, "AAPL");
        assert_eq!(candles[0].open, 131.40);
        assert_eq!(candles[0].close, 131.46);
        assert_eq!(candles[1].high, 131.50);
        assert_eq!(candles[1].low, 131.40);
        assert_eq!(candles[1].volume, 1204311.0);
        assert_eq!(
            candles[1].timestamp,
            quote_format::parse_timestamp("2021-04-30T19:59:00Z").unwrap()
        );
    }

    #[test]
    fn test_rows_sorted_by_timestamp() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume
2021-05-03,3,3,3,3,30
2021-04-29,1,1,1,1,10
2021-04-30,2,2,2,2,20";
        let tmp_file = create_test_csv(csv_content);
        let candles = QuoteCsvParser::load_candles_from_csv(tmp_file.path(), "INTC").unwrap();
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_headers_are_case_insensitive_and_reorderable() {
        let csv_content = "\
close,volume,datetime,open,high,low
10.5,100,2021-04-30 10:00:00,10,11,9";
        let candles =
            QuoteCsvParser::load_candles_from_reader(csv_content.as_bytes(), "NVDA").unwrap();
        assert_eq!(candles[0].close, 10.5);
        assert_eq!(candles[0].open, 10.0);
        assert_eq!(candles[0].volume, 100.0);
    }

    #[test]
    fn test_load_candles_from_csv_empty_file() {
        let tmp_file = create_test_csv("Date,Open,High,Low,Close,Volume");
        let candles = QuoteCsvParser::load_candles_from_csv(tmp_file.path(), "AMD").unwrap();
        assert!(candles.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let csv_content = "\
Date,Open,High,Low,Close
2021-04-30,1,1,1,1";
        let tmp_file = create_test_csv(csv_content);
        let result = QuoteCsvParser::load_candles_from_csv(tmp_file.path(), "TSLA");
        assert!(result.unwrap_err().to_string().contains("Missing 'Volume' column"));
    }

    #[test]
    fn test_invalid_number() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume
2021-04-30,invalid,1,1,1,1";
        let tmp_file = create_test_csv(csv_content);
        let err = QuoteCsvParser::load_candles_from_csv(tmp_file.path(), "MSFT").unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
        assert!(err.to_string().contains("Error parsing 'Open' at line 2"));
    }

    #[test]
    fn test_invalid_date() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume
2021-04-30,1,1,1,1,1
yesterday,1,1,1,1,1";
        let tmp_file = create_test_csv(csv_content);
        let err = QuoteCsvParser::load_candles_from_csv(tmp_file.path(), "QCOM").unwrap_err();
        assert!(err.to_string().contains("Error parsing 'Date' at line 3"));
    }

    #[test]
    fn test_empty_field() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume
2021-04-30,1,1,1,,1";
        let err =
            QuoteCsvParser::load_candles_from_reader(csv_content.as_bytes(), "IBM").unwrap_err();
        assert!(err.to_string().contains("Missing 'Close' field at line 2"));
    }

    #[test]
    fn test_missing_file() {
        let result = QuoteCsvParser::load_candles_from_csv("/nonexistent/quotes.csv", "NFLX");
        assert!(matches!(result, Err(EngineError::IoError { .. })));
    }
}
