//! Forward curve XML transformer.
//!
//! The feed is a table of `Row` elements, each carrying a `ResetDate` and a
//! `ONEMTSOFR` percentage child:
//!
//! ```xml
//! <Root>
//!   <Row><ResetDate>2024-10-01</ResetDate><ONEMTSOFR>0.15%</ONEMTSOFR></Row>
//! </Root>
//! ```
//!
//! Rows that cannot be turned into an observation are skipped and recorded
//! in the `TransformReport`; only malformed XML fails the whole transform.

use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::Reader;
use rust_decimal::Decimal;
use sofr_curve_core::RateObservation;
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

const ROW_TAG: &[u8] = b"Row";
const RESET_DATE_TAG: &[u8] = b"ResetDate";
const RATE_TAG: &[u8] = b"ONEMTSOFR";

/// Reset date formats seen in the feed, tried in order.
const RESET_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Errors that abort a whole transform.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML: unclosed element <{0}>")]
    UnclosedElement(String),

    #[error("Malformed XML: no root element")]
    NoRootElement,

    #[error("Malformed XML: junk after document element <{0}>")]
    MultipleRoots(String),

    #[error("Malformed XML: text outside the root element")]
    TextOutsideRoot,
}

/// Why a feed row produced no observation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid SOFR value: {0}")]
    InvalidRate(String),

    #[error("invalid reset date: {0}")]
    InvalidDate(String),

    #[error("duplicate reset date: {0}")]
    DuplicateDate(NaiveDate),
}

/// A feed row that was left out of the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based position of the row in the document
    pub row_index: usize,
    pub reason: SkipReason,
}

/// Outcome of transforming one feed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Observations in document order, unique by reset date
    pub records: Vec<RateObservation>,
    pub skipped: Vec<SkippedRow>,
}

impl TransformReport {
    /// Number of `Row` elements seen.
    #[must_use]
    pub fn rows_seen(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

#[derive(Debug, Default)]
struct RawRow {
    reset_date: Option<String>,
    one_month_sofr: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum RowField {
    ResetDate,
    Rate,
}

impl RowField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            RESET_DATE_TAG => Some(Self::ResetDate),
            RATE_TAG => Some(Self::Rate),
            _ => None,
        }
    }
}

impl RawRow {
    /// Opens `field` for text unless an earlier child already filled it.
    fn claim(&mut self, field: RowField) -> bool {
        let slot = self.slot(field);
        if slot.is_some() {
            return false;
        }
        *slot = Some(String::new());
        true
    }

    fn slot(&mut self, field: RowField) -> &mut Option<String> {
        match field {
            RowField::ResetDate => &mut self.reset_date,
            RowField::Rate => &mut self.one_month_sofr,
        }
    }

    fn into_observation(self) -> Result<RateObservation, SkipReason> {
        let reset_date = non_blank(self.reset_date).ok_or(SkipReason::MissingField("ResetDate"))?;
        let rate = non_blank(self.one_month_sofr).ok_or(SkipReason::MissingField("ONEMTSOFR"))?;

        let percentage =
            parse_percentage(&rate).ok_or_else(|| SkipReason::InvalidRate(rate.clone()))?;
        let reset_date =
            parse_reset_date(&reset_date).ok_or_else(|| SkipReason::InvalidDate(reset_date.clone()))?;

        Ok(RateObservation::from_percentage(reset_date, percentage))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses a quoted percentage such as `"4.31%"` or `" 4.31 "`.
#[must_use]
pub fn parse_percentage(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    Decimal::from_str(number)
        .or_else(|_| Decimal::from_scientific(number))
        .ok()
}

/// Parses a feed reset date (`YYYY-MM-DD`, `MM/DD/YYYY`, or an ISO datetime).
#[must_use]
pub fn parse_reset_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let candidates = [Some(trimmed), iso_date_prefix(trimmed)];

    candidates.into_iter().flatten().find_map(|candidate| {
        RESET_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
    })
}

fn iso_date_prefix(value: &str) -> Option<&str> {
    match value.as_bytes().get(10) {
        Some(b'T' | b' ') => value.get(..10),
        _ => None,
    }
}

/// Transforms a feed document into curve observations.
///
/// No document yields an empty report.
///
/// # Errors
/// Returns a `TransformError` if the document is not well-formed XML.
pub fn transform(xml: Option<&str>) -> Result<TransformReport, TransformError> {
    let Some(xml) = xml else {
        warn!("No XML data provided for transformation");
        return Ok(TransformReport::default());
    };

    info!("Transforming XML data");
    let rows = extract_rows(xml)?;

    let mut report = TransformReport::default();
    let mut seen = HashSet::new();

    for (row_index, row) in rows.into_iter().enumerate() {
        let outcome = row.into_observation().and_then(|obs| {
            if seen.insert(obs.reset_date) {
                Ok(obs)
            } else {
                Err(SkipReason::DuplicateDate(obs.reset_date))
            }
        });

        match outcome {
            Ok(obs) => report.records.push(obs),
            Err(reason) => {
                if !matches!(reason, SkipReason::MissingField(_)) {
                    warn!("Skipping row {}: {}", row_index, reason);
                }
                report.skipped.push(SkippedRow { row_index, reason });
            }
        }
    }

    info!(
        "Transformed data into {} records ({} rows skipped)",
        report.records.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Collects the direct `ResetDate`/`ONEMTSOFR` children of every `Row`.
///
/// Only the first child of each kind is read. The document must have exactly
/// one root element and no text outside it.
fn extract_rows(xml: &str) -> Result<Vec<RawRow>, TransformError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut rows = Vec::new();
    let mut saw_root = false;
    // (row, depth of the Row element)
    let mut current: Option<(RawRow, usize)> = None;
    // (field, depth of the field element)
    let mut field: Option<(RowField, usize)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = e.local_name().as_ref().to_vec();
                let depth = open.len();
                check_root(depth, &mut saw_root, &tag)?;

                if let Some((row, row_depth)) = current.as_mut() {
                    if depth == *row_depth + 1 {
                        if let Some(f) = RowField::from_tag(&tag) {
                            if row.claim(f) {
                                field = Some((f, depth));
                            }
                        }
                    }
                } else if tag == ROW_TAG {
                    current = Some((RawRow::default(), depth));
                }
                open.push(tag);
            }
            Event::Empty(e) => {
                let tag = e.local_name();
                let depth = open.len();
                check_root(depth, &mut saw_root, tag.as_ref())?;

                if let Some((row, row_depth)) = current.as_mut() {
                    if depth == *row_depth + 1 {
                        if let Some(f) = RowField::from_tag(tag.as_ref()) {
                            row.claim(f);
                        }
                    }
                } else if tag.as_ref() == ROW_TAG {
                    rows.push(RawRow::default());
                }
            }
            Event::Text(_) | Event::CData(_) if open.is_empty() => {
                return Err(TransformError::TextOutsideRoot);
            }
            Event::Text(t) => {
                if let (Some((f, _)), Some((row, _))) = (field, current.as_mut()) {
                    let text = t.unescape()?;
                    row.slot(f).get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::CData(c) => {
                if let (Some((f, _)), Some((row, _))) = (field, current.as_mut()) {
                    let text = String::from_utf8_lossy(c.as_ref()).into_owned();
                    row.slot(f).get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::End(_) => {
                open.pop();
                let depth = open.len();

                if field.is_some_and(|(_, field_depth)| field_depth == depth) {
                    field = None;
                }
                if current.as_ref().is_some_and(|(_, row_depth)| *row_depth == depth) {
                    if let Some((row, _)) = current.take() {
                        rows.push(row);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(tag) = open.pop() {
        return Err(TransformError::UnclosedElement(
            String::from_utf8_lossy(&tag).into_owned(),
        ));
    }
    if !saw_root {
        return Err(TransformError::NoRootElement);
    }

    Ok(rows)
}

fn check_root(depth: usize, saw_root: &mut bool, tag: &[u8]) -> Result<(), TransformError> {
    if depth == 0 {
        if *saw_root {
            return Err(TransformError::MultipleRoots(
                String::from_utf8_lossy(tag).into_owned(),
            ));
        }
        *saw_root = true;
    }
    Ok(())
}
