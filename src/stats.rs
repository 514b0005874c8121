// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-name value statistics, accumulated in a single pass.
//!
//! The optimizer needs to know, before the first query is planned, what kind
//! of values hide under each element or attribute name: are all `<price>`
//! values numbers, and between what bounds? Does `@lang` only ever take five
//! values? Scanning the collection again to find out is not an option, so
//! every value is folded into a small record the moment the builder sees it.
//!
//! # Kind widening
//!
//! A record starts at the most specific kind and only ever widens:
//!
//! ```text
//! None ──▶ Integer ──▶ Double ──▶ Category ──▶ Text
//! ```
//!
//! - `Integer`/`Double`: every value so far parsed as a number; min/max kept.
//! - `Category`: a non-numeric value arrived while the distinct-value sample
//!   still fits under the cap. Bounds are dropped.
//! - `Text`: non-numeric and too many (or too long) distinct values to
//!   sample. Nothing else is tracked beyond the count.
//!
//! The sample is bounded by `IndexConfig::max_categories`. The moment a new
//! value would push it past the cap, the sample is discarded for good, so a
//! record's memory stays bounded no matter how big the collection gets.
//!
//! # Wire Format
//!
//! ```text
//! count: varint
//! kind: u8 (0=none, 1=integer, 2=double, 3=category, 4=text)
//! [min: f64 LE, max: f64 LE]       only for integer/double
//! flags: u8 (bit 0 = leaf, bit 1 = sample present)
//! [sample_len: varint               only if sample present
//!  for each value (ascending):
//!    len: varint, bytes, occurrences: varint]
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use crate::binary::{
    encode_bytes, encode_f64, encode_varint, read_bytes, read_f64, read_u8, read_varint,
    MAX_KEY_LEN, MAX_SAMPLE_SIZE,
};
use crate::config::IndexConfig;
use crate::contracts::check_bounds_ordered;

const FLAG_LEAF: u8 = 0b0000_0001;
const FLAG_SAMPLE: u8 = 0b0000_0010;

// ============================================================================
// VALUE KIND
// ============================================================================

/// Inferred kind of the values seen under one name, from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    /// No value folded in yet
    None,
    Integer,
    Double,
    /// Non-numeric, few enough distinct values to enumerate
    Category,
    /// Non-numeric, unbounded
    Text,
}

impl ValueKind {
    pub fn tag(self) -> u8 {
        match self {
            ValueKind::None => 0,
            ValueKind::Integer => 1,
            ValueKind::Double => 2,
            ValueKind::Category => 3,
            ValueKind::Text => 4,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ValueKind::None),
            1 => Some(ValueKind::Integer),
            2 => Some(ValueKind::Double),
            3 => Some(ValueKind::Category),
            4 => Some(ValueKind::Text),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Integer | ValueKind::Double)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::None => "none",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::Category => "category",
            ValueKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Classification of a single trimmed value.
enum Parsed {
    Integer(i64),
    Double(f64),
    Text,
}

fn classify(value: &[u8]) -> Parsed {
    let Ok(text) = std::str::from_utf8(value) else {
        return Parsed::Text;
    };
    if let Ok(i) = text.parse::<i64>() {
        return Parsed::Integer(i);
    }
    match text.parse::<f64>() {
        // "NaN" and "INF" parse, but have no useful bounds
        Ok(d) if d.is_finite() => Parsed::Double(d),
        _ => Parsed::Text,
    }
}

/// Strip XML whitespace (space, tab, CR, LF) from both ends.
pub fn trim_xml_ws(value: &[u8]) -> &[u8] {
    let is_ws = |b: &u8| matches!(b, b' ' | b'\t' | b'\r' | b'\n');
    let start = value.iter().position(|b| !is_ws(b)).unwrap_or(value.len());
    let end = value.iter().rposition(|b| !is_ws(b)).map_or(start, |p| p + 1);
    &value[start..end]
}

// ============================================================================
// STATS RECORD
// ============================================================================

/// Aggregate statistics for one token id.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    count: u64,
    kind: ValueKind,
    /// `Some` exactly when `kind` is numeric
    bounds: Option<(f64, f64)>,
    /// Distinct values with occurrences; `None` once the cap was exceeded
    sample: Option<BTreeMap<Box<[u8]>, u32>>,
    leaf: bool,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            count: 0,
            kind: ValueKind::None,
            bounds: None,
            sample: Some(BTreeMap::new()),
            leaf: true,
        }
    }
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence, folding `value` in if there is one.
    ///
    /// The count increments whether or not a value is given.
    pub fn add(&mut self, value: Option<&[u8]>, config: &IndexConfig) {
        self.count = self.count.saturating_add(1);
        if let Some(value) = value {
            self.fold(value, config);
        }
    }

    /// Fold a value into the record without counting an occurrence.
    ///
    /// Empty and whitespace-only values carry no type information and are
    /// ignored.
    pub fn fold(&mut self, value: &[u8], config: &IndexConfig) {
        let value = trim_xml_ws(value);
        if value.is_empty() || self.kind == ValueKind::Text {
            return;
        }

        self.sample_value(value, config);

        match classify(value) {
            Parsed::Integer(i) => self.widen_numeric(ValueKind::Integer, i as f64),
            Parsed::Double(d) => self.widen_numeric(ValueKind::Double, d),
            Parsed::Text => {
                if self.kind < ValueKind::Category {
                    self.kind = ValueKind::Category;
                    self.bounds = None;
                }
            }
        }

        if self.kind == ValueKind::Category && self.sample.is_none() {
            self.kind = ValueKind::Text;
        }
    }

    fn sample_value(&mut self, value: &[u8], config: &IndexConfig) {
        let Some(sample) = self.sample.as_mut() else {
            return;
        };
        if let Some(n) = sample.get_mut(value) {
            *n = n.saturating_add(1);
        } else if sample.len() < config.max_categories && value.len() <= config.max_value_len {
            sample.insert(value.into(), 1);
        } else {
            self.sample = None;
        }
    }

    fn widen_numeric(&mut self, kind: ValueKind, v: f64) {
        if !self.kind.is_numeric() && self.kind != ValueKind::None {
            // Already non-numeric; numbers are just more categories now
            return;
        }
        self.kind = self.kind.max(kind);
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (min.min(v), max.max(v)),
            None => (v, v),
        });
        check_bounds_ordered(self.bounds);
    }

    /// Mark the name as having element children.
    pub fn clear_leaf(&mut self) {
        self.leaf = false;
    }

    /// Occurrences recorded.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    /// `(min, max)` while the kind is numeric.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.bounds
    }

    /// True unless the builder reported element children for this name.
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Number of distinct sampled values, or `None` once sampling stopped.
    pub fn distinct(&self) -> Option<usize> {
        self.sample.as_ref().map(BTreeMap::len)
    }

    /// Sampled values with occurrences, in ascending byte order.
    pub fn sample(&self) -> Option<impl Iterator<Item = (&[u8], u32)> + '_> {
        self.sample
            .as_ref()
            .map(|s| s.iter().map(|(v, &n)| (&**v, n)))
    }

    /// Exact number of occurrences of `value`, if the sample is still intact.
    ///
    /// `Some(0)` means the value was definitely never seen under this name.
    pub fn occurrences(&self, value: &[u8]) -> Option<u32> {
        let sample = self.sample.as_ref()?;
        Some(sample.get(trim_xml_ws(value)).copied().unwrap_or(0))
    }

    /// Encode the record to a byte buffer.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        encode_varint(self.count, buf);
        buf.push(self.kind.tag());
        if let Some((min, max)) = self.bounds {
            encode_f64(min, buf);
            encode_f64(max, buf);
        }

        let mut flags = 0;
        if self.leaf {
            flags |= FLAG_LEAF;
        }
        if self.sample.is_some() {
            flags |= FLAG_SAMPLE;
        }
        buf.push(flags);

        if let Some(sample) = &self.sample {
            encode_varint(sample.len() as u64, buf);
            for (value, &n) in sample {
                encode_bytes(value, buf);
                encode_varint(n as u64, buf);
            }
        }
    }

    /// Decode a record at `pos`, advancing the cursor.
    pub fn decode(data: &[u8], pos: &mut usize) -> io::Result<Self> {
        let count = read_varint(data, pos)?;

        let tag = read_u8(data, pos, "stats kind")?;
        let kind = ValueKind::from_tag(tag).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown stats kind tag {}", tag),
            )
        })?;

        let bounds = if kind.is_numeric() {
            let min = read_f64(data, pos, "stats min")?;
            let max = read_f64(data, pos, "stats max")?;
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid numeric bounds {} - {}", min, max),
                ));
            }
            Some((min, max))
        } else {
            None
        };

        let flags = read_u8(data, pos, "stats flags")?;
        if flags & !(FLAG_LEAF | FLAG_SAMPLE) != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown stats flags {:#04x}", flags),
            ));
        }

        let sample = if flags & FLAG_SAMPLE != 0 {
            Some(decode_sample(data, pos)?)
        } else {
            None
        };

        if kind == ValueKind::Category && sample.is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Category stats without a value sample",
            ));
        }

        Ok(Self {
            count,
            kind,
            bounds,
            sample,
            leaf: flags & FLAG_LEAF != 0,
        })
    }
}

fn decode_sample(data: &[u8], pos: &mut usize) -> io::Result<BTreeMap<Box<[u8]>, u32>> {
    let len = read_varint(data, pos)?;
    // Each entry needs at least a length byte and an occurrence byte
    let remaining = (data.len().saturating_sub(*pos) / 2) as u64;
    if len > MAX_SAMPLE_SIZE as u64 || len > remaining {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Sample size {} exceeds available bytes or limit", len),
        ));
    }

    let mut sample = BTreeMap::new();
    let mut prev: Option<&[u8]> = None;
    for _ in 0..len {
        let value = read_bytes(data, pos, MAX_KEY_LEN, "sampled value")?;
        if prev.is_some_and(|p| p >= value) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Sampled values out of order or duplicated",
            ));
        }
        let n = crate::binary::read_varint_u32(data, pos, "sample occurrences")?;
        sample.insert(value.into(), n);
        prev = Some(value);
    }
    Ok(sample)
}

impl fmt::Display for Stats {
    /// Short diagnostic form, e.g. `3x, numeric(1 - 5), leaf`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.count)?;
        match (self.kind, self.bounds) {
            (ValueKind::Integer, Some((min, max))) => {
                write!(f, ", numeric({} - {})", min as i64, max as i64)?
            }
            (ValueKind::Double, Some((min, max))) => write!(f, ", numeric({} - {})", min, max)?,
            (ValueKind::Category, _) => write!(f, ", {} values", self.distinct().unwrap_or(0))?,
            (ValueKind::Text, _) => write!(f, ", strings")?,
            _ => {}
        }
        if self.leaf {
            write!(f, ", leaf")?;
        }
        Ok(())
    }
}
