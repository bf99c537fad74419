//! Search reports and their text/JSON rendering.
//!
//! Arbitrary precision numbers are carried as decimal strings so JSON
//! consumers never lose precision.

use super::config::OutputFormat;
use num_bigint::BigUint;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AmicablePair {
    pub number: u64,
    pub amicable: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "search", rename_all = "snake_case")]
pub enum Report {
    Narcissistic {
        lowest: String,
        highest: String,
        workers: usize,
        numbers: Vec<String>,
    },
    Amicable {
        digits: u32,
        workers: usize,
        pairs: Vec<AmicablePair>,
    },
    Divisors {
        number: u64,
        workers: usize,
        divisors: Vec<u64>,
        sum: u128,
    },
    Check {
        number: String,
        digit_count: u32,
        narcissistic: bool,
        /// `None` when the number has no counterpart or lies outside `u64`.
        amicable: Option<u64>,
    },
}

pub fn decimal_strings(numbers: &[BigUint]) -> Vec<String> {
    numbers.iter().map(ToString::to_string).collect()
}

/// Writes `report` to `out` in the requested format, newline terminated.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(out, report)?,
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, report: &Report) -> std::io::Result<()> {
    match report {
        Report::Narcissistic { numbers, .. } => {
            for number in numbers {
                writeln!(out, "{number}")?;
            }
        }
        Report::Amicable { pairs, .. } => {
            for pair in pairs {
                writeln!(out, "{} {}", pair.number, pair.amicable)?;
            }
        }
        Report::Divisors { divisors, sum, .. } => {
            let listed: Vec<String> = divisors.iter().map(ToString::to_string).collect();
            writeln!(out, "{}", listed.join(" "))?;
            writeln!(out, "sum: {sum}")?;
        }
        Report::Check {
            number,
            digit_count,
            narcissistic,
            amicable,
        } => {
            writeln!(out, "number: {number}")?;
            writeln!(out, "digits: {digit_count}")?;
            writeln!(out, "narcissistic: {narcissistic}")?;
            match amicable {
                Some(amicable) => writeln!(out, "amicable: {amicable}")?,
                None => writeln!(out, "amicable: none")?,
            }
        }
    }
    Ok(())
}
