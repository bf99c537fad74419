pub mod config;
pub mod output;
pub mod telemetry;

use anyhow::Context;
use config::{Search, SearchConfig};
use num_bigint::BigUint;
use numberplay::{
    digit_count, find_amicable_numbers_parallel, find_narcissistic_between,
    find_narcissistic_numbers_parallel, find_proper_divisors_parallel, get_amicable,
    highest_n_digit_number, is_narcissistic, lowest_n_digit_number,
};
use output::{AmicablePair, Report, decimal_strings};

/// Runs the configured search and collects its report.
pub fn run(config: &SearchConfig) -> anyhow::Result<Report> {
    let workers = config.num_workers;

    let report = match &config.search {
        Search::NarcissisticTier { digits } => {
            let lowest: BigUint = lowest_n_digit_number(*digits)?;
            let highest: BigUint = highest_n_digit_number(*digits)?;
            let numbers = find_narcissistic_numbers_parallel(*digits, workers).with_context(|| {
                format!("narcissistic search over {digits}-digit numbers failed")
            })?;
            Report::Narcissistic {
                lowest: lowest.to_string(),
                highest: highest.to_string(),
                workers,
                numbers: decimal_strings(&numbers),
            }
        }
        Search::NarcissisticRange { lowest, highest } => {
            let numbers = find_narcissistic_between(lowest.clone(), highest.clone(), workers)
                .with_context(|| format!("narcissistic search over [{lowest}, {highest}] failed"))?;
            Report::Narcissistic {
                lowest: lowest.to_string(),
                highest: highest.to_string(),
                workers,
                numbers: decimal_strings(&numbers),
            }
        }
        Search::Amicable { digits } => {
            let pairs = find_amicable_numbers_parallel(*digits, workers)
                .with_context(|| format!("amicable search over {digits}-digit numbers failed"))?;
            Report::Amicable {
                digits: *digits,
                workers,
                pairs: pairs
                    .into_iter()
                    .map(|(number, amicable)| AmicablePair { number, amicable })
                    .collect(),
            }
        }
        Search::Divisors { number } => {
            let divisors = find_proper_divisors_parallel(*number, workers)
                .with_context(|| format!("divisor search for {number} failed"))?;
            let sum = divisors.iter().copied().map(u128::from).sum();
            Report::Divisors {
                number: *number,
                workers,
                divisors,
                sum,
            }
        }
        Search::Check { number } => {
            let amicable = match u64::try_from(number) {
                Ok(0) | Err(_) => None,
                Ok(small) => get_amicable(small)?,
            };
            Report::Check {
                number: number.to_string(),
                digit_count: digit_count(number),
                narcissistic: is_narcissistic(number),
                amicable,
            }
        }
    };

    Ok(report)
}
