use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use num_bigint::BigUint;

/// Runtime configuration for the `numberplay` binary.
///
/// Global settings may also come from environment variables (or a `.env`
/// file); the subcommand selects which search runs.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "numberplay",
    version,
    about = "Parallel searches for narcissistic and amicable numbers"
)]
pub struct CliArgs {
    /// Number of worker threads each search is chunked across.
    ///
    /// Defaults to the number of logical CPUs.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, global = true, env = "NUM_WORKERS", default_value_t = num_cpus::get())]
    pub workers: usize,

    /// How results are printed.
    ///
    /// Environment variable: `OUTPUT_FORMAT`
    #[arg(
        long,
        global = true,
        value_enum,
        env = "OUTPUT_FORMAT",
        default_value_t = OutputFormat::Text
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find narcissistic numbers, either one digit tier or a range.
    Narcissistic {
        /// Search every number with exactly this many digits.
        #[arg(
            long,
            conflicts_with_all = ["lowest", "highest"],
            required_unless_present_all = ["lowest", "highest"]
        )]
        digits: Option<u32>,

        /// Lower bound of the range (inclusive).
        #[arg(long, requires = "highest")]
        lowest: Option<BigUint>,

        /// Upper bound of the range (inclusive).
        #[arg(long, requires = "lowest")]
        highest: Option<BigUint>,
    },
    /// Find amicable pairs whose first member has this many digits.
    Amicable {
        #[arg(long)]
        digits: u32,
    },
    /// List the proper divisors of a number.
    Divisors {
        #[arg(long)]
        number: u64,
    },
    /// Classify a single number.
    Check {
        #[arg(long)]
        number: BigUint,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    NarcissisticTier { digits: u32 },
    NarcissisticRange { lowest: BigUint, highest: BigUint },
    Amicable { digits: u32 },
    Divisors { number: u64 },
    Check { number: BigUint },
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub num_workers: usize,
    pub format: OutputFormat,
    pub search: Search,
}

fn validate_digits(digits: u32) -> anyhow::Result<u32> {
    if digits == 0 {
        bail!("--digits must be greater than 0");
    }
    Ok(digits)
}

impl TryFrom<CliArgs> for SearchConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        let search = match args.command {
            Command::Narcissistic {
                digits: Some(digits),
                ..
            } => Search::NarcissisticTier {
                digits: validate_digits(digits)?,
            },
            Command::Narcissistic {
                digits: None,
                lowest: Some(lowest),
                highest: Some(highest),
            } => {
                if lowest > highest {
                    bail!("--lowest ({lowest}) must not exceed --highest ({highest})");
                }
                Search::NarcissisticRange { lowest, highest }
            }
            Command::Narcissistic { .. } => {
                bail!("narcissistic requires either --digits or both --lowest and --highest")
            }
            Command::Amicable { digits } => Search::Amicable {
                digits: validate_digits(digits)?,
            },
            Command::Divisors { number } => {
                if number == 0 {
                    bail!("--number must be greater than 0");
                }
                Search::Divisors { number }
            }
            Command::Check { number } => Search::Check { number },
        };

        Ok(Self {
            num_workers: args.workers,
            format: args.format,
            search,
        })
    }
}
