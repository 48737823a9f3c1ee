use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use settlement_core::{
    ConsultingResult, DeductionItems, DependentInfo, IncomeInfo, RateTable, TaxFormData,
    YearEndTaxCalculator, validate_form, validate_salary,
};
use settlement_data::report::{self, OutputFormat};
use settlement_data::{BracketLoader, form_loader, logging, parse_amount, rates_file};
use tracing::{debug, info, warn};

/// Korean year-end income tax settlement calculator.
///
/// Uses the built-in 2024 rate table unless `--rates` and/or `--brackets`
/// point at replacement data.
#[derive(Parser, Debug)]
#[command(name = "settlement")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML file holding a complete rate table
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// CSV file of tax brackets (min_income,max_income,rate,progressive_deduction)
    #[arg(long, global = true)]
    brackets: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log filter, e.g. "debug" or "settlement_core=trace" (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Settle one taxpayer described by flags
    Calculate(CalculateArgs),

    /// Settle every taxpayer in a CSV file; invalid rows are skipped
    Batch {
        /// Taxpayer CSV file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Quick final-tax estimate from salary alone
    Estimate {
        /// Total annual salary in won (commas allowed)
        #[arg(short, long, value_parser = parse_amount)]
        salary: Decimal,
    },
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Total annual salary in won (commas allowed)
    #[arg(short, long, value_parser = parse_amount)]
    salary: Decimal,

    #[arg(long, default_value_t = 12)]
    work_months: u8,

    #[arg(long, value_parser = parse_amount, default_value = "0")]
    credit_card: Decimal,

    /// Debit card and cash receipt spending
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    debit_card: Decimal,

    #[arg(long, value_parser = parse_amount, default_value = "0")]
    traditional_market: Decimal,

    #[arg(long, value_parser = parse_amount, default_value = "0")]
    public_transport: Decimal,

    #[arg(long, value_parser = parse_amount, default_value = "0")]
    medical: Decimal,

    #[arg(long, value_parser = parse_amount, default_value = "0")]
    education: Decimal,

    #[arg(long, value_parser = parse_amount, default_value = "0")]
    donation: Decimal,

    /// Rental housing loan repayments
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    housing_fund: Decimal,

    #[arg(long, value_parser = parse_amount, default_value = "0")]
    pension_savings: Decimal,

    #[arg(long, value_parser = parse_amount, default_value = "0")]
    personal_pension: Decimal,

    /// Claim a spouse as a dependent
    #[arg(long)]
    spouse: bool,

    #[arg(long, default_value_t = 0)]
    children: u32,

    #[arg(long, default_value_t = 0)]
    other_dependents: u32,
}

impl From<CalculateArgs> for TaxFormData {
    fn from(args: CalculateArgs) -> Self {
        TaxFormData {
            income: IncomeInfo {
                total_salary: args.salary,
                work_months: args.work_months,
            },
            deductions: DeductionItems {
                credit_card: args.credit_card,
                debit_card: args.debit_card,
                traditional_market: args.traditional_market,
                public_transport: args.public_transport,
                medical: args.medical,
                education: args.education,
                donation: args.donation,
                housing_fund: args.housing_fund,
                pension_savings: args.pension_savings,
                personal_pension: args.personal_pension,
            },
            dependents: DependentInfo {
                has_spouse: args.spouse,
                number_of_children: args.children,
                number_of_other_dependents: args.other_dependents,
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    row: usize,
    result: ConsultingResult,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateOutput {
    total_salary: Decimal,
    estimated_tax: Decimal,
}

fn load_rates(cli: &Cli) -> Result<RateTable> {
    let mut rates = match &cli.rates {
        Some(path) => rates_file::load_from_file(path)
            .with_context(|| format!("Failed to load rate table: {}", path.display()))?,
        None => RateTable::default(),
    };

    if let Some(path) = &cli.brackets {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = BracketLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        BracketLoader::apply(&mut rates, records)
            .with_context(|| format!("Rejected brackets from: {}", path.display()))?;
    }

    Ok(rates)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging("info");
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let rates = load_rates(&cli)?;
    let calculator = YearEndTaxCalculator::new(&rates).context("Invalid rate table")?;
    debug!(brackets = rates.brackets.len(), "Rate table ready");

    let output = match cli.command {
        Command::Calculate(args) => {
            let form = TaxFormData::from(args);
            validate_form(&form).context("Invalid taxpayer input")?;
            let result = calculator.calculate(&form);
            match cli.format {
                OutputFormat::Text => report::render_text(&result),
                OutputFormat::Json => report::render_json(&result)?,
            }
        }
        Command::Batch { file } => {
            let forms = form_loader::load_from_file(&file)
                .with_context(|| format!("Failed to load taxpayers: {}", file.display()))?;

            let mut entries = Vec::with_capacity(forms.len());
            for (idx, form) in forms.iter().enumerate() {
                let row = idx + 1;
                if let Err(errors) = validate_form(form) {
                    warn!(row, %errors, "Skipping invalid taxpayer record");
                    continue;
                }
                entries.push(BatchEntry {
                    row,
                    result: calculator.calculate(form),
                });
            }
            info!(
                settled = entries.len(),
                skipped = forms.len() - entries.len(),
                "Batch complete"
            );

            match cli.format {
                OutputFormat::Text => entries
                    .iter()
                    .map(|e| format!("Taxpayer row {}\n\n{}", e.row, report::render_text(&e.result)))
                    .collect::<Vec<_>>()
                    .join("\n"),
                OutputFormat::Json => report::render_json(&entries)?,
            }
        }
        Command::Estimate { salary } => {
            validate_salary(salary).context("Invalid --salary")?;
            let estimate = calculator.estimate(salary);
            match cli.format {
                OutputFormat::Text => report::render_estimate_text(salary, estimate),
                OutputFormat::Json => report::render_json(&EstimateOutput {
                    total_salary: salary,
                    estimated_tax: estimate,
                })?,
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
