//! Text and JSON rendering of settlement results.

use std::fmt::Write;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use settlement_core::calculations::common::{format_rate, format_won};
use settlement_core::{ConsultingResult, TaxCalculationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const LABEL_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 16;

/// Pretty-printed JSON with the camelCase field names of the result records.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Label for the signed refund amount.
pub fn refund_label(result: &TaxCalculationResult) -> &'static str {
    if result.is_refund() {
        "Refund"
    } else {
        "Additional payment"
    }
}

fn ledger_line(out: &mut String, label: &str, amount: Decimal) {
    let _ = writeln!(
        out,
        "{label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$} won",
        format_won(amount)
    );
}

/// Human-readable settlement report.
pub fn render_text(result: &ConsultingResult) -> String {
    let tax = &result.tax_result;
    let mut out = String::new();

    out.push_str("Year-end tax settlement\n");
    out.push_str("=======================\n");
    ledger_line(&mut out, "Total salary", tax.total_salary);
    ledger_line(&mut out, "Earned-income deduction", tax.earned_income_deduction);
    ledger_line(&mut out, "Earned income", tax.earned_income);
    ledger_line(&mut out, "Personal deduction", tax.personal_deduction);
    ledger_line(&mut out, "Special deduction", tax.special_deduction);
    ledger_line(&mut out, "Other deductions", tax.other_deductions);
    ledger_line(&mut out, "Total deductions", tax.total_deductions);
    ledger_line(&mut out, "Tax base", tax.tax_base);
    ledger_line(&mut out, "Calculated tax", tax.calculated_tax);
    ledger_line(&mut out, "Tax credit", tax.tax_credit);
    ledger_line(&mut out, "Final tax", tax.final_tax);
    ledger_line(&mut out, "Prepaid tax", tax.prepaid_tax);
    ledger_line(&mut out, refund_label(tax), tax.refund_amount.abs());

    out.push_str("\nDeductions\n----------\n");
    for detail in &result.deduction_details {
        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$} won {:>6} {:>AMOUNT_WIDTH$} won",
            detail.category.label(),
            format_won(detail.amount),
            format_rate(detail.rate),
            format_won(detail.deduction),
        );
        let _ = writeln!(out, "    {}", detail.description);
    }

    out.push_str("\nRecommendations\n---------------\n");
    if result.recommendations.is_empty() {
        out.push_str("No further savings found.\n");
    }
    for rec in &result.recommendations {
        let _ = writeln!(
            out,
            "[{}] {}: {} -> {} won, saves about {} won",
            rec.priority,
            rec.category,
            format_won(rec.current_amount),
            format_won(rec.recommended_amount),
            format_won(rec.expected_saving),
        );
        let _ = writeln!(out, "    {}", rec.description);
    }
    out.push('\n');
    ledger_line(&mut out, "Total potential saving", result.total_potential_saving);

    out
}

/// One-line quick estimate.
pub fn render_estimate_text(total_salary: Decimal, estimate: Decimal) -> String {
    format!(
        "Estimated final tax on a salary of {} won: {} won\n",
        format_won(total_salary),
        format_won(estimate)
    )
}
