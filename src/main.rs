//! Pension System CLI
//!
//! Runs one UPS vs NPS comparison and writes the ledger, matrices and schedules

use anyhow::{Context, Result};
use clap::Parser;
use pension_system::{report, ReferenceData, ScenarioRunner, SimulationInputs};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pension_system", about = "Compare UPS and NPS over a full career")]
struct Args {
    /// JSON file with simulation inputs (defaults are used for missing fields)
    #[arg(short, long)]
    inputs: Option<PathBuf>,

    /// Directory holding pay_matrix.csv and da_table.csv (bundled tables if omitted)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Directory for CSV and JSON output
    #[arg(short, long, default_value = "output")]
    out_dir: PathBuf,

    /// Calendar year the current age refers to
    #[arg(long)]
    as_of_year: Option<i32>,

    /// Ledger rows to print
    #[arg(long, default_value_t = 24)]
    rows: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Pension System v{}", env!("CARGO_PKG_VERSION"));
    println!("=====================\n");

    let mut inputs = match &args.inputs {
        Some(path) => SimulationInputs::from_json_path(path)
            .with_context(|| format!("reading inputs from {}", path.display()))?,
        None => SimulationInputs::default(),
    };
    if args.as_of_year.is_some() {
        inputs.as_of_year = args.as_of_year;
    }

    let reference = match &args.data_dir {
        Some(dir) => ReferenceData::from_csv_path(dir)
            .with_context(|| format!("loading reference data from {}", dir.display()))?,
        None => ReferenceData::builtin()?,
    };
    let runner = ScenarioRunner::new(reference);
    let report = runner.run(&inputs)?;

    println!("Joining date:    {}", inputs.joining_date);
    println!("Retirement date: {}", report.retirement_date);
    println!("Commissions:");
    for generated in report.cycles.iter() {
        match (generated.cycle.start_year, generated.fitment) {
            (Some(year), Some(fitment)) => println!(
                "  {} from Jan-{}: DA {:.2} + fitment {:.0}% -> factor {:.4}",
                generated.cycle.label,
                year,
                fitment.reference_da,
                fitment.increase * 100.0,
                fitment.factor
            ),
            _ => println!("  {} (base matrix)", generated.cycle.label),
        }
    }
    println!();

    println!(
        "{:>8} {:>5} {:>4} {:>6} {:>10} {:>6} {:>10} {:>12} {:>14}",
        "Month", "Level", "Pos", "CPC", "Basic", "DA", "DA Amt", "Emoluments", "NPS Corpus"
    );
    println!("{}", "-".repeat(85));

    for r in report.ledger.records.iter().take(args.rows) {
        println!(
            "{:>8} {:>5} {:>4} {:>6} {:>10.0} {:>6.2} {:>10.0} {:>12.0} {:>14.0}",
            r.month_label(),
            r.level,
            r.position,
            r.cpc,
            r.basic_pay,
            r.da_rate,
            r.da_amount,
            r.total_emoluments,
            r.nps_corpus,
        );
    }
    if report.ledger.records.len() > args.rows {
        println!("... ({} more months)", report.ledger.records.len() - args.rows);
    }

    let summary = &report.summary;
    println!("\nSummary:");
    println!("  Service Months:        {}", summary.service_months);
    println!("  Initial Basic Pay:     {:.0}", summary.initial_basic_pay);
    println!("  Final Basic Pay:       {:.0}", summary.final_basic_pay);
    println!("  Final DA Rate:         {:.2}", summary.final_da_rate);
    println!("  UPS Monthly Pension:   {:.0}", summary.ups_monthly_pension);
    println!("  UPS Lumpsum:           {:.0}", summary.ups_lumpsum);
    println!("  NPS Corpus:            {:.0}", summary.nps_corpus_final);
    println!("  NPS Annuity (monthly): {:.0}", summary.nps_annuity_monthly);
    println!("  NPS Lumpsum:           {:.0}", summary.nps_lumpsum);
    println!(
        "  Total paid over {} months: UPS {:.0}, NPS {:.0}",
        summary.horizon_months, summary.total_ups_paid, summary.total_nps_paid
    );
    println!(
        "  SWP months funded: NPS lumpsum {}, UPS lumpsum {}",
        summary.nps_swp_months_survived, summary.ups_swp_months_survived
    );

    let written = report::write_all(&args.out_dir, &report)
        .with_context(|| format!("writing results to {}", args.out_dir.display()))?;
    println!("\nResults written to:");
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
