//! Sweep the pay commission fitment increase and compare outcomes
//!
//! Runs the default career for fitment increases of 10% to 50% in parallel
//! and writes one row per scenario.

use anyhow::Result;
use pension_system::{ScenarioRunner, SimulationInputs};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

const OUTPUT_PATH: &str = "fitment_sweep.csv";

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let runner = ScenarioRunner::builtin()?;

    let base = SimulationInputs::default();
    let scenarios: Vec<SimulationInputs> = (10..=50)
        .step_by(5)
        .map(|pct| SimulationInputs {
            pay_commission_increase: pct as f64 / 100.0,
            ..base.clone()
        })
        .collect();

    println!("Running {} fitment scenarios...", scenarios.len());
    let results = runner.run_scenarios(&scenarios);
    println!("Completed in {:?}\n", start.elapsed());

    println!(
        "{:>8} {:>12} {:>12} {:>14} {:>12} {:>10} {:>10}",
        "Fitment", "Final Basic", "UPS/month", "NPS Corpus", "NPS/month", "UPS SWP", "NPS SWP"
    );
    println!("{}", "-".repeat(84));

    let mut file = BufWriter::new(File::create(OUTPUT_PATH)?);
    writeln!(file, "Fitment,Final_Basic_Pay,UPS_Monthly_Pension,UPS_Lumpsum,NPS_Corpus,NPS_Annuity_Monthly,NPS_Lumpsum,UPS_SWP_Months,NPS_SWP_Months")?;

    for (inputs, result) in scenarios.iter().zip(results) {
        let summary = result?.summary;
        println!(
            "{:>7.0}% {:>12.0} {:>12.0} {:>14.0} {:>12.0} {:>10} {:>10}",
            inputs.pay_commission_increase * 100.0,
            summary.final_basic_pay,
            summary.ups_monthly_pension,
            summary.nps_corpus_final,
            summary.nps_annuity_monthly,
            summary.ups_swp_months_survived,
            summary.nps_swp_months_survived,
        );
        writeln!(
            file,
            "{:.2},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0},{},{}",
            inputs.pay_commission_increase,
            summary.final_basic_pay,
            summary.ups_monthly_pension,
            summary.ups_lumpsum,
            summary.nps_corpus_final,
            summary.nps_annuity_monthly,
            summary.nps_lumpsum,
            summary.ups_swp_months_survived,
            summary.nps_swp_months_survived,
        )?;
    }
    file.flush()?;

    println!("\nResults written to: {}", OUTPUT_PATH);
    Ok(())
}
