//! CSV and JSON writers for run results
//!
//! Money columns are rounded to whole rupees and rates to two decimals;
//! the in-memory results keep full precision.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::career::CareerLedger;
use crate::cpc::CpcMatrixSet;
use crate::pension::{NpsPayoutRow, UpsPayoutRow};
use crate::scenario::{ComparisonReport, RunSummary};
use crate::swp::SwpRow;

pub const LEDGER_FILE: &str = "career_ledger.csv";
pub const MATRICES_FILE: &str = "pay_matrices.csv";
pub const UPS_SCHEDULE_FILE: &str = "ups_schedule.csv";
pub const NPS_SCHEDULE_FILE: &str = "nps_schedule.csv";
pub const NPS_SWP_FILE: &str = "nps_swp.csv";
pub const UPS_SWP_FILE: &str = "ups_swp.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Month-wise career ledger
pub fn write_ledger_csv<W: Write>(out: &mut W, ledger: &CareerLedger) -> io::Result<()> {
    writeln!(out, "Month,Level,Pay_Position,CPC,Basic_Pay,DA_Rate,DA_Amount,Total_Emoluments,NPS_Contribution,NPS_Corpus,CPC_Applied")?;

    for r in &ledger.records {
        writeln!(
            out,
            "{},{},{},{},{:.0},{:.2},{:.0},{:.0},{:.0},{:.0},{}",
            r.month_label(),
            r.level,
            r.position,
            r.cpc,
            r.basic_pay,
            r.da_rate,
            r.da_amount,
            r.total_emoluments,
            r.nps_contribution,
            r.nps_corpus,
            r.cpc_applied.map(|c| c.to_string()).unwrap_or_default(),
        )?;
    }
    Ok(())
}

/// Every generated pay matrix in long format
pub fn write_matrices_csv<W: Write>(out: &mut W, cycles: &CpcMatrixSet) -> io::Result<()> {
    writeln!(out, "CPC,Level,Pay_Position,Basic_Pay")?;

    for generated in cycles.iter() {
        for entry in generated.matrix.entries() {
            writeln!(out, "{},{},{},{:.0}", entry.cpc, entry.level, entry.position, entry.basic_pay)?;
        }
    }
    Ok(())
}

pub fn write_ups_schedule_csv<W: Write>(out: &mut W, rows: &[UpsPayoutRow]) -> io::Result<()> {
    writeln!(out, "Month,DA_Rate,Pension,Cumulative")?;
    for r in rows {
        writeln!(out, "{},{:.2},{:.0},{:.0}", r.month, r.da_rate, r.pension, r.cumulative)?;
    }
    Ok(())
}

pub fn write_nps_schedule_csv<W: Write>(out: &mut W, rows: &[NpsPayoutRow]) -> io::Result<()> {
    writeln!(out, "Month,Annuity_Corpus,Payout,Cumulative")?;
    for r in rows {
        writeln!(out, "{},{:.0},{:.0},{:.0}", r.month, r.annuity_corpus, r.payout, r.cumulative)?;
    }
    Ok(())
}

pub fn write_swp_csv<W: Write>(out: &mut W, rows: &[SwpRow]) -> io::Result<()> {
    writeln!(out, "Month,Opening_Corpus,Growth,Withdrawal,Closing_Corpus")?;
    for r in rows {
        writeln!(
            out,
            "{},{:.0},{:.0},{:.0},{:.0}",
            r.month, r.opening_corpus, r.growth, r.withdrawal, r.closing_corpus
        )?;
    }
    Ok(())
}

/// Pretty-printed JSON summary
pub fn write_summary_json<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}

fn create(dir: &Path, name: &str) -> io::Result<(PathBuf, BufWriter<File>)> {
    let path = dir.join(name);
    let file = File::create(&path)?;
    Ok((path, BufWriter::new(file)))
}

/// Write every table of `report` into `dir`, returning the paths written
pub fn write_all(dir: &Path, report: &ComparisonReport) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let (path, mut out) = create(dir, LEDGER_FILE)?;
    write_ledger_csv(&mut out, &report.ledger)?;
    out.flush()?;
    written.push(path);

    let (path, mut out) = create(dir, MATRICES_FILE)?;
    write_matrices_csv(&mut out, &report.cycles)?;
    out.flush()?;
    written.push(path);

    let (path, mut out) = create(dir, UPS_SCHEDULE_FILE)?;
    write_ups_schedule_csv(&mut out, &report.pension.ups_schedule)?;
    out.flush()?;
    written.push(path);

    let (path, mut out) = create(dir, NPS_SCHEDULE_FILE)?;
    write_nps_schedule_csv(&mut out, &report.pension.nps_schedule)?;
    out.flush()?;
    written.push(path);

    let (path, mut out) = create(dir, NPS_SWP_FILE)?;
    write_swp_csv(&mut out, &report.nps_swp.rows)?;
    out.flush()?;
    written.push(path);

    let (path, mut out) = create(dir, UPS_SWP_FILE)?;
    write_swp_csv(&mut out, &report.ups_swp.rows)?;
    out.flush()?;
    written.push(path);

    let (path, mut out) = create(dir, SUMMARY_FILE)?;
    write_summary_json(&mut out, &report.summary)?;
    out.flush()?;
    written.push(path);

    log::info!("wrote {} files to {}", written.len(), dir.display());
    Ok(written)
}
