use chrono::Local;
use colored::*;
use figlet_rs::FIGfont;
use tracing::info;

use crate::arbitrage::detector::{ self, ScanReport };
use crate::config::Config;

pub fn print_config(config: &Config) {
    let json = serde_json::to_string_pretty(config).unwrap_or_default();

    info!("\n{}: \n{}", String::from("[CONFIG]").blue().underline(), json.magenta());
}

fn banner(text: &str) -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(text).map(|figure| figure.to_string()))
        .unwrap_or_else(|| text.to_string())
}

pub fn print_app_starting() {
    info!("\n{}", banner("P2PA is starting..."));
}

pub fn print_scan_summary(report: &ScanReport) {
    println!(
        "{} {} candidates, {} evaluated, {} skipped, {} kept ({}) in {} ms",
        format!("[{}]", Local::now().format("%Y-%m-%d %H:%M:%S")).blue(),
        report.candidates,
        report.evaluated,
        report.skipped.to_string().yellow(),
        report.cycles.len().to_string().green(),
        report.ranking,
        report.elapsed_ms
    );

    if let Some(best) = report.best(1).first() {
        info!("Best cycle: {}", best);
    }
}

/// Summary line followed by the ranked cycles
pub fn print_report(report: &ScanReport) {
    print_scan_summary(report);
    detector::print_opportunities(report);
}
