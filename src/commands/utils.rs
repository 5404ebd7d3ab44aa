use crate::utils::config::SCHEMA_VERSION;

/// Display version information
pub fn display_version() {
    println!("MRC Toolkit v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Stack-distance histograms, miss-ratio curves and curve accuracy metrics.");
}
