pub mod audit;
pub mod enrichment;
pub mod leads;
pub mod reports;
pub mod usage;
