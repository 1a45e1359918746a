//! Tabular export: batch industry, column ordering and row assembly.

mod assembler;
mod report;

pub use assembler::{batch_industry, AssembledBatch, TableRow, TabularAssembler, DEFAULT_IMAGE_COLUMN};
pub use report::BatchReport;
