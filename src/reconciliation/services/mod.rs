mod correlator;
mod payload_builder;
mod report_extractor;

pub use correlator::{CorrelatedPair, Correlation, Correlator};
pub use payload_builder::PayloadBuilder;
pub use report_extractor::ReportExtractor;
