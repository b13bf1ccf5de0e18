//! # flipcheck-analysis
//!
//! Decides, for one combined record, whether the WC or the HG model of a base
//! pair is better supported, then records and reports the decision.

pub mod classifier;
pub mod cleanup;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod resolver;

pub use classifier::{Classification, Classifier, Verdict};
pub use pipeline::{ClassifyOutcome, ClassifyRequest, Pipeline};
pub use record::ClassificationRecord;
pub use resolver::{Resolution, ResolvedView, RoleMapping};
