mod cache;
mod config;


pub use cache::{Artifacts, PipelineCache, Stage, StageRuns};
pub use config::PipelineConfig;
