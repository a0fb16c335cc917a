pub mod boilerplate;
pub mod derive;
pub mod engine;
pub mod error;
mod parse;
pub mod prompt;
pub mod task;

pub use boilerplate::{split_files, GeneratedFile};
pub use engine::{InvokeError, LlmInvoker, ModelInvoker, OutputSchema};
pub use error::GenerateError;
pub use task::{
    BoilerplateGeneration, CostEstimation, DeploymentGuide, DesignGeneration, GenerationTask,
    Generator, TradeoffAnalysis,
};
