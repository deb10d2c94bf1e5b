pub mod logger;
pub mod terrain_pipeline;
