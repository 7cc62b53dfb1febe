// Application layer: configuration, lineup source and the batch pipeline.

pub mod config;
pub mod pipeline;
pub mod source;
