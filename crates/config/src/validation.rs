//! Configuration validation
//!
//! Catches values that would misbehave at runtime (zero capacities,
//! out-of-range ratios, inverted bounds) before the pipeline starts.

use crate::error::{ConfigError, Result};
use crate::Config;

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    validate_source(config)?;
    validate_buffer(config)?;
    validate_pipeline(config)?;
    validate_sink(config)?;
    Ok(())
}

fn validate_source(config: &Config) -> Result<()> {
    let source = &config.source;
    if source.path.is_empty() {
        return Err(ConfigError::invalid_value(
            "source",
            "path",
            "must not be empty",
        ));
    }
    if source.read_chunk == 0 {
        return Err(ConfigError::invalid_value(
            "source",
            "read_chunk",
            "must be at least 1",
        ));
    }
    if source.max_read_chunk < source.read_chunk {
        return Err(ConfigError::invalid_value(
            "source",
            "max_read_chunk",
            format!("must be at least read_chunk ({})", source.read_chunk),
        ));
    }
    Ok(())
}

fn validate_buffer(config: &Config) -> Result<()> {
    let buffer = &config.buffer;
    if buffer.initial_capacity == 0 {
        return Err(ConfigError::invalid_value(
            "buffer",
            "initial_capacity",
            "must be at least 1",
        ));
    }
    if buffer.resize_step == 0 {
        return Err(ConfigError::invalid_value(
            "buffer",
            "resize_step",
            "must be at least 1",
        ));
    }
    if !(buffer.resize_threshold > 0.0 && buffer.resize_threshold < 1.0) {
        return Err(ConfigError::invalid_value(
            "buffer",
            "resize_threshold",
            "must be between 0.0 and 1.0 exclusive",
        ));
    }
    if buffer.max_capacity < buffer.initial_capacity {
        return Err(ConfigError::invalid_value(
            "buffer",
            "max_capacity",
            format!(
                "must be at least initial_capacity ({})",
                buffer.initial_capacity
            ),
        ));
    }
    Ok(())
}

fn validate_pipeline(config: &Config) -> Result<()> {
    let pipeline = &config.pipeline;
    if pipeline.batch_capacity == 0 {
        return Err(ConfigError::invalid_value(
            "pipeline",
            "batch_capacity",
            "must be at least 1",
        ));
    }
    if pipeline.chunk_size == 0 {
        return Err(ConfigError::invalid_value(
            "pipeline",
            "chunk_size",
            "must be at least 1",
        ));
    }
    if pipeline.flush_interval_ms == 0 {
        return Err(ConfigError::invalid_value(
            "pipeline",
            "flush_interval_ms",
            "must be at least 1",
        ));
    }
    if pipeline.drain_wait_ms == 0 {
        return Err(ConfigError::invalid_value(
            "pipeline",
            "drain_wait_ms",
            "must be at least 1",
        ));
    }
    Ok(())
}

fn validate_sink(config: &Config) -> Result<()> {
    if config.sink.path.is_empty() {
        return Err(ConfigError::invalid_value(
            "sink",
            "path",
            "must not be empty",
        ));
    }
    Ok(())
}
