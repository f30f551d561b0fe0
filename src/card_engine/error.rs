use thiserror::Error;

/// Failures that cross the public API boundary.
///
/// Per-draft structural rejections never appear here; they are absorbed by
/// the generator's retry loop. Only exhaustion-class failures and bad
/// configuration surface to callers.
#[derive(Error, Debug)]
pub enum BankoError {
    /// A single card was rejected 1000 times in a row. This signals a logic
    /// defect in the placement steps, not transient bad luck.
    #[error("card generation exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    /// The attempt budget ran out before enough unique cards were collected.
    #[error("batch incomplete: produced {produced} of {requested} unique cards")]
    BatchIncomplete { produced: usize, requested: usize },

    /// Rejected synchronously, before any generation work begins.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type Result<T> = std::result::Result<T, BankoError>;
