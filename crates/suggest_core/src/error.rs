use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("pseudo count must be finite and greater than zero, got {0}")]
    InvalidPseudoCount(f64),
}
