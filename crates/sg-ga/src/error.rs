use sg_core::CoreError;
use sg_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GaError {
    #[error("genetic algorithm configuration error: {0}")]
    Config(String),

    #[error("need at least 2 retained individuals to pick parents, have {0}")]
    PoolTooSmall(usize),

    #[error("fitness evaluation failed: {0}")]
    Sim(#[from] SimError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GaResult<T> = Result<T, GaError>;
