use thiserror::Error;

pub type FlashResult<T> = Result<T, FlashError>;

#[derive(Error, Debug)]
pub enum FlashError {
    #[error("Solver contract violated: {what}")]
    SolverContract { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
