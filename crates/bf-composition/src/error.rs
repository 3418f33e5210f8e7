use thiserror::Error;

pub type CompositionResult<T> = Result<T, CompositionError>;

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },
}
