use thiserror::Error;

use crate::template::error::{CompileError, EvalError};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    // IO errors
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),

    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParse(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
