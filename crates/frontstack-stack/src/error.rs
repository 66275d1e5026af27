use frontstack_config::ConfigError;
use frontstack_core::StackError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Invalid stack configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stack(#[from] StackError),
}

pub type Result<T> = std::result::Result<T, BuildError>;
