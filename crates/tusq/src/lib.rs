#[macro_use]
mod enum_mode;

mod error;
mod params;
mod pragmas;
mod settings;
mod tusq;

pub use crate::{
    error::{Error, Result},
    pragmas::{PragmaValue, Pragmas},
    settings::{
        ConnectionOptions, DEFAULT_ENGINE, DEFAULT_FILE_NAME, DEFAULT_INIT_COMMAND, DatabaseConfig,
    },
    tusq::{JournalMode, Synchronous, TransactionMode, Tusq},
};
