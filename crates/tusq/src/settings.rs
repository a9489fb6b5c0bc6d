use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::TransactionMode;

/// Engine identifier used when none is supplied.
pub const DEFAULT_ENGINE: &str = "django.db.backends.sqlite3";

/// Database file name used when none is supplied.
pub const DEFAULT_FILE_NAME: &str = "db.sqlite3";

/// Initialization command produced by a [`Tusq`](crate::Tusq) with default
/// tuning parameters and no extra pragmas.
pub const DEFAULT_INIT_COMMAND: &str = "
PRAGMA journal_mode=WAL;
PRAGMA synchronous=NORMAL;
PRAGMA mmap_size=134217728;
PRAGMA journal_size_limit=27103364;
PRAGMA cache_size=2000;
";

/// A database settings entry, ready to be embedded into a host application's
/// configuration under its database alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Dotted path of the ORM backend that opens the database.
    #[serde(rename = "ENGINE")]
    pub engine: String,

    /// Path of the database file.
    #[serde(rename = "NAME")]
    pub name: PathBuf,

    /// Options handed to the backend when a connection is established.
    #[serde(rename = "OPTIONS")]
    pub options: ConnectionOptions,
}

/// Connection options nested under `OPTIONS` in a settings entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    /// Locking behavior requested when a transaction begins.
    pub transaction_mode: TransactionMode,

    /// Seconds to wait on a locked database before giving up.
    pub timeout: u64,

    /// Statements executed when a connection is established.
    pub init_command: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_init_command_shape() {
        assert!(DEFAULT_INIT_COMMAND.starts_with('\n'));
        assert!(DEFAULT_INIT_COMMAND.ends_with(";\n"));
        assert_eq!(DEFAULT_INIT_COMMAND.matches("PRAGMA ").count(), 5);
        assert_eq!(DEFAULT_INIT_COMMAND.matches(";\n").count(), 5);
    }
}
