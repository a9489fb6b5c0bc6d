use std::{
    fmt::Write,
    path::{Component, Path, PathBuf},
};

use crate::{
    ConnectionOptions, DEFAULT_ENGINE, DEFAULT_FILE_NAME, DatabaseConfig, PragmaValue, Pragmas,
};

enum_mode! {
    /// Locking behavior requested when a transaction begins.
    ///
    /// Refer to [SQLite documentation] for the semantics of each mode.
    ///
    /// [SQLite documentation]: https://www.sqlite.org/lang_transaction.html
    pub TransactionMode("transaction_mode") {
        Deferred => "DEFERRED",
        Immediate => "IMMEDIATE",
        Exclusive => "EXCLUSIVE",
    }
    default Immediate
}

enum_mode! {
    /// Refer to [SQLite documentation] for the meaning of the database journaling mode.
    ///
    /// [SQLite documentation]: https://www.sqlite.org/pragma.html#pragma_journal_mode
    pub JournalMode("journal_mode") {
        Delete => "DELETE",
        Truncate => "TRUNCATE",
        Persist => "PERSIST",
        Memory => "MEMORY",
        Wal => "WAL",
        Off => "OFF",
    }
    default Wal
}

enum_mode! {
    /// Refer to [SQLite documentation] for the meaning of various synchronous settings.
    ///
    /// [SQLite documentation]: https://www.sqlite.org/pragma.html#pragma_synchronous
    pub Synchronous("synchronous") {
        Off => "OFF",
        Normal => "NORMAL",
        Full => "FULL",
        Extra => "EXTRA",
    }
    default Normal
}

/// Build a tuned SQLite settings entry.
#[derive(Clone, Debug)]
pub struct Tusq {
    pub(crate) directory: PathBuf,
    pub(crate) file_name: String,
    pub(crate) engine: String,
    pub(crate) transaction_mode: TransactionMode,
    pub(crate) timeout: u64,
    pub(crate) init_command: Option<String>,
    pub(crate) cache_size: i64,
    pub(crate) journal_mode: JournalMode,
    pub(crate) synchronous: Synchronous,
    pub(crate) mmap_size: i64,
    pub(crate) journal_size_limit: i64,
    pub(crate) pragmas: Pragmas,
}

impl Tusq {
    /// Construct `Self` targeting a database file under `directory`, with
    /// default options.
    ///
    /// See the source of this method for the current defaults.
    #[must_use]
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_owned(),
            file_name: DEFAULT_FILE_NAME.into(),
            engine: DEFAULT_ENGINE.into(),
            transaction_mode: TransactionMode::Immediate,
            timeout: 5,
            init_command: None,
            cache_size: 2000,
            journal_mode: JournalMode::Wal,
            synchronous: Synchronous::Normal,
            mmap_size: 134217728,
            journal_size_limit: 27103364,
            pragmas: Pragmas::new(),
        }
    }

    /// Sets the name of the database file.
    ///
    /// The default file name is `db.sqlite3`.
    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Sets the dotted path of the ORM backend that opens the database.
    ///
    /// The default engine is `django.db.backends.sqlite3`.
    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Sets the locking behavior requested when a transaction begins.
    ///
    /// The default transaction mode is IMMEDIATE.
    #[must_use]
    pub fn transaction_mode(mut self, mode: TransactionMode) -> Self {
        self.transaction_mode = mode;
        self
    }

    /// Sets the number of whole seconds to wait when the database is locked,
    /// before a busy timeout error is returned.
    ///
    /// The default timeout is 5 seconds.
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Sets the full initialization command verbatim.
    ///
    /// When a command is set, pragma generation is suppressed entirely: the
    /// named tuning parameters and any extra pragmas are ignored.
    #[must_use]
    pub fn init_command(mut self, command: impl Into<String>) -> Self {
        self.init_command = Some(command.into());
        self
    }

    /// Sets the [cache_size](https://www.sqlite.org/pragma.html#pragma_cache_size) directive for the connection.
    ///
    /// The default cache size is 2000 pages. A negative value is a size in
    /// kibibytes, per SQLite convention.
    #[must_use]
    pub fn cache_size(mut self, pages: i64) -> Self {
        self.cache_size = pages;
        self
    }

    /// Sets the [journal mode](https://www.sqlite.org/pragma.html#pragma_journal_mode) directive for the connection.
    ///
    /// The default journal mode is WAL.
    #[must_use]
    pub fn journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = mode;
        self
    }

    /// Sets the [synchronous](https://www.sqlite.org/pragma.html#pragma_synchronous) directive for the connection.
    ///
    /// The default synchronous setting is NORMAL.
    #[must_use]
    pub fn synchronous(mut self, synchronous: Synchronous) -> Self {
        self.synchronous = synchronous;
        self
    }

    /// Sets the [mmap_size](https://www.sqlite.org/pragma.html#pragma_mmap_size) directive for the connection, in bytes.
    ///
    /// The default memory-map size is 134217728 (128 MiB).
    #[must_use]
    pub fn mmap_size(mut self, bytes: i64) -> Self {
        self.mmap_size = bytes;
        self
    }

    /// Sets the [journal_size_limit](https://www.sqlite.org/pragma.html#pragma_journal_size_limit) directive for the connection, in bytes.
    ///
    /// The default journal size limit is 27103364.
    #[must_use]
    pub fn journal_size_limit(mut self, bytes: i64) -> Self {
        self.journal_size_limit = bytes;
        self
    }

    /// Sets a custom pragma directive for the connection.
    ///
    /// A pragma naming one of the tuned directives replaces that line in
    /// place; any other pragma is emitted ahead of the tuned block, in
    /// insertion order.
    #[must_use]
    pub fn pragma(mut self, name: impl Into<String>, value: impl Into<PragmaValue>) -> Self {
        self.pragmas.insert(name, value);
        self
    }

    /// Replaces the full set of custom pragma directives.
    #[must_use]
    pub fn pragmas(mut self, pragmas: Pragmas) -> Self {
        self.pragmas = pragmas;
        self
    }

    /// Collect the initialization command into a single string.
    ///
    /// An explicit [`init_command`](Self::init_command) is returned verbatim.
    /// Otherwise custom pragmas that don't name a tuned directive come first,
    /// followed by the tuned block in its fixed order, with overrides applied
    /// in place.
    fn render_init_command(&self) -> String {
        if let Some(command) = &self.init_command {
            return command.clone();
        }

        // The tuned block, in its fixed emission order.
        let tuned = [
            ("journal_mode", self.journal_mode.to_string()),
            ("synchronous", self.synchronous.to_string()),
            ("mmap_size", self.mmap_size.to_string()),
            ("journal_size_limit", self.journal_size_limit.to_string()),
            ("cache_size", self.cache_size.to_string()),
        ];

        let mut command = String::new();
        for (name, value) in self.pragmas.iter() {
            if !tuned.iter().any(|(tuned_name, _)| tuned_name == name) {
                writeln!(command, "PRAGMA {name}={value};").ok();
            }
        }
        command.push('\n');
        for (name, default) in &tuned {
            match self.pragmas.get(name) {
                Some(value) => writeln!(command, "PRAGMA {name}={value};").ok(),
                None => writeln!(command, "PRAGMA {name}={default};").ok(),
            };
        }
        command
    }

    /// Path of the database file: the base directory joined with the file
    /// name. `.` components are dropped, so a current-directory base yields
    /// the bare file name.
    fn database_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .directory
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect();
        path.push(&self.file_name);
        path
    }

    /// Assemble the settings entry.
    pub fn build(self) -> DatabaseConfig {
        let name = self.database_path();
        let init_command = self.render_init_command();
        tracing::debug!(
            path = %name.display(),
            engine = %self.engine,
            "assembled database settings entry"
        );
        DatabaseConfig {
            engine: self.engine,
            name,
            options: ConnectionOptions {
                transaction_mode: self.transaction_mode,
                timeout: self.timeout,
                init_command,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_render_matches_the_exported_constant() {
        let command = Tusq::new(".").render_init_command();
        assert_eq!(command, crate::DEFAULT_INIT_COMMAND);
    }

    #[test]
    fn tuned_directives_render_in_fixed_order() {
        let command = Tusq::new(".")
            .journal_mode(JournalMode::Delete)
            .synchronous(Synchronous::Extra)
            .mmap_size(0)
            .journal_size_limit(1000000)
            .cache_size(-2000)
            .render_init_command();

        assert_eq!(
            command,
            "\nPRAGMA journal_mode=DELETE;\nPRAGMA synchronous=EXTRA;\nPRAGMA mmap_size=0;\n\
             PRAGMA journal_size_limit=1000000;\nPRAGMA cache_size=-2000;\n"
        );
    }

    #[test]
    fn extras_render_ahead_of_the_tuned_block() {
        let command = Tusq::new(".")
            .pragma("something_extra", 123)
            .pragma("temp_store", "MEMORY")
            .render_init_command();

        assert_eq!(
            command,
            format!(
                "PRAGMA something_extra=123;\nPRAGMA temp_store=MEMORY;\n{}",
                crate::DEFAULT_INIT_COMMAND
            )
        );
    }

    #[test]
    fn extra_naming_a_tuned_directive_overrides_in_place() {
        let command = Tusq::new(".")
            .pragma("journal_mode", "OOPS")
            .render_init_command();

        assert_eq!(
            command,
            crate::DEFAULT_INIT_COMMAND.replace("journal_mode=WAL", "journal_mode=OOPS")
        );
    }

    #[test]
    fn explicit_init_command_suppresses_generation() {
        let command = Tusq::new(".")
            .cache_size(1)
            .pragma("temp_store", "MEMORY")
            .init_command("PRAGMA journal_mode=WAL;")
            .render_init_command();

        assert_eq!(command, "PRAGMA journal_mode=WAL;");
    }

    #[test]
    fn database_path_drops_current_dir_components() {
        assert_eq!(Tusq::new(".").database_path(), PathBuf::from("db.sqlite3"));
        assert_eq!(
            Tusq::new("./data").database_path(),
            PathBuf::from("data/db.sqlite3")
        );
        assert_eq!(
            Tusq::new("/var/app").database_path(),
            PathBuf::from("/var/app/db.sqlite3")
        );
    }

    #[test]
    fn mode_names_parse_case_insensitively() -> crate::Result<()> {
        assert_eq!(
            "immediate".parse::<TransactionMode>()?,
            TransactionMode::Immediate
        );
        assert_eq!("Wal".parse::<JournalMode>()?, JournalMode::Wal);
        assert_eq!("EXTRA".parse::<Synchronous>()?, Synchronous::Extra);
        Ok(())
    }

    #[test]
    fn unknown_mode_name_is_rejected() {
        let err = "SOMETIMES".parse::<TransactionMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter \"transaction_mode\" expects one of DEFERRED, IMMEDIATE, EXCLUSIVE, got \"SOMETIMES\""
        );
    }

    #[test]
    fn mode_defaults() {
        assert_eq!(TransactionMode::default(), TransactionMode::Immediate);
        assert_eq!(JournalMode::default(), JournalMode::Wal);
        assert_eq!(Synchronous::default(), Synchronous::Normal);
    }
}
