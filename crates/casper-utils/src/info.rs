//! Build and runtime information utilities.

use casper_utils_core::{Computation, Result, ResultRow, RowSet};

/// Version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of this library.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Cryptographic providers linked into this build.
pub const BACKENDS: &str = "RustCrypto rsa/sha1/aes/cbc; jsonwebtoken";

/// `<arch>-<os>` of the running build.
pub fn target() -> String {
    format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)
}

/// Yields one row: `[version]`.
#[derive(Debug, Default)]
pub struct Version {
    done: bool,
}

impl Version {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Computation for Version {
    fn kind(&self) -> &'static str {
        "version"
    }

    fn execute(&mut self) -> Result<()> {
        self.done = true;
        Ok(())
    }

    fn last_error(&self) -> &str {
        ""
    }

    fn produce_rows(&mut self) -> RowSet {
        if std::mem::take(&mut self.done) {
            ResultRow::single(VERSION).into()
        } else {
            RowSet::new()
        }
    }
}

/// Yields one row: `[version, target, name, backends]`.
#[derive(Debug, Default)]
pub struct Info {
    row: Option<ResultRow>,
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Computation for Info {
    fn kind(&self) -> &'static str {
        "info"
    }

    fn execute(&mut self) -> Result<()> {
        self.row = Some(ResultRow::new(vec![
            VERSION.to_string(),
            target(),
            NAME.to_string(),
            BACKENDS.to_string(),
        ]));
        Ok(())
    }

    fn last_error(&self) -> &str {
        ""
    }

    fn produce_rows(&mut self) -> RowSet {
        self.row.take().map(RowSet::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_row() {
        let mut version = Version::new();
        version.execute().unwrap();
        let rows = version.produce_rows().into_vec();
        assert_eq!(rows, vec![Some(ResultRow::single(VERSION))]);
    }

    #[test]
    fn test_info_row() {
        let mut info = Info::new();
        info.execute().unwrap();
        let rows = info.produce_rows().into_vec();
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.len(), 4);
        assert_eq!(row.get(0), Some(VERSION));
        assert!(row.get(1).unwrap().contains('-'));
        assert_eq!(row.get(2), Some("casper-utils"));
        assert_eq!(row.get(3), Some(BACKENDS));
    }

    #[test]
    fn test_rows_are_moved_out() {
        let mut info = Info::new();
        info.execute().unwrap();
        assert_eq!(info.produce_rows().len(), 1);
        assert!(info.produce_rows().is_empty());
    }
}
