//! RAII test environment: every test gets its own temporary data directory,
//! removed when the environment is dropped, even if the test panics.

use std::path::{Path, PathBuf};
use std::io;
use tempfile::TempDir;

use super::connection::XlsxConnection;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: XlsxConnection,
    /// Base directory for anything else a test wants to write (exports...)
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = XlsxConnection::new(base_path.join("data").join("equipos.xlsx"));

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn data_file(&self) -> &Path {
        self.connection.data_file()
    }
}
