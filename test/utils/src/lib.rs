#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

use std::fs;
use std::io;
use std::path;

use tempfile::TempDir;

/// Smallest document the upload endpoint would accept as a PDF. The backend is
/// mocked in tests, so only the bytes travelling over the wire matter.
pub fn pdf_fixture() -> &'static [u8] {
    return b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n";
}

/// Writes `contents` to `name` inside a fresh temporary directory. The
/// directory and the file are removed when the returned `TempDir` drops, so
/// callers must keep it bound for as long as the path is used.
pub fn write_fixture(name: &str, contents: &[u8]) -> io::Result<(TempDir, path::PathBuf)> {
    let dir = tempfile::Builder::new().prefix("docchat-test-").tempdir()?;

    let file_path = dir.path().join(name);
    fs::write(&file_path, contents)?;

    return Ok((dir, file_path));
}
