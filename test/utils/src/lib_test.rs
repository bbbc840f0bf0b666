use std::fs;
use std::io;

use super::pdf_fixture;
use super::write_fixture;

#[test]
fn it_writes_the_fixture() -> io::Result<()> {
    let (_dir, file_path) = write_fixture("report.pdf", pdf_fixture())?;

    assert_eq!(fs::read(&file_path)?, pdf_fixture());
    assert_eq!(
        file_path.file_name().and_then(|name| return name.to_str()),
        Some("report.pdf")
    );

    return Ok(());
}

#[test]
fn it_removes_the_fixture_when_dropped() -> io::Result<()> {
    let (dir, file_path) = write_fixture("report.pdf", pdf_fixture())?;
    let dir_path = dir.path().to_path_buf();
    assert!(file_path.exists());

    drop(dir);

    assert!(!file_path.exists());
    assert!(!dir_path.exists());

    return Ok(());
}

#[test]
fn it_isolates_fixtures_with_the_same_name() -> io::Result<()> {
    let (_first_dir, first) = write_fixture("report.pdf", b"first")?;
    let (_second_dir, second) = write_fixture("report.pdf", b"second")?;

    assert_ne!(first, second);
    assert_eq!(fs::read(&first)?, b"first");

    return Ok(());
}
