//! Output layout on disk. Each run writes into
//! `<download_dir>/<YYYY-MM-DD> - <title>/` and never overwrites a file that
//! is already there, so a half-written file from an interrupted run stays
//! as it is until removed by hand.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use log::info;
use tokio::{fs, io::AsyncWriteExt};

use crate::error::Result;

pub const COVER_FILE: &str = "cover.jpg";

/// Strips characters that are not valid in a file name on common platforms.
pub fn sanitize(name: &str) -> String {
    sanitize_filename::sanitize(name)
}

pub fn book_dir_name(date: NaiveDate, title: &str) -> String {
    sanitize(&format!("{} - {}", date.format("%Y-%m-%d"), title))
}

pub fn book_dir(download_dir: &Path, date: NaiveDate, title: &str) -> PathBuf {
    download_dir.join(book_dir_name(date, title))
}

pub fn text_file_name(title: &str) -> String {
    sanitize(&format!("{}.md", title))
}

pub fn audio_file_name(order_no: u32) -> String {
    format!("{:02}.m4a", order_no)
}

pub async fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).await?;
    Ok(())
}

/// Whether an artifact is already on disk, logging the skip if so. Used to
/// avoid downloads; the write itself goes through [`write_if_absent`].
pub async fn should_skip(path: &Path) -> Result<bool> {
    if fs::try_exists(path).await? {
        info!("Skipping existing file: {}", path.display());
        return Ok(true);
    }
    Ok(false)
}

/// Writes `contents` to `path` unless something is already there. The file
/// is created with `create_new`, so an existing file is never truncated.
/// Returns `true` if the file was written.
pub async fn write_if_absent(path: &Path, contents: impl AsRef<[u8]>) -> Result<bool> {
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            info!("Skipping existing file: {}", path.display());
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };

    file.write_all(contents.as_ref()).await?;
    file.flush().await?;
    Ok(true)
}
