use std::path::Path;

use log::debug;
use mp4ameta::{ErrorKind, Tag};

use crate::{
    error::Result,
    models::{Book, Chapter},
};

/// Text metadata written into each chapter's audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTags {
    pub artist: String,
    pub album: String,
    pub title: String,
}

impl AudioTags {
    /// Author as artist, book title as album, chapter title as track title.
    pub fn for_chapter(book: &Book, chapter: &Chapter) -> Self {
        Self {
            artist: book.author.clone(),
            album: book.title.clone(),
            title: chapter.action_title.clone(),
        }
    }
}

/// Writes metadata into an audio file that is already on disk.
pub trait Tagger {
    fn write_tags(&self, path: &Path, tags: &AudioTags) -> Result<()>;
}

/// Tags MP4/M4A containers in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mp4Tagger;

impl Tagger for Mp4Tagger {
    fn write_tags(&self, path: &Path, tags: &AudioTags) -> Result<()> {
        let mut tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            // a valid container without a udta/meta/ilst hierarchy
            Err(err) if matches!(err.kind, ErrorKind::NoTag | ErrorKind::AtomNotFound(_)) => {
                debug!("No metadata in {}, creating it", path.display());
                Tag::default()
            }
            Err(err) => return Err(err.into()),
        };

        // empty values leave the field untouched
        if !tags.artist.is_empty() {
            tag.set_artist(&tags.artist);
        }
        if !tags.album.is_empty() {
            tag.set_album(&tags.album);
        }
        if !tags.title.is_empty() {
            tag.set_title(&tags.title);
        }

        tag.write_to_path(path)?;
        Ok(())
    }
}
