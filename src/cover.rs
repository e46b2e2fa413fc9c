//! Cover art selection.
//!
//! Image URLs end in `<pixels>.jpg` (for example `.../640.jpg`), so the
//! largest rendition is the one with the biggest number in its file name.
//! URLs with any other shape are rejected rather than guessed at.

use std::collections::BTreeSet;

use crate::{
    error::{BlinkistError, Result},
    models::Image,
};

const COVER_EXTENSION: &str = ".jpg";

/// Every distinct URL in the image descriptor, `src` and `srcset` alike.
pub fn candidate_urls(image: &Image) -> BTreeSet<&str> {
    image
        .sources
        .iter()
        .flat_map(|source| {
            std::iter::once(source.src.as_str()).chain(source.srcset.values().map(String::as_str))
        })
        .collect()
}

fn resolution(url: &str) -> Option<u64> {
    url.rsplit('/')
        .next()?
        .strip_suffix(COVER_EXTENSION)?
        .parse()
        .ok()
}

/// Picks the URL with the numerically largest file name.
pub fn select_largest<'a, I>(urls: I) -> Result<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(u64, &str)> = None;

    for url in urls {
        let size = resolution(url).ok_or_else(|| {
            BlinkistError::UnexpectedResponse(format!(
                "cover url does not end in <number>{}: {}",
                COVER_EXTENSION, url
            ))
        })?;
        if best.map_or(true, |(largest, _)| size > largest) {
            best = Some((size, url));
        }
    }

    best.map(|(_, url)| url)
        .ok_or_else(|| BlinkistError::UnexpectedResponse("book has no cover image".to_string()))
}

pub fn cover_url(image: &Image) -> Result<&str> {
    select_largest(candidate_urls(image))
}
