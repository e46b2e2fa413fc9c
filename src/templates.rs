use askama::Template; // bring trait in scope

use crate::{
    error::Result,
    models::{Book, Chapter},
};

/// Markdown rendering of a book. Chapter text is inserted verbatim, markdown
/// characters in it are not escaped.
#[derive(Template)]
#[template(
    source = "# {{ title }}\n\n_{{ author }}_\n\n{% for chapter in chapters %}## Blink {{ chapter.number() }} - {{ chapter.action_title }}\n\n{{ chapter.text }}\n\n{% endfor %}Source: {{ url }}\n\n",
    ext = "md"
)]
pub struct BookMarkdown<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub chapters: Vec<&'a Chapter>,
    pub url: &'a str,
}

impl<'a> BookMarkdown<'a> {
    pub fn new(book: &'a Book, chapters: &'a [Chapter]) -> Self {
        let mut chapters: Vec<&Chapter> = chapters.iter().collect();
        chapters.sort_by_key(|chapter| chapter.order_no);

        Self {
            title: &book.title,
            author: &book.author,
            chapters,
            url: &book.url,
        }
    }
}

pub fn render_markdown(book: &Book, chapters: &[Chapter]) -> Result<String> {
    Ok(BookMarkdown::new(book, chapters).render()?)
}
