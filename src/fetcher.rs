use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::info;

use crate::{
    client::BlinkistClient,
    config::Config,
    cover,
    error::{BlinkistError, Result},
    models::{Book, Chapter},
    storage,
    tagger::{AudioTags, Mp4Tagger, Tagger},
    templates,
};

/// Files touched by a run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub book_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl RunReport {
    fn record(&mut self, path: PathBuf, written: bool) {
        if written {
            self.written.push(path);
        } else {
            self.skipped.push(path);
        }
    }
}

/// Downloads today's free book: text, per chapter audio and cover.
pub struct Fetcher<T: Tagger = Mp4Tagger> {
    client: BlinkistClient,
    config: Config,
    tagger: T,
}

impl Fetcher<Mp4Tagger> {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_tagger(config, Mp4Tagger)
    }
}

impl<T: Tagger> Fetcher<T> {
    pub fn with_tagger(config: Config, tagger: T) -> Result<Self> {
        Ok(Self {
            client: BlinkistClient::new(&config)?,
            config,
            tagger,
        })
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    pub async fn run(&self) -> Result<RunReport> {
        self.run_on(Local::now().date_naive()).await
    }

    /// Runs the whole download as if today were `date`.
    pub async fn run_on(&self, date: NaiveDate) -> Result<RunReport> {
        info!("Retrieving free daily...");
        let book = self.client.fetch_free_daily(&self.config.locale).await?;
        info!("Today's free daily is: “{}”", book.title);

        let book_dir = storage::book_dir(&self.config.download_dir, date, &book.title);
        storage::create_dir(&book_dir).await?;

        info!("Retrieving chapters of {}...", book.title);
        let stubs = self.client.fetch_chapter_list(&book.slug).await?;
        info!("Fetching {} chapters...", stubs.len());
        let chapters = self.client.fetch_chapters(&book, &stubs).await?;
        for chapter in &chapters {
            info!("{} - {}", chapter.number(), chapter.action_title);
        }

        let mut report = RunReport {
            book_dir: book_dir.clone(),
            ..Default::default()
        };

        self.save_text(&book_dir, &book, &chapters, &mut report).await?;
        for chapter in &chapters {
            self.save_audio(&book_dir, &book, chapter, &mut report).await?;
        }
        self.save_cover(&book_dir, &book, &mut report).await?;

        info!(
            "Done: {} files written, {} skipped in {}",
            report.written.len(),
            report.skipped.len(),
            book_dir.display()
        );
        Ok(report)
    }

    async fn save_text(
        &self,
        book_dir: &Path,
        book: &Book,
        chapters: &[Chapter],
        report: &mut RunReport,
    ) -> Result<()> {
        info!("Saving book text...");
        let path = book_dir.join(storage::text_file_name(&book.title));
        let text = templates::render_markdown(book, chapters)?;
        let written = storage::write_if_absent(&path, text).await?;
        report.record(path, written);
        Ok(())
    }

    async fn save_audio(
        &self,
        book_dir: &Path,
        book: &Book,
        chapter: &Chapter,
        report: &mut RunReport,
    ) -> Result<()> {
        let path = book_dir.join(storage::audio_file_name(chapter.order_no));
        // checked up front so existing chapters are not downloaded again
        if storage::should_skip(&path).await? {
            report.record(path, false);
            return Ok(());
        }

        if !chapter.signed_audio_url.contains("m4a") {
            return Err(BlinkistError::UnexpectedResponse(format!(
                "audio url of chapter {} is not m4a: {}",
                chapter.number(),
                chapter.signed_audio_url
            )));
        }

        info!(
            "Downloading audio file for: {} - {}",
            chapter.number(),
            chapter.action_title
        );
        let audio = self.client.download_bytes(&chapter.signed_audio_url).await?;
        let written = storage::write_if_absent(&path, &audio).await?;

        if written {
            self.tagger
                .write_tags(&path, &AudioTags::for_chapter(book, chapter))?;
        }
        report.record(path, written);
        Ok(())
    }

    async fn save_cover(&self, book_dir: &Path, book: &Book, report: &mut RunReport) -> Result<()> {
        info!("Downloading cover...");
        let path = book_dir.join(storage::COVER_FILE);
        if storage::should_skip(&path).await? {
            report.record(path, false);
            return Ok(());
        }

        let url = cover::cover_url(&book.image)?;
        let image = self.client.download_bytes(url).await?;
        let written = storage::write_if_absent(&path, &image).await?;
        report.record(path, written);
        Ok(())
    }
}
