use std::collections::HashMap;

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub(crate) struct FreeDaily {
    pub book: Book,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Book {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub image: Image,
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Image {
    pub sources: Vec<ImageSource>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ImageSource {
    pub src: String,
    // density/width descriptor -> url
    #[serde(default)]
    pub srcset: HashMap<String, String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ChaptersResponse {
    pub chapters: Vec<ChapterStub>,
}

/// Chapter entry from the chapter list, without its content.
#[derive(Deserialize, Debug, Clone)]
pub struct ChapterStub {
    pub id: String,
    pub order_no: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Chapter {
    pub id: String,
    pub order_no: u32,
    pub action_title: String,
    pub text: String,
    pub signed_audio_url: String,
}

impl Chapter {
    /// Two digit sequence label shared by headings and audio file names.
    pub fn number(&self) -> String {
        format!("{:02}", self.order_no)
    }
}
