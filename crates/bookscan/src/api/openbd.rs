use log::{info, trace};
use serde::Deserialize;

use crate::{BookRecord, Error};

use super::Client;

const OPENBD_URL: &str = "https://api.openbd.jp/v1/get?isbn=";

pub(crate) fn get_book<C: Client>(client: &C, isbn: &str) -> Result<Option<BookRecord>, Error> {
    info!("Searching for ISBN '{isbn}' using OpenBD API");
    let mut url = OPENBD_URL.to_owned();
    url.push_str(isbn);

    // OpenBD answers with one element per requested ISBN, `null` when it is unknown.
    let entries: Vec<Option<Entry>> = client.get_json(&url)?;

    trace!("Request was successful");

    Ok(entries
        .into_iter()
        .next()
        .flatten()
        .map(|Entry { summary }| BookRecord {
            isbn: isbn.to_owned(),
            title: summary.title,
            authors: summary.author,
            publisher: summary.publisher,
            published_date: summary.pubdate,
        }))
}

#[derive(Deserialize)]
struct Entry {
    #[serde(default)]
    summary: Summary,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Summary {
    title: String,
    author: String,
    publisher: String,
    pubdate: String,
}
