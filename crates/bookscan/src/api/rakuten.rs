use log::{info, trace};
use serde::Deserialize;

use crate::{BookRecord, Error, ErrorKind};

use super::Client;

const RAKUTEN_BOOKS_URL: &str = "https://app.rakuten.co.jp/services/api/BooksBook/Search/20170404";

pub(crate) fn get_book<C: Client>(
    client: &C,
    isbn: &str,
    app_id: &str,
) -> Result<Option<BookRecord>, Error> {
    info!("Searching for ISBN '{isbn}' using Rakuten Books API");
    let url = reqwest::Url::parse_with_params(
        RAKUTEN_BOOKS_URL,
        &[("isbn", isbn), ("applicationId", app_id)],
    )
    .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;

    let RakutenModel { count, items } = client.get_json(url.as_str())?;

    trace!("Request was successful - {count} item(s) found");

    if count == 0 {
        return Ok(None);
    }

    Ok(items.into_iter().next().map(|wrapper| {
        let Item {
            title,
            author,
            publisher_name,
            sales_date,
        } = wrapper.item;

        BookRecord {
            isbn: isbn.to_owned(),
            title,
            authors: author,
            publisher: publisher_name,
            published_date: sales_date,
        }
    }))
}

#[derive(Deserialize)]
struct RakutenModel {
    #[serde(default)]
    count: u32,
    #[serde(rename = "Items", default)]
    items: Vec<ItemWrapper>,
}

#[derive(Deserialize)]
struct ItemWrapper {
    #[serde(rename = "Item")]
    item: Item,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct Item {
    title: String,
    author: String,
    publisher_name: String,
    sales_date: String,
}
