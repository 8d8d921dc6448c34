use log::{info, trace};
use serde::Deserialize;

use crate::{BookRecord, Error};

use super::Client;

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes?q=isbn:";

pub(crate) fn get_book<C: Client>(client: &C, isbn: &str) -> Result<Option<BookRecord>, Error> {
    info!("Searching for ISBN '{isbn}' using Google Books API");
    let mut url = GOOGLE_BOOKS_URL.to_owned();
    url.push_str(isbn);

    let GoogleModel { total_items, items } = client.get_json(&url)?;

    trace!("Request was successful - {total_items} item(s) found");

    if total_items == 0 {
        return Ok(None);
    }

    Ok(items.into_iter().next().map(|item| item.build(isbn.to_owned())))
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    #[serde(rename = "totalItems", default)]
    total_items: u32,
    #[serde(default)]
    items: Vec<Item>,
}

/// The API does not include the ISBN.. so this struct also acts as
/// a builder for the [`BookRecord`] type, see [`Item::build`].
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Item {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

/// Volume information from the Google Book API
#[derive(Deserialize, Default)]
#[cfg_attr(test, derive(Debug))]
#[serde(default)]
struct VolumeInfo {
    authors: Vec<String>,
    title: String,
    publisher: String,
    #[serde(rename = "publishedDate")]
    published_date: String,
}

impl Item {
    fn build(self, isbn: String) -> BookRecord {
        // Deconstruct to take ownership of fields (avoids cloning).
        let VolumeInfo {
            mut authors,
            title,
            publisher,
            published_date,
        } = self.volume_info;

        authors.retain(|author| !author.is_empty());

        BookRecord {
            isbn,
            title,
            authors: authors.join(", "),
            publisher,
            published_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{get_book, GoogleModel, Item, VolumeInfo};
    use crate::{
        api::{assert_url, impl_text_producer, Client, MockClient, NetworkErrorProducer},
        ErrorKind,
    };

    const GOOGLE_BOOK_JSON: &str = include_str!("../../../../tests/data/google_book.json");

    impl_text_producer! {
        ValidJsonProducer => |url| Ok(GOOGLE_BOOK_JSON.to_owned()),
        EmptyBookProducer => |url| Ok(
            r#"{
                "kind": "books#volumes",
                "totalItems": 0
            }"#.to_owned()
        ),
    }

    fn lookup<C: Client>(isbn: &str) -> Result<Option<crate::BookRecord>, crate::Error> {
        get_book(&C::default(), isbn)
    }

    #[test]
    fn no_items_in_json_is_none() {
        let res = lookup::<MockClient<EmptyBookProducer>>("9784167158057");

        assert!(matches!(res, Ok(None)), "{res:?}");
    }

    #[test]
    fn isbn_13_url_is_format_is_correct() {
        assert!(lookup::<MockClient<ValidJsonProducer>>("9780380815937").is_ok());
        assert_url!("https://www.googleapis.com/books/v1/volumes?q=isbn:9780380815937");
    }

    #[test]
    fn network_error_is_propagated() {
        let err = lookup::<MockClient<NetworkErrorProducer>>("9780380815937").unwrap_err();

        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[test]
    fn book_can_be_derived_from_json() {
        let isbn = "0735619670";
        let mut model: GoogleModel = serde_json::from_str(GOOGLE_BOOK_JSON).unwrap();
        let book = model.items.remove(0).build(isbn.to_owned());

        // ISBN is not in the response so it comes from the caller.
        assert_eq!(isbn, book.isbn);
        assert_eq!("Steve McConnell", book.authors);
        assert_eq!("Code Complete", book.title);
        assert_eq!("DV-Professional", book.publisher);
        assert_eq!("2004", book.published_date);
    }

    #[test]
    fn several_authors_are_joined_with_comma() {
        let item = Item {
            volume_info: VolumeInfo {
                authors: vec!["Ann".to_owned(), String::new(), "Bob".to_owned()],
                ..VolumeInfo::default()
            },
        };

        assert_eq!("Ann, Bob", item.build("1".to_owned()).authors);
    }
}
