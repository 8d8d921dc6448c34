use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use bookscan::format::csv;

use eyre::{eyre, Context, Result};
use log::{info, trace};
use reqwest::{blocking::Client, header::CONTENT_DISPOSITION};

/// A downloaded export, not yet written anywhere.
pub struct Export {
    file_name: String,
    body: Vec<u8>,
}

impl Export {
    /// Writes the export into `dir` under the name the server suggested.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        if !dir.is_dir() {
            return Err(eyre!("'{}' is not a directory", dir.display()));
        }
        let path = dir.join(&self.file_name);
        self.save_as(&path)
    }

    /// Writes the export to `path`, replacing any existing file.
    pub fn save_as(&self, path: &Path) -> Result<PathBuf> {
        trace!("Writing {} byte(s) to '{}'", self.body.len(), path.display());
        File::create(path)
            .and_then(|mut file| file.write_all(&self.body))
            .wrap_err_with(|| format!("Failed to write the export to '{}'", path.display()))?;
        Ok(path.to_owned())
    }
}

/// Requests `path` from the server at `base_url` and keeps the body as an [`Export`].
pub fn fetch_export(client: &Client, base_url: &str, path: &str) -> Result<Export> {
    let url = format!("{}{path}", base_url.trim_end_matches('/'));
    info!("Downloading export from '{url}'");

    let resp = client
        .get(&url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .wrap_err_with(|| format!("Cannot download the export from '{url}'"))?;

    let file_name = resp
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(attachment_file_name)
        .unwrap_or(csv::FILE_NAME)
        .to_owned();

    let body = resp
        .bytes()
        .wrap_err("Cannot read the export body")?
        .to_vec();

    Ok(Export { file_name, body })
}

/// The `filename` of a `Content-Disposition` header, if it is a plain file name.
fn attachment_file_name(disposition: &str) -> Option<&str> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("filename="))
        .map(|name| name.trim_matches('"'))
        // never let the server pick a directory
        .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
}

#[cfg(test)]
mod tests {

    use super::*;

    use assert_fs::{prelude::*, TempDir};

    fn export(body: &str) -> Export {
        Export {
            file_name: "books.csv".to_owned(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn file_name_read_from_disposition() {
        assert_eq!(
            Some("books.csv"),
            attachment_file_name("attachment; filename=books.csv")
        );
        assert_eq!(
            Some("my books.csv"),
            attachment_file_name("attachment; filename=\"my books.csv\"")
        );
    }

    #[test]
    fn missing_or_unsafe_file_names_are_ignored() {
        assert_eq!(None, attachment_file_name("attachment"));
        assert_eq!(None, attachment_file_name("attachment; filename=../../etc/passwd"));
        assert_eq!(None, attachment_file_name("attachment; filename=\"\""));
    }

    #[test]
    fn save_in_directory_uses_suggested_name() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");

        let path = export("isbn\r\n").save_in(dir.path()).unwrap();

        assert_eq!(dir.path().join("books.csv"), path);
        dir.child("books.csv").assert("isbn\r\n");
    }

    #[test]
    fn save_as_replaces_existing_file() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        let file = dir.child("out.csv");
        file.write_str("old content").unwrap();

        export("new").save_as(file.path()).unwrap();

        file.assert("new");
    }

    #[test]
    #[should_panic(expected = "is not a directory")]
    fn save_in_requires_directory() {
        export("").save_in(Path::new("not a directory")).unwrap();
    }
}
