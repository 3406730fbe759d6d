use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::FetchError;
use super::client::AsanaClient;

/// One page of a list response: `{ "data": [...], "next_page": {...} | null }`
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_page: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub struct NextPage {
    pub offset: String,
}

/// Items of a paginated listing. The next page is requested only once the
/// current one has been consumed; iteration stops after the first error.
pub struct Pages<'a, T> {
    client: &'a AsanaClient,
    path: String,
    query: Vec<(String, String)>,
    limit: usize,
    offset: Option<String>,
    buffer: std::vec::IntoIter<T>,
    finished: bool,
}

impl<'a, T> Pages<'a, T> {
    pub(crate) fn new(
        client: &'a AsanaClient,
        path: String,
        query: Vec<(String, String)>,
        limit: usize,
    ) -> Self {
        Pages {
            client,
            path,
            query,
            limit,
            offset: None,
            buffer: Vec::new().into_iter(),
            finished: false,
        }
    }
}

impl<T: DeserializeOwned> Iterator for Pages<'_, T> {
    type Item = Result<T, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            let page = self.client.fetch_page::<T>(
                &self.path,
                &self.query,
                self.limit,
                self.offset.as_deref(),
            );
            match page {
                Ok(page) => {
                    self.offset = page.next_page.map(|next| next.offset);
                    self.finished = self.offset.is_none();
                    self.buffer = page.data.into_iter();
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
