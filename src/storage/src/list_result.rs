// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pages of results from list calls.

/// One page of results from a list call.
///
/// The page does not fetch more results. To get the next page, repeat the
/// call with the [next_page_token][ListResult::next_page_token] as the start
/// page token option.
///
/// # Example
/// ```
/// # use gcloud_storage::blob::Blob;
/// # use gcloud_storage::list_result::ListResult;
/// # use gcloud_storage::options::BlobListOption;
/// let page = ListResult::new(Some("c".to_string()), vec![Blob::of("b", "n")?]);
/// assert!(page.has_next_page());
/// let next = page.next_page_token().map(BlobListOption::start_page_token);
/// assert_eq!(next, Some(BlobListOption::start_page_token("c")));
/// for blob in &page {
///     assert_eq!(blob.name(), "n");
/// }
/// # gcloud_storage::Result::<()>::Ok(())
/// ```
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    next_page_token: Option<String>,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

impl<T> ListResult<T> {
    /// Creates a page. An empty cursor is the same as no cursor.
    pub fn new(next_page_token: Option<String>, results: Vec<T>) -> Self {
        Self {
            next_page_token: next_page_token.filter(|t| !t.is_empty()),
            results,
        }
    }

    /// The cursor for the next page, `None` on the last page.
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page_token.is_some()
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for ListResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::Blob;
    use pretty_assertions::assert_eq;

    #[test]
    fn pages() -> anyhow::Result<()> {
        let page = ListResult::new(
            Some("c".to_string()),
            vec![Blob::of("b", "n1")?, Blob::of("b", "n2")?],
        );
        assert_eq!(page.next_page_token(), Some("c"));
        assert!(page.has_next_page());
        assert_eq!(page.len(), 2);
        let names = page.iter().map(|b| b.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["n1", "n2"]);
        let owned = page.into_iter().collect::<Vec<_>>();
        assert_eq!(owned[1], Blob::of("b", "n2")?);
        Ok(())
    }

    #[test]
    fn continue_listing() {
        let page = ListResult::new(Some("cursor".to_string()), vec![1]);
        let option = page
            .next_page_token()
            .map(crate::options::BlobListOption::start_page_token);
        assert_eq!(
            option,
            Some(crate::options::BlobListOption::start_page_token("cursor"))
        );
    }

    #[test]
    fn last_page() {
        let page = ListResult::<Blob>::new(None, Vec::new());
        assert!(!page.has_next_page());
        assert!(page.is_empty());

        let page = ListResult::new(Some(String::new()), vec![1, 2, 3]);
        assert_eq!(page.next_page_token(), None);
        assert_eq!(page.results(), &[1, 2, 3]);
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let page = ListResult::new(Some("c".to_string()), vec![Blob::of("b", "n")?]);
        let json = serde_json::to_value(&page)?;
        assert_eq!(
            json,
            serde_json::json!({"nextPageToken": "c", "results": [{"bucket": "b", "name": "n"}]})
        );
        let copy = serde_json::from_value::<ListResult<Blob>>(json)?;
        assert_eq!(copy, page);

        let last = serde_json::from_value::<ListResult<Blob>>(serde_json::json!({}))?;
        assert_eq!(last, ListResult::new(None, Vec::new()));
        Ok(())
    }
}
