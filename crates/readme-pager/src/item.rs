//! Review items and page slicing

/// A single candidate the operator must approve or reject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    id: String,
    body: String,
}

impl ReviewItem {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }

    /// Opaque identifier shown in the page header (e.g. `owner/model`)
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// A bounded slice of a body's lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// Zero-based page index
    pub index: usize,
    /// Total number of pages for the body
    pub total: usize,
    pub lines: &'a [&'a str],
}

impl Page<'_> {
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Split lines into pages of `page_size` lines
///
/// An empty body still yields a single empty page. A page size of zero is
/// treated as one line per page.
pub fn paginate<'a>(lines: &'a [&'a str], page_size: usize) -> Vec<Page<'a>> {
    if lines.is_empty() {
        return vec![Page {
            index: 0,
            total: 1,
            lines,
        }];
    }

    let chunks: Vec<&'a [&'a str]> = lines.chunks(page_size.max(1)).collect();
    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(index, lines)| Page {
            index,
            total,
            lines,
        })
        .collect()
}
