//! Interpretation of listing query parameters.
//!
//! Clients send `keyword`, `page`, `range` and `sort` as loose strings. This
//! crate turns them into a [`ListQuery`] that a store can execute directly.
//! None of the parameters can make a request fail: anything unreadable falls
//! back to a default.

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Query string of a listing request, as sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub keyword: Option<String>,
    pub page: Option<String>,
    pub range: Option<String>,
    pub sort: Option<String>,
}

/// A listing request reduced to what a store needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub keyword: Option<String>,
    pub sort: Option<Sort>,
    pub offset: u64,
    pub limit: u64,
}

impl ListQuery {
    /// `page` wins over `range` whenever it parses; with neither, the first
    /// page is returned. A `page_size` of 0 is treated as 1.
    pub fn from_params(params: &ListParams, page_size: u64) -> Self {
        let page_size = page_size.max(1);
        let keyword = params
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned);
        let sort = params.sort.as_deref().and_then(Sort::parse);

        let page = params.page.as_deref().and_then(parse_page);
        let range = params.range.as_deref().and_then(Range::parse);
        let (offset, limit) = match (page, range) {
            (Some(page), _) => (page.saturating_mul(page_size), page_size),
            (None, Some(range)) => range.window(page_size),
            (None, None) => (0, page_size),
        };

        Self {
            keyword,
            sort,
            offset,
            limit,
        }
    }
}

fn parse_page(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Inclusive window over the ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: u64,
    pub end: Option<u64>,
}

impl Range {
    /// Reads the first two runs of digits, so `[0,9]`, `0-9` and the
    /// truncated `[20,29` are all understood.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut bounds = raw
            .split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .map(str::parse::<u64>);
        let start = bounds.next()?.ok()?;
        let end = bounds.next().and_then(Result::ok);
        Some(Self { start, end })
    }

    /// `(offset, limit)`, never wider than one page.
    pub fn window(&self, page_size: u64) -> (u64, u64) {
        let limit = match self.end {
            Some(end) if end >= self.start => (end - self.start).saturating_add(1).min(page_size),
            _ => page_size,
        };
        (self.start, limit)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "desc" | "descending" | "-1" => Direction::Desc,
            _ => Direction::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

impl Sort {
    /// Accepts `["field": "desc"]`, `["field","desc"]` and `{"field":"desc"}`.
    /// A missing or unknown direction means ascending.
    pub fn parse(raw: &str) -> Option<Self> {
        let inner = raw
            .trim()
            .trim_start_matches(['[', '{'])
            .trim_end_matches([']', '}']);
        let mut parts = inner.splitn(2, [':', ',']);
        let field = unquote(parts.next()?);
        if field.is_empty() {
            return None;
        }
        let direction = parts
            .next()
            .map(unquote)
            .map(Direction::parse)
            .unwrap_or_default();

        Some(Self {
            field: field.to_owned(),
            direction,
        })
    }
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches(['"', '\'']).trim()
}
