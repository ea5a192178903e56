use super::sort::SortBy;

/// Page size used when the caller gives none or an invalid one.
pub const DEFAULT_LIMIT: u64 = 10;
/// Upper bound on the page size unless configured otherwise.
pub const DEFAULT_MAX_LIMIT: u64 = 100;

/// Listing parameters exactly as they arrive from the query string.
///
/// Every field is an optional string so that malformed values reach
/// [`ListQuery::from_raw`] and get normalized instead of rejected.
#[derive(Debug, Clone, Default)]
pub struct RawListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    /// Comma-separated tag set.
    pub tags: Option<String>,
    /// Single tag, sent as `subCategory` or `tag`.
    pub sub_category: Option<String>,
    pub destination: Option<String>,
    pub sort_by: Option<String>,
}

/// Validated listing request consumed by the query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u64,
    pub limit: u64,
    pub search: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub destination: Option<String>,
    pub sort_by: SortBy,
}

impl RawListQuery {
    /// Collect decoded query-string pairs. The first value of a scalar key
    /// wins; repeated `tags`, `subCategory` and `tag` values are all kept.
    /// Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        let mut tags: Vec<String> = Vec::new();

        for (key, value) in pairs {
            let value = value.into();
            let slot = match key.as_ref() {
                "page" => &mut raw.page,
                "limit" => &mut raw.limit,
                "search" => &mut raw.search,
                "category" => &mut raw.category,
                "destination" => &mut raw.destination,
                "sortBy" => &mut raw.sort_by,
                "tags" => {
                    tags.push(value);
                    continue;
                }
                "subCategory" | "tag" => {
                    if raw.sub_category.is_none() {
                        raw.sub_category = Some(value);
                    } else {
                        tags.push(value);
                    }
                    continue;
                }
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        if !tags.is_empty() {
            raw.tags = Some(tags.join(","));
        }
        raw
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            search: None,
            category: None,
            tags: Vec::new(),
            destination: None,
            sort_by: SortBy::Latest,
        }
    }
}

impl ListQuery {
    /// Normalize raw input. Never fails: bad numbers become defaults, blank
    /// strings become absent filters, and `limit` is clamped to `max_limit`.
    pub fn from_raw(raw: RawListQuery, max_limit: u64) -> Self {
        let max_limit = max_limit.max(1);

        let mut tags: Vec<String> = raw
            .tags
            .as_deref()
            .map(split_list)
            .unwrap_or_default();
        if let Some(sub) = non_blank(raw.sub_category) {
            if !tags.contains(&sub) {
                tags.push(sub);
            }
        }

        Self {
            page: positive(raw.page.as_deref()).unwrap_or(1),
            limit: positive(raw.limit.as_deref())
                .unwrap_or(DEFAULT_LIMIT)
                .min(max_limit),
            search: non_blank(raw.search),
            category: non_blank(raw.category),
            tags,
            destination: non_blank(raw.destination),
            sort_by: raw
                .sort_by
                .as_deref()
                .map(SortBy::parse)
                .unwrap_or_default(),
        }
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_blank(Some(search.into()));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(Some(category.into()));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .filter_map(|t| non_blank(Some(t.into())))
            .collect();
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = non_blank(Some(destination.into()));
        self
    }
}

fn positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as u64)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
