//! Contact list queries: typed filters, sort selection and pagination.
//!
//! A [`ContactQuery`] is compiled into a [`QueryPlan`], a conjunction of
//! [`FilterClause`]s plus a sort spec. Stores feed every candidate row through
//! [`QueryPlan::matches`] inside one read view, then hand the survivors to
//! [`QueryPlan::into_page`], which orders them and cuts the requested page.

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use crate::error::AppError;
use crate::models::contact::{Contact, ListContactsQuery, Pagination};
use std::cmp::Ordering;

/// Fields a list request may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Email,
    Phone,
    IsFavorite,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Wire names accepted by `sortBy`, in documentation order.
    pub const ALLOWED: [&'static str; 6] = [
        "name",
        "email",
        "phone",
        "isFavorite",
        "createdAt",
        "updatedAt",
    ];

    /// Resolve a `sortBy` value against the allow-list.
    ///
    /// Matching ignores ASCII case and accepts snake_case spellings.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "isfavorite" => Some(Self::IsFavorite),
            "createdat" => Some(Self::CreatedAt),
            "updatedat" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    /// Canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::IsFavorite => "isFavorite",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    fn compare(self, a: &Contact, b: &Contact) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            // None sorts first, like NULL in an ascending SQL ORDER BY.
            Self::Email => a.email.cmp(&b.email),
            Self::Phone => a.phone.cmp(&b.phone),
            Self::IsFavorite => a.is_favorite.cmp(&b.is_favorite),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse `asc` / `desc`, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Field and direction for ordering a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

/// Optional filters; every present filter must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Case-insensitive substring over name, email and phone.
    pub search: Option<String>,
    /// Substring over the encoded tag list (see [`FilterClause::Tag`]).
    pub tag: Option<String>,
    pub is_favorite: Option<bool>,
}

/// A fully resolved list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
    pub filter: ContactFilter,
    pub sort: SortSpec,
    /// 1-based page number, never 0.
    pub page: u32,
    /// Page size, never 0.
    pub limit: u32,
}

impl Default for ContactQuery {
    fn default() -> Self {
        Self {
            filter: ContactFilter::default(),
            sort: SortSpec::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// One predicate in the conjunctive filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    /// ASCII-lowercased needle matched against name, email or phone.
    Search(String),
    /// ASCII-lowercased needle matched against the JSON-encoded tag list.
    ///
    /// This is substring matching over the encoded text, not set membership:
    /// `ab` matches a stored `abc`, and `","` matches any contact with two or
    /// more tags.
    Tag(String),
    Favorite(bool),
}

impl FilterClause {
    /// Evaluate this clause against a contact and its encoded tag text.
    pub fn matches(&self, contact: &Contact, encoded_tags: &str) -> bool {
        match self {
            Self::Search(needle) => {
                contains_case_insensitive(&contact.name, needle)
                    || contact
                        .email
                        .as_deref()
                        .is_some_and(|email| contains_case_insensitive(email, needle))
                    || contains_case_insensitive(&contact.phone, needle)
            }
            Self::Tag(needle) => contains_case_insensitive(encoded_tags, needle),
            Self::Favorite(expected) => contact.is_favorite == *expected,
        }
    }
}

/// Page of contacts plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl ContactPage {
    /// Pagination metadata for this page.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit, self.total)
    }
}

/// Compiled form of a [`ContactQuery`].
#[derive(Debug, Clone)]
pub struct QueryPlan {
    clauses: Vec<FilterClause>,
    sort: SortSpec,
    page: u32,
    limit: u32,
}

impl ContactQuery {
    /// Resolve raw query-string parameters.
    ///
    /// Blank values count as absent. `page` and `limit` below 1 are clamped to
    /// 1. `limit` is capped only when `max_limit` is set.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] for a `sortBy` outside the allow-list,
    /// an unknown `sortOrder`, a non-boolean `isFavorite`, or non-integer
    /// `page`/`limit`.
    pub fn from_params(
        params: &ListContactsQuery,
        max_limit: Option<u32>,
    ) -> Result<Self, AppError> {
        let field = match non_blank(params.sort_by.as_deref()) {
            Some(raw) => SortField::parse(raw).ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid sortBy '{}'; expected one of: {}",
                    raw,
                    SortField::ALLOWED.join(", ")
                ))
            })?,
            None => SortField::default(),
        };
        let order = match non_blank(params.sort_order.as_deref()) {
            Some(raw) => SortOrder::parse(raw).ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid sortOrder '{}'; expected 'asc' or 'desc'",
                    raw
                ))
            })?,
            None => SortOrder::default(),
        };
        let is_favorite = non_blank(params.is_favorite.as_deref())
            .map(|raw| {
                parse_bool_param(raw).ok_or_else(|| {
                    AppError::Validation(format!(
                        "Invalid isFavorite '{}'; expected 'true' or 'false'",
                        raw
                    ))
                })
            })
            .transpose()?;
        let page = parse_positive_param("page", params.page.as_deref(), DEFAULT_PAGE)?;
        let mut limit = parse_positive_param("limit", params.limit.as_deref(), DEFAULT_PAGE_LIMIT)?;
        if let Some(max_limit) = max_limit {
            limit = limit.min(max_limit.max(1));
        }

        Ok(Self {
            filter: ContactFilter {
                search: non_blank(params.search.as_deref()).map(str::to_string),
                tag: non_blank(params.tag.as_deref()).map(str::to_string),
                is_favorite,
            },
            sort: SortSpec { field, order },
            page,
            limit,
        })
    }

    /// Zero-based index of the first row on the requested page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.limit.max(1) as usize)
    }

    /// Compile this query into filter clauses.
    pub fn plan(&self) -> QueryPlan {
        let mut clauses = Vec::new();
        if let Some(search) = non_blank(self.filter.search.as_deref()) {
            clauses.push(FilterClause::Search(search.to_ascii_lowercase()));
        }
        if let Some(tag) = non_blank(self.filter.tag.as_deref()) {
            clauses.push(FilterClause::Tag(tag.to_ascii_lowercase()));
        }
        if let Some(is_favorite) = self.filter.is_favorite {
            clauses.push(FilterClause::Favorite(is_favorite));
        }
        QueryPlan {
            clauses,
            sort: self.sort,
            page: self.page.max(1),
            limit: self.limit.max(1),
        }
    }
}

impl QueryPlan {
    /// Filter clauses in evaluation order.
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// `true` when every clause accepts the row.
    pub fn matches(&self, contact: &Contact, encoded_tags: &str) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.matches(contact, encoded_tags))
    }

    /// Order the matched rows and cut out the requested page.
    ///
    /// `total` is the number of matched rows; a page past the end is empty.
    pub fn into_page(self, mut matched: Vec<Contact>) -> ContactPage {
        let total = matched.len() as u64;
        let sort = self.sort;
        matched.sort_by(|a, b| {
            let ordering = sort.field.compare(a, b).then_with(|| a.id.cmp(&b.id));
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let offset = (self.page as usize - 1).saturating_mul(self.limit as usize);
        let contacts = matched
            .into_iter()
            .skip(offset)
            .take(self.limit as usize)
            .collect();

        ContactPage {
            contacts,
            total,
            page: self.page,
            limit: self.limit,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_bool_param(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_positive_param(name: &str, value: Option<&str>, default: u32) -> Result<u32, AppError> {
    let Some(raw) = non_blank(value) else {
        return Ok(default);
    };
    let parsed: i64 = raw.parse().map_err(|_| {
        AppError::Validation(format!("Invalid {} '{}'; expected an integer", name, raw))
    })?;
    Ok(parsed.clamp(1, i64::from(u32::MAX)) as u32)
}

/// Substring test that folds ASCII letters only, like SQL `LIKE`.
///
/// Non-ASCII characters must match exactly. `needle_lower` is already
/// ASCII-lowercased.
fn contains_case_insensitive(haystack: &str, needle_lower: &str) -> bool {
    let needle = needle_lower.as_bytes();
    let hay = haystack.as_bytes();
    if needle.is_empty() {
        return true;
    }
    if needle.len() > hay.len() {
        return false;
    }
    hay.windows(needle.len())
        .any(|window| window.iter().map(u8::to_ascii_lowercase).eq(needle.iter().copied()))
}
