//! Listing query parameters: parsing, defaults and pagination math.
//!
//! Raw query-string values are turned into a [`ListingQuerySpec`] by
//! [`validate_listing_params`]. The first malformed parameter aborts the
//! whole request; nothing is accumulated.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page returned when `page` is absent.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `page_size` is absent.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

const EXPECTED_POSITIVE_INTEGER: &str = "a positive integer";
const EXPECTED_NUMBER: &str = "a number";

// ---------------------------------------------------------------------------
// Sort mode
// ---------------------------------------------------------------------------

/// Ordering applied to the filtered set before it is paginated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    /// Resolve a raw `sort` value. Unknown or missing values fall back to
    /// [`SortMode::Newest`] instead of failing.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("price_asc") => SortMode::PriceAsc,
            Some("price_desc") => SortMode::PriceDesc,
            _ => SortMode::Newest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
        }
    }
}

// ---------------------------------------------------------------------------
// Raw and validated parameters
// ---------------------------------------------------------------------------

/// Query parameters exactly as received (`?search=&min_price=&...`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListingParams {
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Validated filter, sort and page selection for one listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuerySpec {
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    pub sort: SortMode,
    pub page: i64,
    pub page_size: i64,
}

impl Default for ListingQuerySpec {
    fn default() -> Self {
        Self {
            search: None,
            min_price: None,
            max_price: None,
            sort: SortMode::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListingQuerySpec {
    /// Number of filtered rows to skip. Saturates instead of overflowing so
    /// absurd page numbers simply land past the last page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// `ILIKE` pattern for the search term, matching it as a literal substring.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(substring_pattern)
    }
}

/// Validate raw listing parameters, stopping at the first bad value.
///
/// Checked in order: `page`, `page_size`, `min_price`, `max_price`, `search`.
/// `search` is kept verbatim when non-empty and `sort` never fails.
pub fn validate_listing_params(raw: &RawListingParams) -> Result<ListingQuerySpec, CoreError> {
    let page = parse_positive_int(raw.page.as_deref(), "page", DEFAULT_PAGE)?;
    let page_size = parse_positive_int(raw.page_size.as_deref(), "page_size", DEFAULT_PAGE_SIZE)?;
    let min_price = parse_price(raw.min_price.as_deref(), "min_price")?;
    let max_price = parse_price(raw.max_price.as_deref(), "max_price")?;

    // Postgres text cannot hold NUL, so such a term could never match.
    if raw.search.as_deref().is_some_and(|s| s.contains('\0')) {
        return Err(CoreError::InvalidParameter {
            field: "search",
            expected: "text without NUL characters",
        });
    }
    let search = raw.search.clone().filter(|s| !s.is_empty());
    let sort = SortMode::from_param(raw.sort.as_deref());

    Ok(ListingQuerySpec {
        search,
        min_price,
        max_price,
        sort,
        page,
        page_size,
    })
}

/// A present value must be a whole number >= 1, even when empty.
fn parse_positive_int(
    raw: Option<&str>,
    field: &'static str,
    default: i64,
) -> Result<i64, CoreError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(CoreError::InvalidParameter {
            field,
            expected: EXPECTED_POSITIVE_INTEGER,
        }),
    }
}

/// Empty price bounds count as absent.
fn parse_price(raw: Option<&str>, field: &'static str) -> Result<Option<f64>, CoreError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(CoreError::InvalidParameter {
            field,
            expected: EXPECTED_NUMBER,
        }),
    }
}

/// Wrap a term in `%...%`, escaping the LIKE metacharacters `\`, `%` and `_`.
pub fn substring_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Page metadata
// ---------------------------------------------------------------------------

/// Pagination metadata returned alongside a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    /// Rows matching the filter, ignoring pagination.
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        let total_pages = if page_size > 0 {
            total / page_size + i64::from(total % page_size != 0)
        } else {
            0
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }

    pub fn for_spec(spec: &ListingQuerySpec, total: i64) -> Self {
        Self::new(spec.page, spec.page_size, total)
    }

    /// Whether the requested page lies past the last one.
    pub fn is_past_end(&self) -> bool {
        self.page > self.total_pages
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RawListingParams {
        let mut raw = RawListingParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "search" => raw.search = value,
                "min_price" => raw.min_price = value,
                "max_price" => raw.max_price = value,
                "sort" => raw.sort = value,
                "page" => raw.page = value,
                "page_size" => raw.page_size = value,
                other => panic!("unknown parameter {other}"),
            }
        }
        raw
    }

    fn rejected_field(pairs: &[(&str, &str)]) -> &'static str {
        let err = validate_listing_params(&params(pairs)).unwrap_err();
        err.parameter().expect("expected a parameter error")
    }

    // -- defaults -------------------------------------------------------------

    #[test]
    fn empty_params_use_defaults() {
        let spec = validate_listing_params(&RawListingParams::default()).unwrap();
        assert_eq!(spec, ListingQuerySpec::default());
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 10);
        assert_eq!(spec.sort, SortMode::Newest);
    }

    #[test]
    fn full_params_are_parsed() {
        let spec = validate_listing_params(&params(&[
            ("search", "Palm"),
            ("min_price", "1000000"),
            ("max_price", "2000000.50"),
            ("sort", "price_desc"),
            ("page", "3"),
            ("page_size", "25"),
        ]))
        .unwrap();

        assert_eq!(spec.search.as_deref(), Some("Palm"));
        assert_eq!(spec.min_price, Some(1_000_000.0));
        assert_eq!(spec.max_price, Some(2_000_000.5));
        assert_eq!(spec.sort, SortMode::PriceDesc);
        assert_eq!(spec.page, 3);
        assert_eq!(spec.page_size, 25);
    }

    // -- page / page_size -----------------------------------------------------

    #[test]
    fn page_zero_is_rejected() {
        assert_eq!(rejected_field(&[("page", "0")]), "page");
    }

    #[test]
    fn negative_page_is_rejected() {
        assert_eq!(rejected_field(&[("page", "-2")]), "page");
    }

    #[test]
    fn empty_page_is_rejected() {
        assert_eq!(rejected_field(&[("page", "")]), "page");
    }

    #[test]
    fn page_with_trailing_garbage_is_rejected() {
        assert_eq!(rejected_field(&[("page", "2abc")]), "page");
        assert_eq!(rejected_field(&[("page", "1.5")]), "page");
    }

    #[test]
    fn page_size_zero_is_rejected() {
        assert_eq!(rejected_field(&[("page_size", "0")]), "page_size");
    }

    #[test]
    fn page_error_wins_over_later_errors() {
        let field = rejected_field(&[("page", "x"), ("page_size", "0"), ("min_price", "abc")]);
        assert_eq!(field, "page");
    }

    #[test]
    fn page_size_error_wins_over_price_errors() {
        let field = rejected_field(&[("page_size", "none"), ("min_price", "abc")]);
        assert_eq!(field, "page_size");
    }

    #[test]
    fn parameter_error_message_names_the_field() {
        let err = validate_listing_params(&params(&[("page", "0")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid page parameter. Must be a positive integer."
        );
    }

    // -- prices ---------------------------------------------------------------

    #[test]
    fn empty_prices_are_absent() {
        let spec =
            validate_listing_params(&params(&[("min_price", ""), ("max_price", " ")])).unwrap();
        assert_eq!(spec.min_price, None);
        assert_eq!(spec.max_price, None);
    }

    #[test]
    fn non_numeric_min_price_is_rejected() {
        assert_eq!(rejected_field(&[("min_price", "cheap")]), "min_price");
    }

    #[test]
    fn non_finite_max_price_is_rejected() {
        assert_eq!(rejected_field(&[("max_price", "inf")]), "max_price");
        assert_eq!(rejected_field(&[("max_price", "NaN")]), "max_price");
    }

    #[test]
    fn min_price_error_wins_over_max_price_error() {
        let err = validate_listing_params(&params(&[("min_price", "a"), ("max_price", "b")]))
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidParameter {
                field: "min_price",
                expected: "a number"
            }
        );
    }

    // -- search / sort --------------------------------------------------------

    #[test]
    fn empty_search_is_absent() {
        let spec = validate_listing_params(&params(&[("search", "")])).unwrap();
        assert_eq!(spec.search, None);
    }

    #[test]
    fn search_is_kept_verbatim() {
        let spec = validate_listing_params(&params(&[("search", " Palm Hills ")])).unwrap();
        assert_eq!(spec.search.as_deref(), Some(" Palm Hills "));
    }

    #[test]
    fn search_with_nul_is_rejected() {
        assert_matches!(
            validate_listing_params(&params(&[("search", "palm\0")])),
            Err(CoreError::InvalidParameter {
                field: "search",
                ..
            })
        );
    }

    #[test]
    fn bad_price_is_reported_before_bad_search() {
        assert_eq!(
            rejected_field(&[("search", "\0"), ("max_price", "x")]),
            "max_price"
        );
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        let spec = validate_listing_params(&params(&[("sort", "cheapest")])).unwrap();
        assert_eq!(spec.sort, SortMode::Newest);
    }

    #[test]
    fn sort_modes_round_trip_through_their_names() {
        for mode in [SortMode::Newest, SortMode::PriceAsc, SortMode::PriceDesc] {
            assert_eq!(SortMode::from_param(Some(mode.as_str())), mode);
        }
    }

    // -- offsets and patterns -------------------------------------------------

    #[test]
    fn offset_is_page_minus_one_times_size() {
        let spec = ListingQuerySpec {
            page: 3,
            page_size: 20,
            ..ListingQuerySpec::default()
        };
        assert_eq!(spec.offset(), 40);
        assert_eq!(spec.limit(), 20);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let spec = ListingQuerySpec {
            page: i64::MAX,
            page_size: i64::MAX,
            ..ListingQuerySpec::default()
        };
        assert_eq!(spec.offset(), i64::MAX);
    }

    #[test]
    fn pattern_wraps_term() {
        assert_eq!(substring_pattern("palm"), "%palm%");
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(substring_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    // -- PageMeta -------------------------------------------------------------

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageMeta::new(1, 2, 3).total_pages, 2);
        assert_eq!(PageMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PageMeta::new(1, 10, 11).total_pages, 2);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let meta = PageMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(meta.is_past_end());
    }

    #[test]
    fn total_pages_matches_ceiling_for_many_sizes() {
        for total in 0..60_i64 {
            for page_size in 1..12_i64 {
                let expected = (total as f64 / page_size as f64).ceil() as i64;
                assert_eq!(PageMeta::new(1, page_size, total).total_pages, expected);
            }
        }
    }

    #[test]
    fn total_pages_does_not_overflow() {
        assert_eq!(PageMeta::new(1, i64::MAX, i64::MAX).total_pages, 1);
    }
}
