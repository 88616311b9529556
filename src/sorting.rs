//! Client library ordering.
//!
//! Sorting is stable: libraries that compare equal keep their scan order in
//! both directions.

use std::cmp::Ordering;

use crate::clientlib::ClientLibrary;
use crate::config::{SortKey, SortOptions, SortOrder};

/// Sort client libraries in place according to the given sorting options.
///
/// - `Size` compares compressed sizes numerically
/// - `Name` compares names with [`collate`]
///
/// `Descending` flips the comparator rather than reversing the result, so
/// ties are never reordered. When `sort_opts.key` is `None` the slice is
/// left untouched.
///
/// # Examples
///
/// ```no_run
/// # use clientlib_report::{sorting::sort_libraries, config::{SortOptions, SortKey, SortOrder}};
/// # use clientlib_report::clientlib::ClientLibrary;
/// # fn example(mut libraries: Vec<ClientLibrary>) {
/// let sort_opts = SortOptions {
///     key: Some(SortKey::Size),
///     order: SortOrder::Descending,
/// };
/// sort_libraries(&mut libraries, &sort_opts);
/// # }
/// ```
pub fn sort_libraries(libraries: &mut [ClientLibrary], sort_opts: &SortOptions) {
    let Some(key) = sort_opts.key else {
        return;
    };

    libraries.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Size => a.compressed_size.cmp(&b.compressed_size),
            SortKey::Name => collate(&a.name, &b.name),
        };

        match sort_opts.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Compare two names the way a locale-aware collation would for plain
/// identifiers.
///
/// Letters compare case-insensitively first. Names that differ only in case
/// put the lowercase variant first (`a` < `A` < `b`). Remaining ties fall
/// back to code point order.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    primary
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.cmp(b))
}
