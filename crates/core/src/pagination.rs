//! Page/limit normalization for paginated listings.
//!
//! Listing endpoints take a 1-based `pagina` and a `limite` (page size).
//! Normalization happens in two stages because the upper page bound
//! depends on the filtered row count, which is only known after the
//! limit has been fixed:
//!
//! 1. basic clamp of `pagina`/`limite` before the count query;
//! 2. total-aware clamp of `pagina` once the count is known.
//!
//! The `total == 0` case never reaches stage 2 -- callers short-circuit
//! to an all-zero response so an empty result set is distinguishable
//! from a valid empty page.

/// Default number of records per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum number of records per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided page number to valid bounds (1-based).
pub fn clamp_pagina(pagina: Option<i64>) -> i64 {
    pagina.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to valid bounds.
pub fn clamp_limite(limite: Option<i64>) -> i64 {
    limite
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .max(1)
        .min(MAX_PAGE_LIMIT)
}

/// Clamp a page number against the actual result count.
///
/// The last valid page is `ceil(total / limite)`; a request beyond it is
/// pulled back to that page. Callers must handle `total == 0` before
/// calling this (see module docs).
pub fn clamp_pagina_to_total(pagina: i64, limite: i64, total: i64) -> i64 {
    debug_assert!(total > 0, "zero totals must short-circuit before this");
    let max_pagina = (total + limite - 1) / limite;
    pagina.min(max_pagina)
}

/// Compute the row offset for a normalized `(pagina, limite)` pair.
pub fn offset(pagina: i64, limite: i64) -> i64 {
    (pagina - 1) * limite
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
