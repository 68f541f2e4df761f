//! Admin listing grid component.
//!
//! Entity list screens share one rendering contract: a [`GridView`] of
//! column headers, row objects, and an optional paging block. Handlers
//! assemble it through [`GridBuilder`], which owns the paging policy so the
//! per-page clamping and page slicing behave the same on every screen.
//!
//! Grids backed by a source that cannot page (pre-aggregated rows, in-memory
//! joins) are declared with [`GridBuilder::without_paging`]; asking such a
//! grid for a page fails with [`GridError::PaginationNotSupported`] instead
//! of silently returning the full result set.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rows per page when the request does not specify `per_page`.
pub const DEFAULT_PER_PAGE: i64 = 30;

/// Upper bound on `per_page`; larger requests are clamped down.
pub const MAX_PER_PAGE: i64 = 100;

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Paging parameters for grid endpoints (`?page=&per_page=`).
///
/// Both are optional; absent values fall back to page 1 and
/// [`DEFAULT_PER_PAGE`]. Values are normalized in [`GridBuilder::assemble`].
#[derive(Debug, Default, Deserialize)]
pub struct GridParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl GridParams {
    /// Whether the request explicitly asked for paging.
    pub fn requests_paging(&self) -> bool {
        self.page.is_some() || self.per_page.is_some()
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// One column header in a grid view.
#[derive(Debug, Clone, Serialize)]
pub struct GridColumn {
    /// Stable identifier the frontend keys cell renderers on.
    pub id: &'static str,
    /// Human-readable column title.
    pub title: &'static str,
    pub sortable: bool,
}

/// Paging block attached to a paged grid view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paging {
    pub page: i64,
    pub per_page: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

/// Ordering echoed back in a grid view so the frontend can render sort
/// indicators without re-deriving the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderView {
    pub order_by: String,
    pub direction: String,
}

/// A fully assembled grid: columns, the visible rows, paging and ordering
/// state.
///
/// `paging` is `None` for grids declared without paging support; `order` is
/// `None` for grids with a fixed ordering.
#[derive(Debug, Serialize)]
pub struct GridView<T> {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<T>,
    pub paging: Option<Paging>,
    pub order: Option<OrderView>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling a grid view.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Paging was requested from a grid whose data source cannot page.
    ///
    /// Carries the human-readable reason and, when the refusal surfaced from
    /// a lower layer, the underlying error as `source`.
    #[error("{message}")]
    PaginationNotSupported {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GridError {
    /// A pagination refusal with no underlying cause.
    pub fn pagination_not_supported(message: impl Into<String>) -> Self {
        Self::PaginationNotSupported {
            message: message.into(),
            source: None,
        }
    }

    /// A pagination refusal wrapping the lower-level error that produced it.
    pub fn pagination_not_supported_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::PaginationNotSupported {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Declarative description of a grid: its columns, ordering, and paging
/// policy.
#[derive(Debug)]
pub struct GridBuilder {
    columns: Vec<GridColumn>,
    paging_enabled: bool,
    default_per_page: i64,
    order: Option<OrderView>,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            paging_enabled: true,
            default_per_page: DEFAULT_PER_PAGE,
            order: None,
        }
    }

    /// Append a column header.
    pub fn column(mut self, id: &'static str, title: &'static str, sortable: bool) -> Self {
        self.columns.push(GridColumn {
            id,
            title,
            sortable,
        });
        self
    }

    /// Declare that this grid's data source cannot serve pages.
    pub fn without_paging(mut self) -> Self {
        self.paging_enabled = false;
        self
    }

    /// Override the per-page default (still capped at [`MAX_PER_PAGE`]).
    pub fn default_per_page(mut self, per_page: i64) -> Self {
        self.default_per_page = per_page;
        self
    }

    /// Record the ordering the rows were fetched with, for echoing back.
    pub fn ordered(mut self, order_by: impl Into<String>, direction: impl Into<String>) -> Self {
        self.order = Some(OrderView {
            order_by: order_by.into(),
            direction: direction.into(),
        });
        self
    }

    /// Assemble a view from the complete row set and the request parameters.
    ///
    /// With paging enabled the rows are sliced to the requested page; a page
    /// past the end yields an empty page with the paging block intact. With
    /// paging disabled all rows are returned, and any explicit `page` /
    /// `per_page` in the request is refused with
    /// [`GridError::PaginationNotSupported`].
    pub fn assemble<T>(&self, rows: Vec<T>, params: &GridParams) -> Result<GridView<T>, GridError> {
        if !self.paging_enabled {
            if params.requests_paging() {
                return Err(GridError::pagination_not_supported(
                    "This grid does not support pagination.",
                ));
            }
            return Ok(GridView {
                columns: self.columns.clone(),
                rows,
                paging: None,
                order: self.order.clone(),
            });
        }

        let page = params.page.unwrap_or(1).max(1);
        let per_page = params
            .per_page
            .unwrap_or(self.default_per_page)
            .clamp(1, MAX_PER_PAGE);

        let total_count = rows.len() as i64;
        let total_pages = (total_count + per_page - 1) / per_page;

        let start = ((page - 1) * per_page) as usize;
        let rows: Vec<T> = rows
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Ok(GridView {
            columns: self.columns.clone(),
            rows,
            paging: Some(Paging {
                page,
                per_page,
                total_count,
                total_pages,
            }),
            order: self.order.clone(),
        })
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
