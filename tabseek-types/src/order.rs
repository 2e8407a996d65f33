use std::cmp::Ordering;
use std::fmt;

use arrow::compute::SortOptions;
use tabseek_result::{Error, Result};

/// Sort direction of one column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    /// Orient a native comparison result according to this direction.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    }

    #[inline]
    pub fn is_descending(self) -> bool {
        matches!(self, Order::Descending)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Ascending => write!(f, "ASC"),
            Order::Descending => write!(f, "DESC"),
        }
    }
}

/// Placement of nulls relative to every non-null value of a column.
///
/// Null placement is independent of the column's [`Order`]: `First` puts nulls
/// before all values for both ascending and descending columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NullOrder {
    #[default]
    First,
    Last,
}

impl NullOrder {
    /// Ordering of a null against a non-null value in the same column.
    #[inline]
    pub fn null_vs_value(self) -> Ordering {
        match self {
            NullOrder::First => Ordering::Less,
            NullOrder::Last => Ordering::Greater,
        }
    }

    #[inline]
    pub fn is_first(self) -> bool {
        matches!(self, NullOrder::First)
    }
}

impl fmt::Display for NullOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullOrder::First => write!(f, "NULLS FIRST"),
            NullOrder::Last => write!(f, "NULLS LAST"),
        }
    }
}

/// Ordering rule of a single column: direction plus null placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub order: Order,
    pub null_order: NullOrder,
}

impl SortKey {
    pub fn new(order: Order, null_order: NullOrder) -> Self {
        Self { order, null_order }
    }

    /// Ascending with nulls first.
    pub fn ascending() -> Self {
        Self::new(Order::Ascending, NullOrder::First)
    }

    /// Descending with nulls first.
    pub fn descending() -> Self {
        Self::new(Order::Descending, NullOrder::First)
    }

    pub fn nulls_first(mut self) -> Self {
        self.null_order = NullOrder::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.null_order = NullOrder::Last;
        self
    }

    /// Equivalent Arrow sort options, so tables sorted by Arrow kernels match the
    /// ordering the search engine assumes.
    pub fn to_sort_options(self) -> SortOptions {
        SortOptions {
            descending: self.order.is_descending(),
            nulls_first: self.null_order.is_first(),
        }
    }
}

impl From<SortOptions> for SortKey {
    fn from(options: SortOptions) -> Self {
        Self {
            order: if options.descending {
                Order::Descending
            } else {
                Order::Ascending
            },
            null_order: if options.nulls_first {
                NullOrder::First
            } else {
                NullOrder::Last
            },
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.order, self.null_order)
    }
}

/// Zip per-column order and null-precedence vectors into sort keys.
///
/// Both vectors must hold exactly one entry per column.
pub fn sort_keys(
    column_order: &[Order],
    null_precedence: &[NullOrder],
    num_columns: usize,
) -> Result<Vec<SortKey>> {
    if column_order.len() != num_columns {
        return Err(Error::arity_mismatch(
            "column_order",
            num_columns,
            column_order.len(),
        ));
    }
    if null_precedence.len() != num_columns {
        return Err(Error::arity_mismatch(
            "null_precedence",
            num_columns,
            null_precedence.len(),
        ));
    }
    Ok(column_order
        .iter()
        .zip(null_precedence)
        .map(|(&order, &null_order)| SortKey::new(order, null_order))
        .collect())
}
