//! Per-column comparators resolved once from the column's Arrow `DataType`.
//!
//! A comparator built here is a boxed closure that already knows the concrete
//! array types, the column direction, and where nulls go, so comparing two
//! elements never inspects a `DataType` again.

use std::cmp::Ordering;

use arrow::array::{
    Array, BooleanArray, FixedSizeBinaryArray, GenericByteArray, GenericByteViewArray,
    PrimitiveArray,
};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{
    ArrowNativeTypeOp, ArrowPrimitiveType, BinaryType, BinaryViewType, ByteArrayType,
    ByteViewType, DataType, Date32Type, Date64Type, Decimal128Type, Decimal256Type,
    DurationMicrosecondType, DurationMillisecondType, DurationNanosecondType, DurationSecondType,
    Float16Type, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type,
    LargeBinaryType, LargeUtf8Type, StringViewType, Time32MillisecondType, Time32SecondType,
    Time64MicrosecondType, Time64NanosecondType, TimeUnit, TimestampMicrosecondType,
    TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType, UInt8Type, UInt16Type,
    UInt32Type, UInt64Type, Utf8Type,
};
use tabseek_result::{Error, Result};
use tabseek_types::SortKey;

/// Compares element `i` of a left array with element `j` of a right array.
pub type DynComparator<'a> = Box<dyn Fn(usize, usize) -> Ordering + Send + Sync + 'a>;

/// Build the ordering of `left[i]` against `right[j]` for one column.
///
/// Both arrays must share a `DataType`. Nulls are placed by `key.null_order`
/// regardless of direction; two nulls compare equal. Non-null values use the
/// type's native ordering (IEEE-754 total order for floats) oriented by
/// `key.order`.
pub fn make_column_comparator<'a>(
    left: &'a dyn Array,
    right: &'a dyn Array,
    key: SortKey,
) -> Result<DynComparator<'a>> {
    if left.data_type() != right.data_type() {
        return Err(Error::type_mismatch(
            "column",
            left.data_type(),
            right.data_type(),
        ));
    }

    let values = make_value_comparator(left, right)?;
    let order = key.order;
    let null_vs_value = key.null_order.null_vs_value();
    let value_vs_null = null_vs_value.reverse();

    // Skip validity checks entirely for sides without nulls.
    let left_nulls = non_empty_nulls(left.logical_nulls());
    let right_nulls = non_empty_nulls(right.logical_nulls());

    let cmp: DynComparator<'a> = match (left_nulls, right_nulls) {
        (None, None) => Box::new(move |i, j| order.apply(values(i, j))),
        (Some(l), None) => Box::new(move |i, j| {
            if l.is_null(i) {
                null_vs_value
            } else {
                order.apply(values(i, j))
            }
        }),
        (None, Some(r)) => Box::new(move |i, j| {
            if r.is_null(j) {
                value_vs_null
            } else {
                order.apply(values(i, j))
            }
        }),
        (Some(l), Some(r)) => Box::new(move |i, j| match (l.is_valid(i), r.is_valid(j)) {
            (false, false) => Ordering::Equal,
            (false, true) => null_vs_value,
            (true, false) => value_vs_null,
            (true, true) => order.apply(values(i, j)),
        }),
    };
    Ok(cmp)
}

/// Build an equality test for `left[i] == right[j]` where null equals only null.
///
/// Equality agrees with [`make_column_comparator`]: two elements are equal exactly
/// when the comparator reports `Ordering::Equal`.
pub fn make_column_equality<'a>(
    left: &'a dyn Array,
    right: &'a dyn Array,
) -> Result<Box<dyn Fn(usize, usize) -> bool + Send + Sync + 'a>> {
    let cmp = make_column_comparator(left, right, SortKey::default())?;
    Ok(Box::new(move |i, j| cmp(i, j) == Ordering::Equal))
}

fn non_empty_nulls(nulls: Option<NullBuffer>) -> Option<NullBuffer> {
    nulls.filter(|n| n.null_count() > 0)
}

/// Native ordering of the (assumed non-null) values of two same-typed arrays.
fn make_value_comparator<'a>(
    left: &'a dyn Array,
    right: &'a dyn Array,
) -> Result<DynComparator<'a>> {
    use DataType::*;
    match left.data_type() {
        Null => Ok(Box::new(|_, _| Ordering::Equal)),
        Boolean => compare_boolean(left, right),
        Int8 => compare_primitive::<Int8Type>(left, right),
        Int16 => compare_primitive::<Int16Type>(left, right),
        Int32 => compare_primitive::<Int32Type>(left, right),
        Int64 => compare_primitive::<Int64Type>(left, right),
        UInt8 => compare_primitive::<UInt8Type>(left, right),
        UInt16 => compare_primitive::<UInt16Type>(left, right),
        UInt32 => compare_primitive::<UInt32Type>(left, right),
        UInt64 => compare_primitive::<UInt64Type>(left, right),
        Float16 => compare_primitive::<Float16Type>(left, right),
        Float32 => compare_primitive::<Float32Type>(left, right),
        Float64 => compare_primitive::<Float64Type>(left, right),
        Date32 => compare_primitive::<Date32Type>(left, right),
        Date64 => compare_primitive::<Date64Type>(left, right),
        Time32(TimeUnit::Second) => compare_primitive::<Time32SecondType>(left, right),
        Time32(TimeUnit::Millisecond) => compare_primitive::<Time32MillisecondType>(left, right),
        Time64(TimeUnit::Microsecond) => compare_primitive::<Time64MicrosecondType>(left, right),
        Time64(TimeUnit::Nanosecond) => compare_primitive::<Time64NanosecondType>(left, right),
        Timestamp(TimeUnit::Second, _) => compare_primitive::<TimestampSecondType>(left, right),
        Timestamp(TimeUnit::Millisecond, _) => {
            compare_primitive::<TimestampMillisecondType>(left, right)
        }
        Timestamp(TimeUnit::Microsecond, _) => {
            compare_primitive::<TimestampMicrosecondType>(left, right)
        }
        Timestamp(TimeUnit::Nanosecond, _) => {
            compare_primitive::<TimestampNanosecondType>(left, right)
        }
        Duration(TimeUnit::Second) => compare_primitive::<DurationSecondType>(left, right),
        Duration(TimeUnit::Millisecond) => {
            compare_primitive::<DurationMillisecondType>(left, right)
        }
        Duration(TimeUnit::Microsecond) => {
            compare_primitive::<DurationMicrosecondType>(left, right)
        }
        Duration(TimeUnit::Nanosecond) => compare_primitive::<DurationNanosecondType>(left, right),
        Decimal128(_, _) => compare_primitive::<Decimal128Type>(left, right),
        Decimal256(_, _) => compare_primitive::<Decimal256Type>(left, right),
        Utf8 => compare_bytes::<Utf8Type>(left, right),
        LargeUtf8 => compare_bytes::<LargeUtf8Type>(left, right),
        Binary => compare_bytes::<BinaryType>(left, right),
        LargeBinary => compare_bytes::<LargeBinaryType>(left, right),
        Utf8View => compare_byte_views::<StringViewType>(left, right),
        BinaryView => compare_byte_views::<BinaryViewType>(left, right),
        FixedSizeBinary(_) => compare_fixed_size_binary(left, right),
        other => Err(Error::unsupported_type(other)),
    }
}

fn downcast<A: Array + 'static>(array: &dyn Array) -> Result<&A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        Error::Internal(format!(
            "column of type {} did not downcast to its array type",
            array.data_type()
        ))
    })
}

fn compare_primitive<'a, T>(left: &'a dyn Array, right: &'a dyn Array) -> Result<DynComparator<'a>>
where
    T: ArrowPrimitiveType,
{
    let left = downcast::<PrimitiveArray<T>>(left)?.values();
    let right = downcast::<PrimitiveArray<T>>(right)?.values();
    Ok(Box::new(move |i, j| left[i].compare(right[j])))
}

fn compare_boolean<'a>(left: &'a dyn Array, right: &'a dyn Array) -> Result<DynComparator<'a>> {
    let left = downcast::<BooleanArray>(left)?.values();
    let right = downcast::<BooleanArray>(right)?.values();
    Ok(Box::new(move |i, j| left.value(i).cmp(&right.value(j))))
}

fn compare_bytes<'a, T>(left: &'a dyn Array, right: &'a dyn Array) -> Result<DynComparator<'a>>
where
    T: ByteArrayType,
    T::Native: Ord,
{
    let left = downcast::<GenericByteArray<T>>(left)?;
    let right = downcast::<GenericByteArray<T>>(right)?;
    Ok(Box::new(move |i, j| left.value(i).cmp(right.value(j))))
}

fn compare_byte_views<'a, T>(left: &'a dyn Array, right: &'a dyn Array) -> Result<DynComparator<'a>>
where
    T: ByteViewType + ?Sized,
    T::Native: Ord,
{
    let left = downcast::<GenericByteViewArray<T>>(left)?;
    let right = downcast::<GenericByteViewArray<T>>(right)?;
    Ok(Box::new(move |i, j| left.value(i).cmp(right.value(j))))
}

fn compare_fixed_size_binary<'a>(
    left: &'a dyn Array,
    right: &'a dyn Array,
) -> Result<DynComparator<'a>> {
    let left = downcast::<FixedSizeBinaryArray>(left)?;
    let right = downcast::<FixedSizeBinaryArray>(right)?;
    Ok(Box::new(move |i, j| left.value(i).cmp(right.value(j))))
}
