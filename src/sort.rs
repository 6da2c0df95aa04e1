//! Comparison sorts over mutable slices.
//!
//! All three sorts order the slice in place using `Ord`. [`bubble_sort`] and
//! [`insertion_sort`] are quadratic and allocation-free; [`merge_sort`] runs
//! in `O(n log n)` but clones each half into scratch storage while merging.
//! [`insertion_sort`] and [`merge_sort`] are stable.

use alloc::vec::Vec;

/// Sorts the slice by bubbling the largest unsorted element to the end of
/// the unsorted region on each pass.
///
/// Stops early once a pass completes without swapping.
///
/// # Examples
///
/// ```
/// use clump_hash::sort::bubble_sort;
///
/// let mut items = [5, 1, 4, 2, 3];
/// bubble_sort(&mut items);
/// assert_eq!(items, [1, 2, 3, 4, 5]);
/// ```
pub fn bubble_sort<T: Ord>(items: &mut [T]) {
    // Each pass grows the sorted suffix by one element.
    for pass in 0..items.len() {
        let mut swapped = false;
        for i in 1..items.len() - pass {
            if items[i - 1] > items[i] {
                items.swap(i - 1, i);
                swapped = true;
            }
        }
        // A clean pass means the whole slice is ordered.
        if !swapped {
            break;
        }
    }
}

/// Sorts the slice by walking each element backwards into the sorted prefix.
///
/// # Examples
///
/// ```
/// use clump_hash::sort::insertion_sort;
///
/// let mut items = [5, 1, 4, 2, 3];
/// insertion_sort(&mut items);
/// assert_eq!(items, [1, 2, 3, 4, 5]);
/// ```
pub fn insertion_sort<T: Ord>(items: &mut [T]) {
    for i in 1..items.len() {
        // Swap the new element backwards until its predecessor is not larger.
        let mut j = i;
        while j > 0 && items[j - 1] > items[j] {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Sorts the slice by recursively sorting each half and merging the results.
///
/// Equal elements keep their relative order.
///
/// # Examples
///
/// ```
/// use clump_hash::sort::merge_sort;
///
/// let mut items = [5, 1, 4, 2, 3];
/// merge_sort(&mut items);
/// assert_eq!(items, [1, 2, 3, 4, 5]);
/// ```
pub fn merge_sort<T: Ord + Clone>(items: &mut [T]) {
    if items.len() > 1 {
        let mid = items.len() / 2;
        merge_sort(&mut items[..mid]);
        merge_sort(&mut items[mid..]);
        merge(items, mid);
    }
}

/// Merges the two sorted halves of `items` split at `mid` back into `items`.
fn merge<T: Ord + Clone>(items: &mut [T], mid: usize) {
    let left: Vec<T> = items[..mid].to_vec();
    let right: Vec<T> = items[mid..].to_vec();

    let mut l = 0;
    let mut r = 0;
    for slot in items.iter_mut() {
        // Take from the left while it holds the smaller element; ties also go
        // left so equal elements keep their order.
        if r == right.len() || (l < left.len() && left[l] <= right[r]) {
            slot.clone_from(&left[l]);
            l += 1;
        } else {
            slot.clone_from(&right[r]);
            r += 1;
        }
    }
}
