use std::cmp::Ordering;

/// Helper for safe float comparison with NaN handling
pub fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Stable sort with a custom comparator and direction.
///
/// The comparator does not have to be a total order: a bottom-up merge sort
/// only asks it which of two elements goes first, so an inconsistent
/// comparator yields some permutation instead of a panic.
pub fn sort_with_order<T, F>(items: &mut [T], compare_fn: F, ascending: bool)
where
    F: Fn(&T, &T) -> Ordering,
{
    let order = merge_sort_indices(items.len(), |a, b| {
        let cmp = compare_fn(&items[a], &items[b]);
        if ascending { cmp } else { cmp.reverse() }
    });
    apply_permutation(items, order);
}

/// Source indices in sorted order; equal elements keep their input order
fn merge_sort_indices<F>(len: usize, compare: F) -> Vec<usize>
where
    F: Fn(usize, usize) -> Ordering,
{
    let mut order: Vec<usize> = (0..len).collect();
    let mut merged = Vec::with_capacity(len);
    let mut width = 1;

    while width < len {
        merged.clear();
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                // Right side wins only when strictly smaller
                if compare(order[j], order[i]) == Ordering::Less {
                    merged.push(order[j]);
                    j += 1;
                } else {
                    merged.push(order[i]);
                    i += 1;
                }
            }
            merged.extend_from_slice(&order[i..mid]);
            merged.extend_from_slice(&order[j..end]);
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }

    order
}

/// Move `items[order[k]]` to position `k` by following permutation cycles
fn apply_permutation<T>(items: &mut [T], mut order: Vec<usize>) {
    for start in 0..order.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            items.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}

/// Format an integer with thousands separators (1234567 -> "1,234,567")
pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_floats() {
        assert_eq!(compare_floats(1.0, 2.0), Ordering::Less);
        assert_eq!(compare_floats(2.0, 1.0), Ordering::Greater);
        assert_eq!(compare_floats(1.0, 1.0), Ordering::Equal);
        assert_eq!(compare_floats(f64::NAN, 1.0), Ordering::Equal);
    }

    #[test]
    fn test_sort_with_order_is_stable() {
        let mut items = vec![(1, 'a'), (0, 'b'), (1, 'c')];
        sort_with_order(&mut items, |a, b| a.0.cmp(&b.0), false);
        assert_eq!(items, vec![(1, 'a'), (1, 'c'), (0, 'b')]);
    }

    #[test]
    fn test_sort_with_order_matches_std_sort() {
        let mut items: Vec<u32> = (0..97).map(|i| (i * 37 + 11) % 23).collect();
        let mut expected = items.clone();
        expected.sort();
        sort_with_order(&mut items, |a, b| a.cmp(b), true);
        assert_eq!(items, expected);

        sort_with_order(&mut items, |a, b| a.cmp(b), false);
        expected.reverse();
        assert_eq!(items, expected);
    }

    #[test]
    fn test_sort_with_inconsistent_comparator_is_a_permutation() {
        // Rock-paper-scissors: every element beats the next one
        let mut items: Vec<u8> = (0..40).map(|i| i % 3).collect();
        sort_with_order(
            &mut items,
            |a, b| {
                if (a + 1) % 3 == *b {
                    Ordering::Less
                } else if (b + 1) % 3 == *a {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            },
            true,
        );
        let mut counts = [0; 3];
        for item in &items {
            counts[*item as usize] += 1;
        }
        assert_eq!(counts, [14, 13, 13]);
    }

    #[test]
    fn test_sort_with_order_empty_and_single() {
        let mut empty: Vec<i32> = Vec::new();
        sort_with_order(&mut empty, |a, b| a.cmp(b), true);
        assert!(empty.is_empty());

        let mut single = vec![7];
        sort_with_order(&mut single, |a, b| a.cmp(b), false);
        assert_eq!(single, vec![7]);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("overview"), "Overview");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("Microsoft 365 E5", 10), "Microso...");
    }
}
