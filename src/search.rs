//! Small search and rounding helpers.

/// The element of `numbers` closest to `target`.
///
/// Ties go to the element seen first. Returns `None` for an empty slice.
pub fn closest_number(numbers: &[f64], target: f64) -> Option<f64> {
    numbers.iter().copied().reduce(|prev, curr| {
        if (curr - target).abs() < (prev - target).abs() {
            curr
        } else {
            prev
        }
    })
}

/// Round `n` up to `precision` decimal places.
pub fn round_up(n: f64, precision: i32) -> f64 {
    let scale = 10f64.powi(precision);
    (n * scale).ceil() / scale
}

/// The key of the first entry whose value equals `value`.
///
/// "First" follows the iteration order of `map`, so use an ordered map when
/// that matters.
pub fn find_key_by_value<'a, K, V, I>(map: I, value: &V) -> Option<&'a K>
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: 'a,
    V: PartialEq + 'a,
{
    map.into_iter().find(|(_, v)| *v == value).map(|(k, _)| k)
}

/// True if any entry of `map` holds `value`.
pub fn has_value<'a, K, V, I>(map: I, value: &V) -> bool
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: 'a,
    V: PartialEq + 'a,
{
    find_key_by_value(map, value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_basic_numbers() {
        assert_eq!(closest_number(&[10.0, 20.0, 30.0], 12.0), Some(10.0));
    }

    #[test]
    fn test_floating_point_numbers() {
        let numbers = [10.1, 10.5, 10.4, 8.2, 9.23, 10.0];
        assert_eq!(closest_number(&numbers, 10.2), Some(10.1));
    }

    #[test]
    fn test_negative_numbers() {
        let numbers = [2.0, 0.0, -1.5, -0.75, -5.0, 3.0, -1.2, -2.1];
        assert_eq!(closest_number(&numbers, -1.0), Some(-1.2));
    }

    #[test]
    fn test_tie_keeps_first() {
        assert_eq!(closest_number(&[4.0, 6.0], 5.0), Some(4.0));
        assert_eq!(closest_number(&[6.0, 4.0], 5.0), Some(6.0));
    }

    #[test]
    fn test_empty_slice() {
        assert_eq!(closest_number(&[], 1.0), None);
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up(1.01, 0), 2.0);
        assert_eq!(round_up(1.234, 2), 1.24);
        assert_eq!(round_up(-1.5, 0), -1.0);
    }

    #[test]
    fn test_find_key_by_value() {
        let mut map = BTreeMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 2);

        assert_eq!(find_key_by_value(&map, &2), Some(&"b"));
        assert_eq!(find_key_by_value(&map, &9), None);
    }

    #[test]
    fn test_has_value() {
        let map: HashMap<String, bool> = [("on".to_string(), true)].into_iter().collect();
        assert!(has_value(&map, &true));
        assert!(!has_value(&map, &false));
    }

    #[test]
    fn test_empty_map() {
        let map: HashMap<u8, u8> = HashMap::new();
        assert!(!has_value(&map, &0));
        assert_eq!(find_key_by_value(&map, &0), None);
    }
}
