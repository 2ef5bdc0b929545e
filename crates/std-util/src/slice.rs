#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let actual = &$e;
        assert!(actual.is_empty(), "expected empty; actual={:?}", actual);
    }};
}

/// Asserts that two collections hold the same elements, ignoring order.
#[macro_export]
macro_rules! assert_eq_unordered {
    ($actual:expr, $expect:expr) => {{
        let mut remaining: Vec<_> = $actual.into_iter().collect();

        for expect in $expect {
            match remaining.iter().position(|actual| *actual == expect) {
                Some(index) => {
                    remaining.swap_remove(index);
                }
                None => panic!("`{:#?}` missing", expect),
            }
        }

        assert!(remaining.is_empty(), "unexpected elements: {:#?}", remaining);
    }};
}
