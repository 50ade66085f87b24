/// utility: fill an array (only for test)
#[cfg(test)]
macro_rules! fill_vec {
    ($n: expr, $c: expr) => {
        (0..$n).map(|_| $c).collect::<Vec<_>>()
    };
}

/// utility: check an algebraic invariant
///
/// If the condition does not hold, immediately return `Error::InvariantViolation`.
macro_rules! assert_safe {
    ($exp: expr) => {{
        if !($exp) {
            return Err(crate::Error::InvariantViolation(Some(ark_std::format!(
                "Assertion Failed: {} is false",
                stringify!($exp)
            ))));
        }
    }};
}

/// utility: reject a request larger than the degree bound before any group operation
macro_rules! ensure_capacity {
    ($requested: expr, $capacity: expr) => {{
        let requested: usize = $requested;
        let capacity: usize = $capacity;
        if requested > capacity {
            return Err(crate::error::capacity_exceeded(requested, capacity));
        }
    }};
}
