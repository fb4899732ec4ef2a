#[macro_export]
macro_rules! pattern {
    ($src:literal) => {{
        static PATTERN: once_cell::sync::Lazy<$crate::Pattern> =
            once_cell::sync::Lazy::new(|| $crate::Pattern::new($src, $crate::PatternFlags::empty()).unwrap());
        (*PATTERN).clone()
    }};
    ($src:literal, $flags:expr) => {{
        static PATTERN: once_cell::sync::Lazy<$crate::Pattern> =
            once_cell::sync::Lazy::new(|| $crate::Pattern::new($src, $flags).unwrap());
        (*PATTERN).clone()
    }};
}

#[macro_export]
macro_rules! seq {
    ($($child:expr),+ $(,)?) => {
        $crate::__seq_unchecked(vec![ $($child.into()),+ ])
    };
}

#[macro_export]
macro_rules! one_of {
    ($($alternate:expr),+ $(,)?) => {
        $crate::__union_unchecked(vec![ $($alternate.into()),+ ])
    };
}
