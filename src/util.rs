#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}

#[macro_export]
/// Implements `From` for every primitive number through `f64`.
macro_rules! from_prims {
    ($to:tt) => {
        from_as!($to, f32, f64);

        from_as!($to, i64, f64);
        from_as!($to, i32, f64);
        from_as!($to, i16, f64);
        from_as!($to, i8, f64);
        from_as!($to, isize, f64);

        from_as!($to, u64, f64);
        from_as!($to, u32, f64);
        from_as!($to, u16, f64);
        from_as!($to, u8, f64);
        from_as!($to, usize, f64);
    };
}
