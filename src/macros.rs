macro_rules! from_val_to_enum {
    ($ob:ident $to:ident $($t:ty)*) => ($(
        impl From<$t> for $ob {
            fn from(value: $t) -> Self {
                Self::$to(value)
            }
        }
    )*)
}

macro_rules! from_val_to_enum_into {
    ($ob:ident $to:ident $($t:ty)*) => ($(
        impl From<$t> for $ob {
            fn from(value: $t) -> Self {
                Self::$to(value.into())
            }
        }
    )*)
}

// Widens every listed numeric variant to `f64`, leaving the other variants untouched.
macro_rules! widen_to_f64 {
    ($value:expr, $ob:ident { $($var:ident)* }) => (
        match $value {
            $($ob::$var(val) => $ob::F64(val as f64),)*
            other => other,
        }
    )
}
