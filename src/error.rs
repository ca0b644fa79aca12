#[derive(thiserror::Error, Debug)]
pub enum JSError {
    #[error("TypeError: {message} (at {method} {file}:{line})")]
    TypeError {
        message: String,
        file: String,
        line: usize,
        method: String,
    },

    #[error("RangeError: {message} (at {method} {file}:{line})")]
    RangeError {
        message: String,
        file: String,
        line: usize,
        method: String,
    },
}

impl JSError {
    /// The bare message, without the source location.
    pub fn message(&self) -> String {
        match self {
            JSError::TypeError { message, .. } | JSError::RangeError { message, .. } => message.clone(),
        }
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self, JSError::TypeError { .. })
    }

    pub fn is_range_error(&self) -> bool {
        matches!(self, JSError::RangeError { .. })
    }
}

// Macro that constructs a TypeError using the compile-time caller location.
// Using a macro (rather than a function) ensures `file!()` and `line!()`
// expand to the site where the macro is invoked.
#[macro_export]
macro_rules! raise_type_error {
    ($($arg:tt)*) => {
        $crate::JSError::TypeError {
            message: format!($($arg)*),
            file: file!().to_string(),
            line: line!() as usize,
            method: $crate::function_name!().to_string(),
        }
    };
}

#[macro_export]
macro_rules! raise_range_error {
    ($($arg:tt)*) => {
        $crate::JSError::RangeError {
            message: format!($($arg)*),
            file: file!().to_string(),
            line: line!() as usize,
            method: $crate::function_name!().to_string(),
        }
    };
}

#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // remove the trailing "::f"
        &name[..name.len() - 3]
    }};
}
