//! Call-site resolution
//!
//! A [`CallSite`] identifies where in the application a record was logged.
//! The logging macros capture it at compile time through [`call_site!`]; the
//! plain methods on [`crate::Logger`] are `#[track_caller]` and resolve file
//! and line from [`std::panic::Location`]. Any wrapper that is itself
//! `#[track_caller]` is transparent, so the reported site stays the
//! application's, however many layers sit in between.
//!
//! [`call_site!`]: crate::call_site

use std::fmt;
use std::panic::Location;
use std::path::Path;

const UNKNOWN: &str = "unknown";

/// Source location of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Base name of the source file
    pub file: &'static str,
    /// Line number, `None` when it could not be resolved
    pub line: Option<u32>,
    /// Enclosing function name
    pub function: &'static str,
}

impl CallSite {
    /// Build a call site from raw compile-time values
    ///
    /// `file` is reduced to its base name and `function` to its last path
    /// segment, skipping closure frames.
    pub fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file: base_name(file),
            line: Some(line),
            function: short_function_name(function),
        }
    }

    /// The sentinel used when nothing about the caller is known
    pub fn unknown() -> Self {
        Self {
            file: UNKNOWN,
            line: None,
            function: UNKNOWN,
        }
    }

    /// Resolve the caller of the enclosing `#[track_caller]` chain
    ///
    /// The function name cannot be recovered this way and is reported as
    /// `unknown`; use the logging macros to get it.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: base_name(location.file()),
            line: Some(location.line()),
            function: UNKNOWN,
        }
    }

    /// Line number as written in log lines, `-1` when unresolved
    pub fn line_number(&self) -> i64 {
        self.line.map_or(-1, i64::from)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}][{}]", self.file, self.line_number(), self.function)
    }
}

fn base_name(file: &'static str) -> &'static str {
    let name = Path::new(file)
        .file_name()
        .and_then(|n| n.to_str())
        // Paths from other platforms may not split on this host's separator
        .and_then(|n| n.rsplit(|c: char| c == '/' || c == '\\').next())
        .unwrap_or("");
    if name.is_empty() {
        UNKNOWN
    } else {
        name
    }
}

fn short_function_name(path: &'static str) -> &'static str {
    path.rsplit("::")
        .find(|segment| !segment.is_empty() && *segment != "{{closure}}")
        .unwrap_or(UNKNOWN)
}

/// Expands to the path of the enclosing function
#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        name.strip_suffix("::__here").unwrap_or(name)
    }};
}

/// Capture the [`CallSite`] of the place this macro is expanded
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(file!(), line!(), $crate::__function_path!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn wrapped() -> CallSite {
        CallSite::caller()
    }

    #[test]
    fn test_unknown_sentinel() {
        let site = CallSite::unknown();
        assert_eq!(site.file, "unknown");
        assert_eq!(site.line_number(), -1);
        assert_eq!(site.function, "unknown");
        assert_eq!(site.to_string(), "[unknown:-1][unknown]");
    }

    #[test]
    fn test_new_shortens_paths() {
        let site = CallSite::new("src/app/server.rs", 42, "my_app::server::handle");
        assert_eq!(site.file, "server.rs");
        assert_eq!(site.line, Some(42));
        assert_eq!(site.function, "handle");
    }

    #[test]
    fn test_new_skips_closure_frames() {
        let site = CallSite::new("main.rs", 1, "my_app::run::{{closure}}::{{closure}}");
        assert_eq!(site.function, "run");
    }

    #[test]
    fn test_empty_inputs_degrade_to_unknown() {
        let site = CallSite::new("", 7, "");
        assert_eq!(site.file, "unknown");
        assert_eq!(site.function, "unknown");
        assert_eq!(site.line, Some(7));
    }

    #[test]
    fn test_caller_sees_through_track_caller_wrapper() {
        let expected_line = line!() + 1;
        let site = wrapped();
        assert_eq!(site.file, "caller.rs");
        assert_eq!(site.line, Some(expected_line));
    }

    #[test]
    fn test_call_site_macro_names_enclosing_function() {
        let site = crate::call_site!();
        assert_eq!(site.file, "caller.rs");
        assert_eq!(site.function, "test_call_site_macro_names_enclosing_function");
    }
}
