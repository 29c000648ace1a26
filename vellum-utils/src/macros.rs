#[doc(hidden)]
#[macro_export]
macro_rules! __match_ignore_ascii_case_str {
    (match ($s:expr) { $caseA:literal $(| $caseAVar:literal)* $(if $condA:expr)? => $retA:expr $(, $caseB:literal $(| $caseBVar:literal)* $(if $condB:expr)? => $retB:expr)*, _ => $fallback:expr $(,)? }) => {
        {
            let s = ($s).trim();
            if $($condA &&)? (s.eq_ignore_ascii_case($caseA) $(|| s.eq_ignore_ascii_case($caseAVar))*) {
                $retA
            }
            $(
                else if $($condB &&)? (s.eq_ignore_ascii_case($caseB) $(|| s.eq_ignore_ascii_case($caseBVar))*) {
                    $retB
                }
            )*
            else {
                $fallback
            }
        }
    };
}
#[doc(inline)]
/// Match a (trimmed) str against string literals, ignoring ASCII case.
///
/// A fallback arm (`_ => ...`) is required.
///
/// ```
/// use vellum_utils::macros::match_ignore_ascii_case_str;
///
/// let n = match_ignore_ascii_case_str! {
///     match (" Lax ") {
///         "strict" => 1,
///         "lax" => 2,
///         _ => 0,
///     }
/// };
/// assert_eq!(n, 2);
/// ```
pub use crate::__match_ignore_ascii_case_str as match_ignore_ascii_case_str;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ignore_ascii_case_str_happy_mixed_case() {
        let result = match_ignore_ascii_case_str!(match ("GziP") {
            "gzip" | "x-gzip" => 1,
            "br" => 2,
            _ => 0,
        });
        assert_eq!(result, 1);
    }

    #[test]
    fn match_ignore_ascii_case_str_guard() {
        let enabled = false;
        let result = match_ignore_ascii_case_str!(match ("br") {
            "gzip" => 1,
            "br" if enabled => 2,
            _ => 0,
        });
        assert_eq!(result, 0);
    }

    #[test]
    fn match_ignore_ascii_case_str_fallback() {
        let result = match_ignore_ascii_case_str!(match ("zstd") {
            "gzip" => 1,
            _ => 42,
        });
        assert_eq!(result, 42);
    }
}
