//! Errors in this workspace are plain strings. This extension trait attaches
//! a context message to any displayable error.

pub trait ErrorStringExt<T> {
    fn err_to_string(self, context: &str) -> Result<T, String>;
}

impl<T, E: std::fmt::Display> ErrorStringExt<T> for Result<T, E> {
    fn err_to_string(self, context: &str) -> Result<T, String> {
        self.map_err(|err| format!("{context}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_err_to_string_prefixes_context() {
        let res: Result<u8, _> = "300".parse::<u8>();
        let err = res.err_to_string("could not parse byte").unwrap_err();
        assert!(err.starts_with("could not parse byte: "));
    }
}
