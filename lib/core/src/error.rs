//! Error handling foundation for the MediCare portal.
//!
//! This module provides only the `Result` type alias using rootcause.
//! Each crate defines its own domain-specific error types in their own
//! error modules, attaching layer-appropriate context as errors propagate.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_alias_carries_ok_values() {
        let ok: Result<&str> = Ok("signed-in");
        assert_eq!(ok.expect("should be ok"), "signed-in");
    }
}
