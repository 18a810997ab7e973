//! Test support
//!
//! Checkers for the parser's structural guarantees, used by the crate's
//! own tests and available to downstream test suites. See
//! [token_coverage_checker].

pub mod token_coverage_checker;

pub use token_coverage_checker::{
    assert_full_token_coverage, assert_verbatim_round_trip, CoverageDefect, TokenCoverageChecker,
};
