//! Compile-fail tests using trybuild.
//!
//! Each file under `tests/compile_fail/` must be rejected by the derive
//! with the diagnostic recorded next to it.

#[test]
fn compile_fail_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/compile_fail/*.rs");
}
