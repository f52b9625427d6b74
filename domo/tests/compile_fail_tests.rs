//! Compile-fail tests for malformed `#[derive(DomoRecord)]` input:
//! tuple structs, enums, lifetimes, struct-level tags and malformed field
//! attributes.

#[test]
fn compile_fail_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*.rs");
}
