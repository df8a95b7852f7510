//! trybuild compile-time tests for registration_macros

#[test]
fn ui_registration_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/register_ok.rs");
    t.pass("tests/trybuild/closed_generic_ok.rs");
}
