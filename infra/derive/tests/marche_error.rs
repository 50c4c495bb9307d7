#[test]
fn marche_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/marche_error_pass.rs");
}
