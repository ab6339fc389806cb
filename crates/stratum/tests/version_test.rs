#[test]
fn version_matches_the_package() {
    assert_eq!(stratum::VERSION, env!("CARGO_PKG_VERSION"));
}
