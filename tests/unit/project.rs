use taskdeck::validation::project::validate_project_name;

#[test]
fn project_name_rules() {
    assert!(validate_project_name("Apollo").is_ok());
    assert!(validate_project_name("").is_err());
    assert!(validate_project_name("   ").is_err());
    assert!(validate_project_name(&"x".repeat(256)).is_err());
}
