// tests/install_workflow.rs

//! Install procedure workflow: step order, arguments, parallelism, failures.

mod common;

use common::{LIBELF_CONFIGURE_ARGS, dry_kitchen, fake_source_tree, scratch_kitchen};
use cookbook::{BuildSpec, Error, ErrorCategory, Parallelism, RecordingTools, Step};
use std::fs;

#[test]
fn test_three_steps_in_order() {
    let kitchen = dry_kitchen();
    let mut tools = RecordingTools::new();

    kitchen
        .install(&BuildSpec::new("libelf"), &mut tools)
        .unwrap();

    assert_eq!(tools.steps(), vec![Step::Configure, Step::Build, Step::Install]);
}

#[test]
fn test_configure_args_for_prefix() {
    let kitchen = dry_kitchen();
    let mut tools = RecordingTools::new();

    let spec = BuildSpec::new("libelf").with_prefix("/opt/libelf/0.8.13");
    let result = kitchen.install(&spec, &mut tools).unwrap();

    assert_eq!(result.prefix.to_str(), Some("/opt/libelf/0.8.13"));
    assert_eq!(tools.invocations()[0].args, LIBELF_CONFIGURE_ARGS);
}

#[test]
fn test_default_prefix_matches_layout() {
    let kitchen = dry_kitchen();
    let mut tools = RecordingTools::new();

    // Default root /opt gives the same prefix as the explicit one above
    kitchen
        .install(&BuildSpec::parse("libelf@0.8.13").unwrap(), &mut tools)
        .unwrap();
    assert_eq!(tools.invocations()[0].args, LIBELF_CONFIGURE_ARGS);
}

#[test]
fn test_install_is_serial_build_is_not() {
    let kitchen = dry_kitchen();
    let mut tools = RecordingTools::new();

    kitchen
        .install(&BuildSpec::new("libelf"), &mut tools)
        .unwrap();

    let invocations = tools.invocations();
    assert_eq!(invocations[1].parallelism, Parallelism::Default);
    assert_eq!(invocations[2].parallelism, Parallelism::Serial);
    // Holds however many jobs the kitchen is configured for
    assert_eq!(invocations[2].parallelism.jobs(64), 1);
}

#[test]
fn test_configure_failure_stops_everything() {
    let kitchen = dry_kitchen();
    let mut tools = RecordingTools::failing_at(Step::Configure, 1);

    let err = kitchen
        .install(&BuildSpec::new("libelf"), &mut tools)
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::BuildFailure);
    assert_eq!(err.failed_step(), Some(Step::Configure));
    assert_eq!(tools.steps(), vec![Step::Configure]);
}

#[test]
fn test_build_failure_skips_install() {
    let kitchen = dry_kitchen();
    let mut tools = RecordingTools::failing_at(Step::Build, 2);

    let err = kitchen
        .install(&BuildSpec::new("libelf"), &mut tools)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::BuildFailed {
            step: Step::Build,
            code: Some(2),
            ..
        }
    ));
    assert_eq!(tools.steps(), vec![Step::Configure, Step::Build]);
}

#[test]
fn test_failure_leaves_registry_intact() {
    let kitchen = dry_kitchen();
    let mut failing = RecordingTools::failing_at(Step::Install, 1);
    assert!(kitchen.install(&BuildSpec::new("libelf"), &mut failing).is_err());

    // A later attempt with the same kitchen succeeds
    let mut tools = RecordingTools::new();
    kitchen
        .install(&BuildSpec::new("libelf"), &mut tools)
        .unwrap();
    assert_eq!(tools.steps().len(), 3);
}

#[test]
fn test_unknown_version_is_data_error() {
    let kitchen = dry_kitchen();
    let mut tools = RecordingTools::new();

    let err = kitchen
        .install(&BuildSpec::parse("libelf@0.8.11").unwrap(), &mut tools)
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::DataIntegrity);
    assert!(tools.invocations().is_empty());
}

#[cfg(unix)]
#[test]
fn test_system_tools_end_to_end() {
    let (temp, kitchen) = scratch_kitchen("true");
    let source = temp.path().join("libelf-0.8.12");
    fake_source_tree(&source);

    let mut tools = kitchen.system_tools(&source);
    let result = kitchen
        .install(&BuildSpec::parse("libelf@0.8.12").unwrap(), &mut tools)
        .unwrap();

    let expected_prefix = temp.path().join("root").join("libelf").join("0.8.12");
    assert_eq!(result.prefix, expected_prefix);
    assert!(expected_prefix.is_dir());

    let args = fs::read_to_string(source.join("configure.args")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(
        args,
        vec![
            format!("--prefix={}", expected_prefix.display()).as_str(),
            "--enable-shared",
            "--disable-dependency-tracking",
            "--disable-debug",
        ]
    );

    let log = tools.log();
    assert!(log.contains("=== configure ==="));
    assert!(log.contains("=== build ==="));
    assert!(log.contains("=== install ==="));
}

#[cfg(unix)]
#[test]
fn test_system_tools_build_failure() {
    let (temp, kitchen) = scratch_kitchen("false");
    let source = temp.path().join("libelf-0.8.13");
    fake_source_tree(&source);

    let mut tools = kitchen.system_tools(&source);
    let err = kitchen
        .install(&BuildSpec::new("libelf"), &mut tools)
        .unwrap_err();

    assert_eq!(err.failed_step(), Some(Step::Build));
    assert!(!tools.log().contains("=== install ==="));
}
