//! Integration tests running bwa operations against a scripted fake bwa
#![cfg(unix)]

use readmap_core::{OptionSet, ReadmapError};
use readmap_test::assertions::{assert_args_contain, assert_non_empty_file};
use readmap_test::{
    index_failure, progress_line, reference_fasta, usage_banner, write_fastq, FakeBwa, TestEnvironment,
};
use readmap_tools::{AlignOperation, BwaIndex, BwaMem, ExternalTool, InvocationStatus};
use serial_test::serial;
use std::path::PathBuf;

fn reference(env: &TestEnvironment) -> PathBuf {
    env.write_file("reference/ref.fa", reference_fasta(2, 500).as_bytes())
        .unwrap()
}

#[test]
#[serial]
fn test_end_to_end_mem_run() {
    let env = TestEnvironment::new().unwrap();
    let fake = FakeBwa::new()
        .mem_stderr(format!("{}[main] Version: 0.7.17-r1188\n", progress_line(100, 11350)))
        .install(&env.tools_dir())
        .unwrap();
    let reference = reference(&env);
    let reads = write_fastq(&env.reads_dir(), "reads.fastq", 100, 50).unwrap();

    let index = BwaIndex::index(fake.path(), &reference, &OptionSet::new()).unwrap();
    let indexed = index.run(&env.work_dir().join("index.out")).unwrap();
    assert_eq!(indexed.status, InvocationStatus::Success);
    assert!(BwaIndex::index_exists(&reference));

    let options = OptionSet::new().with("t", 4).with("M", true);
    let mem = BwaMem::mem(fake.path(), &reference, &reads, None, &options).unwrap();
    let output = env.work_dir().join("bwa.sai");
    let result = mem.run(&output).unwrap();

    assert_eq!(result.status.code(), 0);
    assert_eq!(result.exit_code, Some(0));
    assert_eq!(result.counters.sequences, 100);
    assert_eq!(result.counters.base_pairs, 11350);
    assert_non_empty_file(&output);

    let argv = fake.last_invocation().unwrap();
    assert_eq!(argv[0], "mem");
    assert_args_contain(&argv, &["-t", "4", "-M"]);
    assert_eq!(argv.last().unwrap(), &reads.to_string_lossy());
}

#[test]
#[serial]
fn test_short_count_fails() {
    let env = TestEnvironment::new().unwrap();
    let fake = FakeBwa::new()
        .mem_stderr(progress_line(90, 9000))
        .install(&env.tools_dir())
        .unwrap();
    let reference = reference(&env);
    env.write_file("reference/ref.fa.bwt", b"").unwrap();
    let reads = write_fastq(&env.reads_dir(), "reads.fastq", 100, 50).unwrap();

    let mem = BwaMem::mem(fake.path(), &reference, &reads, None, &OptionSet::new()).unwrap();
    let result = mem.run(&env.work_dir().join("out.sam")).unwrap();

    assert_eq!(result.status, InvocationStatus::Failed);
}

#[test]
#[serial]
fn test_usage_rejection_ignores_exit_code() {
    let env = TestEnvironment::new().unwrap();
    let fake = FakeBwa::new()
        .mem_stderr(usage_banner("mem"))
        .exit_code(0)
        .install(&env.tools_dir())
        .unwrap();
    let reference = reference(&env);
    env.write_file("reference/ref.fa.bwt", b"").unwrap();
    let reads = write_fastq(&env.reads_dir(), "reads.fastq", 10, 50).unwrap();

    let mem = BwaMem::mem(fake.path(), &reference, &reads, None, &OptionSet::new()).unwrap();
    let result = mem.run(&env.work_dir().join("out.sam")).unwrap();

    assert_eq!(result.status.code(), 2);
    assert_eq!(result.exit_code, Some(0));
}

#[test]
#[serial]
fn test_nonzero_exit_with_clean_diagnostics_is_success() {
    let env = TestEnvironment::new().unwrap();
    let fake = FakeBwa::new().exit_code(1).install(&env.tools_dir()).unwrap();
    let reference = reference(&env);

    let index = BwaIndex::index(fake.path(), &reference, &OptionSet::new()).unwrap();
    let result = index.run(&env.work_dir().join("index.out")).unwrap();

    assert_eq!(result.status, InvocationStatus::Success);
    assert_eq!(result.exit_code, Some(1));
}

#[test]
#[serial]
fn test_index_failure_diagnostic() {
    let env = TestEnvironment::new().unwrap();
    let fake = FakeBwa::new()
        .index_stderr(index_failure("ref.fa"))
        .without_index_files()
        .install(&env.tools_dir())
        .unwrap();
    let reference = reference(&env);

    let options = OptionSet::new().with("a", "bwtsw");
    let index = BwaIndex::index(fake.path(), &reference, &options).unwrap();
    let result = index.run(&env.work_dir().join("index.out")).unwrap();

    assert_eq!(result.status, InvocationStatus::Failed);
    assert!(!BwaIndex::index_exists(&reference));
    assert_args_contain(&fake.last_invocation().unwrap(), &["index", "-a", "bwtsw"]);
}

#[test]
#[serial]
fn test_missing_bwa_path_is_configuration_error() {
    let env = TestEnvironment::new().unwrap();
    let reference = reference(&env);

    match ExternalTool::new(AlignOperation, OptionSet::new(), vec![reference]) {
        Err(ReadmapError::Configuration(msg)) => assert_eq!(msg, "bwa_path is a required parameter"),
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_invalid_bwa_path() {
    let env = TestEnvironment::new().unwrap();
    let reference = reference(&env);
    let missing = env.tools_dir().join("bwa");

    match BwaIndex::index(&missing, &reference, &OptionSet::new()) {
        Err(ReadmapError::Configuration(msg)) => {
            assert_eq!(msg, format!("{} is not a valid bwa path", missing.display()))
        }
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_invalid_arguments_spawn_nothing() {
    let env = TestEnvironment::new().unwrap();
    let fake = FakeBwa::new().install(&env.tools_dir()).unwrap();
    let reference = reference(&env);
    let reads = env.reads_dir().join("missing.fastq");

    let result = BwaMem::mem(fake.path(), &reference, &reads, None, &OptionSet::new());

    assert!(matches!(result, Err(ReadmapError::Validation(_))));
    assert!(fake.invocations().unwrap().is_empty());
}

#[test]
#[serial]
fn test_invocation_renders_command_line() {
    let env = TestEnvironment::new().unwrap();
    let fake = FakeBwa::new().install(&env.tools_dir()).unwrap();
    let reference = reference(&env);

    let options = OptionSet::new().with("p", "refidx");
    let index = BwaIndex::index(fake.path(), &reference, &options).unwrap();
    let invocation = index.invocation();

    assert_eq!(
        invocation.required_values,
        vec![fake.path().to_string_lossy().into_owned(), "index".to_string()]
    );
    assert_eq!(
        invocation.argv(),
        vec![
            fake.path().to_string_lossy().into_owned(),
            "index".to_string(),
            "-p".to_string(),
            "refidx".to_string(),
            reference.to_string_lossy().into_owned(),
        ]
    );
}
