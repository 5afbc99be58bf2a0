#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use readmap_test::{reference_fasta, write_fastq, FakeBwa, InstalledFakeBwa, TestEnvironment};
use std::path::PathBuf;

pub fn readmap_cmd() -> Command {
    let mut cmd = Command::cargo_bin("readmap").unwrap();
    cmd.env_remove("READMAP_LOG").env_remove("READMAP_BWA");
    cmd
}

/// A workspace with a reference, a reads file and an installed fake bwa
pub struct MappingFixture {
    pub env: TestEnvironment,
    pub bwa: InstalledFakeBwa,
    pub reference: PathBuf,
    pub reads: PathBuf,
}

impl MappingFixture {
    pub fn new(fake: FakeBwa, reads: usize) -> Result<Self> {
        let env = TestEnvironment::new()?;
        let bwa = fake.install(&env.tools_dir())?;
        let reference = env.write_file("reference/ref.fa", reference_fasta(2, 400).as_bytes())?;
        let reads = write_fastq(&env.reads_dir(), "reads.fastq", reads, 50)?;
        Ok(Self {
            env,
            bwa,
            reference,
            reads,
        })
    }

    /// `readmap map` with the fake bwa and an output inside the workspace
    pub fn map_cmd(&self) -> Command {
        let mut cmd = readmap_cmd();
        cmd.env("READMAP_HOME", self.env.home_dir())
            .env("READMAP_WORK_DIR", self.env.work_dir())
            .arg("map")
            .arg("--bwa-path")
            .arg(self.bwa.path())
            .arg("--output")
            .arg(self.output());
        cmd
    }

    pub fn output(&self) -> PathBuf {
        self.env.path("out/aligned.sam")
    }
}
