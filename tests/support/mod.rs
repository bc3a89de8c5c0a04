//! Shared helpers for integration tests

#![allow(dead_code)]

use repo2wasm::fetch::{FetchError, RepositoryFetcher};
use repo2wasm::fs::{FileSystem, RealFileSystem};
use repo2wasm::toolchain::{MockProcessRunner, MockRun, ToolchainRegistry};
use repo2wasm::{BuildPipeline, Repo2WasmConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Stands in for a clone by writing a fixed tree into the destination.
pub struct FixtureFetcher {
    files: Vec<(String, Vec<u8>)>,
}

impl FixtureFetcher {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, content)| (path.to_string(), content.as_bytes().to_vec()))
                .collect(),
        }
    }
}

impl RepositoryFetcher for FixtureFetcher {
    fn fetch(&self, _location: &str, dest: &Path) -> Result<(), FetchError> {
        for (path, content) in &self.files {
            let full = dest.join(path);
            fs::create_dir_all(full.parent().expect("fixture path has a parent"))
                .expect("Failed to create fixture directory");
            fs::write(full, content).expect("Failed to write fixture file");
        }
        Ok(())
    }
}

pub fn test_config(work_dir: &Path) -> Repo2WasmConfig {
    Repo2WasmConfig {
        work_dir: work_dir.to_path_buf(),
        cargo_bin: "cargo".to_string(),
        emcc_bin: "emcc".to_string(),
        wasm_target: "wasm32-unknown-unknown".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
    }
}

/// Pipeline over a fixture tree with a scripted process runner.
pub fn fixture_pipeline(
    work_dir: &TempDir,
    files: &[(&str, &str)],
) -> (BuildPipeline, Arc<MockProcessRunner>) {
    let config = test_config(work_dir.path());
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let runner = Arc::new(MockProcessRunner::new());
    let toolchains = ToolchainRegistry::with_defaults(&config, fs.clone(), runner.clone());
    let pipeline = BuildPipeline::new(
        work_dir.path(),
        Arc::new(FixtureFetcher::new(files)),
        fs,
        toolchains,
    );
    (pipeline, runner)
}

/// emcc stand-in: writes a module at the `-o` path (the last argument).
pub fn emcc_writes_output() -> MockRun {
    MockRun::success().with_effect(|spec| {
        let out = spec.args.last().expect("emcc invoked without arguments");
        fs::write(out, b"\0asm\x01\0\0\0").expect("Failed to write fake module");
    })
}

/// cargo stand-in: writes `<name>` into the release directory of the tree it
/// was run in.
pub fn cargo_writes_module(name: &'static str) -> MockRun {
    MockRun::success().with_effect(move |spec| {
        let cwd = spec.cwd.clone().expect("cargo invoked without a cwd");
        let release = cwd.join("target/wasm32-unknown-unknown/release");
        fs::create_dir_all(&release).expect("Failed to create release dir");
        fs::write(release.join(name), b"\0asm\x01\0\0\0").expect("Failed to write fake module");
    })
}

/// Every `repo` directory left under the work dir.
pub fn leftover_sources(work_dir: &TempDir) -> Vec<PathBuf> {
    fs::read_dir(work_dir.path())
        .expect("Failed to read work dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path().join("repo"))
        .filter(|p| p.exists())
        .collect()
}
