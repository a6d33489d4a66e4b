#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const COMPANY_YAML: &str = "\
name: Northwind Studio LLC
address: 500 Market Street
email: billing@northwind.example
taxId: US-94-1234567
logo: missing-logo.png
";

pub const ACME_YAML: &str = "\
name: Acme Corp
address: 1 Roadrunner Way
taxRate: 0.1
items:
  - description: Smart contract review
    qty: 2
    price: 100
  - description: Follow-up call
    qty: 1
    price: 50
";

/// Isolated data + output directories for one test.
pub struct Fixture {
    temp_dir: TempDir,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let data_dir = temp_dir.path().join("data");
        let output_dir = temp_dir.path().join("out");
        fs::create_dir_all(data_dir.join("clients")).expect("clients dir");
        fs::write(data_dir.join("company-info.yaml"), COMPANY_YAML).expect("company");
        Self {
            temp_dir,
            data_dir,
            output_dir,
        }
    }

    pub fn with_client(self, slug: &str, yaml: &str) -> Self {
        fs::write(self.data_dir.join("clients").join(format!("{slug}.yaml")), yaml)
            .expect("client");
        self
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn output_files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.output_dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
