use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_config(&self, content: &str) {
        let path = self.root.path().join("frontstack.kdl");
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }
}

/// Stack-related variables cleared so the host environment cannot leak in
#[allow(dead_code)]
pub const STACK_ENV: [&str; 9] = [
    "PREFIX",
    "CDK_DEFAULT_ACCOUNT",
    "AWS_ACCOUNT_ID",
    "CDK_DEFAULT_REGION",
    "AWS_REGION",
    "DOMAIN_NAME",
    "HOSTED_ZONE_ID",
    "CERTIFICATE_ARN",
    "FRONTSTACK_CONFIG",
];
