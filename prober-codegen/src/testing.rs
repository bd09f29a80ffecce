//! Test utilities for language plugins.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.
//!
//! A [`Sandbox`] is a throwaway repository root with fake external tools.
//! Every fake appends `<cwd> <tool> <args>` to a shared log so tests can
//! assert on what was run and where.

use std::{
    fs,
    path::{Path, PathBuf},
};

use prober_config::Config;
use tempfile::TempDir;

const LOG_FILE: &str = "calls.log";

/// Fake `protoc`: creates the files the requested generators would write.
///
/// `--grpc_out` hands the schema stem to the `--plugin` executable so fake
/// plugins can create their own outputs.
const FAKE_PROTOC: &str = r#"plugin=""
schema=""
outs=""
for arg in "$@"; do
  case "$arg" in
    --plugin=*) plugin="${arg#--plugin=*=}" ;;
    --*_out=*) outs="$outs ${arg%%_out=*}" ;;
    *.proto) schema="$arg" ;;
  esac
done
[ -f "$schema" ] || { echo "$schema: No such file or directory" >&2; exit 1; }
stem="${schema%.proto}"
for out in $outs; do
  case "$out" in
    --cpp) touch "$stem.pb.cc" "$stem.pb.h" ;;
    --python) touch "${stem}_pb2.py" ;;
    --go) printf 'package %s\n\nconst _ = proto.ProtoPackageIsVersion2 // please upgrade the proto package\n\ntype EchoRequest struct{}\n' "$stem" > "$stem.pb.go" ;;
    --grpc) "$plugin" "$stem" || exit 1 ;;
  esac
done"#;

/// Names of the fake tools [`Sandbox::install_toolchain`] provides.
pub const FAKE_TOOLS: [&str; 7] = [
    "protoc",
    "bazel",
    "go",
    "protoc-gen-go",
    "python3",
    "grpc_cpp_plugin",
    "grpc_python_plugin",
];

/// A temporary repository root with fake tools, templates and plugins.
pub struct Sandbox {
    _temp: TempDir,
    root: PathBuf,
}

impl Sandbox {
    /// An empty sandbox with the standard directory layout.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create sandbox");
        // Canonicalize so paths compare equal to what tools report as $PWD.
        let root = temp.path().canonicalize().expect("canonicalize sandbox");
        for dir in ["bin", "templates", "bazel-bin", "protos"] {
            fs::create_dir_all(root.join(dir)).expect("create sandbox dir");
        }
        Self { _temp: temp, root }
    }

    /// A sandbox with every fake tool, template and client generator installed.
    pub fn ready() -> Self {
        let sandbox = Self::new();
        sandbox.install_toolchain();
        sandbox.install_templates();
        sandbox.install_generators();
        sandbox
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configuration pointing every tool at the sandbox fakes.
    pub fn config(&self) -> Config {
        let mut config = Config::for_root(&self.root);
        let bin = |name: &str| self.root.join("bin").join(name).display().to_string();
        config.tools.protoc = bin("protoc");
        config.tools.build_tool = bin("bazel");
        config.tools.go = bin("go");
        config.tools.protoc_gen_go = bin("protoc-gen-go");
        config.tools.python = bin("python3");
        config.tools.grpc_cpp_plugin = bin("grpc_cpp_plugin");
        config.tools.grpc_python_plugin = bin("grpc_python_plugin");
        config.tools.timeout_secs = 30;
        config
    }

    /// Write an executable shell script to `bin/<name>`.
    ///
    /// The script logs its invocation before running `body`.
    pub fn fake_tool(&self, name: &str, body: &str) -> PathBuf {
        let path = self.root.join("bin").join(name);
        self.write_script(&path, name, body);
        path
    }

    /// Write an executable client generator to `bazel-bin/<name>`.
    pub fn plugin(&self, name: &str, body: &str) -> PathBuf {
        let path = self.root.join("bazel-bin").join(name);
        self.write_script(&path, name, body);
        path
    }

    /// Write a template under `templates/`.
    pub fn template(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join("templates").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create template dir");
        }
        fs::write(&path, content).expect("write template");
        path
    }

    /// Write a schema fixture to `protos/<file_name>`.
    pub fn schema(&self, file_name: &str) -> PathBuf {
        let path = self.root.join("protos").join(file_name);
        fs::write(
            &path,
            "syntax = \"proto3\";\n\nservice Echo {\n  rpc Echo (EchoRequest) returns (EchoRequest);\n}\n\nmessage EchoRequest {}\n",
        )
        .expect("write schema");
        path
    }

    /// Install every fake in [`FAKE_TOOLS`].
    pub fn install_toolchain(&self) {
        self.fake_tool("protoc", FAKE_PROTOC);
        self.fake_tool("bazel", "exit 0");
        self.fake_tool("go", "exit 0");
        self.fake_tool("protoc-gen-go", "exit 0");
        self.fake_tool("python3", "exit 0");
        self.fake_tool("grpc_cpp_plugin", "touch \"$1.grpc.pb.cc\" \"$1.grpc.pb.h\"");
        self.fake_tool("grpc_python_plugin", "touch \"$1_pb2_grpc.py\"");
    }

    /// Install minimal build descriptor templates for every language.
    pub fn install_templates(&self) {
        self.template(
            "cpp/BUILD.template",
            "cc_binary(\n    name = \"generated_{uniquename}_prober\",\n    srcs = [\"{uniquename}.grpc.client.pb.cc\"],\n)\n",
        );
        self.template(
            "go/BUILD.client.template",
            "go_binary(\n    name = \"generated_{uniquename}_prober\",\n    srcs = [\"{uniquename}.grpc.client.pb.go\"],\n)\n",
        );
        self.template(
            "go/BUILD.pb.template",
            "go_library(\n    name = \"{uniquename}\",\n    srcs = [\"{uniquename}.pb.go\"],\n)\n",
        );
        self.template(
            "python/BUILD.template",
            "py_binary(\n    name = \"generated_{uniquename}_prober\",\n    srcs = [\"{uniquename}.grpc.client.pb.py\"],\n)\n",
        );
    }

    /// Install fake client generators that emit `<stem>.grpc.client.pb.<ext>`.
    pub fn install_generators(&self) {
        self.plugin("cpp_generator", "touch \"$1.grpc.client.pb.cc\"");
        self.plugin("go_generator", "touch \"$1.grpc.client.pb.go\"");
        self.plugin("python_generator", "touch \"$1.grpc.client.pb.py\"");
    }

    /// Every logged invocation, oldest first.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.root.join(LOG_FILE))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Logged invocations of one tool, with the cwd and tool name stripped.
    pub fn calls_to(&self, name: &str) -> Vec<String> {
        let marker = format!(" {} ", name);
        self.calls()
            .into_iter()
            .filter_map(|line| {
                let (_, args) = line.split_once(&marker)?;
                Some(args.to_string())
            })
            .collect()
    }

    fn write_script(&self, path: &Path, name: &str, body: &str) {
        let log = self.root.join(LOG_FILE);
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$PWD {name} $*\" >> '{log}'\n{body}\n",
            name = name,
            log = log.display(),
            body = body,
        );
        fs::write(path, script).expect("write script");
        make_executable(path);
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod script");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
