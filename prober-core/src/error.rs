use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::Language;

/// Result type for prober operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid schema '{path}': {reason}")]
    #[diagnostic(
        code(prober::invalid_input),
        help("pass an existing .proto file, e.g. `-p protos/echo.proto`")
    )]
    InvalidInput { path: PathBuf, reason: String },

    #[error("required tool '{tool}' was not found on PATH")]
    #[diagnostic(
        code(prober::missing_tool),
        help("install '{tool}' or point the [tools] section of prober.toml at it")
    )]
    MissingTool { tool: String },

    #[error("'{tool}' failed ({})", describe_exit(.code))]
    #[diagnostic(code(prober::tool_failed), help("command was: {command}"))]
    ToolInvocation {
        tool: String,
        code: Option<i32>,
        command: String,
    },

    #[error("failed to spawn '{tool}'")]
    #[diagnostic(code(prober::tool_spawn))]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' did not finish within {seconds}s and was killed")]
    #[diagnostic(
        code(prober::tool_timeout),
        help("raise `timeout_secs` in the [tools] section of prober.toml")
    )]
    ToolTimeout { tool: String, seconds: u64 },

    #[error("filesystem operation failed on '{path}'")]
    #[diagnostic(code(prober::filesystem))]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template '{path}': {message}")]
    #[diagnostic(code(prober::template))]
    Template { path: PathBuf, message: String },

    #[error("failed to read '{path}'")]
    #[diagnostic(help("run from the repository root or pass `--config <path>`"))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse prober.toml")]
    #[diagnostic(code(prober::config_parse))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{language} generation failed for '{unique_name}'")]
    #[diagnostic(code(prober::language_failed))]
    LanguageFailed {
        language: Language,
        unique_name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{language} client for '{unique_name}' did not build")]
    #[diagnostic(code(prober::test_failure))]
    TestFailure {
        language: Language,
        unique_name: String,
        #[source]
        source: Box<Error>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Create an invalid input error for a schema argument
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// Create a missing tool error
    pub fn missing_tool(tool: impl Into<String>) -> Box<Self> {
        Box::new(Error::MissingTool { tool: tool.into() })
    }

    /// Create a filesystem error for the given path
    pub fn filesystem(path: &Path, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Filesystem {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Create a template error
    pub fn template(path: &Path, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Template {
            path: path.to_path_buf(),
            message: message.into(),
        })
    }

    /// Create a config parse error from a toml error with source context
    pub fn config_parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Name of the external tool involved in this error, if any.
    pub fn tool(&self) -> Option<&str> {
        match self {
            Error::MissingTool { tool }
            | Error::ToolInvocation { tool, .. }
            | Error::ToolSpawn { tool, .. }
            | Error::ToolTimeout { tool, .. } => Some(tool),
            Error::LanguageFailed { source, .. } | Error::TestFailure { source, .. } => {
                source.tool()
            }
            _ => None,
        }
    }
}
