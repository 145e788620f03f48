//! Impact notifications produced by the external analysis tool.

use crate::domain::callgraph::{build_tree, CallGraphNode};
use crate::domain::path::path_frames;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A record asserting that a use case may be impacted by a code change.
///
/// Two record shapes exist: a free-text one and a detailed one whose
/// description is generated from its fields. Both carry a raw call-graph
/// path, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    Detailed {
        use_case: String,
        method: String,
        code_file: String,
        code_line: u32,
        #[serde(default)]
        call_graph_path: String,
    },
    #[serde(rename_all = "camelCase")]
    Minimal {
        description: String,
        #[serde(default)]
        call_graph_path: String,
    },
}

impl Notification {
    pub fn minimal(description: impl Into<String>, call_graph_path: impl Into<String>) -> Self {
        Self::Minimal {
            description: description.into(),
            call_graph_path: call_graph_path.into(),
        }
    }

    pub fn detailed(
        use_case: impl Into<String>,
        method: impl Into<String>,
        code_file: impl Into<String>,
        code_line: u32,
        call_graph_path: impl Into<String>,
    ) -> Self {
        Self::Detailed {
            use_case: use_case.into(),
            method: method.into(),
            code_file: code_file.into(),
            code_line,
            call_graph_path: call_graph_path.into(),
        }
    }

    /// Human-readable impact message.
    pub fn description(&self) -> Cow<'_, str> {
        match self {
            Self::Minimal { description, .. } => Cow::Borrowed(description),
            Self::Detailed {
                use_case,
                method,
                code_file,
                code_line,
                ..
            } => Cow::Owned(format!(
                "Use case '{}' may be affected by change in method {} in {}, {}.",
                use_case, method, code_file, code_line
            )),
        }
    }

    pub fn call_graph_path(&self) -> &str {
        match self {
            Self::Minimal { call_graph_path, .. } | Self::Detailed { call_graph_path, .. } => {
                call_graph_path
            }
        }
    }

    pub fn use_case(&self) -> Option<&str> {
        match self {
            Self::Detailed { use_case, .. } => Some(use_case.as_str()),
            Self::Minimal { .. } => None,
        }
    }

    pub fn path_frames(&self) -> Vec<String> {
        path_frames(self.call_graph_path())
    }

    /// Tree for display; `None` when the path has no frames.
    pub fn call_tree(&self) -> Option<CallGraphNode> {
        build_tree(&self.path_frames())
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.description(), self.call_graph_path())
    }
}
