use serde::{Deserialize, Serialize};
use crate::domain::callgraph::CallGraphNode;
use crate::domain::notification::Notification;
use crate::domain::use_case::ProjectConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationDto {
    pub index: usize,
    pub description: String,
    pub use_case: Option<String>,
    pub frames: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TreeNodeDto {
    pub label: String,
    pub children: Vec<TreeNodeDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UseCaseDto {
    pub index: usize,
    pub name: String,
    pub methods: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDto {
    pub project_directory: String,
    pub use_cases: Vec<UseCaseDto>,
}

impl NotificationDto {
    pub fn new(index: usize, notification: &Notification) -> Self {
        NotificationDto {
            index,
            description: notification.description().into_owned(),
            use_case: notification.use_case().map(str::to_string),
            frames: notification.path_frames(),
        }
    }
}

impl From<&CallGraphNode> for TreeNodeDto {
    fn from(node: &CallGraphNode) -> Self {
        TreeNodeDto {
            label: node.label.clone(),
            children: node.children.iter().map(TreeNodeDto::from).collect(),
        }
    }
}

impl From<&ProjectConfig> for ProjectDto {
    fn from(config: &ProjectConfig) -> Self {
        let use_cases = config
            .use_cases
            .iter()
            .enumerate()
            .map(|(index, uc)| UseCaseDto {
                index,
                name: uc.name.clone(),
                methods: uc.methods.clone(),
            })
            .collect();

        ProjectDto {
            project_directory: config.project_directory().to_string(),
            use_cases,
        }
    }
}
