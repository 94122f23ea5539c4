use std::collections::HashMap;

use berth_logs::LogTarget;

use crate::error::{CloudError, CloudResult};

/// Task groups for service-launched tasks are `service:<name>`
const GROUP_SERVICE_PREFIX: &str = "service:";

const AWSLOGS_GROUP: &str = "awslogs-group";
const AWSLOGS_STREAM_PREFIX: &str = "awslogs-stream-prefix";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub arn: String,
}

/// A running task and its containers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub arn: String,
    pub definition_arn: String,
    pub cluster_arn: String,
    pub cluster_name: String,
    pub service_name: String,
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub arn: String,
    pub cluster_arn: String,
    pub cluster_name: String,
    pub service_name: String,
    pub task_arn: String,
    pub task_definition_arn: String,
    pub runtime_id: String,
    pub health: String,
    pub last_status: String,
}

impl Container {
    /// Session Manager target for this container: `ecs:<cluster>_<task-id>_<runtime-id>`
    pub fn ssm_target(&self) -> CloudResult<String> {
        if self.runtime_id.is_empty() {
            return Err(CloudError::ContainerNotReady(self.name.clone()));
        }

        Ok(format!(
            "ecs:{}_{}_{}",
            self.cluster_name,
            arn_name(&self.task_arn),
            self.runtime_id
        ))
    }
}

impl From<&aws_sdk_ecs::types::Task> for Task {
    fn from(task: &aws_sdk_ecs::types::Task) -> Self {
        let cluster_arn = task.cluster_arn().unwrap_or_default().to_string();
        let cluster_name = arn_name(&cluster_arn).to_string();
        let service_name = service_from_group(task.group().unwrap_or_default()).to_string();
        let definition_arn = task.task_definition_arn().unwrap_or_default().to_string();

        let containers = task
            .containers()
            .iter()
            .map(|c| Container {
                name: c.name().unwrap_or_default().to_string(),
                arn: c.container_arn().unwrap_or_default().to_string(),
                cluster_arn: cluster_arn.clone(),
                cluster_name: cluster_name.clone(),
                service_name: service_name.clone(),
                task_arn: c.task_arn().unwrap_or_default().to_string(),
                task_definition_arn: definition_arn.clone(),
                runtime_id: c.runtime_id().unwrap_or_default().to_string(),
                health: c
                    .health_status()
                    .map(|h| h.as_str().to_string())
                    .unwrap_or_default(),
                last_status: c.last_status().unwrap_or_default().to_string(),
            })
            .collect();

        Self {
            arn: task.task_arn().unwrap_or_default().to_string(),
            definition_arn,
            cluster_arn,
            cluster_name,
            service_name,
            containers,
        }
    }
}

/// Last `/`-separated segment of an ARN
pub fn arn_name(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}

/// Service name from a task group
pub fn service_from_group(group: &str) -> &str {
    group.strip_prefix(GROUP_SERVICE_PREFIX).unwrap_or(group)
}

/// Log target from a container definition's awslogs options
///
/// With an `awslogs-stream-prefix`, streams are named
/// `<prefix>/<container>/<task-id>`, so the query narrows to `<prefix>/<container>`.
pub fn log_target_from_options(
    container: &str,
    options: Option<&HashMap<String, String>>,
) -> CloudResult<LogTarget> {
    let options = options.ok_or_else(|| CloudError::MissingLogConfiguration(container.to_string()))?;

    let group = options
        .get(AWSLOGS_GROUP)
        .filter(|g| !g.is_empty())
        .ok_or_else(|| CloudError::MissingLogConfiguration(container.to_string()))?;

    let target = LogTarget::new(group.clone());
    Ok(match options.get(AWSLOGS_STREAM_PREFIX) {
        Some(prefix) if !prefix.is_empty() => {
            target.with_stream_prefix(format!("{}/{}", prefix, container))
        }
        _ => target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ecs::types::{self as ecs, HealthStatus};
    use pretty_assertions::assert_eq;

    fn container(runtime_id: &str) -> Container {
        Container {
            name: "web".to_string(),
            arn: "arn:aws:ecs:us-east-1:123456789012:container/prod/abc/def".to_string(),
            cluster_arn: "arn:aws:ecs:us-east-1:123456789012:cluster/prod".to_string(),
            cluster_name: "prod".to_string(),
            service_name: "api".to_string(),
            task_arn: "arn:aws:ecs:us-east-1:123456789012:task/prod/0f1e2d3c4b5a".to_string(),
            task_definition_arn: "arn:aws:ecs:us-east-1:123456789012:task-definition/api:7"
                .to_string(),
            runtime_id: runtime_id.to_string(),
            health: "HEALTHY".to_string(),
            last_status: "RUNNING".to_string(),
        }
    }

    #[test]
    fn test_arn_name() {
        assert_eq!(
            arn_name("arn:aws:ecs:us-east-1:123456789012:cluster/prod"),
            "prod"
        );
        assert_eq!(arn_name("plain"), "plain");
    }

    #[test]
    fn test_service_from_group() {
        assert_eq!(service_from_group("service:api"), "api");
        assert_eq!(service_from_group("family:batch"), "family:batch");
    }

    #[test]
    fn test_ssm_target() {
        assert_eq!(
            container("0f1e2d3c4b5a-1234567890").ssm_target().unwrap(),
            "ecs:prod_0f1e2d3c4b5a_0f1e2d3c4b5a-1234567890"
        );
    }

    #[test]
    fn test_ssm_target_requires_runtime_id() {
        let err = container("").ssm_target().unwrap_err();
        assert!(matches!(err, CloudError::ContainerNotReady(_)));
    }

    #[test]
    fn test_log_target_with_stream_prefix() {
        let options = HashMap::from([
            ("awslogs-group".to_string(), "/ecs/api".to_string()),
            ("awslogs-region".to_string(), "us-east-1".to_string()),
            ("awslogs-stream-prefix".to_string(), "ecs".to_string()),
        ]);

        let target = log_target_from_options("web", Some(&options)).unwrap();
        assert_eq!(target.group, "/ecs/api");
        assert_eq!(target.stream_prefix.as_deref(), Some("ecs/web"));
    }

    #[test]
    fn test_log_target_without_stream_prefix() {
        let options = HashMap::from([("awslogs-group".to_string(), "/ecs/api".to_string())]);
        let target = log_target_from_options("web", Some(&options)).unwrap();
        assert_eq!(target.stream_prefix, None);
    }

    #[test]
    fn test_log_target_requires_group() {
        let options = HashMap::from([("awslogs-stream-prefix".to_string(), "ecs".to_string())]);
        assert!(matches!(
            log_target_from_options("web", Some(&options)),
            Err(CloudError::MissingLogConfiguration(_))
        ));
        assert!(matches!(
            log_target_from_options("web", None),
            Err(CloudError::MissingLogConfiguration(_))
        ));
    }

    #[test]
    fn test_task_conversion() {
        let sdk_task = ecs::Task::builder()
            .task_arn("arn:aws:ecs:us-east-1:123456789012:task/prod/0f1e2d3c4b5a")
            .cluster_arn("arn:aws:ecs:us-east-1:123456789012:cluster/prod")
            .group("service:api")
            .task_definition_arn("arn:aws:ecs:us-east-1:123456789012:task-definition/api:7")
            .containers(
                ecs::Container::builder()
                    .name("web")
                    .task_arn("arn:aws:ecs:us-east-1:123456789012:task/prod/0f1e2d3c4b5a")
                    .runtime_id("0f1e2d3c4b5a-1234567890")
                    .health_status(HealthStatus::Healthy)
                    .last_status("RUNNING")
                    .build(),
            )
            .build();

        let task = Task::from(&sdk_task);
        assert_eq!(task.cluster_name, "prod");
        assert_eq!(task.service_name, "api");
        assert_eq!(task.containers.len(), 1);

        let web = &task.containers[0];
        assert_eq!(web.cluster_name, "prod");
        assert_eq!(web.service_name, "api");
        assert_eq!(web.health, "HEALTHY");
        assert_eq!(web.last_status, "RUNNING");
        assert_eq!(
            web.task_definition_arn,
            "arn:aws:ecs:us-east-1:123456789012:task-definition/api:7"
        );
        assert_eq!(
            web.ssm_target().unwrap(),
            "ecs:prod_0f1e2d3c4b5a_0f1e2d3c4b5a-1234567890"
        );
    }
}
