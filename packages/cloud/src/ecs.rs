//! ECS workload discovery

use aws_config::SdkConfig;
use aws_sdk_ecs::Client;
use berth_logs::LogTarget;
use tracing::{debug, info};

use crate::error::{CloudError, CloudResult};
use crate::types::{arn_name, log_target_from_options, Cluster, Container, Service, Task};

/// Thin wrapper over the ECS API returning Berth's own types
#[derive(Debug, Clone)]
pub struct EcsClient {
    client: Client,
}

impl EcsClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// All clusters visible to the current credentials
    pub async fn list_clusters(&self) -> CloudResult<Vec<Cluster>> {
        let mut pages = self.client.list_clusters().into_paginator().send();

        let mut clusters = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(CloudError::api)?;
            clusters.extend(page.cluster_arns().iter().map(|arn| Cluster {
                name: arn_name(arn).to_string(),
                arn: arn.clone(),
            }));
        }

        debug!("Found {} clusters", clusters.len());
        Ok(clusters)
    }

    pub async fn list_services(&self, cluster: &str) -> CloudResult<Vec<Service>> {
        let mut pages = self
            .client
            .list_services()
            .cluster(cluster)
            .into_paginator()
            .send();

        let mut services = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(CloudError::api)?;
            services.extend(page.service_arns().iter().map(|arn| Service {
                name: arn_name(arn).to_string(),
                arn: arn.clone(),
            }));
        }

        debug!("Found {} services in {}", services.len(), cluster);
        Ok(services)
    }

    /// Task ARNs currently running for a service
    pub async fn list_tasks(&self, cluster: &str, service: &str) -> CloudResult<Vec<String>> {
        let mut pages = self
            .client
            .list_tasks()
            .cluster(cluster)
            .service_name(service)
            .into_paginator()
            .send();

        let mut tasks = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(CloudError::api)?;
            tasks.extend(page.task_arns().iter().cloned());
        }

        debug!("Found {} tasks for {}/{}", tasks.len(), cluster, service);
        Ok(tasks)
    }

    pub async fn describe_tasks(&self, cluster: &str, task_arns: &[String]) -> CloudResult<Vec<Task>> {
        let output = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .set_tasks(Some(task_arns.to_vec()))
            .send()
            .await
            .map_err(CloudError::api)?;

        Ok(output.tasks().iter().map(Task::from).collect())
    }

    pub async fn describe_task(&self, cluster: &str, task_arn: &str) -> CloudResult<Task> {
        self.describe_tasks(cluster, &[task_arn.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                CloudError::not_found(format!(
                    "no tasks found for cluster {} with task ARN {}",
                    cluster, task_arn
                ))
            })
    }

    pub async fn describe_containers(&self, cluster: &str, task_arn: &str) -> CloudResult<Vec<Container>> {
        Ok(self.describe_task(cluster, task_arn).await?.containers)
    }

    /// Container of a task by name, compared case-insensitively
    pub async fn describe_container(
        &self,
        cluster: &str,
        task_arn: &str,
        name: &str,
    ) -> CloudResult<Container> {
        self.describe_containers(cluster, task_arn)
            .await?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                CloudError::not_found(format!(
                    "no container with name '{}' in cluster '{}'",
                    name, cluster
                ))
            })
    }

    /// Where a container's logs go, from its task definition's log configuration
    pub async fn log_target(&self, container: &Container) -> CloudResult<LogTarget> {
        let output = self
            .client
            .describe_task_definition()
            .task_definition(&container.task_definition_arn)
            .send()
            .await
            .map_err(CloudError::api)?;

        let definition = output
            .task_definition()
            .and_then(|td| {
                td.container_definitions()
                    .iter()
                    .find(|cd| cd.name() == Some(container.name.as_str()))
            })
            .ok_or_else(|| {
                CloudError::not_found(format!(
                    "container {} in task definition {}",
                    container.name, container.task_definition_arn
                ))
            })?;

        let options = definition
            .log_configuration()
            .and_then(|lc| lc.options());
        log_target_from_options(&container.name, options)
    }

    /// Scale a service to one task
    pub async fn start_service(&self, cluster: &str, service: &str) -> CloudResult<()> {
        self.client
            .update_service()
            .cluster(cluster)
            .service(service)
            .desired_count(1)
            .send()
            .await
            .map_err(CloudError::api)?;

        info!("Set desired count of {}/{} to 1", cluster, service);
        Ok(())
    }
}
