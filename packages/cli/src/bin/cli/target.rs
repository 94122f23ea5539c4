// ABOUTME: Resolves the ECS container a command operates on
// ABOUTME: Flags are used when given, otherwise the operator picks cluster, service, task and container

use anyhow::Result;
use berth_cloud::{Container, EcsClient};
use clap::Args;
use std::process;

use super::select::{confirm, select_container, select_one};

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// ECS cluster name
    #[arg(short, long)]
    pub cluster: Option<String>,

    /// ECS service name
    #[arg(short, long)]
    pub service: Option<String>,

    /// Container name
    #[arg(short = 'r', long)]
    pub container: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Target {
    pub cluster: String,
    pub service: String,
    pub task_arn: String,
    pub container: Container,
}

pub async fn resolve_target(ecs: &EcsClient, args: &TargetArgs) -> Result<Target> {
    let cluster = match &args.cluster {
        Some(cluster) => cluster.clone(),
        None => {
            let names = ecs.list_clusters().await?.into_iter().map(|c| c.name).collect();
            select_one("Select a cluster", names)?
        }
    };

    let service = match &args.service {
        Some(service) => service.clone(),
        None => {
            let names = ecs
                .list_services(&cluster)
                .await?
                .into_iter()
                .map(|s| s.name)
                .collect();
            select_one("Select a service", names)?
        }
    };

    let task_arn = select_task(ecs, &cluster, &service).await?;

    let container = match &args.container {
        Some(name) => ecs.describe_container(&cluster, &task_arn, name).await?,
        None => select_container(ecs.describe_containers(&cluster, &task_arn).await?)?,
    };

    Ok(Target {
        cluster,
        service,
        task_arn,
        container,
    })
}

async fn select_task(ecs: &EcsClient, cluster: &str, service: &str) -> Result<String> {
    let mut tasks = ecs.list_tasks(cluster, service).await?;

    match tasks.len() {
        0 => {
            if confirm("No tasks running. Start one?")? {
                ecs.start_service(cluster, service).await?;
                println!("Set desired count of service to 1. Could take a few minutes to start.");
            }
            process::exit(1);
        }
        1 => Ok(tasks.remove(0)),
        _ => select_one("Multiple tasks running, please select one", tasks),
    }
}
