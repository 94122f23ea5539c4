// ABOUTME: Interactive prompts used by the ECS commands
// ABOUTME: Type-to-filter selection lists and yes/no confirmations via inquire

use std::fmt;

use anyhow::{bail, Result};
use berth_cloud::Container;
use colored::*;
use inquire::{Confirm, Select};

const PAGE_SIZE: usize = 10;

/// Pick one string; a single candidate is still shown so the operator sees it
pub fn select_one(label: &str, items: Vec<String>) -> Result<String> {
    if items.is_empty() {
        bail!("Nothing to choose from for \"{}\"", label);
    }

    Ok(Select::new(label, items).with_page_size(PAGE_SIZE).prompt()?)
}

pub fn confirm(label: &str) -> Result<bool> {
    Ok(Confirm::new(label).with_default(false).prompt()?)
}

/// Container list entry showing status and health next to the name
struct ContainerChoice(Container);

impl fmt::Display for ContainerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let health = if self.0.health.is_empty() {
            "UNKNOWN"
        } else {
            self.0.health.as_str()
        };
        let health = match health {
            "HEALTHY" => health.green(),
            "UNHEALTHY" => health.red(),
            _ => health.dimmed(),
        };
        write!(f, "{} ({}, {})", self.0.name, self.0.last_status, health)
    }
}

pub fn select_container(containers: Vec<Container>) -> Result<Container> {
    if containers.is_empty() {
        bail!("Task has no containers");
    }

    let mut choices: Vec<ContainerChoice> = containers.into_iter().map(ContainerChoice).collect();
    choices.sort_by(|a, b| a.0.name.cmp(&b.0.name));

    let choice = Select::new("Select a container", choices)
        .with_page_size(PAGE_SIZE)
        .prompt()?;
    Ok(choice.0)
}
