use std::collections::HashMap;

use crate::error::DashboardError;
use crate::models::{Classification, Coordinate, Dependency, ModuleStatus};

/// Classified dependencies keyed by coordinate, in classpath order.
#[derive(Debug, Default)]
pub struct DependencyRegistry {
    entries: HashMap<Coordinate, Dependency>,
    order: Vec<Coordinate>,
}

/// Dependencies sharing one [`ModuleStatus`].
#[derive(Debug)]
pub struct StatusGroup<'a> {
    pub status: ModuleStatus,
    pub dependencies: Vec<&'a Dependency>,
}

impl StatusGroup<'_> {
    pub fn count(&self) -> usize {
        self.dependencies.len()
    }
}

/// Per-status partition of a registry.
#[derive(Debug)]
pub struct StatusSummary<'a> {
    /// One group per status, in [`ModuleStatus::ALL`] order.
    pub groups: Vec<StatusGroup<'a>>,
    pub unreadable: Vec<&'a Dependency>,
    pub total: usize,
}

impl StatusSummary<'_> {
    /// `round(count / total * 100)`; the three main buckets may not add up to 100.
    pub fn percentage(&self, count: usize) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (count as f64 / self.total as f64 * 100.0).round() as u32
    }

    pub fn count(&self, status: ModuleStatus) -> usize {
        self.groups
            .iter()
            .find(|g| g.status == status)
            .map(StatusGroup::count)
            .unwrap_or(0)
    }
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dependency.
    ///
    /// Re-adding a coordinate with the same classification is a no-op; a
    /// conflicting classification is a [`DashboardError::DuplicateCoordinate`].
    pub fn add(&mut self, dependency: Dependency) -> Result<(), DashboardError> {
        let key = dependency.coordinate().clone();
        if let Some(existing) = self.entries.get(&key) {
            if existing.classification == dependency.classification {
                return Ok(());
            }
            return Err(DashboardError::DuplicateCoordinate {
                coordinate: key.to_string(),
            });
        }
        self.order.push(key.clone());
        self.entries.insert(key, dependency);
        Ok(())
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Dependencies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.order.iter().filter_map(|c| self.entries.get(c))
    }

    pub fn group_by_status(&self) -> StatusSummary<'_> {
        let mut groups: Vec<StatusGroup<'_>> = ModuleStatus::ALL
            .iter()
            .map(|&status| StatusGroup {
                status,
                dependencies: Vec::new(),
            })
            .collect();
        let mut unreadable = Vec::new();

        for dep in self.iter() {
            match &dep.classification {
                Classification::Module(status) => {
                    if let Some(group) = groups.iter_mut().find(|g| g.status == *status) {
                        group.dependencies.push(dep);
                    }
                }
                Classification::Unreadable { .. } => unreadable.push(dep),
            }
        }

        StatusSummary {
            groups,
            unreadable,
            total: self.total(),
        }
    }
}
