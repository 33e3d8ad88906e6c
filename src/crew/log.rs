//! Agent execution log and the roll-up report written next to it.
use super::Department;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

pub const AGENT_LOGS_DIR: &str = "Agent_Logs";
pub const EXECUTION_REPORT_FILE: &str = "execution_report.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Failed,
}

/// One agent consultation for one shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLog {
    pub agent_name: String,
    pub agent_role: String,
    pub timestamp: String,
    pub scene_number: u32,
    pub shot_number: u32,
    pub input_data: Value,
    pub output_data: Value,
    /// Seconds.
    pub execution_time: f64,
    pub status: ExecutionStatus,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub role: String,
    pub executions: usize,
    pub avg_execution_time: f64,
    /// Percent of executions that succeeded.
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneCoverage {
    pub total_agent_executions: usize,
    pub agents_involved: Vec<String>,
    pub total_execution_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub total_execution_time: f64,
    pub average_execution_time: f64,
    pub fastest_agent: Option<String>,
    pub slowest_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEntry {
    pub agent: String,
    pub scene: u32,
    pub shot: u32,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionReport {
    pub timestamp: String,
    pub total_executions: usize,
    pub agents_summary: BTreeMap<String, AgentSummary>,
    #[serde(serialize_with = "scene_keys")]
    pub scene_coverage: BTreeMap<u32, SceneCoverage>,
    pub performance_metrics: PerformanceMetrics,
    pub errors: Vec<ErrorEntry>,
}

/// Every agent call made while processing one script, in call order.
#[derive(Debug, Default)]
pub struct AgentLogBook {
    entries: Vec<(Department, AgentLog)>,
}

impl AgentLogBook {
    pub fn record(&mut self, department: Department, log: AgentLog) {
        self.entries.push((department, log));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, log)| log.status == ExecutionStatus::Failed)
            .count()
    }

    /// `(relative path, log)` for every entry, under `Agent_Logs/<key>/`.
    pub fn log_files(&self) -> impl Iterator<Item = (String, &AgentLog)> {
        self.entries.iter().map(|(department, log)| {
            (
                format!(
                    "{AGENT_LOGS_DIR}/{}/scene{}_shot{}.json",
                    department.key(),
                    log.scene_number,
                    log.shot_number
                ),
                log,
            )
        })
    }

    pub fn report(&self, timestamp: &str) -> ExecutionReport {
        let mut agents_summary = BTreeMap::new();
        for department in Department::ALL {
            let logs: Vec<&AgentLog> = self
                .entries
                .iter()
                .filter(|(entry, _)| *entry == department)
                .map(|(_, log)| log)
                .collect();
            if logs.is_empty() {
                continue;
            }
            let succeeded = logs
                .iter()
                .filter(|log| log.status == ExecutionStatus::Success)
                .count();
            agents_summary.insert(
                department.key().to_string(),
                AgentSummary {
                    name: department.name().to_string(),
                    role: department.role().to_string(),
                    executions: logs.len(),
                    avg_execution_time: total_time(logs.iter().copied()) / logs.len() as f64,
                    success_rate: succeeded as f64 / logs.len() as f64 * 100.0,
                },
            );
        }

        let mut scene_coverage: BTreeMap<u32, SceneCoverage> = BTreeMap::new();
        for (_, log) in &self.entries {
            let coverage = scene_coverage
                .entry(log.scene_number)
                .or_insert_with(|| SceneCoverage {
                    total_agent_executions: 0,
                    agents_involved: Vec::new(),
                    total_execution_time: 0.0,
                });
            coverage.total_agent_executions += 1;
            coverage.total_execution_time += log.execution_time;
            crate::util::push_unique(&mut coverage.agents_involved, &log.agent_name);
        }

        let logs = || self.entries.iter().map(|(_, log)| log);
        let performance_metrics = if self.entries.is_empty() {
            PerformanceMetrics::default()
        } else {
            let total = total_time(logs());
            PerformanceMetrics {
                total_execution_time: total,
                average_execution_time: total / self.entries.len() as f64,
                fastest_agent: logs()
                    .min_by(|a, b| a.execution_time.total_cmp(&b.execution_time))
                    .map(|log| log.agent_name.clone()),
                slowest_agent: logs()
                    .max_by(|a, b| a.execution_time.total_cmp(&b.execution_time))
                    .map(|log| log.agent_name.clone()),
            }
        };

        let errors = logs()
            .filter(|log| !log.errors.is_empty())
            .map(|log| ErrorEntry {
                agent: log.agent_name.clone(),
                scene: log.scene_number,
                shot: log.shot_number,
                errors: log.errors.clone(),
            })
            .collect();

        ExecutionReport {
            timestamp: timestamp.to_string(),
            total_executions: self.entries.len(),
            agents_summary,
            scene_coverage,
            performance_metrics,
            errors,
        }
    }
}

fn total_time<'a>(logs: impl Iterator<Item = &'a AgentLog>) -> f64 {
    logs.map(|log| log.execution_time).sum()
}

fn scene_keys<S: Serializer>(
    coverage: &BTreeMap<u32, SceneCoverage>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(coverage.len()))?;
    for (scene, entry) in coverage {
        map.serialize_entry(&format!("scene_{scene}"), entry)?;
    }
    map.end()
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
