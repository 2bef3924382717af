// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock timesheet subsystem and its tools.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, Utc};
use dashmap::DashMap;
use deskmate_core::DeskmateError;
use serde::{Deserialize, Serialize};

use crate::tool::{now_rfc3339, prefixed_id, today, Tool, ToolOutput};

const PROJECTS: [&str; 6] = [
    "Project Alpha",
    "Project Beta",
    "Internal",
    "Training",
    "Meetings",
    "General",
];

const WEEKLY_TARGET_HOURS: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub id: String,
    pub employee_id: String,
    pub date: String,
    pub project: String,
    pub hours: f64,
    pub description: String,
    pub status: String,
    pub created_at: String,
}

/// In-memory timesheet system keyed by employee id.
#[derive(Default)]
pub struct TimesheetSystem {
    entries: DashMap<String, Vec<TimesheetEntry>>,
}

impl TimesheetSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a timesheet entry. Missing fields default: date today, project
    /// "General", hours 8, description "Regular work".
    pub fn log(&self, employee_id: &str, args: &serde_json::Value) -> TimesheetEntry {
        let entry = TimesheetEntry {
            id: prefixed_id("TS"),
            employee_id: employee_id.to_string(),
            date: args
                .get("date")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(today),
            project: args
                .get("project")
                .and_then(|v| v.as_str())
                .unwrap_or("General")
                .to_string(),
            hours: args.get("hours").and_then(|v| v.as_f64()).unwrap_or(8.0),
            description: args
                .get("description")
                .and_then(|v| v.as_str())
                .unwrap_or("Regular work")
                .to_string(),
            status: "LOGGED".to_string(),
            created_at: now_rfc3339(),
        };

        self.entries
            .entry(employee_id.to_string())
            .or_default()
            .push(entry.clone());
        entry
    }

    /// Summarizes the current week (starting Sunday): entries, total hours,
    /// and how many of the 40 target hours remain.
    pub fn weekly_summary(&self, employee_id: &str) -> serde_json::Value {
        let now = Utc::now();
        let week_start = (now - Duration::days(now.weekday().num_days_from_sunday() as i64))
            .format("%Y-%m-%d")
            .to_string();

        let entries: Vec<TimesheetEntry> = self
            .entries
            .get(employee_id)
            .map(|e| e.clone())
            .unwrap_or_default()
            .into_iter()
            .filter(|e| e.date.as_str() >= week_start.as_str())
            .collect();

        let total_hours: f64 = entries.iter().map(|e| e.hours).sum();
        serde_json::json!({
            "weekStart": week_start,
            "entries": entries,
            "totalHours": total_hours,
            "remainingHours": (WEEKLY_TARGET_HOURS - total_hours).max(0.0),
        })
    }

    pub fn projects(&self) -> Vec<&'static str> {
        PROJECTS.to_vec()
    }
}

/// `log_timesheet` tool.
pub struct LogTimesheetTool(pub Arc<TimesheetSystem>);

#[async_trait]
impl Tool for LogTimesheetTool {
    fn name(&self) -> &str {
        "log_timesheet"
    }

    fn description(&self) -> &str {
        "Log working hours in the timesheet"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "date": { "type": "string", "description": "Date for the entry (YYYY-MM-DD)" },
                "project": { "type": "string", "description": "Project name" },
                "hours": { "type": "number", "description": "Number of hours worked" },
                "description": { "type": "string", "description": "What was worked on" }
            },
            "required": ["hours"]
        })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.log(employee_id, &input)))
    }
}

/// `get_timesheet_summary` tool.
pub struct GetTimesheetSummaryTool(pub Arc<TimesheetSystem>);

#[async_trait]
impl Tool for GetTimesheetSummaryTool {
    fn name(&self) -> &str {
        "get_timesheet_summary"
    }

    fn description(&self) -> &str {
        "Get timesheet summary for the current week"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        _input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.weekly_summary(employee_id)))
    }
}

/// `get_projects` tool.
pub struct GetProjectsTool(pub Arc<TimesheetSystem>);

#[async_trait]
impl Tool for GetProjectsTool {
    fn name(&self) -> &str {
        "get_projects"
    }

    fn description(&self) -> &str {
        "Get the list of projects available for timesheet logging"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(
        &self,
        _employee_id: &str,
        _input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.projects()))
    }
}
