// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock expense reporting subsystem and its tools.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use deskmate_core::DeskmateError;
use serde::{Deserialize, Serialize};

use crate::tool::{now_rfc3339, prefixed_id, today, Tool, ToolOutput};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    pub id: String,
    pub employee_id: String,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub status: String,
    pub approver: String,
    pub receipts: Vec<String>,
    pub created_at: String,
}

/// In-memory expense report system keyed by employee id.
#[derive(Default)]
pub struct ExpenseSystem {
    reports: DashMap<String, Vec<ExpenseReport>>,
}

impl ExpenseSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a report. Every submission lands in `PENDING_APPROVAL`.
    pub fn submit(&self, employee_id: &str, args: &serde_json::Value) -> ExpenseReport {
        let report = ExpenseReport {
            id: prefixed_id("EXP"),
            employee_id: employee_id.to_string(),
            category: args
                .get("category")
                .and_then(|v| v.as_str())
                .unwrap_or("Travel")
                .to_string(),
            amount: args.get("amount").and_then(|v| v.as_f64()).unwrap_or(0.0),
            description: args
                .get("description")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            date: args
                .get("date")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(today),
            status: "PENDING_APPROVAL".to_string(),
            approver: "Manager".to_string(),
            receipts: Vec::new(),
            created_at: now_rfc3339(),
        };

        self.reports
            .entry(employee_id.to_string())
            .or_default()
            .push(report.clone());
        report
    }

    /// Returns reports, optionally narrowed to a single status.
    pub fn reports(&self, employee_id: &str, status: Option<&str>) -> Vec<ExpenseReport> {
        let all = self
            .reports
            .get(employee_id)
            .map(|r| r.clone())
            .unwrap_or_default();
        match status {
            Some(status) => all.into_iter().filter(|r| r.status == status).collect(),
            None => all,
        }
    }
}

/// `submit_expense` tool.
pub struct SubmitExpenseTool(pub Arc<ExpenseSystem>);

#[async_trait]
impl Tool for SubmitExpenseTool {
    fn name(&self) -> &str {
        "submit_expense"
    }

    fn description(&self) -> &str {
        "Submit an expense report for reimbursement"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "enum": ["Travel", "Meals", "Office Supplies", "Client Entertainment", "Training", "Equipment", "Other"],
                    "description": "Expense category"
                },
                "amount": { "type": "number", "description": "Amount in rupees" },
                "description": { "type": "string", "description": "Description of the expense" },
                "date": { "type": "string", "description": "Date of expense (YYYY-MM-DD)" }
            },
            "required": ["category", "amount", "description"]
        })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.submit(employee_id, &input)))
    }
}

/// `get_expense_reports` tool.
pub struct GetExpenseReportsTool(pub Arc<ExpenseSystem>);

#[async_trait]
impl Tool for GetExpenseReportsTool {
    fn name(&self) -> &str {
        "get_expense_reports"
    }

    fn description(&self) -> &str {
        "Get expense reports for the employee, optionally filtered by status"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "enum": ["PENDING_APPROVAL", "APPROVED", "REJECTED"],
                    "description": "Filter by status (optional)"
                }
            }
        })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        let status = input.get("status").and_then(|v| v.as_str());
        Ok(ToolOutput::json(&self.0.reports(employee_id, status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_applies_defaults() {
        let system = ExpenseSystem::new();
        let report = system.submit("EMP001", &serde_json::json!({}));

        assert!(report.id.starts_with("EXP-"));
        assert_eq!(report.category, "Travel");
        assert_eq!(report.amount, 0.0);
        assert_eq!(report.description, "");
        assert_eq!(report.status, "PENDING_APPROVAL");
        assert_eq!(report.approver, "Manager");
        assert!(report.receipts.is_empty());
    }

    #[test]
    fn submit_honors_explicit_arguments() {
        let system = ExpenseSystem::new();
        let report = system.submit(
            "EMP001",
            &serde_json::json!({
                "category": "Food",
                "amount": 450.5,
                "description": "Team lunch",
                "date": "2026-08-20"
            }),
        );
        assert_eq!(report.category, "Food");
        assert_eq!(report.amount, 450.5);
        assert_eq!(report.description, "Team lunch");
        assert_eq!(report.date, "2026-08-20");
    }

    #[test]
    fn reports_filter_by_status() {
        let system = ExpenseSystem::new();
        system.submit("EMP001", &serde_json::json!({ "amount": 100 }));
        system.submit("EMP001", &serde_json::json!({ "amount": 200 }));

        assert_eq!(system.reports("EMP001", None).len(), 2);
        assert_eq!(
            system.reports("EMP001", Some("PENDING_APPROVAL")).len(),
            2
        );
        assert!(system.reports("EMP001", Some("APPROVED")).is_empty());
        assert!(system.reports("EMP002", None).is_empty());
    }

    #[test]
    fn submit_schema_lists_the_full_category_taxonomy() {
        let system = Arc::new(ExpenseSystem::new());
        let schema = SubmitExpenseTool(system).parameters_schema();

        let categories = schema["properties"]["category"]["enum"].as_array().unwrap();
        let expected = [
            "Travel",
            "Meals",
            "Office Supplies",
            "Client Entertainment",
            "Training",
            "Equipment",
            "Other",
        ];
        assert_eq!(categories.len(), expected.len());
        for category in expected {
            assert!(categories.contains(&serde_json::json!(category)));
        }
        assert_eq!(
            schema["required"],
            serde_json::json!(["category", "amount", "description"])
        );
    }

    #[tokio::test]
    async fn submit_expense_tool_returns_camel_case_record() {
        let system = Arc::new(ExpenseSystem::new());
        let tool = SubmitExpenseTool(system);
        let output = tool
            .invoke(
                "EMP001",
                serde_json::json!({ "category": "Other", "amount": 99, "description": "Cables" }),
            )
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&output.content).unwrap();
        assert_eq!(body["status"], "PENDING_APPROVAL");
        assert_eq!(body["employeeId"], "EMP001");
    }
}
