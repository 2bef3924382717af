// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock leave management subsystem and its tools.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use deskmate_core::DeskmateError;
use serde::{Deserialize, Serialize};

use crate::tool::{now_rfc3339, prefixed_id, today, Tool, ToolOutput};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    #[serde(rename = "type")]
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub status: String,
    pub approver: String,
    pub created_at: String,
}

/// In-memory leave management system keyed by employee id.
#[derive(Default)]
pub struct LeaveSystem {
    requests: DashMap<String, Vec<LeaveRequest>>,
}

impl LeaveSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a leave request. End date defaults to the start date.
    pub fn request(&self, employee_id: &str, args: &serde_json::Value) -> LeaveRequest {
        let start_date = args
            .get("startDate")
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(today);
        let request = LeaveRequest {
            id: prefixed_id("LEAVE"),
            employee_id: employee_id.to_string(),
            leave_type: args
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("Casual Leave")
                .to_string(),
            end_date: args
                .get("endDate")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(|| start_date.clone()),
            start_date,
            reason: args
                .get("reason")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            status: "PENDING_APPROVAL".to_string(),
            approver: "Manager".to_string(),
            created_at: now_rfc3339(),
        };

        self.requests
            .entry(employee_id.to_string())
            .or_default()
            .push(request.clone());
        request
    }

    /// Static leave balance for every employee.
    pub fn balance(&self, _employee_id: &str) -> serde_json::Value {
        serde_json::json!({
            "casualLeave": { "total": 12, "used": 3, "available": 9 },
            "sickLeave": { "total": 10, "used": 2, "available": 8 },
            "earnedLeave": { "total": 15, "used": 5, "available": 10 },
            "compOff": { "total": 2, "used": 0, "available": 2 }
        })
    }

    pub fn requests(&self, employee_id: &str) -> Vec<LeaveRequest> {
        self.requests
            .get(employee_id)
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Cancels a request, but only while it is still pending approval.
    pub fn cancel(&self, employee_id: &str, request_id: &str) -> serde_json::Value {
        if let Some(mut requests) = self.requests.get_mut(employee_id) {
            if let Some(request) = requests
                .iter_mut()
                .find(|r| r.id == request_id && r.status == "PENDING_APPROVAL")
            {
                request.status = "CANCELLED".to_string();
                return serde_json::json!({ "success": true, "request": request });
            }
        }
        serde_json::json!({
            "success": false,
            "message": "Request not found or cannot be cancelled"
        })
    }
}

/// `request_leave` tool.
pub struct RequestLeaveTool(pub Arc<LeaveSystem>);

#[async_trait]
impl Tool for RequestLeaveTool {
    fn name(&self) -> &str {
        "request_leave"
    }

    fn description(&self) -> &str {
        "Submit a leave request"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["Casual Leave", "Sick Leave", "Earned Leave", "Comp Off"],
                    "description": "Type of leave"
                },
                "startDate": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
                "endDate": { "type": "string", "description": "End date (YYYY-MM-DD)" },
                "reason": { "type": "string", "description": "Reason for leave" }
            },
            "required": ["type", "startDate", "reason"]
        })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.request(employee_id, &input)))
    }
}

/// `get_leave_balance` tool.
pub struct GetLeaveBalanceTool(pub Arc<LeaveSystem>);

#[async_trait]
impl Tool for GetLeaveBalanceTool {
    fn name(&self) -> &str {
        "get_leave_balance"
    }

    fn description(&self) -> &str {
        "Get the employee's leave balance"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        _input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.balance(employee_id)))
    }
}

/// `get_leave_requests` tool.
pub struct GetLeaveRequestsTool(pub Arc<LeaveSystem>);

#[async_trait]
impl Tool for GetLeaveRequestsTool {
    fn name(&self) -> &str {
        "get_leave_requests"
    }

    fn description(&self) -> &str {
        "Get all leave requests for the employee"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        _input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.requests(employee_id)))
    }
}

/// `cancel_leave` tool.
pub struct CancelLeaveTool(pub Arc<LeaveSystem>);

#[async_trait]
impl Tool for CancelLeaveTool {
    fn name(&self) -> &str {
        "cancel_leave"
    }

    fn description(&self) -> &str {
        "Cancel a pending leave request"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "requestId": { "type": "string", "description": "The leave request ID to cancel" }
            },
            "required": ["requestId"]
        })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        let request_id = input["requestId"].as_str().unwrap_or_default();
        Ok(ToolOutput::json(&self.0.cancel(employee_id, request_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_applies_defaults_and_mirrors_start_date() {
        let system = LeaveSystem::new();
        let request = system.request(
            "EMP001",
            &serde_json::json!({ "startDate": "2026-09-10" }),
        );

        assert!(request.id.starts_with("LEAVE-"));
        assert_eq!(request.leave_type, "Casual Leave");
        assert_eq!(request.start_date, "2026-09-10");
        assert_eq!(request.end_date, "2026-09-10");
        assert_eq!(request.status, "PENDING_APPROVAL");
        assert_eq!(request.approver, "Manager");
    }

    #[test]
    fn request_reads_type_argument_and_serializes_it() {
        let system = LeaveSystem::new();
        let request = system.request(
            "EMP001",
            &serde_json::json!({ "type": "Sick Leave", "startDate": "2026-09-10" }),
        );
        assert_eq!(request.leave_type, "Sick Leave");

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["type"], "Sick Leave");
        assert!(wire.get("leaveType").is_none());

        let schema = RequestLeaveTool(Arc::new(system)).parameters_schema();
        assert!(schema["properties"].get("type").is_some());
        assert_eq!(
            schema["required"],
            serde_json::json!(["type", "startDate", "reason"])
        );
    }

    #[test]
    fn balance_is_static() {
        let system = LeaveSystem::new();
        let balance = system.balance("EMP001");
        assert_eq!(balance["casualLeave"]["available"], 9);
        assert_eq!(balance["sickLeave"]["available"], 8);
        assert_eq!(balance["earnedLeave"]["available"], 10);
        assert_eq!(balance["compOff"]["total"], 2);
        assert_eq!(balance["compOff"]["used"], 0);
        assert_eq!(balance["compOff"]["available"], 2);
    }

    #[test]
    fn cancel_only_works_while_pending() {
        let system = LeaveSystem::new();
        let request = system.request("EMP001", &serde_json::json!({}));

        let result = system.cancel("EMP001", &request.id);
        assert_eq!(result["success"], true);
        assert_eq!(result["request"]["status"], "CANCELLED");

        // A second cancel finds no pending request with that id.
        let result = system.cancel("EMP001", &request.id);
        assert_eq!(result["success"], false);
        assert_eq!(
            result["message"],
            "Request not found or cannot be cancelled"
        );
    }

    #[test]
    fn cancel_rejects_unknown_id() {
        let system = LeaveSystem::new();
        let result = system.cancel("EMP001", "LEAVE-UNKNOWN0");
        assert_eq!(result["success"], false);
    }

    #[tokio::test]
    async fn cancel_leave_tool_round_trips() {
        let system = Arc::new(LeaveSystem::new());
        let request = system.request("EMP001", &serde_json::json!({}));

        let tool = CancelLeaveTool(system);
        let output = tool
            .invoke("EMP001", serde_json::json!({ "requestId": request.id }))
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&output.content).unwrap();
        assert_eq!(body["success"], true);
    }
}
