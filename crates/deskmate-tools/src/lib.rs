// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task tools for the assistant: cab booking, food ordering, expense
//! reports, timesheets, and leave management.
//!
//! Each subsystem is an in-memory mock behind the [`Tool`] trait. The
//! registry dispatches model-issued tool calls by name and never fails;
//! unknown tools and handler errors come back as error payloads the model
//! can read and recover from.

pub mod cab;
pub mod expense;
pub mod food;
pub mod leave;
pub mod timesheet;
pub mod tool;

use std::sync::Arc;

pub use tool::{Tool, ToolOutput, ToolRegistry};

use cab::{BookCabTool, CabSystem, CancelCabTool, GetCabBookingsTool};
use expense::{ExpenseSystem, GetExpenseReportsTool, SubmitExpenseTool};
use food::{FoodSystem, GetFoodMenuTool, GetFoodOrdersTool, OrderFoodTool};
use leave::{
    CancelLeaveTool, GetLeaveBalanceTool, GetLeaveRequestsTool, LeaveSystem, RequestLeaveTool,
};
use timesheet::{GetProjectsTool, GetTimesheetSummaryTool, LogTimesheetTool, TimesheetSystem};

/// Builds the full tool registry with fresh subsystem state.
pub fn standard_registry() -> ToolRegistry {
    let cabs = Arc::new(CabSystem::new());
    let food = Arc::new(FoodSystem::new());
    let expenses = Arc::new(ExpenseSystem::new());
    let timesheets = Arc::new(TimesheetSystem::new());
    let leave = Arc::new(LeaveSystem::new());

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(BookCabTool(cabs.clone())));
    registry.register(Arc::new(CancelCabTool(cabs.clone())));
    registry.register(Arc::new(GetCabBookingsTool(cabs)));
    registry.register(Arc::new(OrderFoodTool(food.clone())));
    registry.register(Arc::new(GetFoodOrdersTool(food.clone())));
    registry.register(Arc::new(GetFoodMenuTool(food)));
    registry.register(Arc::new(SubmitExpenseTool(expenses.clone())));
    registry.register(Arc::new(GetExpenseReportsTool(expenses)));
    registry.register(Arc::new(LogTimesheetTool(timesheets.clone())));
    registry.register(Arc::new(GetTimesheetSummaryTool(timesheets.clone())));
    registry.register(Arc::new(GetProjectsTool(timesheets)));
    registry.register(Arc::new(RequestLeaveTool(leave.clone())));
    registry.register(Arc::new(GetLeaveBalanceTool(leave.clone())));
    registry.register(Arc::new(GetLeaveRequestsTool(leave.clone())));
    registry.register(Arc::new(CancelLeaveTool(leave)));
    registry
}
