// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt assembly.

use deskmate_core::{Employee, MemoryRecord};

/// Builds the per-turn system prompt from the employee profile, any
/// retrieved memories, and today's date (YYYY-MM-DD).
pub fn build_system_prompt(employee: &Employee, memories: &[MemoryRecord], today: &str) -> String {
    let memories_context = if memories.is_empty() {
        String::new()
    } else {
        format!(
            "\n\nRelevant memories about this employee:\n{}",
            memories
                .iter()
                .map(|m| format!("- {}", m.text))
                .collect::<Vec<_>>()
                .join("\n")
        )
    };

    format!(
        "You are a helpful AI assistant for {name} (Employee ID: {employee_id}), who works in the {department} department.\n\
         \n\
         You help employees with their daily tasks including:\n\
         - Booking cabs for commute\n\
         - Ordering food from the cafeteria\n\
         - Submitting expense reports\n\
         - Logging timesheet entries\n\
         - Requesting leaves\n\
         \n\
         Be friendly, professional, and proactive. If you remember something about the employee's preferences or past interactions, use that to provide personalized assistance.\n\
         \n\
         Today's date is {today}.\n\
         {memories_context}\n\
         \n\
         Important guidelines:\n\
         1. When performing actions (booking, ordering, submitting), always confirm the details before executing.\n\
         2. Provide clear summaries after completing tasks.\n\
         3. If you notice patterns in the employee's requests, mention them to be helpful.\n\
         4. Be concise but friendly in your responses.",
        name = employee.name,
        employee_id = employee.employee_id,
        department = employee.department.as_deref().unwrap_or("General"),
        today = today,
        memories_context = memories_context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskmate_core::MemoryCategory;

    fn employee(department: Option<&str>) -> Employee {
        Employee {
            employee_id: "EMP001".to_string(),
            name: "Asha Rao".to_string(),
            email: "asha@corp.example".to_string(),
            department: department.map(String::from),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn includes_profile_and_date() {
        let prompt = build_system_prompt(&employee(Some("Engineering")), &[], "2026-08-27");
        assert!(prompt.contains("Asha Rao (Employee ID: EMP001)"));
        assert!(prompt.contains("the Engineering department"));
        assert!(prompt.contains("Today's date is 2026-08-27."));
        assert!(prompt.contains("Important guidelines:"));
        assert!(!prompt.contains("Relevant memories"));
    }

    #[test]
    fn missing_department_falls_back_to_general() {
        let prompt = build_system_prompt(&employee(None), &[], "2026-08-27");
        assert!(prompt.contains("the General department"));
    }

    #[test]
    fn memories_render_as_bullets() {
        let memories = vec![
            MemoryRecord {
                id: "m1".to_string(),
                text: "Is vegetarian".to_string(),
                category: Some(MemoryCategory::FoodPreferences),
                created_at: None,
                score: Some(0.9),
            },
            MemoryRecord {
                id: "m2".to_string(),
                text: "Lives in HSR Layout".to_string(),
                category: None,
                created_at: None,
                score: Some(0.5),
            },
        ];
        let prompt = build_system_prompt(&employee(None), &memories, "2026-08-27");
        assert!(prompt.contains("Relevant memories about this employee:"));
        assert!(prompt.contains("- Is vegetarian\n- Lives in HSR Layout"));
    }
}
