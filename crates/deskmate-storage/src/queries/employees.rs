// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Employee CRUD operations.

use chrono::Utc;
use deskmate_core::DeskmateError;
use rusqlite::params;

use crate::database::Database;
use crate::models::Employee;

/// Register a new employee. Fails on a duplicate `employee_id`.
pub async fn create_employee(
    db: &Database,
    employee_id: &str,
    name: &str,
    email: &str,
    department: Option<&str>,
) -> Result<Employee, DeskmateError> {
    let now = Utc::now().to_rfc3339();
    let employee = Employee {
        employee_id: employee_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        department: department.map(String::from),
        created_at: now.clone(),
        updated_at: now,
    };

    let insert = employee.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO employees (employee_id, name, email, department, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    insert.employee_id,
                    insert.name,
                    insert.email,
                    insert.department,
                    insert.created_at,
                    insert.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(employee)
}

/// Get an employee by their external id.
pub async fn get_employee(
    db: &Database,
    employee_id: &str,
) -> Result<Option<Employee>, DeskmateError> {
    let employee_id = employee_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT employee_id, name, email, department, created_at, updated_at
                 FROM employees WHERE employee_id = ?1",
            )?;
            let result = stmt.query_row(params![employee_id], |row| {
                Ok(Employee {
                    employee_id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    department: row.get(3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            });
            match result {
                Ok(employee) => Ok(Some(employee)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all registered employees, newest first.
pub async fn list_employees(db: &Database) -> Result<Vec<Employee>, DeskmateError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT employee_id, name, email, department, created_at, updated_at
                 FROM employees ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Employee {
                    employee_id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    department: row.get(3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            })?;
            let mut employees = Vec::new();
            for row in rows {
                employees.push(row?);
            }
            Ok(employees)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update an employee's profile fields. Omitted fields keep their value.
/// Returns the updated row, or `None` if the employee does not exist.
pub async fn update_employee(
    db: &Database,
    employee_id: &str,
    name: Option<&str>,
    email: Option<&str>,
    department: Option<&str>,
) -> Result<Option<Employee>, DeskmateError> {
    let Some(current) = get_employee(db, employee_id).await? else {
        return Ok(None);
    };

    let updated = Employee {
        name: name.map(String::from).unwrap_or(current.name),
        email: email.map(String::from).unwrap_or(current.email),
        department: department.map(String::from).or(current.department),
        updated_at: Utc::now().to_rfc3339(),
        ..current
    };

    let write = updated.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE employees SET name = ?2, email = ?3, department = ?4, updated_at = ?5
                 WHERE employee_id = ?1",
                params![
                    write.employee_id,
                    write.name,
                    write.email,
                    write.department,
                    write.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(Some(updated))
}
