//! Employee records and the client-supplied drafts they are built from.
//!
//! The JSON field names (`ID`, `Name`, `Position`, `Salary`) are part of
//! the public wire contract. Decoding also accepts the lowercase spelling
//! of each field.

use serde::{Deserialize, Serialize};

use crate::ids::EmployeeId;

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned identifier. Always equals the record's key in the store.
    #[serde(rename = "ID", alias = "id")]
    pub id: EmployeeId,
    /// Display name.
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    /// Position or job title.
    #[serde(rename = "Position", alias = "position")]
    pub position: String,
    /// Salary. No currency or precision rules are enforced.
    #[serde(rename = "Salary", alias = "salary")]
    pub salary: f64,
}

impl Employee {
    /// Build a record from a draft and the identifier the store assigned to it.
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft) -> Self {
        let EmployeeDraft {
            name,
            position,
            salary,
        } = draft;
        Self {
            id,
            name,
            position,
            salary,
        }
    }

    /// Replace every mutable field with the draft's values, keeping the id.
    pub fn apply(&mut self, draft: EmployeeDraft) {
        self.name = draft.name;
        self.position = draft.position;
        self.salary = draft.salary;
    }
}

/// The mutable fields of an employee, as supplied by a client.
///
/// Used for create, batch-create, and update. A client-supplied `ID` is
/// not part of the draft and is dropped during decoding. Missing fields
/// decode to their empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeDraft {
    /// Display name.
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    /// Position or job title.
    #[serde(rename = "Position", alias = "position")]
    pub position: String,
    /// Salary.
    #[serde(rename = "Salary", alias = "salary")]
    pub salary: f64,
}

impl EmployeeDraft {
    /// Create a draft from its three fields.
    pub fn new(name: impl Into<String>, position: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            salary,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn employee_uses_wire_field_names() {
        let draft = EmployeeDraft::new("Ada", "Engineer", 120.5);
        let employee = Employee::from_draft(EmployeeId(3), draft);
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["ID"], 3);
        assert_eq!(json["Name"], "Ada");
        assert_eq!(json["Position"], "Engineer");
        assert_eq!(json["Salary"], 120.5);
    }

    #[test]
    fn whole_salary_keeps_fractional_marker() {
        let employee = Employee::from_draft(EmployeeId(1), EmployeeDraft::new("A", "B", 90.0));
        let text = serde_json::to_string(&employee).unwrap();
        assert!(text.contains(r#""Salary":90.0"#), "{text}");
    }

    #[test]
    fn draft_ignores_client_id() {
        let draft: EmployeeDraft =
            serde_json::from_str(r#"{"ID": 99, "Name": "Ada", "Position": "Eng", "Salary": 1}"#)
                .unwrap();
        assert_eq!(draft, EmployeeDraft::new("Ada", "Eng", 1.0));
    }

    #[test]
    fn draft_accepts_lowercase_fields() {
        let draft: EmployeeDraft =
            serde_json::from_str(r#"{"name": "Lin", "position": "Ops", "salary": 42.0}"#).unwrap();
        assert_eq!(draft.name, "Lin");
        assert_eq!(draft.position, "Ops");
        assert_eq!(draft.salary, 42.0);
    }

    #[test]
    fn draft_defaults_missing_fields() {
        let draft: EmployeeDraft = serde_json::from_str(r#"{"Name": "Only"}"#).unwrap();
        assert_eq!(draft.position, "");
        assert_eq!(draft.salary, 0.0);
    }

    #[test]
    fn draft_rejects_wrong_types() {
        let result = serde_json::from_str::<EmployeeDraft>(r#"{"Salary": "lots"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn apply_keeps_id() {
        let mut employee = Employee::from_draft(EmployeeId(5), EmployeeDraft::new("A", "B", 1.0));
        employee.apply(EmployeeDraft::new("C", "D", 2.0));
        assert_eq!(employee.id, EmployeeId(5));
        assert_eq!(employee.name, "C");
        assert_eq!(employee.position, "D");
        assert_eq!(employee.salary, 2.0);
    }
}
