use serde::{Deserialize, Serialize};

/// A university as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct University {
    pub id: i64,
    pub name: String,
}

/// Denormalized university join the backend attaches to a course row.
///
/// The backend serializes this under the legacy `user` key and only
/// guarantees the name, so ids are not carried here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UniversityRef {
    pub name: String,
}

/// A course as returned by the backend.
///
/// The backend still speaks its legacy vocabulary on the wire: the owning
/// university arrives as `userId` and the joined record as `user`. The Rust
/// field names are the canonical ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    #[serde(rename = "userId")]
    pub university_id: i64,
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub university: Option<UniversityRef>,
}

impl Course {
    /// Display name of the owning university; "Unknown" when the backend
    /// did not attach the join.
    pub fn university_name(&self) -> &str {
        self.university
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("Unknown")
    }
}

/// Create-request body for a new university.
#[derive(Debug, Clone, Serialize)]
pub struct NewUniversity {
    pub name: String,
}

/// Create-request body for a new course.
#[derive(Debug, Clone, Serialize)]
pub struct NewCourse {
    pub name: String,
    #[serde(rename = "userId")]
    pub university_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_decodes_legacy_wire_names() {
        let json = r#"{"id":7,"name":"Compilers","userId":2,"user":{"name":"MIT"}}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.id, 7);
        assert_eq!(course.university_id, 2);
        assert_eq!(course.university_name(), "MIT");
    }

    #[test]
    fn course_without_join_falls_back_to_unknown() {
        let json = r#"{"id":7,"name":"Compilers","userId":2}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.university, None);
        assert_eq!(course.university_name(), "Unknown");
    }

    #[test]
    fn new_course_serializes_user_id_key() {
        let draft = NewCourse {
            name: "Databases".to_string(),
            university_id: 3,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["userId"], 3);
        assert_eq!(json["name"], "Databases");
        assert!(json.get("university_id").is_none());
    }
}
