//! Wire types exchanged with the skills service.
//!
//! Field names are the service's snake_case JSON keys; timestamps travel as
//! RFC 3339 strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named capability stored by the skills service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// When the service first stored the skill.
    pub created_at: DateTime<Utc>,
    /// When the service last modified the skill.
    pub updated_at: DateTime<Utc>,
}

impl Skill {
    /// Build a payload for [`create_skill`](crate::SkillsClient::create_skill).
    ///
    /// The id is nil and the timestamps are defaults; the service assigns
    /// the real values.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Association edge between a skill and a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillProject {
    pub skill_id: Uuid,
    pub project_id: Uuid,
}

impl SkillProject {
    pub fn new(skill_id: Uuid, project_id: Uuid) -> Self {
        Self {
            skill_id,
            project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skill_uses_snake_case_keys() {
        let skill = Skill {
            id: Uuid::nil(),
            name: "rust".into(),
            description: "systems programming".into(),
            created_at: "2024-01-02T03:04:05Z".parse().unwrap(),
            updated_at: "2024-01-02T03:04:05Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&skill).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "name": "rust",
                "description": "systems programming",
                "created_at": "2024-01-02T03:04:05Z",
                "updated_at": "2024-01-02T03:04:05Z",
            })
        );
    }

    #[test]
    fn skill_accepts_offset_timestamps() {
        let raw = json!({
            "id": "0190b6a4-6b1e-7c3a-9a57-5d2f3c1b0a11",
            "name": "go",
            "description": "",
            "created_at": "2024-05-01T12:00:00+02:00",
            "updated_at": "2024-05-01T10:00:00.123456Z",
        });
        let skill: Skill = serde_json::from_value(raw).unwrap();
        assert_eq!(skill.name, "go");
        assert_eq!(skill.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn new_skill_leaves_identity_to_the_server() {
        let skill = Skill::new("sql", "query language");
        assert!(skill.id.is_nil());
        assert_eq!(skill.name, "sql");
        assert_eq!(skill.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn skill_project_keys() {
        let sp = SkillProject::new(Uuid::nil(), Uuid::from_u128(1));
        let value = serde_json::to_value(sp).unwrap();
        assert_eq!(value["skill_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["project_id"], "00000000-0000-0000-0000-000000000001");
    }
}
