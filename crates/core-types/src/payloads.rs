use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!(
            "{field} is required and must be non-empty"
        )));
    }
    Ok(())
}

/// Shallow shape check: `local@domain` with a dotted domain. The store
/// treats the address as opaque text beyond this.
fn check_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError(format!("email \"{email}\" is not a valid address")))
    }
}

fn check_metadata(metadata: &Option<JsonValue>) -> Result<(), ValidationError> {
    match metadata {
        Some(value) if !value.is_object() => Err(ValidationError(
            "metadata must be a JSON object when present".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Request body for creating a scientist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewScientist {
    pub full_name: String,
    pub country: String,
    pub degree: String,
    pub specialization: String,
    pub organization: String,
    pub email: Option<String>,
    pub orcid: Option<String>,
    /// Defaults to 0 when omitted.
    pub h_index: Option<i32>,
}

impl NewScientist {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("fullName", &self.full_name)?;
        require_text("country", &self.country)?;
        require_text("degree", &self.degree)?;
        require_text("specialization", &self.specialization)?;
        require_text("organization", &self.organization)?;
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if self.h_index.is_some_and(|h| h < 0) {
            return Err(ValidationError("hIndex must be non-negative".to_string()));
        }
        Ok(())
    }
}

/// Partial update for a scientist. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScientist {
    pub full_name: Option<String>,
    pub country: Option<String>,
    pub degree: Option<String>,
    pub specialization: Option<String>,
    pub organization: Option<String>,
    pub email: Option<String>,
    pub orcid: Option<String>,
    pub h_index: Option<i32>,
}

impl UpdateScientist {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("fullName", &self.full_name),
            ("country", &self.country),
            ("degree", &self.degree),
            ("specialization", &self.specialization),
            ("organization", &self.organization),
        ] {
            if let Some(v) = value {
                require_text(field, v)?;
            }
        }
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if self.h_index.is_some_and(|h| h < 0) {
            return Err(ValidationError("hIndex must be non-negative".to_string()));
        }
        Ok(())
    }
}

/// Request body for creating a conference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewConference {
    pub topic: String,
    pub name: String,
    pub country: String,
    pub location: String,
    pub date: DateTime<Utc>,
    /// Defaults to 0 when omitted.
    pub capacity: Option<i32>,
}

impl NewConference {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("topic", &self.topic)?;
        require_text("name", &self.name)?;
        require_text("country", &self.country)?;
        require_text("location", &self.location)?;
        if self.capacity.is_some_and(|c| c < 0) {
            return Err(ValidationError("capacity must be non-negative".to_string()));
        }
        Ok(())
    }
}

/// Partial update for a conference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConference {
    pub topic: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
}

impl UpdateConference {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("topic", &self.topic),
            ("name", &self.name),
            ("country", &self.country),
            ("location", &self.location),
        ] {
            if let Some(v) = value {
                require_text(field, v)?;
            }
        }
        if self.capacity.is_some_and(|c| c < 0) {
            return Err(ValidationError("capacity must be non-negative".to_string()));
        }
        Ok(())
    }
}

/// Request body for creating a participation. `scientistId` and
/// `conferenceId` must reference existing rows; the store rejects the
/// insert otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipation {
    pub talk_title: String,
    pub participation_type: String,
    pub duration_minutes: i32,
    pub scientist_id: i32,
    pub conference_id: i32,
    /// Defaults to "confirmed" when omitted.
    pub status: Option<String>,
    pub metadata: Option<JsonValue>,
}

impl NewParticipation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("talkTitle", &self.talk_title)?;
        require_text("participationType", &self.participation_type)?;
        if self.duration_minutes < 1 {
            return Err(ValidationError(
                "durationMinutes must be a positive integer".to_string(),
            ));
        }
        check_metadata(&self.metadata)?;
        Ok(())
    }
}

/// Partial update for a participation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipation {
    pub talk_title: Option<String>,
    pub participation_type: Option<String>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    pub metadata: Option<JsonValue>,
}

impl UpdateParticipation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("talkTitle", &self.talk_title),
            ("participationType", &self.participation_type),
            ("status", &self.status),
        ] {
            if let Some(v) = value {
                require_text(field, v)?;
            }
        }
        if self.duration_minutes.is_some_and(|d| d < 1) {
            return Err(ValidationError(
                "durationMinutes must be a positive integer".to_string(),
            ));
        }
        check_metadata(&self.metadata)?;
        Ok(())
    }
}

/// Request body for the conditional bulk status transition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusUpdate {
    pub conference_id: i32,
    pub old_status: String,
    pub new_status: String,
    /// When present, only participations whose conference takes place
    /// strictly before this instant are updated.
    pub before_date: Option<DateTime<Utc>>,
}

impl BulkStatusUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("oldStatus", &self.old_status)?;
        require_text("newStatus", &self.new_status)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_scientist() -> NewScientist {
        NewScientist {
            full_name: "Ada Lovelace".to_string(),
            country: "United Kingdom".to_string(),
            degree: "PhD".to_string(),
            specialization: "Computing".to_string(),
            organization: "Analytical Engine Society".to_string(),
            email: Some("ada@example.org".to_string()),
            orcid: None,
            h_index: Some(42),
        }
    }

    #[test]
    fn valid_scientist_passes() {
        assert!(new_scientist().validate().is_ok());
    }

    #[test]
    fn blank_required_text_is_rejected() {
        let mut s = new_scientist();
        s.full_name = "   ".to_string();
        let err = s.validate().unwrap_err();
        assert!(err.0.contains("fullName"));
    }

    #[test]
    fn bad_email_shapes_are_rejected() {
        for bad in ["plainaddress", "@no-local.org", "user@nodot"] {
            let mut s = new_scientist();
            s.email = Some(bad.to_string());
            assert!(s.validate().is_err(), "email={bad}");
        }
        let mut s = new_scientist();
        s.email = None;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn negative_h_index_is_rejected() {
        let mut s = new_scientist();
        s.h_index = Some(-1);
        assert!(s.validate().is_err());
    }

    #[test]
    fn participation_requires_positive_duration() {
        let p = NewParticipation {
            talk_title: "On Trigram Indexes".to_string(),
            participation_type: "talk".to_string(),
            duration_minutes: 0,
            scientist_id: 1,
            conference_id: 1,
            status: None,
            metadata: None,
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn metadata_must_be_an_object_when_present() {
        let mut p = NewParticipation {
            talk_title: "On Trigram Indexes".to_string(),
            participation_type: "talk".to_string(),
            duration_minutes: 30,
            scientist_id: 1,
            conference_id: 1,
            status: None,
            metadata: Some(json!("just a string")),
        };
        assert!(p.validate().is_err());
        p.metadata = Some(json!({ "slides": true }));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn empty_partial_update_is_valid() {
        assert!(UpdateScientist::default().validate().is_ok());
        assert!(UpdateConference::default().validate().is_ok());
        assert!(UpdateParticipation::default().validate().is_ok());
    }
}
