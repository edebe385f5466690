//! User domain entity and related types.

use chrono::{DateTime, Utc};
use repository::Model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{STEP_COMPLETE_ONBOARDING, STEP_REGISTER_COMPANY, STEP_REGISTER_COMPANY_ADDRESS};
use crate::error::DomainError;

/// Onboarding steps a new account goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    RegisterCompany,
    RegisterCompanyAddress,
    CompleteOnboarding,
}

impl OnboardingStep {
    /// Check if onboarding is finished
    pub fn is_complete(&self) -> bool {
        matches!(self, OnboardingStep::CompleteOnboarding)
    }
}

impl std::str::FromStr for OnboardingStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STEP_REGISTER_COMPANY => Ok(OnboardingStep::RegisterCompany),
            STEP_REGISTER_COMPANY_ADDRESS => Ok(OnboardingStep::RegisterCompanyAddress),
            STEP_COMPLETE_ONBOARDING => Ok(OnboardingStep::CompleteOnboarding),
            other => Err(DomainError::validation(format!(
                "Unknown onboarding step: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnboardingStep::RegisterCompany => write!(f, "{}", STEP_REGISTER_COMPANY),
            OnboardingStep::RegisterCompanyAddress => {
                write!(f, "{}", STEP_REGISTER_COMPANY_ADDRESS)
            }
            OnboardingStep::CompleteOnboarding => write!(f, "{}", STEP_COMPLETE_ONBOARDING),
        }
    }
}

/// Free-form account data collected after registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserExtraData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_step: Option<OnboardingStep>,
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub extra_data: UserExtraData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user has a stored password hash
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Current onboarding step, if onboarding has started
    pub fn onboarding_step(&self) -> Option<OnboardingStep> {
        self.extra_data.onboarding_step
    }
}

/// User creation data (identifier and timestamps optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub extra_data: UserExtraData,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewUser {
    /// Create a draft with the two mandatory fields
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

/// User update data. Every field present replaces the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub extra_data: Option<UserExtraData>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model for User {
    type Draft = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn draft_id(draft: &NewUser) -> Option<Uuid> {
        draft.id
    }

    fn from_draft(id: Uuid, draft: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: draft.name,
            email: draft.email,
            password_hash: draft.password_hash,
            phone: draft.phone,
            extra_data: draft.extra_data,
            created_at: draft.created_at.unwrap_or(now),
            updated_at: draft.updated_at.unwrap_or(now),
        }
    }

    fn merge(&mut self, patch: UserPatch) {
        let UserPatch {
            name,
            email,
            password_hash,
            phone,
            extra_data,
            created_at,
            updated_at,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(password_hash) = password_hash {
            self.password_hash = Some(password_hash);
        }
        if let Some(phone) = phone {
            self.phone = Some(phone);
        }
        if let Some(extra_data) = extra_data {
            self.extra_data = extra_data;
        }
        if let Some(created_at) = created_at {
            self.created_at = created_at;
        }
        if let Some(updated_at) = updated_at {
            self.updated_at = updated_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user() -> User {
        User::from_draft(
            Uuid::new_v4(),
            NewUser {
                password_hash: Some("hash".to_string()),
                phone: Some("15999999999".to_string()),
                ..NewUser::new("John Doe", "johndoe@acme.com")
            },
        )
    }

    #[test]
    fn test_from_draft_fills_timestamps() {
        let user = stored_user();

        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.extra_data, UserExtraData::default());
        assert!(user.has_password());
    }

    #[test]
    fn test_from_draft_keeps_supplied_timestamps() {
        let created_at = Utc::now() - chrono::Duration::days(3);
        let user = User::from_draft(
            Uuid::new_v4(),
            NewUser {
                created_at: Some(created_at),
                ..NewUser::new("John Doe", "johndoe@acme.com")
            },
        );

        assert_eq!(user.created_at, created_at);
        assert!(user.updated_at > created_at);
    }

    #[test]
    fn test_merge_overwrites_only_supplied_fields() {
        let mut user = stored_user();
        let before = user.clone();

        user.merge(UserPatch {
            email: Some("johndoe2@acme.com".to_string()),
            extra_data: Some(UserExtraData {
                onboarding_step: Some(OnboardingStep::RegisterCompany),
            }),
            ..Default::default()
        });

        assert_eq!(user.id, before.id);
        assert_eq!(user.name, before.name);
        assert_eq!(user.phone, before.phone);
        assert_eq!(user.password_hash, before.password_hash);
        assert_eq!(user.email, "johndoe2@acme.com");
        assert_eq!(user.onboarding_step(), Some(OnboardingStep::RegisterCompany));
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = stored_user();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["phone"], "15999999999");
        assert_eq!(json["email"], "johndoe@acme.com");
    }

    #[test]
    fn test_onboarding_step_round_trip() {
        for step in crate::constants::ONBOARDING_STEPS {
            let parsed: OnboardingStep = step.parse().unwrap();
            assert_eq!(parsed.to_string(), *step);
        }
        assert!("unknown".parse::<OnboardingStep>().is_err());
        assert!(OnboardingStep::CompleteOnboarding.is_complete());
    }
}
