//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Onboarding
// =============================================================================

/// First onboarding step: company details
pub const STEP_REGISTER_COMPANY: &str = "register_company";

/// Second onboarding step: company address
pub const STEP_REGISTER_COMPANY_ADDRESS: &str = "register_company_address";

/// Final onboarding step
pub const STEP_COMPLETE_ONBOARDING: &str = "complete_onboarding";

/// All valid onboarding step values, in order
pub const ONBOARDING_STEPS: &[&str] = &[
    STEP_REGISTER_COMPANY,
    STEP_REGISTER_COMPANY_ADDRESS,
    STEP_COMPLETE_ONBOARDING,
];

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: u64 = 1;

/// Minimum phone number length requirement
pub const MIN_PHONE_LENGTH: u64 = 1;
