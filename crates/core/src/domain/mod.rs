pub mod onboarding;
pub mod signature;
