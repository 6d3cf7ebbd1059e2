use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The six onboarding checklist items, declared in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Accounts,
    Profile,
    Channels,
    Tools,
    Policies,
    Intro,
}

impl Step {
    pub const ALL: [Step; 6] =
        [Step::Accounts, Step::Profile, Step::Channels, Step::Tools, Step::Policies, Step::Intro];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Profile => "profile",
            Self::Channels => "channels",
            Self::Tools => "tools",
            Self::Policies => "policies",
            Self::Intro => "intro",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .into_iter()
            .find(|step| step.as_str() == value)
            .ok_or_else(|| DomainError::UnknownStep(value.to_owned()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    pub user_id: UserId,
    #[serde(default)]
    pub completed_steps: BTreeMap<Step, bool>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl OnboardingState {
    /// A record with no timestamps yet; the store fills them in on save.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id, completed_steps: BTreeMap::new(), started_at: None, last_updated: None }
    }

    pub fn started(user_id: UserId, started_at: DateTime<Utc>) -> Self {
        Self { started_at: Some(started_at), ..Self::new(user_id) }
    }

    pub fn is_complete(&self, step: Step) -> bool {
        self.completed_steps.get(&step).copied().unwrap_or(false)
    }

    /// Returns `true` when the step was not complete before.
    pub fn mark_complete(&mut self, step: Step) -> bool {
        let previous = self.completed_steps.insert(step, true);
        previous != Some(true)
    }

    pub fn completed_count(&self) -> usize {
        Step::ALL.iter().filter(|step| self.is_complete(**step)).count()
    }

    pub fn stamp(&mut self, now: DateTime<Utc>) {
        self.last_updated = Some(now);
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }
}
