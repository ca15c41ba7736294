// src/wizard.rs
//! Step model for filling a profile in order. Each step validates before moving on.

use std::fmt;

use tracing::debug;

use crate::types::ResumeProfile;
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    PersonalInfo,
    Education,
    Skills,
    Experience,
    Projects,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::PersonalInfo,
        WizardStep::Education,
        WizardStep::Skills,
        WizardStep::Experience,
        WizardStep::Projects,
        WizardStep::Summary,
    ];

    /// 1-based position, as shown in "Step n of 6"
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => "Personal Information",
            WizardStep::Education => "Education",
            WizardStep::Skills => "Skills",
            WizardStep::Experience => "Experience",
            WizardStep::Projects => "Projects",
            WizardStep::Summary => "Summary & Objective",
        }
    }

    fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.number()).copied()
    }

    fn previous(self) -> Option<WizardStep> {
        (self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Experience and projects are optional
    pub fn validate(self, profile: &ResumeProfile) -> Result<(), ValidationError> {
        match self {
            WizardStep::PersonalInfo => validation::validate_personal_info(profile),
            WizardStep::Education => validation::validate_education(profile),
            WizardStep::Skills => validation::validate_skills(profile),
            WizardStep::Experience | WizardStep::Projects => Ok(()),
            WizardStep::Summary => validation::validate_objective(profile),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {} of {}: {}",
            self.number(),
            Self::ALL.len(),
            self.title()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(WizardStep),
    Finished,
}

pub struct Wizard<'a> {
    profile: &'a mut ResumeProfile,
    current: WizardStep,
}

impl<'a> Wizard<'a> {
    pub fn new(profile: &'a mut ResumeProfile) -> Self {
        Self {
            profile,
            current: WizardStep::PersonalInfo,
        }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn profile(&self) -> &ResumeProfile {
        self.profile
    }

    pub fn profile_mut(&mut self) -> &mut ResumeProfile {
        self.profile
    }

    /// Validate the current step and move forward. On failure the step is unchanged.
    pub fn advance(&mut self) -> Result<StepOutcome, ValidationError> {
        self.current.validate(self.profile)?;
        match self.current.next() {
            Some(next) => {
                debug!("Wizard advanced to {}", next);
                self.current = next;
                Ok(StepOutcome::Advanced(next))
            }
            None => Ok(StepOutcome::Finished),
        }
    }

    /// Move back one step. Returns false on the first step.
    pub fn back(&mut self) -> bool {
        match self.current.previous() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Fraction of the wizard reached, counting the current step
    pub fn progress(&self) -> f64 {
        self.current.number() as f64 / WizardStep::ALL.len() as f64
    }

    /// Every step's rules, first failure wins
    pub fn validate_all(&self) -> Result<(), ValidationError> {
        WizardStep::ALL
            .iter()
            .try_for_each(|step| step.validate(self.profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EducationEntry;

    fn complete_profile() -> ResumeProfile {
        let mut p = ResumeProfile::new();
        p.set_personal_info("Asha Rao", "asha@x.com", None);
        p.add_education(EducationEntry::new("B.Tech", "IIT", "2024"));
        p.add_technical_skill("Rust");
        p.set_objective("Build reliable systems");
        p
    }

    #[test]
    fn test_walk_through_all_steps() {
        let mut profile = complete_profile();
        let mut wizard = Wizard::new(&mut profile);

        for expected in &WizardStep::ALL[1..] {
            assert_eq!(wizard.advance().unwrap(), StepOutcome::Advanced(*expected));
        }
        assert_eq!(wizard.current(), WizardStep::Summary);
        assert_eq!(wizard.progress(), 1.0);
        assert_eq!(wizard.advance().unwrap(), StepOutcome::Finished);
    }

    #[test]
    fn test_failed_validation_keeps_step() {
        let mut profile = ResumeProfile::new();
        profile.full_name = Some("Asha".into());
        profile.email = Some("not-an-email".into());
        let mut wizard = Wizard::new(&mut profile);

        assert_eq!(
            wizard.advance(),
            Err(ValidationError::InvalidEmail("not-an-email".into()))
        );
        assert_eq!(wizard.current(), WizardStep::PersonalInfo);
    }

    #[test]
    fn test_back_and_progress() {
        let mut profile = complete_profile();
        let mut wizard = Wizard::new(&mut profile);
        assert!(!wizard.back());

        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.current(), WizardStep::Skills);
        assert_eq!(wizard.progress(), 0.5);

        assert!(wizard.back());
        assert_eq!(wizard.current(), WizardStep::Education);
    }

    #[test]
    fn test_optional_steps_and_validate_all() {
        let mut profile = complete_profile();
        profile.objective = Some("   ".into());
        let wizard = Wizard::new(&mut profile);

        assert!(WizardStep::Experience.validate(wizard.profile()).is_ok());
        assert_eq!(wizard.validate_all(), Err(ValidationError::EmptyObjective));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(WizardStep::Skills.to_string(), "Step 3 of 6: Skills");
    }
}
