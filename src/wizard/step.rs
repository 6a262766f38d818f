//! Wizard step state machine — tracks where the user is in the flow.

use serde::{Deserialize, Serialize};

use super::validate::ValidationScope;

/// The steps of the brand onboarding wizard.
///
/// Editable steps progress linearly: Welcome → CompanyInfo → SiteAnalysis →
/// SocialAccounts → ContentPlan → Review. `Success` is terminal and reachable
/// only from Review after the remote submission succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Welcome,
    CompanyInfo,
    SiteAnalysis,
    SocialAccounts,
    ContentPlan,
    Review,
    Success,
}

impl WizardStep {
    /// Editable steps, in flow order.
    pub const EDITABLE: [WizardStep; 6] = [
        Self::Welcome,
        Self::CompanyInfo,
        Self::SiteAnalysis,
        Self::SocialAccounts,
        Self::ContentPlan,
        Self::Review,
    ];

    /// The first step that collects data. Draft recovery jumps here, never
    /// to the empty Welcome step.
    pub const FIRST_DATA_ENTRY: WizardStep = Self::CompanyInfo;

    /// Position of an editable step; `None` for the terminal success step.
    pub fn index(&self) -> Option<usize> {
        Self::EDITABLE.iter().position(|s| s == self)
    }

    /// Editable step at `index`, if in range.
    pub fn from_index(index: usize) -> Option<WizardStep> {
        Self::EDITABLE.get(index).copied()
    }

    /// The next editable step, if any. Review does not advance further;
    /// Success is reached only through submission.
    pub fn next(&self) -> Option<WizardStep> {
        let idx = self.index()?;
        Self::from_index(idx + 1)
    }

    /// The previous editable step, if any. There is no backward step out
    /// of Success.
    pub fn prev(&self) -> Option<WizardStep> {
        let idx = self.index()?;
        idx.checked_sub(1).and_then(Self::from_index)
    }

    /// Whether this step accepts edits and navigation.
    pub fn is_editable(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether this is the terminal success step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Validation scope gating departure from this step, if any.
    ///
    /// Welcome, SiteAnalysis and SocialAccounts have no blocking rules of
    /// their own; Review is gated by the full final-submit scope.
    pub fn scope(&self) -> Option<ValidationScope> {
        match self {
            Self::CompanyInfo => Some(ValidationScope::CompanyInfo),
            Self::ContentPlan => Some(ValidationScope::ContentStrategy),
            Self::Review => Some(ValidationScope::FinalSubmit),
            Self::Welcome | Self::SiteAnalysis | Self::SocialAccounts | Self::Success => None,
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Welcome
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::CompanyInfo => "company_info",
            Self::SiteAnalysis => "site_analysis",
            Self::SocialAccounts => "social_accounts",
            Self::ContentPlan => "content_plan",
            Self::Review => "review",
            Self::Success => "success",
        };
        write!(f, "{s}")
    }
}

/// Owns the current step and enforces transition rules.
///
/// Navigation methods are no-ops when a transition is not allowed; callers
/// that need to know whether anything moved check the returned step or the
/// `bool` results.
#[derive(Debug, Clone, Default)]
pub struct StepSequencer {
    current: WizardStep,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The step the wizard is on.
    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Move one step forward. No-op past the last editable step and after
    /// success. Validation gating happens in the engine before this call.
    pub fn advance(&mut self) -> WizardStep {
        if let Some(next) = self.current.next() {
            self.current = next;
        }
        self.current
    }

    /// Move one step back. No-op on the first step; there is no backward
    /// escape from the terminal success step.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(prev) = self.current.prev() {
            self.current = prev;
        }
        self.current
    }

    /// Jump to a previously visited step. Jumping ahead of the current step
    /// is refused; so is any jump once the wizard has completed.
    pub fn jump_to(&mut self, target: WizardStep) -> bool {
        let (Some(target_idx), Some(current_idx)) = (target.index(), self.current.index()) else {
            return false;
        };
        if target_idx > current_idx {
            return false;
        }
        self.current = target;
        true
    }

    /// Privileged jump used only by draft restoration. May target any
    /// editable step regardless of the current position, but never the
    /// terminal success step.
    pub fn recovery_jump(&mut self, target: WizardStep) -> bool {
        if self.current.is_terminal() || !target.is_editable() {
            return false;
        }
        self.current = target;
        true
    }

    /// Enter the terminal success step. Only allowed from the last editable
    /// step, after the remote submission succeeded.
    pub fn complete(&mut self) -> bool {
        if self.current != WizardStep::Review {
            return false;
        }
        self.current = WizardStep::Success;
        true
    }

    /// Whether the wizard has reached the terminal step.
    pub fn is_complete(&self) -> bool {
        self.current.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_editable_steps() {
        use WizardStep::*;
        let expected = [CompanyInfo, SiteAnalysis, SocialAccounts, ContentPlan, Review];
        let mut current = Welcome;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none(), "Review has no forward step");
        assert!(Success.next().is_none());
    }

    #[test]
    fn prev_walks_backward_but_not_out_of_success() {
        use WizardStep::*;
        assert_eq!(Review.prev(), Some(ContentPlan));
        assert_eq!(CompanyInfo.prev(), Some(Welcome));
        assert!(Welcome.prev().is_none());
        assert!(Success.prev().is_none());
    }

    #[test]
    fn index_roundtrip() {
        for (i, step) in WizardStep::EDITABLE.iter().enumerate() {
            assert_eq!(step.index(), Some(i));
            assert_eq!(WizardStep::from_index(i), Some(*step));
        }
        assert!(WizardStep::Success.index().is_none());
        assert!(WizardStep::from_index(6).is_none());
    }

    #[test]
    fn display_matches_serde() {
        use WizardStep::*;
        for step in [
            Welcome,
            CompanyInfo,
            SiteAnalysis,
            SocialAccounts,
            ContentPlan,
            Review,
            Success,
        ] {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn scope_mapping() {
        assert_eq!(
            WizardStep::CompanyInfo.scope(),
            Some(ValidationScope::CompanyInfo)
        );
        assert_eq!(
            WizardStep::ContentPlan.scope(),
            Some(ValidationScope::ContentStrategy)
        );
        assert_eq!(WizardStep::Review.scope(), Some(ValidationScope::FinalSubmit));
        assert!(WizardStep::Welcome.scope().is_none());
        assert!(WizardStep::SiteAnalysis.scope().is_none());
        assert!(WizardStep::SocialAccounts.scope().is_none());
    }

    #[test]
    fn sequencer_advance_stops_at_review() {
        let mut seq = StepSequencer::new();
        assert_eq!(seq.current(), WizardStep::Welcome);
        for _ in 0..10 {
            seq.advance();
        }
        assert_eq!(seq.current(), WizardStep::Review, "advance must not enter Success");
    }

    #[test]
    fn sequencer_retreat_stops_at_welcome() {
        let mut seq = StepSequencer::new();
        seq.advance();
        seq.retreat();
        assert_eq!(seq.current(), WizardStep::Welcome);
        seq.retreat();
        assert_eq!(seq.current(), WizardStep::Welcome);
    }

    #[test]
    fn no_backward_escape_from_success() {
        let mut seq = StepSequencer::new();
        while seq.current() != WizardStep::Review {
            seq.advance();
        }
        assert!(seq.complete());
        assert!(seq.is_complete());

        seq.retreat();
        assert_eq!(seq.current(), WizardStep::Success);
        assert!(!seq.jump_to(WizardStep::Welcome));
        assert!(!seq.recovery_jump(WizardStep::CompanyInfo));
        assert_eq!(seq.current(), WizardStep::Success);
    }

    #[test]
    fn jump_to_refuses_skipping_ahead() {
        let mut seq = StepSequencer::new();
        assert!(!seq.jump_to(WizardStep::ContentPlan));
        assert_eq!(seq.current(), WizardStep::Welcome);

        seq.advance();
        seq.advance();
        assert_eq!(seq.current(), WizardStep::SiteAnalysis);
        assert!(seq.jump_to(WizardStep::CompanyInfo));
        assert_eq!(seq.current(), WizardStep::CompanyInfo);
    }

    #[test]
    fn jump_to_refuses_success() {
        let mut seq = StepSequencer::new();
        assert!(!seq.jump_to(WizardStep::Success));
    }

    #[test]
    fn recovery_jump_reaches_any_editable_step() {
        let mut seq = StepSequencer::new();
        assert!(seq.recovery_jump(WizardStep::ContentPlan));
        assert_eq!(seq.current(), WizardStep::ContentPlan);

        assert!(seq.recovery_jump(WizardStep::FIRST_DATA_ENTRY));
        assert_eq!(seq.current(), WizardStep::CompanyInfo);

        assert!(!seq.recovery_jump(WizardStep::Success));
    }

    #[test]
    fn complete_only_from_review() {
        let mut seq = StepSequencer::new();
        assert!(!seq.complete());
        assert_eq!(seq.current(), WizardStep::Welcome);

        while seq.current() != WizardStep::Review {
            seq.advance();
        }
        assert!(seq.complete());
        assert!(!seq.complete(), "already terminal");
    }
}
