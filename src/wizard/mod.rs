//! Brand onboarding wizard — step-gated form assembly with draft recovery.
//!
//! The wizard walks a user through building a `BrandRecord`: each editable
//! step validates before the next unlocks, the record is kept in a form
//! store mutated only through patches, and a failed remote submission
//! parks the draft in durable storage so the next mount picks it back up.

pub mod draft;
pub mod engine;
pub mod form;
pub mod record;
pub mod step;
pub mod validate;

pub use draft::DraftPersistence;
pub use engine::{WizardEngine, WizardStatus};
pub use form::FormStateStore;
pub use record::{
    BrandRecord, Field, PostingFrequency, RecordPatch, SocialAccount, SocialPlatform,
};
pub use step::{StepSequencer, WizardStep};
pub use validate::{ValidationErrors, ValidationScope, Validator};
