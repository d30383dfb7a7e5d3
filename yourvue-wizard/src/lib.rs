//! YourVue Wizard Core
//!
//! Platform-agnostic state and navigation engine for the YourVue career
//! assessment. Hosts feed it commands and host-clock ticks, supply a storage
//! backend, and render the snapshots it produces.

pub mod aptitudes;
pub mod command;
pub mod config;
pub mod error;
pub mod likert;
pub mod orientation;
pub mod progress;
pub mod session;
pub mod shell;
pub mod snapshot;
pub mod stage;
pub mod storage;
pub mod timer;
pub mod transition;
pub mod values;

// Re-export commonly used types
pub use aptitudes::{
    AptitudesController, AptitudesDraft, AptitudesStep, CannedExtractor, EntryField, EntrySection,
    FileDescriptor, ParsedResume, ResumeExtractor, ResumeMode, ScenarioAnswer, TagSection,
};
pub use command::{Command, Outcome};
pub use config::{AnalysisCfg, OrientationCfg, TransitionCfg, WizardConfig};
pub use error::{FileRejection, Rejection, StepResult, StorageError, WizardError};
pub use likert::{LikertQuestion, LikertResponses, LikertScore};
pub use orientation::{CareerStage, ListKey, OrientationController, OrientationDraft, OrientationStep};
pub use progress::{
    PROGRESS_KEY, StageNavigator, SubscriptionId, WizardProgress, WizardStore, overall_progress,
};
pub use session::AssessmentSession;
pub use shell::{NavBar, ShellView, StepState, StepperItem};
pub use snapshot::{SessionSnapshot, StageView};
pub use stage::{STAGES, StageId, StageInfo, TOTAL_STAGES};
pub use storage::{
    MemoryStorage, PersistedRecord, SharedStorage, WizardStorage, load_record, save_record,
    try_load_record,
};
pub use timer::{Interval, Millis, Timeout};
pub use transition::{TransitionOrchestrator, TransitionPhase};
pub use values::{CareerMotivation, CoreValue, ValuesController, ValuesDraft, ValuesStep};
