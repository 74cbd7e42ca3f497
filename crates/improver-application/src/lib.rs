pub mod analysis_service;
pub mod generation_service;
pub mod improvement_service;
pub mod instructions;
pub mod local_backend;
pub mod orchestrator;

pub use analysis_service::ChangeAnalysisService;
pub use generation_service::ResponseGenerationService;
pub use improvement_service::PromptImprovementService;
pub use local_backend::LocalBackend;
pub use orchestrator::{AutoConfirm, Confirmation, Notice, Orchestrator, Phase, SessionState};
