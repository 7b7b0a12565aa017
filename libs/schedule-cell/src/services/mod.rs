pub mod blocker;
pub mod directory;
pub mod event;
pub mod orchestrator;

pub use blocker::{InMemorySlotBlocker, SlotBlocker, SupabaseSlotBlocker};
pub use directory::{DentistDirectory, StaticDentistDirectory, SupabaseDentistDirectory};
pub use event::{EventService, EventStore, InMemoryEventStore, SupabaseEventStore};
pub use orchestrator::EventScheduleOrchestrator;
