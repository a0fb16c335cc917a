pub mod rules;
pub mod schema;
pub mod settings;
pub mod specs;
pub mod store;
pub mod validate;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use schema::*;
pub use settings::{
    ai_configured, read_settings, read_stored_settings, write_settings, AiSettings,
};
pub use specs::{SpecValue, Specifications};
pub use store::{ArchitectureStore, FileStore, MemoryStore, PersistenceError};
pub use validate::{Checker, Validate, ValidationError, Violation};

/// A component of a generated architecture. Display order is generation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Component {
    /// The name of the architectural component.
    pub name: String,
    /// The type of component (e.g., Frontend, Backend Service, Database, Message Queue).
    #[serde(rename = "type")]
    pub kind: String,
    /// The purpose and function of this component.
    pub purpose: String,
    /// Suggested technology or framework for this component (e.g., Next.js, Node.js, PostgreSQL, Kafka).
    pub technology: String,
}

impl Validate for Component {
    fn check(&self, c: &mut Checker) {
        c.text("name", &self.name);
    }
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 7;

/// Short random base-36 token used as a design id.
pub fn new_design_id() -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[fastrand::usize(..ID_ALPHABET.len())] as char)
        .collect()
}

/// A design-generation result as persisted, with its id, the requirements it
/// was generated from and the creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedArchitecture {
    pub id: String,
    pub requirements: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub design: DesignResult,
}

impl SavedArchitecture {
    pub fn new(requirements: impl Into<String>, design: DesignResult) -> Self {
        Self {
            id: new_design_id(),
            requirements: requirements.into(),
            created_at: Utc::now(),
            design,
        }
    }

    /// First non-blank line of the requirements, for listings.
    pub fn title(&self) -> &str {
        self.requirements
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("(untitled)")
    }
}
