//! Atmosphere pass error types.

use std::fmt;

/// A collaborator the pass cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    Planet,
    Sun,
    ShadingProgram,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reference::Planet => "planet",
            Reference::Sun => "sun",
            Reference::ShadingProgram => "shading program",
        };
        f.write_str(name)
    }
}

/// Conditions that stop the atmosphere from being drawn.
///
/// Both variants degrade to "no atmosphere this frame". Neither is retried
/// inside the pass: missing references are re-checked on the next frame, and
/// a creation failure disables the pass for the rest of the session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AtmosphereError {
    /// Planet, sun, or shading program is unset.
    #[error("atmosphere {0} reference is not set")]
    MissingReference(Reference),

    /// The shading program could not be turned into a drawable resource.
    #[error("failed to create atmosphere shading program: {0}")]
    ResourceCreationFailure(String),
}
