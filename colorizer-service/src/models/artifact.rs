/// What a stored image is for, and therefore where it lives on disk.
///
/// Inputs and references share the transient upload area; results go to
/// their own area and survive until downloaded or reaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Input,
    Reference,
    Result,
}

impl ArtifactRole {
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactRole::Input => "input",
            ArtifactRole::Reference => "ref",
            ArtifactRole::Result => "colorized",
        }
    }
}

/// Handle to a stored image.
///
/// Names are generated once per save and never reused, so two live
/// artifacts never share a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub name: String,
    pub role: ArtifactRole,
}
