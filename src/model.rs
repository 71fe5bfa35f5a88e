//! Records extracted from the university site
//!
//! All records keep the order in which they appear on the source page.

/// Heading used for the single group of proposed theses
pub const PROPOSED_HEADING: &str = "All";

/// An academic department with its own sub-site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    /// Lowercase subdomain of the department site, e.g. `disi`
    pub code: String,

    /// Display name as shown on the directory page
    pub name: String,

    /// Link to the department site
    pub base_url: String,
}

/// A faculty member listed on a department staff page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyMember {
    pub name: String,

    /// Free text, e.g. "Full Professor"
    pub role: String,

    pub profile_url: String,

    /// Theses found on the profile, empty until extracted
    pub theses: Theses,
}

impl FacultyMember {
    /// Creates a faculty member with no theses attached yet
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        profile_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            profile_url: profile_url.into(),
            theses: Theses::default(),
        }
    }
}

/// A titled, ordered list of thesis entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThesisGroup {
    pub heading: String,
    pub items: Vec<String>,
}

impl ThesisGroup {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            items: Vec::new(),
        }
    }
}

/// The two thesis sections published on a profile
///
/// `proposed` holds at most one group headed [`PROPOSED_HEADING`], containing the
/// raw freeform text blocks. `assigned` holds one group per sub-heading of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theses {
    pub proposed: Vec<ThesisGroup>,
    pub assigned: Vec<ThesisGroup>,
}

impl Theses {
    /// Returns true if neither section has any group
    pub fn is_empty(&self) -> bool {
        self.proposed.is_empty() && self.assigned.is_empty()
    }

    /// Total number of entries across both sections
    pub fn item_count(&self) -> usize {
        self.proposed
            .iter()
            .chain(self.assigned.iter())
            .map(|group| group.items.len())
            .sum()
    }
}
