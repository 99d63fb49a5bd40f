//! Component kinds and boundary constraint labels.

use serde::{Deserialize, Serialize};

/// Default cross-section and depth for a newly placed component (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Kind of structural component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Wall,
    Beam,
    Column,
    Support,
}

impl ComponentKind {
    /// All kinds in palette order
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Wall,
        ComponentKind::Beam,
        ComponentKind::Column,
        ComponentKind::Support,
    ];

    /// Lowercase keyword, as used in JSON and reports
    pub fn code(&self) -> &'static str {
        match self {
            ComponentKind::Wall => "wall",
            ComponentKind::Beam => "beam",
            ComponentKind::Column => "column",
            ComponentKind::Support => "support",
        }
    }

    /// Capitalized name used for auto-generated component names
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Wall => "Wall",
            ComponentKind::Beam => "Beam",
            ComponentKind::Column => "Column",
            ComponentKind::Support => "Support",
        }
    }

    /// Palette description
    pub fn description(&self) -> &'static str {
        match self {
            ComponentKind::Wall => "Vertical element for lateral and gravity loads.",
            ComponentKind::Beam => "Horizontal member spanning between supports.",
            ComponentKind::Column => "Compression member transferring axial loads.",
            ComponentKind::Support => "Boundary condition or restraint.",
        }
    }

    /// Geometry given to a freshly placed component of this kind
    pub fn default_dimensions(&self) -> Dimensions {
        match self {
            ComponentKind::Wall => Dimensions { width: 4.0, height: 3.0, depth: 0.3 },
            ComponentKind::Beam => Dimensions { width: 6.0, height: 0.6, depth: 0.4 },
            ComponentKind::Column => Dimensions { width: 0.5, height: 3.0, depth: 0.5 },
            ComponentKind::Support => Dimensions { width: 1.2, height: 0.4, depth: 0.4 },
        }
    }

    /// Constraint given to a freshly placed component of this kind
    pub fn default_constraint(&self) -> Constraint {
        match self {
            ComponentKind::Support => Constraint::Fixed,
            _ => Constraint::Pinned,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|k| k.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown component kind '{}' (expected wall, beam, column or support)", s))
    }
}

/// Boundary condition label.
///
/// Informational only: the stress check treats every component in isolation
/// and never reads this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constraint {
    Fixed,
    #[default]
    Pinned,
    Roller,
    Free,
}

impl Constraint {
    pub fn code(&self) -> &'static str {
        match self {
            Constraint::Fixed => "fixed",
            Constraint::Pinned => "pinned",
            Constraint::Roller => "roller",
            Constraint::Free => "free",
        }
    }

    /// Quick-tool toggle: fixed becomes pinned, anything else becomes fixed.
    pub fn toggled(self) -> Constraint {
        match self {
            Constraint::Fixed => Constraint::Pinned,
            _ => Constraint::Fixed,
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
