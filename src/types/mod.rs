use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration kinds reported by the symbol-graph extractor.
///
/// The extractor names kinds by display string (`kind.displayName`). Anything
/// outside the fixed set is kept verbatim in [`SymbolKind::Other`] so it can
/// still render as a member group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Class,
    Protocol,
    Enumeration,
    Structure,
    TypeAlias,
    Function,
    GlobalVariable,
    Initializer,
    TypeProperty,
    TypeMethod,
    InstanceProperty,
    InstanceMethod,
    Case,
    Other(String),
}

/// Top-level document sections a symbol can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Class,
    Protocol,
    Enumeration,
    Structure,
    TypeAlias,
    GlobalFunction,
    GlobalVariable,
    /// Declarations that only appear inside a type section
    Member,
    /// Kinds the renderer does not know about
    Uncategorized,
}

impl SymbolKind {
    pub fn from_display_name(name: &str) -> Self {
        match name {
            "Class" => Self::Class,
            "Protocol" => Self::Protocol,
            "Enumeration" => Self::Enumeration,
            "Structure" => Self::Structure,
            "Type Alias" => Self::TypeAlias,
            "Function" => Self::Function,
            "Global Variable" => Self::GlobalVariable,
            "Initializer" => Self::Initializer,
            "Type Property" => Self::TypeProperty,
            "Type Method" => Self::TypeMethod,
            "Instance Property" => Self::InstanceProperty,
            "Instance Method" => Self::InstanceMethod,
            "Case" => Self::Case,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Class => "Class",
            Self::Protocol => "Protocol",
            Self::Enumeration => "Enumeration",
            Self::Structure => "Structure",
            Self::TypeAlias => "Type Alias",
            Self::Function => "Function",
            Self::GlobalVariable => "Global Variable",
            Self::Initializer => "Initializer",
            Self::TypeProperty => "Type Property",
            Self::TypeMethod => "Type Method",
            Self::InstanceProperty => "Instance Property",
            Self::InstanceMethod => "Instance Method",
            Self::Case => "Case",
            Self::Other(name) => name,
        }
    }

    /// Heading used for a group of members of this kind.
    pub fn plural(&self) -> String {
        match self {
            Self::InstanceProperty => "Instance Properties".to_string(),
            Self::TypeProperty => "Type Properties".to_string(),
            Self::Case => "Cases".to_string(),
            other => {
                let name = other.display_name();
                if name.ends_with('s') {
                    format!("{name}es")
                } else {
                    format!("{name}s")
                }
            }
        }
    }

    /// Fixed position of member groups inside a type section. Kinds without
    /// a fixed slot come last and are ordered by display name.
    pub fn member_priority(&self) -> u8 {
        match self {
            Self::Initializer => 0,
            Self::TypeProperty => 1,
            Self::TypeMethod => 2,
            Self::InstanceProperty => 3,
            Self::InstanceMethod => 4,
            Self::Case => 5,
            _ => 99,
        }
    }

    /// Only classes pick up members from the protocols they conform to.
    pub fn inherits_protocol_members(&self) -> bool {
        matches!(self, Self::Class)
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Class => Category::Class,
            Self::Protocol => Category::Protocol,
            Self::Enumeration => Category::Enumeration,
            Self::Structure => Category::Structure,
            Self::TypeAlias => Category::TypeAlias,
            Self::Function => Category::GlobalFunction,
            Self::GlobalVariable => Category::GlobalVariable,
            Self::Initializer
            | Self::TypeProperty
            | Self::TypeMethod
            | Self::InstanceProperty
            | Self::InstanceMethod
            | Self::Case => Category::Member,
            Self::Other(_) => Category::Uncategorized,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Category {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Class => "Classes",
            Self::Protocol => "Protocols",
            Self::Enumeration => "Enumerations",
            Self::Structure => "Structures",
            Self::TypeAlias => "Type Aliases",
            Self::GlobalFunction => "Global Functions",
            Self::GlobalVariable => "Global Variables",
            Self::Member => "Members",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

/// Edge kinds in the relationship list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    MemberOf,
    RequirementOf,
    ConformsTo,
    InheritsFrom,
    /// Any other edge (`overrides`, `defaultImplementationOf`, ...). Loaded
    /// but never indexed.
    Other(String),
}

impl RelationKind {
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "memberOf" => Self::MemberOf,
            "requirementOf" => Self::RequirementOf,
            "conformsTo" => Self::ConformsTo,
            "inheritsFrom" => Self::InheritsFrom,
            other => Self::Other(other.to_string()),
        }
    }
}
