//! Visibility and class-kind vocabularies.

use super::meta::{StringRepresentation, representation_for};
use serde::{Deserialize, Serialize};

/// Declaration visibility. Carries no semantics beyond round-tripping: the
/// variant names the closest shared notion and `string_representation`
/// records how each language spelled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Visibility {
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrVisibilityPublic")]
    Public {
        #[serde(default)]
        string_representation: Vec<StringRepresentation>,
    },
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrVisibilityProtected")]
    Protected {
        #[serde(default)]
        string_representation: Vec<StringRepresentation>,
    },
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrVisibilityInternal")]
    Internal {
        #[serde(default)]
        string_representation: Vec<StringRepresentation>,
    },
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrVisibilityPrivate")]
    Private {
        #[serde(default)]
        string_representation: Vec<StringRepresentation>,
    },
    #[serde(rename = "com.voxeldev.mcodegen.dsl.language.swift.ir.IrVisibilityOpen")]
    Open {
        #[serde(default)]
        string_representation: Vec<StringRepresentation>,
    },
    #[serde(rename = "com.voxeldev.mcodegen.dsl.language.swift.ir.IrVisibilityFileprivate")]
    Fileprivate {
        #[serde(default)]
        string_representation: Vec<StringRepresentation>,
    },
    #[serde(rename = "com.voxeldev.mcodegen.dsl.language.java.ir.IrVisibilityPackagePrivate")]
    PackagePrivate {
        #[serde(default)]
        string_representation: Vec<StringRepresentation>,
    },
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrVisibilityOther")]
    Other {
        token: String,
        #[serde(default)]
        string_representation: Vec<StringRepresentation>,
    },
}

fn spelled(language: &str, token: &str) -> Vec<StringRepresentation> {
    vec![StringRepresentation::new(language, token)]
}

impl Visibility {
    pub fn public() -> Self {
        Visibility::Public {
            string_representation: Vec::new(),
        }
    }

    pub fn protected() -> Self {
        Visibility::Protected {
            string_representation: Vec::new(),
        }
    }

    pub fn internal() -> Self {
        Visibility::Internal {
            string_representation: Vec::new(),
        }
    }

    pub fn private() -> Self {
        Visibility::Private {
            string_representation: Vec::new(),
        }
    }

    pub fn package_private() -> Self {
        Visibility::PackagePrivate {
            string_representation: Vec::new(),
        }
    }

    pub fn other(token: impl Into<String>) -> Self {
        Visibility::Other {
            token: token.into(),
            string_representation: Vec::new(),
        }
    }

    /// Visibility as spelled in `language` by the `token` keyword.
    ///
    /// Unrecognized keywords become [`Visibility::Other`].
    pub fn from_keyword(language: &str, token: &str) -> Self {
        let string_representation = spelled(language, token);
        match token {
            "public" => Visibility::Public {
                string_representation,
            },
            "protected" => Visibility::Protected {
                string_representation,
            },
            "internal" => Visibility::Internal {
                string_representation,
            },
            "private" => Visibility::Private {
                string_representation,
            },
            "open" => Visibility::Open {
                string_representation,
            },
            "fileprivate" => Visibility::Fileprivate {
                string_representation,
            },
            "" => Visibility::PackagePrivate {
                string_representation,
            },
            other => Visibility::Other {
                token: other.to_string(),
                string_representation,
            },
        }
    }

    pub fn string_representation(&self) -> &[StringRepresentation] {
        match self {
            Visibility::Public {
                string_representation,
            }
            | Visibility::Protected {
                string_representation,
            }
            | Visibility::Internal {
                string_representation,
            }
            | Visibility::Private {
                string_representation,
            }
            | Visibility::Open {
                string_representation,
            }
            | Visibility::Fileprivate {
                string_representation,
            }
            | Visibility::PackagePrivate {
                string_representation,
            }
            | Visibility::Other {
                string_representation,
                ..
            } => string_representation,
        }
    }

    /// Shared keyword for this visibility, independent of any language.
    pub fn keyword(&self) -> &str {
        match self {
            Visibility::Public { .. } => "public",
            Visibility::Protected { .. } => "protected",
            Visibility::Internal { .. } => "internal",
            Visibility::Private { .. } => "private",
            Visibility::Open { .. } => "open",
            Visibility::Fileprivate { .. } => "fileprivate",
            Visibility::PackagePrivate { .. } => "",
            Visibility::Other { token, .. } => token,
        }
    }

    /// Display-string fallback: the spelling recorded for `language`, or
    /// the shared keyword.
    pub fn display(&self, language: &str) -> &str {
        representation_for(self.string_representation(), language).unwrap_or(self.keyword())
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public { .. })
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Visibility::Private { .. })
    }

    /// Same variant, ignoring recorded spellings.
    pub fn same_level(&self, other: &Visibility) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.keyword() == other.keyword()
    }
}

/// What kind of type a class declaration introduces. Language adapters
/// extend this set with their own kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClassKind {
    #[default]
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrClassClassKind")]
    Class,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrInterfaceClassKind")]
    Interface,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrEnumClassKind")]
    Enum,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrAnnotationClassKind")]
    Annotation,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.language.kotlin.ir.IrObjectClassKind")]
    Object,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.language.swift.ir.IrStructClassKind")]
    Struct,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.language.swift.ir.IrActorClassKind")]
    Actor,
    #[serde(rename = "com.voxeldev.mcodegen.dsl.ir.IrClassKind.IrOtherClassKind")]
    Other { token: String },
}

impl ClassKind {
    pub const KNOWN: [ClassKind; 7] = [
        ClassKind::Class,
        ClassKind::Interface,
        ClassKind::Enum,
        ClassKind::Annotation,
        ClassKind::Object,
        ClassKind::Struct,
        ClassKind::Actor,
    ];

    pub fn name(&self) -> &str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Annotation => "annotation",
            ClassKind::Object => "object",
            ClassKind::Struct => "struct",
            ClassKind::Actor => "actor",
            ClassKind::Other { token } => token,
        }
    }
}
