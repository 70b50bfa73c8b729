// ── Domain helpers over the wire types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Final grade at or above which a student is in good standing.
pub const PASSING_GRADE: f64 = 7.0;
/// Final grade at or above which a student is at risk rather than failing.
pub const AT_RISK_GRADE: f64 = 5.0;

/// The student/module pair a grade detail view was opened for.
///
/// Saving a grade record takes a `&Selection`, so a save can only be
/// issued after a detail view produced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub aluno_id: i64,
    pub module_id: i64,
}

impl Selection {
    pub fn new(aluno_id: i64, module_id: i64) -> Self {
        Self {
            aluno_id,
            module_id,
        }
    }
}

/// Status band for a final grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GradeBand {
    Success,
    Warning,
    Danger,
}

impl GradeBand {
    pub fn for_grade(nota_final: f64) -> Self {
        if nota_final >= PASSING_GRADE {
            Self::Success
        } else if nota_final >= AT_RISK_GRADE {
            Self::Warning
        } else {
            Self::Danger
        }
    }

    /// Short pt-BR label shown next to the grade.
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "Aprovado",
            Self::Warning => "Em recuperação",
            Self::Danger => "Reprovado",
        }
    }
}
