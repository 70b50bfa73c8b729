// ── Wire types for the grade-system backend ──
//
// Field names follow the backend's JSON verbatim. Response types are
// lenient (optional text columns, defaulted numbers); request types
// only carry what the matching endpoint reads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

// ── Students ─────────────────────────────────────────────────────────

/// A student row as returned by search and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub id: Option<i64>,
    pub nome: String,
    pub numero_matricula: String,
    #[serde(default)]
    pub data_matricula: Option<String>,
    #[serde(default)]
    pub atestados: u32,
    #[serde(default)]
    pub encaminhamento: Option<String>,
    #[serde(default)]
    pub obs: Option<String>,
}

/// `POST /adicionar_aluno` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub nome: String,
    pub numero_matricula: String,
    pub data_matricula: String,
    pub atestados: u32,
    pub encaminhamento: String,
    pub obs: String,
}

/// `PUT /editar_aluno/{numero_matricula}` body. The backend rewrites
/// every column, so every field is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentUpdate {
    pub nome: String,
    pub data_matricula: String,
    pub atestados: u32,
    pub encaminhamento: String,
    pub obs: String,
}

/// `GET /pesquisar_aluno` parameters. The backend prefers the matrícula
/// when both are given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    pub numero_matricula: String,
    pub nome: String,
}

impl StudentQuery {
    pub fn is_empty(&self) -> bool {
        self.numero_matricula.is_empty() && self.nome.is_empty()
    }
}

// ── Modules ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: i64,
    pub nome: String,
}

/// One row of `GET /ver_alunos_modulo/{moduleId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleMember {
    pub id: i64,
    pub nome: String,
    pub numero_matricula: String,
    #[serde(default)]
    pub faltas: i64,
    #[serde(default)]
    pub nota_tutor: f64,
    #[serde(default)]
    pub nota_avaliacao_regular: f64,
    #[serde(default)]
    pub nota_recuperacao: f64,
    #[serde(default)]
    pub nota_final: f64,
}

// ── Grade records ────────────────────────────────────────────────────

/// `GET /obter_dados_modulo_aluno/{alunoId}/{moduleId}` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub numero_matricula: Option<String>,
    #[serde(default)]
    pub faltas: i64,
    #[serde(default)]
    pub nota_tutor: f64,
    #[serde(default)]
    pub nota_avaliacao_regular: f64,
    #[serde(default)]
    pub nota_recuperacao: f64,
    #[serde(default)]
    pub nota_final: f64,
}

/// Partial grade update. Absent fields are omitted from the JSON and
/// left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faltas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nota_tutor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nota_avaliacao_regular: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nota_recuperacao: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nota_final: Option<f64>,
}

impl GradeUpdate {
    pub fn is_empty(&self) -> bool {
        self.faltas.is_none()
            && self.nota_tutor.is_none()
            && self.nota_avaliacao_regular.is_none()
            && self.nota_recuperacao.is_none()
            && self.nota_final.is_none()
    }
}

/// A complete set of grade values, for the full-replacement endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeValues {
    pub faltas: i64,
    pub nota_tutor: f64,
    pub nota_avaliacao_regular: f64,
    pub nota_recuperacao: f64,
    pub nota_final: f64,
}

/// `POST /adicionar_modulo_aluno` body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeAssignment {
    pub aluno_id: i64,
    pub module_id: i64,
    #[serde(flatten)]
    pub values: GradeValues,
}

// ── Replies ──────────────────────────────────────────────────────────

/// Mutation success reply: `{ "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReply {
    pub message: String,
}

/// Decode an accepted payload into a typed value.
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, Error> {
    let preview: String = data.to_string().chars().take(200).collect();
    serde_json::from_value(data).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {preview:?})"),
        body: preview,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_update_serializes_only_present_fields() {
        let update = GradeUpdate {
            faltas: Some(4),
            ..GradeUpdate::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "faltas": 4 }));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(GradeUpdate::default().is_empty());
        let update = GradeUpdate {
            nota_final: Some(0.0),
            ..GradeUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn assignment_flattens_values() {
        let assignment = GradeAssignment {
            aluno_id: 1,
            module_id: 2,
            values: GradeValues {
                faltas: 3,
                nota_tutor: 7.0,
                nota_avaliacao_regular: 6.5,
                nota_recuperacao: 0.0,
                nota_final: 6.8,
            },
        };
        let value = serde_json::to_value(assignment).unwrap();
        assert_eq!(value["aluno_id"], 1);
        assert_eq!(value["faltas"], 3);
        assert_eq!(value["nota_final"], 6.8);
    }

    #[test]
    fn student_tolerates_null_text_columns() {
        let student: Student = decode(json!({
            "id": 9,
            "nome": "Ana",
            "numero_matricula": "2024001",
            "data_matricula": "2024-02-01",
            "atestados": 2,
            "encaminhamento": null,
            "obs": null
        }))
        .unwrap();
        assert_eq!(student.id, Some(9));
        assert!(student.obs.is_none());
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let err = decode::<Vec<Module>>(json!({ "error": "x" })).unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }
}
