// Typed endpoint client
//
// One method per backend route. Every method goes through the shared
// `Dispatcher`, so they all inherit its single-flight guard and its
// `Option<Dispatch>` contract: `None` means the call was dropped.

use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::dispatch::{Dispatch, Dispatcher, Endpoint, RequestOptions};
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    GradeAssignment, GradeUpdate, GradeValues, NewStudent, StudentQuery, StudentUpdate,
};

/// HTTP client for the grade-system backend.
#[derive(Debug, Clone)]
pub struct GradeClient {
    dispatcher: Dispatcher,
}

impl GradeClient {
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            dispatcher: Dispatcher::new(base_url, transport)?,
        })
    }

    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // ── Students ─────────────────────────────────────────────────────

    /// `POST /adicionar_aluno`
    pub async fn add_student(&self, student: &NewStudent) -> Option<Dispatch> {
        debug!(matricula = %student.numero_matricula, "adding student");
        self.send_json(Endpoint::new(["adicionar_aluno"]), RequestOptions::post(), student)
            .await
    }

    /// `PUT /editar_aluno/{numero_matricula}`
    pub async fn edit_student(&self, matricula: &str, update: &StudentUpdate) -> Option<Dispatch> {
        debug!(matricula, "editing student");
        self.send_json(
            Endpoint::new(["editar_aluno", matricula]),
            RequestOptions::put(),
            update,
        )
        .await
    }

    /// `DELETE /excluir_aluno/{numero_matricula}`
    pub async fn delete_student(&self, matricula: &str) -> Option<Dispatch> {
        debug!(matricula, "deleting student");
        self.dispatcher
            .dispatch(
                &Endpoint::new(["excluir_aluno", matricula]),
                RequestOptions::delete(),
            )
            .await
    }

    /// `GET /pesquisar_aluno?numero_matricula=&nome=`
    pub async fn search_students(&self, query: &StudentQuery) -> Option<Dispatch> {
        let endpoint = Endpoint::new(["pesquisar_aluno"])
            .query("numero_matricula", query.numero_matricula.as_str())
            .query("nome", query.nome.as_str());
        self.dispatcher
            .dispatch(&endpoint, RequestOptions::get())
            .await
    }

    /// `GET /detalhes_aluno_id/{id}`
    pub async fn student_by_id(&self, aluno_id: i64) -> Option<Dispatch> {
        self.dispatcher
            .dispatch(
                &Endpoint::new(["detalhes_aluno_id".to_owned(), aluno_id.to_string()]),
                RequestOptions::get(),
            )
            .await
    }

    // ── Modules ──────────────────────────────────────────────────────

    /// `POST /criar_modulo` with `{"nome": "..."}`
    pub async fn create_module(&self, nome: &str) -> Option<Dispatch> {
        debug!(nome, "creating module");
        self.send_json(
            Endpoint::new(["criar_modulo"]),
            RequestOptions::post(),
            &serde_json::json!({ "nome": nome }),
        )
        .await
    }

    /// `POST /excluir_modulo` with `{"nome": "..."}`
    pub async fn delete_module(&self, nome: &str) -> Option<Dispatch> {
        debug!(nome, "deleting module");
        self.send_json(
            Endpoint::new(["excluir_modulo"]),
            RequestOptions::post(),
            &serde_json::json!({ "nome": nome }),
        )
        .await
    }

    /// `GET /listar_modulos`
    pub async fn list_modules(&self) -> Option<Dispatch> {
        self.dispatcher
            .dispatch(&Endpoint::new(["listar_modulos"]), RequestOptions::get())
            .await
    }

    /// `GET /ver_alunos_modulo/{moduleId}`
    pub async fn module_members(&self, module_id: i64) -> Option<Dispatch> {
        self.dispatcher
            .dispatch(
                &Endpoint::new(["ver_alunos_modulo".to_owned(), module_id.to_string()]),
                RequestOptions::get(),
            )
            .await
    }

    // ── Grade records ────────────────────────────────────────────────

    /// `GET /obter_dados_modulo_aluno/{alunoId}/{moduleId}`
    pub async fn grade_record(&self, aluno_id: i64, module_id: i64) -> Option<Dispatch> {
        self.dispatcher
            .dispatch(
                &grade_endpoint("obter_dados_modulo_aluno", aluno_id, module_id),
                RequestOptions::get(),
            )
            .await
    }

    /// `PUT /editar_informacoes_modulo/{alunoId}/{moduleId}` (partial)
    pub async fn update_grade_record(
        &self,
        aluno_id: i64,
        module_id: i64,
        update: &GradeUpdate,
    ) -> Option<Dispatch> {
        debug!(aluno_id, module_id, "updating grade record");
        self.send_json(
            grade_endpoint("editar_informacoes_modulo", aluno_id, module_id),
            RequestOptions::put(),
            update,
        )
        .await
    }

    /// `POST /adicionar_modulo_aluno`
    pub async fn assign_grade_record(&self, assignment: &GradeAssignment) -> Option<Dispatch> {
        debug!(
            aluno_id = assignment.aluno_id,
            module_id = assignment.module_id,
            "assigning grade record"
        );
        self.send_json(
            Endpoint::new(["adicionar_modulo_aluno"]),
            RequestOptions::post(),
            assignment,
        )
        .await
    }

    /// `PUT /atualizar_informacoes_modulo/{alunoId}/{moduleId}` (full)
    pub async fn replace_grade_record(
        &self,
        aluno_id: i64,
        module_id: i64,
        values: &GradeValues,
    ) -> Option<Dispatch> {
        debug!(aluno_id, module_id, "replacing grade record");
        self.send_json(
            grade_endpoint("atualizar_informacoes_modulo", aluno_id, module_id),
            RequestOptions::put(),
            values,
        )
        .await
    }

    // ── Helpers ──────────────────────────────────────────────────────

    async fn send_json(
        &self,
        endpoint: Endpoint,
        options: RequestOptions,
        body: &(impl Serialize + Sync),
    ) -> Option<Dispatch> {
        match options.json(body) {
            Ok(options) => self.dispatcher.dispatch(&endpoint, options).await,
            Err(e) => {
                error!(error = %e, %endpoint, "failed to encode request body");
                Some(Dispatch::connection_error())
            }
        }
    }
}

fn grade_endpoint(route: &str, aluno_id: i64, module_id: i64) -> Endpoint {
    Endpoint::new([route.to_owned(), aluno_id.to_string(), module_id.to_string()])
}
