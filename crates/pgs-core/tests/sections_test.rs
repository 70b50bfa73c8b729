#![allow(clippy::unwrap_used)]
// Section controller flows against a wiremock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pgs_api::transport::{TlsMode, TransportConfig};
use pgs_api::{CONNECTION_ERROR_MESSAGE, GradeClient};
use pgs_core::view::{Banner, StudentCard};
use pgs_core::{
    Control, CoreError, Fragment, GradeBand, Layout, Page, Sections, Selection, SessionConfig,
    Settled, Severity, Timing, View,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn timing() -> Timing {
    Timing {
        dismiss_delay: Duration::from_secs(5),
        refresh_delay: Duration::from_millis(50),
    }
}

fn sections_for(base_url: Url, layout: Layout) -> Sections {
    let client = GradeClient::new(base_url, &TransportConfig::default()).unwrap();
    Sections::new(client, Page::new(), layout, timing())
}

async fn setup(layout: Layout) -> (MockServer, Sections) {
    let server = MockServer::start().await;
    let sections = sections_for(Url::parse(&server.uri()).unwrap(), layout);
    (server, sections)
}

fn unreachable_base() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn banner(sections: &Sections, region: &str) -> Option<Banner> {
    sections
        .page()
        .region(region)
        .and_then(|f| f.banner().cloned())
}

fn student_json(id: i64, nome: &str, matricula: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nome": nome,
        "numero_matricula": matricula,
        "data_matricula": "2024-02-01",
        "atestados": 1,
        "encaminhamento": "Psicopedagogia",
        "obs": null
    })
}

fn fill_add_form(sections: &Sections) {
    let form = &sections.layout().add_student;
    let page = sections.page();
    page.set_field(&form.nome, "  Ana Souza ");
    page.set_field(&form.numero_matricula, "2024001");
    page.set_field(&form.data_matricula, "2024-02-01");
    page.set_field(&form.atestados, "abc");
    page.set_field(&form.encaminhamento, "");
    page.set_field(&form.obs, "Sem observações");
}

// ── Students ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_required_fields_never_reach_network() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    sections
        .page()
        .set_field(&sections.layout().add_student.nome, "Ana");
    let settled = sections.add_student().await;

    assert_eq!(
        settled,
        Settled::Invalid("Por favor, preencha todos os campos obrigatórios.".into())
    );
    let banner = banner(&sections, "mensagemModal").unwrap();
    assert_eq!(banner.severity, Severity::Warning);
    assert_eq!(
        sections.page().control("btnAdicionarAluno"),
        Some(Control {
            label: "Adicionar".into(),
            disabled: false
        })
    );
}

#[tokio::test]
async fn test_add_student_resets_form_and_closes_modal_later() {
    let (server, sections) = setup(Layout::dashboard().with_view(View::Students)).await;

    Mock::given(method("POST"))
        .and(path("/adicionar_aluno"))
        .and(body_json(json!({
            "nome": "Ana Souza",
            "numero_matricula": "2024001",
            "data_matricula": "2024-02-01",
            "atestados": 0,
            "encaminhamento": "",
            "obs": "Sem observações"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            json!({ "message": "Aluno adicionado com sucesso em todos os módulos!" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let page = sections.page().clone();
    page.open_modal("addStudentModal");
    fill_add_form(&sections);

    let settled = sections.add_student().await;
    assert_eq!(settled, Settled::Success);

    let banner = banner(&sections, "mensagemModal").unwrap();
    assert_eq!(banner.severity, Severity::Success);
    assert_eq!(banner.text, "Aluno adicionado com sucesso em todos os módulos!");
    assert_eq!(page.field("nomeNovo"), "");
    assert_eq!(page.field("obsNovo"), "");
    assert_eq!(page.field("atestadosNovo"), "0");
    assert!(!page.control("btnAdicionarAluno").unwrap().disabled);

    // The modal stays open long enough to read the confirmation.
    assert!(page.is_modal_open("addStudentModal"));
    assert_eq!(page.reload_requests(), 0);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!page.is_modal_open("addStudentModal"));
    assert_eq!(page.reload_requests(), 1);
}

#[tokio::test]
async fn test_closed_page_skips_delayed_close() {
    let (server, sections) = setup(Layout::dashboard().with_view(View::Students)).await;

    Mock::given(method("POST"))
        .and(path("/adicionar_aluno"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let page = sections.page().clone();
    page.open_modal("addStudentModal");
    fill_add_form(&sections);
    assert!(sections.add_student().await.is_success());

    page.close();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(page.is_modal_open("addStudentModal"));
    assert_eq!(page.reload_requests(), 0);
}

#[tokio::test]
async fn test_business_error_is_shown_verbatim() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("DELETE"))
        .and(path("/excluir_aluno/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Aluno não encontrado." })),
        )
        .mount(&server)
        .await;

    let form = &sections.layout().delete_student;
    sections.page().set_field(&form.field, "999");
    let settled = sections.delete_student().await;

    assert_eq!(settled, Settled::Rejected("Aluno não encontrado.".into()));
    let banner = banner(&sections, &form.message).unwrap();
    assert_eq!(banner.severity, Severity::Danger);
    assert_eq!(banner.text, "Aluno não encontrado.");
    // Failed deletes keep the input for a retry.
    assert_eq!(sections.page().field(&form.field), "999");
}

#[tokio::test]
async fn test_transport_error_restores_control() {
    let sections = sections_for(unreachable_base(), Layout::dashboard());
    fill_add_form(&sections);

    let settled = sections.add_student().await;

    assert_eq!(settled, Settled::Unreachable(CONNECTION_ERROR_MESSAGE.into()));
    let banner = banner(&sections, "mensagemModal").unwrap();
    assert_eq!(banner.text, CONNECTION_ERROR_MESSAGE);
    assert_eq!(
        sections.page().control("btnAdicionarAluno"),
        Some(Control {
            label: "Adicionar".into(),
            disabled: false
        })
    );
    // Nothing was cleared.
    assert_eq!(sections.page().field("numeroMatriculaNovo"), "2024001");
}

#[tokio::test]
async fn test_control_is_busy_while_in_flight() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("POST"))
        .and(path("/adicionar_aluno"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "message": "ok" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    fill_add_form(&sections);
    let task = tokio::spawn({
        let sections = sections.clone();
        async move { sections.add_student().await }
    });

    while !sections.client().dispatcher().is_in_flight() {
        tokio::task::yield_now().await;
    }
    assert_eq!(
        sections.page().control("btnAdicionarAluno"),
        Some(Control {
            label: "Adicionando...".into(),
            disabled: true
        })
    );

    // A second action while the first is outstanding is dropped.
    assert_eq!(sections.list_modules().await, Settled::Dropped);
    assert_eq!(sections.page().region("listaModulos"), Some(Fragment::Empty));

    assert_eq!(task.await.unwrap(), Settled::Success);
    assert_eq!(
        sections.page().control("btnAdicionarAluno"),
        Some(Control {
            label: "Adicionar".into(),
            disabled: false
        })
    );
}

#[tokio::test]
async fn test_edit_student_puts_every_field() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("PUT"))
        .and(path("/editar_aluno/2024001"))
        .and(body_json(json!({
            "nome": "Ana Souza",
            "data_matricula": "2024-02-01",
            "atestados": 2,
            "encaminhamento": "",
            "obs": "Transferida do turno da manhã"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "message": "Informações do aluno atualizadas com sucesso!" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let form = &sections.layout().edit_student;
    let page = sections.page();
    page.set_field(&form.numero_matricula, " 2024001 ");
    page.set_field(&form.nome, "Ana Souza ");
    page.set_field(&form.data_matricula, "2024-02-01");
    page.set_field(&form.atestados, "2");
    page.set_field(&form.encaminhamento, "  ");
    page.set_field(&form.obs, "Transferida do turno da manhã");

    assert_eq!(sections.edit_student().await, Settled::Success);

    let banner = banner(&sections, &form.message).unwrap();
    assert_eq!(banner.severity, Severity::Success);
    assert_eq!(banner.text, "Informações do aluno atualizadas com sucesso!");
    assert_eq!(
        page.control(&form.submit.id),
        Some(Control {
            label: "Salvar".into(),
            disabled: false
        })
    );
}

#[tokio::test]
async fn test_edit_student_requires_matricula_nome_and_data() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let form = &sections.layout().edit_student;
    let page = sections.page();
    page.set_field(&form.numero_matricula, "2024001");
    page.set_field(&form.nome, "Ana Souza");
    page.set_field(&form.obs, "Sem data");

    assert_eq!(
        sections.edit_student().await,
        Settled::Invalid("Por favor, preencha todos os campos obrigatórios.".into())
    );
    assert_eq!(
        banner(&sections, &form.message).unwrap().severity,
        Severity::Warning
    );

    page.set_field(&form.data_matricula, "2024-02-01");
    page.set_field(&form.numero_matricula, "   ");
    assert!(matches!(sections.edit_student().await, Settled::Invalid(_)));
}

#[tokio::test]
async fn test_edit_student_rejection_restores_control() {
    let (server, sections) = setup(Layout::tabs()).await;

    Mock::given(method("PUT"))
        .and(path("/editar_aluno/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Aluno não encontrado." })),
        )
        .mount(&server)
        .await;

    let form = &sections.layout().edit_student;
    let page = sections.page();
    page.set_field(&form.numero_matricula, "404");
    page.set_field(&form.nome, "Ninguém");
    page.set_field(&form.data_matricula, "2024-02-01");

    assert_eq!(
        sections.edit_student().await,
        Settled::Rejected("Aluno não encontrado.".into())
    );
    assert_eq!(banner(&sections, &form.message).unwrap().text, "Aluno não encontrado.");
    assert_eq!(
        page.control(&form.submit.id),
        Some(Control {
            label: "Salvar Alterações".into(),
            disabled: false
        })
    );
    // The form keeps its input for a retry.
    assert_eq!(page.field(&form.nome), "Ninguém");
}

// ── Search ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_without_terms_is_invalid() {
    let (_server, sections) = setup(Layout::dashboard()).await;
    let settled = sections.search_students().await;
    assert!(matches!(settled, Settled::Invalid(_)));
}

#[tokio::test]
async fn test_search_zero_results_shows_info_only() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("GET"))
        .and(path("/pesquisar_aluno"))
        .and(query_param("nome", "Zé"))
        .and(query_param("numero_matricula", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let form = &sections.layout().search;
    sections.page().set_field(&form.nome, "Zé");
    assert_eq!(sections.search_students().await, Settled::Success);

    let banner = banner(&sections, &form.message).unwrap();
    assert_eq!(banner.severity, Severity::Info);
    assert_eq!(sections.page().region(&form.results), Some(Fragment::Empty));
}

#[tokio::test]
async fn test_search_single_result_renders_card() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("GET"))
        .and(path("/pesquisar_aluno"))
        .and(query_param("numero_matricula", "2024001"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([student_json(7, "Ana", "2024001")])),
        )
        .mount(&server)
        .await;

    let form = &sections.layout().search;
    sections.page().set_field(&form.numero_matricula, "2024001");
    assert_eq!(sections.search_students().await, Settled::Success);

    let Some(Fragment::StudentCard(card)) = sections.page().region(&form.results) else {
        panic!("expected a student card");
    };
    assert_eq!(
        card,
        StudentCard {
            id: Some(7),
            nome: "Ana".into(),
            numero_matricula: "2024001".into(),
            data_matricula: "01/02/2024".into(),
            atestados: 1,
            encaminhamento: "Psicopedagogia".into(),
            obs: "Não informado".into(),
        }
    );
    assert!(sections.page().region(&form.message).unwrap().is_empty());
}

#[tokio::test]
async fn test_search_many_results_renders_links() {
    let (server, sections) = setup(Layout::tabs()).await;

    Mock::given(method("GET"))
        .and(path("/pesquisar_aluno"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            student_json(3, "Ana Lima", "1"),
            student_json(4, "Ana Souza", "2"),
            student_json(9, "Anabela", "3"),
        ])))
        .mount(&server)
        .await;

    let form = &sections.layout().search;
    sections.page().set_field(&form.nome, "Ana");
    assert_eq!(sections.search_students().await, Settled::Success);

    let Some(Fragment::StudentList(links)) = sections.page().region(&form.results) else {
        panic!("expected a student list");
    };
    let hrefs: Vec<_> = links.iter().filter_map(|l| l.href.as_deref()).collect();
    assert_eq!(
        hrefs,
        ["/detalhes_aluno/3", "/detalhes_aluno/4", "/detalhes_aluno/9"]
    );
}

#[tokio::test]
async fn test_search_rejection_clears_results() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("GET"))
        .and(path("/pesquisar_aluno"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            json!({ "error": "Nenhum aluno encontrado com esse nome." }),
        ))
        .mount(&server)
        .await;

    let form = &sections.layout().search;
    sections.page().set_field(&form.nome, "Xy");
    let settled = sections.search_students().await;

    assert_eq!(
        settled,
        Settled::Rejected("Nenhum aluno encontrado com esse nome.".into())
    );
    assert_eq!(sections.page().region(&form.results), Some(Fragment::Empty));
}

#[tokio::test]
async fn test_show_student_fills_in_missing_id() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("GET"))
        .and(path("/detalhes_aluno_id/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nome": "Bia",
            "numero_matricula": "2024012",
            "data_matricula": "2024-03-10",
            "atestados": 0,
            "encaminhamento": null,
            "obs": "Monitora"
        })))
        .mount(&server)
        .await;

    assert_eq!(sections.show_student(12).await, Settled::Success);
    let Some(Fragment::StudentCard(card)) = sections.page().region("resultadoPesquisa") else {
        panic!("expected a student card");
    };
    assert_eq!(card.id, Some(12));
    assert_eq!(card.obs, "Monitora");
}

// ── Modules ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_member_table_bands_final_grades() {
    let (server, sections) = setup(Layout::dashboard()).await;

    let member = |id: i64, nota_final: f64| {
        json!({
            "id": id,
            "nome": format!("Aluno {id}"),
            "numero_matricula": id.to_string(),
            "faltas": 0,
            "nota_tutor": 0.0,
            "nota_avaliacao_regular": 0.0,
            "nota_recuperacao": 0.0,
            "nota_final": nota_final
        })
    };
    Mock::given(method("GET"))
        .and(path("/ver_alunos_modulo/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            member(1, 6.5),
            member(2, 7.0),
            member(3, 4.9),
        ])))
        .mount(&server)
        .await;

    assert_eq!(sections.list_module_members(3).await, Settled::Success);

    let Some(Fragment::MemberTable(rows)) = sections.page().region("alunosModulo") else {
        panic!("expected a member table");
    };
    let bands: Vec<_> = rows.iter().map(|r| r.band).collect();
    assert_eq!(
        bands,
        [GradeBand::Warning, GradeBand::Success, GradeBand::Danger]
    );
    assert_eq!(rows[0].selection, Selection::new(1, 3));
}

#[tokio::test]
async fn test_module_create_refreshes_listing_after_delay() {
    let (server, sections) = setup(Layout::tabs()).await;

    Mock::given(method("POST"))
        .and(path("/criar_modulo"))
        .and(body_json(json!({ "nome": "Matemática" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "message": "Módulo criado!" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listar_modulos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "nome": "Matemática" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let form = &sections.layout().create_module;
    sections.page().set_field(&form.field, " Matemática ");
    assert_eq!(sections.create_module().await, Settled::Success);
    assert_eq!(sections.page().field(&form.field), "");
    assert_eq!(sections.page().region("modulosLista"), Some(Fragment::Empty));

    tokio::time::sleep(Duration::from_millis(400)).await;
    let Some(Fragment::ModuleList(tiles)) = sections.page().region("modulosLista") else {
        panic!("expected the module list");
    };
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].nome, "Matemática");
}

#[tokio::test]
async fn test_empty_module_list_is_informational() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("GET"))
        .and(path("/listar_modulos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert_eq!(sections.list_modules().await, Settled::Success);
    let banner = banner(&sections, "listaModulos").unwrap();
    assert_eq!(banner.severity, Severity::Info);
}

#[tokio::test]
async fn test_unexpected_shape_is_a_connection_error() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("GET"))
        .and(path("/listar_modulos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "modulos": [] })))
        .mount(&server)
        .await;

    assert_eq!(
        sections.list_modules().await,
        Settled::Unreachable(CONNECTION_ERROR_MESSAGE.into())
    );
}

#[tokio::test]
async fn test_delete_module_relists_on_modules_view() {
    let (server, sections) = setup(Layout::tabs().with_view(View::Modules)).await;

    Mock::given(method("POST"))
        .and(path("/excluir_modulo"))
        .and(body_json(json!({ "nome": "Física" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Módulo excluído com sucesso!" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listar_modulos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "nome": "Álgebra" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let form = &sections.layout().delete_module;
    let page = sections.page();
    page.set_field(&form.field, " Física ");

    assert_eq!(sections.delete_module().await, Settled::Success);

    assert_eq!(page.field(&form.field), "");
    assert_eq!(
        banner(&sections, &form.message).unwrap().text,
        "Módulo excluído com sucesso!"
    );
    assert!(!page.control(&form.submit.id).unwrap().disabled);
    let Some(Fragment::ModuleList(tiles)) = page.region(&sections.layout().modules) else {
        panic!("expected the module list");
    };
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].nome, "Álgebra");
}

#[tokio::test]
async fn test_delete_module_off_modules_view_skips_relist() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("POST"))
        .and(path("/excluir_modulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listar_modulos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let form = &sections.layout().delete_module;
    sections.page().set_field(&form.field, "Física");
    assert_eq!(sections.delete_module().await, Settled::Success);
}

#[tokio::test]
async fn test_request_timeout_settles_as_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listar_modulos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut config = SessionConfig::new(Url::parse(&server.uri()).unwrap());
    config.timeout = Duration::from_millis(50);
    let sections = Sections::connect(&config).unwrap();

    assert_eq!(
        sections.list_modules().await,
        Settled::Unreachable(CONNECTION_ERROR_MESSAGE.into())
    );
    let banner = banner(&sections, &sections.layout().modules).unwrap();
    assert_eq!(banner.severity, Severity::Danger);
}

#[test]
fn test_unreadable_ca_cert_fails_client_setup() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = SessionConfig::new(Url::parse("https://localhost:5000").unwrap());
    config.tls = TlsMode::CustomCa(dir.path().join("missing-ca.pem"));

    let err = Sections::connect(&config).unwrap_err();
    assert!(matches!(err, CoreError::Client(pgs_api::Error::Tls(_))));
}

// ── Grade records ───────────────────────────────────────────────────

#[tokio::test]
async fn test_open_grade_record_fills_form() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("GET"))
        .and(path("/obter_dados_modulo_aluno/5/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nome": "Ana",
            "numero_matricula": "2024001",
            "faltas": 2,
            "nota_tutor": 8.0,
            "nota_avaliacao_regular": 6.5,
            "nota_recuperacao": 0.0,
            "nota_final": 7.25
        })))
        .mount(&server)
        .await;

    let selection = sections.open_grade_record(5, 3).await;
    assert_eq!(selection, Ok(Selection::new(5, 3)));

    let form = &sections.layout().grades;
    let page = sections.page();
    assert_eq!(page.field(&form.faltas), "2");
    assert_eq!(page.field(&form.nota_avaliacao_regular), "6.5");
    let Some(Fragment::GradeSheet(sheet)) = page.region(&form.sheet) else {
        panic!("expected the grade sheet");
    };
    assert_eq!(sheet.band, GradeBand::Success);
}

#[tokio::test]
async fn test_open_grade_record_failure_reports_rejection() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("GET"))
        .and(path("/obter_dados_modulo_aluno/5/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            json!({ "error": "Dados do módulo não encontrados para este aluno." }),
        ))
        .mount(&server)
        .await;

    assert_eq!(
        sections.open_grade_record(5, 99).await,
        Err(Settled::Rejected(
            "Dados do módulo não encontrados para este aluno.".into()
        ))
    );
    let form = &sections.layout().grades;
    assert_eq!(sections.page().region(&form.sheet), Some(Fragment::Empty));
    assert!(banner(&sections, &form.message).is_some());
}

#[tokio::test]
async fn test_open_grade_record_unreachable_is_not_a_rejection() {
    let sections = sections_for(unreachable_base(), Layout::dashboard());

    assert_eq!(
        sections.open_grade_record(5, 3).await,
        Err(Settled::Unreachable(CONNECTION_ERROR_MESSAGE.into()))
    );
    let form = &sections.layout().grades;
    assert_eq!(sections.page().region(&form.sheet), Some(Fragment::Empty));
}

#[tokio::test]
async fn test_partial_save_sends_only_filled_fields() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("PUT"))
        .and(path("/editar_informacoes_modulo/5/3"))
        .and(body_json(json!({ "faltas": 4 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "message": "Dados do módulo atualizados com sucesso!" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let form = &sections.layout().grades;
    sections.page().set_field(&form.faltas, " 4 ");
    let settled = sections.save_grade_record(&Selection::new(5, 3)).await;

    assert_eq!(settled, Settled::Success);
    assert_eq!(
        banner(&sections, &form.message).unwrap().text,
        "Dados do módulo atualizados com sucesso!"
    );
    assert_eq!(sections.page().field(&form.faltas), "");
}

#[tokio::test]
async fn test_save_with_nothing_filled_is_invalid() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let settled = sections.save_grade_record(&Selection::new(5, 3)).await;
    assert!(matches!(settled, Settled::Invalid(_)));
}

#[tokio::test]
async fn test_replace_requires_every_field() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("PUT"))
        .and(path("/atualizar_informacoes_modulo/5/3"))
        .and(body_json(json!({
            "faltas": 1,
            "nota_tutor": 7.5,
            "nota_avaliacao_regular": 8.0,
            "nota_recuperacao": 0.0,
            "nota_final": 7.8
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Atualizado" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let form = &sections.layout().grades;
    let page = sections.page();
    page.set_field(&form.faltas, "1");
    page.set_field(&form.nota_tutor, "7,5");
    page.set_field(&form.nota_avaliacao_regular, "8");
    let selection = Selection::new(5, 3);

    let settled = sections.replace_grade_record(&selection).await;
    assert_eq!(
        settled,
        Settled::Invalid("Por favor, preencha todos os campos.".into())
    );

    page.set_field(&form.nota_recuperacao, "0");
    page.set_field(&form.nota_final, "7.8");
    assert_eq!(
        sections.replace_grade_record(&selection).await,
        Settled::Success
    );
}

#[tokio::test]
async fn test_assign_posts_ids_with_values() {
    let (server, sections) = setup(Layout::dashboard()).await;

    Mock::given(method("POST"))
        .and(path("/adicionar_modulo_aluno"))
        .and(body_json(json!({
            "aluno_id": 5,
            "module_id": 3,
            "faltas": 0,
            "nota_tutor": 6.0,
            "nota_avaliacao_regular": 6.0,
            "nota_recuperacao": 5.0,
            "nota_final": 6.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            json!({ "message": "Dados do módulo adicionados ao aluno com sucesso!" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let form = &sections.layout().grades;
    let page = sections.page();
    for (field, value) in form.fields().into_iter().zip(["0", "6", "6", "5", "6"]) {
        page.set_field(field, value);
    }
    assert_eq!(
        sections.assign_grade_record(&Selection::new(5, 3)).await,
        Settled::Success
    );
}
