// ── Page layouts ──
//
// Names of every region, field, control, and modal the section
// controllers touch. The dashboard and tab-oriented pages share one set
// of controllers and differ only in these names.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::page::Page;

/// Which layout preset a page uses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LayoutPreset {
    #[default]
    Dashboard,
    Tabs,
}

/// What the hosting page is currently showing. Decides what a
/// successful create refreshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Students,
    Modules,
}

/// A button plus the label it shows while its request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub id: String,
    pub label: String,
    pub busy_label: String,
}

impl Submit {
    fn new(id: &str, label: &str, busy_label: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            busy_label: busy_label.into(),
        }
    }
}

/// Add or edit student form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentForm {
    pub message: String,
    pub modal: Option<String>,
    pub submit: Submit,
    pub nome: String,
    pub numero_matricula: String,
    pub data_matricula: String,
    pub atestados: String,
    pub encaminhamento: String,
    pub obs: String,
}

impl StudentForm {
    fn with_suffix(suffix: &str, message: &str, modal: Option<&str>, submit: Submit) -> Self {
        Self {
            message: message.into(),
            modal: modal.map(Into::into),
            submit,
            nome: format!("nome{suffix}"),
            numero_matricula: format!("numeroMatricula{suffix}"),
            data_matricula: format!("dataMatricula{suffix}"),
            atestados: format!("atestados{suffix}"),
            encaminhamento: format!("encaminhamento{suffix}"),
            obs: format!("obs{suffix}"),
        }
    }

    pub fn fields(&self) -> [&str; 6] {
        [
            self.nome.as_str(),
            self.numero_matricula.as_str(),
            self.data_matricula.as_str(),
            self.atestados.as_str(),
            self.encaminhamento.as_str(),
            self.obs.as_str(),
        ]
    }
}

/// Form with a single key field (delete student, create/delete module).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyForm {
    pub message: String,
    pub modal: Option<String>,
    pub submit: Submit,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub message: String,
    pub results: String,
    pub submit: Submit,
    pub numero_matricula: String,
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeForm {
    pub message: String,
    pub sheet: String,
    pub submit: Submit,
    pub faltas: String,
    pub nota_tutor: String,
    pub nota_avaliacao_regular: String,
    pub nota_recuperacao: String,
    pub nota_final: String,
}

impl GradeForm {
    pub fn fields(&self) -> [&str; 5] {
        [
            self.faltas.as_str(),
            self.nota_tutor.as_str(),
            self.nota_avaliacao_regular.as_str(),
            self.nota_recuperacao.as_str(),
            self.nota_final.as_str(),
        ]
    }
}

/// Every name the section controllers use on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub preset: LayoutPreset,
    pub view: View,
    pub add_student: StudentForm,
    pub edit_student: StudentForm,
    pub delete_student: KeyForm,
    pub search: SearchForm,
    pub create_module: KeyForm,
    pub delete_module: KeyForm,
    /// Region holding the module tiles.
    pub modules: String,
    /// Region holding the module membership table.
    pub members: String,
    pub grades: GradeForm,
}

impl Layout {
    /// Dashboard page: create forms live in modal dialogs.
    pub fn dashboard() -> Self {
        Self {
            preset: LayoutPreset::Dashboard,
            view: View::Home,
            add_student: StudentForm::with_suffix(
                "Novo",
                "mensagemModal",
                Some("addStudentModal"),
                Submit::new("btnAdicionarAluno", "Adicionar", "Adicionando..."),
            ),
            edit_student: StudentForm::with_suffix(
                "Editar",
                "mensagemEditarModal",
                Some("editStudentModal"),
                Submit::new("btnEditarAluno", "Salvar", "Salvando..."),
            ),
            delete_student: KeyForm {
                message: "mensagemExcluirModal".into(),
                modal: Some("deleteStudentModal".into()),
                submit: Submit::new("btnExcluirAluno", "Excluir", "Excluindo..."),
                field: "numeroMatriculaExcluir".into(),
            },
            search: SearchForm {
                message: "mensagemPesquisa".into(),
                results: "resultadoPesquisa".into(),
                submit: Submit::new("btnPesquisarAluno", "Pesquisar", "Pesquisando..."),
                numero_matricula: "numeroMatriculaPesquisa".into(),
                nome: "nomePesquisa".into(),
            },
            create_module: KeyForm {
                message: "mensagemModuloModal".into(),
                modal: Some("addModuleModal".into()),
                submit: Submit::new("btnCriarModulo", "Criar", "Criando..."),
                field: "nomeModulo".into(),
            },
            delete_module: KeyForm {
                message: "mensagemExcluirModuloModal".into(),
                modal: Some("deleteModuleModal".into()),
                submit: Submit::new("btnExcluirModulo", "Excluir", "Excluindo..."),
                field: "nomeModuloExcluir".into(),
            },
            modules: "listaModulos".into(),
            members: "alunosModulo".into(),
            grades: GradeForm {
                message: "mensagemNotasModal".into(),
                sheet: "dadosModuloAluno".into(),
                submit: Submit::new("btnSalvarNotas", "Salvar", "Salvando..."),
                faltas: "faltasEditar".into(),
                nota_tutor: "notaTutorEditar".into(),
                nota_avaliacao_regular: "notaAvaliacaoRegularEditar".into(),
                nota_recuperacao: "notaRecuperacaoEditar".into(),
                nota_final: "notaFinalEditar".into(),
            },
        }
    }

    /// Tab-oriented page: every form sits in its own tab, no modals.
    pub fn tabs() -> Self {
        Self {
            preset: LayoutPreset::Tabs,
            view: View::Modules,
            add_student: StudentForm::with_suffix(
                "",
                "mensagemAdicionar",
                None,
                Submit::new("btnAdicionar", "Adicionar Aluno", "Adicionando..."),
            ),
            edit_student: StudentForm::with_suffix(
                "Edicao",
                "mensagemEditar",
                None,
                Submit::new("btnEditar", "Salvar Alterações", "Salvando..."),
            ),
            delete_student: KeyForm {
                message: "mensagemExcluir".into(),
                modal: None,
                submit: Submit::new("btnExcluir", "Excluir Aluno", "Excluindo..."),
                field: "numeroMatriculaExclusao".into(),
            },
            search: SearchForm {
                message: "mensagemPesquisar".into(),
                results: "resultadoPesquisar".into(),
                submit: Submit::new("btnPesquisar", "Pesquisar", "Pesquisando..."),
                numero_matricula: "numeroMatriculaPesquisar".into(),
                nome: "nomePesquisar".into(),
            },
            create_module: KeyForm {
                message: "mensagemModulo".into(),
                modal: None,
                submit: Submit::new("btnCriarModulo", "Criar Módulo", "Criando..."),
                field: "nomeModulo".into(),
            },
            delete_module: KeyForm {
                message: "mensagemExcluirModulo".into(),
                modal: None,
                submit: Submit::new("btnExcluirModulo", "Excluir Módulo", "Excluindo..."),
                field: "nomeModuloExclusao".into(),
            },
            modules: "modulosLista".into(),
            members: "alunosModuloTabela".into(),
            grades: GradeForm {
                message: "mensagemNotas".into(),
                sheet: "detalhesNotas".into(),
                submit: Submit::new("btnSalvarNotas", "Salvar Notas", "Salvando..."),
                faltas: "faltas".into(),
                nota_tutor: "notaTutor".into(),
                nota_avaliacao_regular: "notaAvaliacaoRegular".into(),
                nota_recuperacao: "notaRecuperacao".into(),
                nota_final: "notaFinal".into(),
            },
        }
    }

    pub fn from_preset(preset: LayoutPreset) -> Self {
        match preset {
            LayoutPreset::Dashboard => Self::dashboard(),
            LayoutPreset::Tabs => Self::tabs(),
        }
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Every region id, in page order.
    pub fn regions(&self) -> Vec<&str> {
        vec![
            self.add_student.message.as_str(),
            self.edit_student.message.as_str(),
            self.delete_student.message.as_str(),
            self.search.message.as_str(),
            self.search.results.as_str(),
            self.create_module.message.as_str(),
            self.delete_module.message.as_str(),
            self.modules.as_str(),
            self.members.as_str(),
            self.grades.message.as_str(),
            self.grades.sheet.as_str(),
        ]
    }

    fn submits(&self) -> [&Submit; 7] {
        [
            &self.add_student.submit,
            &self.edit_student.submit,
            &self.delete_student.submit,
            &self.search.submit,
            &self.create_module.submit,
            &self.delete_module.submit,
            &self.grades.submit,
        ]
    }

    fn modals(&self) -> impl Iterator<Item = &str> {
        [
            &self.add_student.modal,
            &self.edit_student.modal,
            &self.delete_student.modal,
            &self.create_module.modal,
            &self.delete_module.modal,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
    }

    /// Mount every region and register every control and modal on `page`.
    pub fn mount(&self, page: &Page) {
        for region in self.regions() {
            page.mount(region);
        }
        for submit in self.submits() {
            page.add_control(&submit.id, &submit.label);
        }
        for modal in self.modals() {
            page.close_modal(modal);
        }
        page.set_field(&self.add_student.atestados, "0");
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::dashboard()
    }
}
